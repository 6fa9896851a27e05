/// Renders a provider duration in seconds as `"{h} hr {m} min"`, or `"{m} min"` under an hour.
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;

    if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else {
        format!("{minutes} min")
    }
}

/// Renders a provider distance in meters, switching to kilometers at 1000 m.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", round_half_up(meters / 1000.0, 1))
    } else {
        format!("{:.0} m", round_half_up(meters, 0))
    }
}

/// Rounds to `places` decimals, halves away from zero.
pub fn round_half_up(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(3661.0), "1 hr 1 min");
        assert_eq!(format_duration(59.0), "0 min");
        assert_eq!(format_duration(7200.0), "2 hr 0 min");
        assert_eq!(format_duration(1250.7), "20 min");
    }

    #[test]
    fn distances() {
        assert_eq!(format_distance(950.0), "950 m");
        assert_eq!(format_distance(1500.0), "1.5 km");
        assert_eq!(format_distance(12_345.0), "12.3 km");
    }

    #[test]
    fn sub_kilometer_rounding_stays_in_meters() {
        assert_eq!(format_distance(999.96), "1000 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
    }

    #[test]
    fn exact_halves_round_up() {
        assert_eq!(format_distance(1250.0), "1.3 km");
        assert_eq!(format_distance(12.5), "13 m");
        assert_eq!(format_distance(2.5), "3 m");
        assert_eq!(round_half_up(31.25, 1), 31.3);
    }
}
