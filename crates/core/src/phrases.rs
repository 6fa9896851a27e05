use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[serde(alias = "en")]
    English,
    #[serde(alias = "te", alias = "తెలుగు")]
    Telugu,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::English),
            "te" | "telugu" | "తెలుగు" => Some(Self::Telugu),
            _ => None,
        }
    }
}

/// Navigation phrases as `(english, telugu)`, matched in this order.
pub const PHRASE_TABLE: [(&str, &str); 8] = [
    ("take left", "ఎడమవైపు తీసుకో"),
    ("take right", "కుడివైపు తీసుకో"),
    ("go straight", "ముందుకు వెళ్లు"),
    ("stop", "నిలిపి వేయి"),
    ("turn around", "తిరిగి వెళ్లు"),
    ("destination reached", "గమ్యం చేరుకున్నారు"),
    ("wrong turn", "తప్పు మలుపు"),
    ("recalculating route", "మార్గం తిరిగి లెక్కిస్తున్నాను"),
];

/// Translates `text` into `target` by substring lookup against the phrase table.
/// Text that matches nothing comes back unchanged.
pub fn translate(text: &str, target: Language) -> String {
    let lower = text.to_lowercase();

    PHRASE_TABLE
        .iter()
        .find_map(|(english, telugu)| {
            let (source, translated) = match target {
                Language::Telugu => (english, telugu),
                Language::English => (telugu, english),
            };
            lower
                .contains(source.to_lowercase().as_str())
                .then(|| translated.to_string())
        })
        .unwrap_or_else(|| text.to_string())
}
