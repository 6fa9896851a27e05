use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Upstream services whose failures are counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Routing,
    Geocoding,
    Weather,
    TextGeneration,
}

#[derive(Debug, Default)]
struct ProviderCounters {
    routing: AtomicU64,
    geocoding: AtomicU64,
    weather: AtomicU64,
    text_generation: AtomicU64,
}

impl ProviderCounters {
    fn counter(&self, provider: Provider) -> &AtomicU64 {
        match provider {
            Provider::Routing => &self.routing,
            Provider::Geocoding => &self.geocoding,
            Provider::Weather => &self.weather,
            Provider::TextGeneration => &self.text_generation,
        }
    }

    fn snapshot(&self) -> ProviderFailures {
        ProviderFailures {
            routing: self.routing.load(Ordering::Relaxed),
            geocoding: self.geocoding.load(Ordering::Relaxed),
            weather: self.weather.load(Ordering::Relaxed),
            text_generation: self.text_generation.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Default)]
pub struct AppMetrics {
    commands_total: AtomicU64,
    navigation_requests_total: AtomicU64,
    text_generation_total: AtomicU64,
    provider_failures: ProviderCounters,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderFailures {
    pub routing: u64,
    pub geocoding: u64,
    pub weather: u64,
    pub text_generation: u64,
}

impl ProviderFailures {
    pub fn total(&self) -> u64 {
        self.routing + self.geocoding + self.weather + self.text_generation
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub commands_total: u64,
    pub navigation_requests_total: u64,
    pub text_generation_total: u64,
    pub provider_failures_total: u64,
    pub provider_failures: ProviderFailures,
    pub avg_command_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_command(&self) {
        self.commands_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_navigation(&self) {
        self.navigation_requests_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_text_generation(&self) {
        self.text_generation_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_provider_failure(&self, provider: Provider) {
        self.provider_failures
            .counter(provider)
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let commands = self.commands_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);
        let provider_failures = self.provider_failures.snapshot();

        MetricsSnapshot {
            commands_total: commands,
            navigation_requests_total: self.navigation_requests_total.load(Ordering::Relaxed),
            text_generation_total: self.text_generation_total.load(Ordering::Relaxed),
            provider_failures_total: provider_failures.total(),
            provider_failures,
            avg_command_latency_millis: if commands == 0 {
                0.0
            } else {
                latency as f64 / commands as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,smartroute_api=info,smartroute_agents=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
