use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use smartroute_core::intent::{
    bilingual_reply, navigation_reply, time_reply, STOP_ACKNOWLEDGEMENT,
};
use smartroute_core::{
    build_prompt, classify_intent, translate, CommandContext, Intent, Language, ProviderError,
};
use smartroute_observability::{AppMetrics, Provider};
use tracing::{info, instrument, warn};

use crate::llm::OllamaClient;
use crate::weather::WeatherService;

/// Routes a spoken command to exactly one handler.
#[derive(Clone)]
pub struct AssistantAgent {
    weather: WeatherService,
    generator: OllamaClient,
    metrics: Arc<AppMetrics>,
}

impl AssistantAgent {
    pub fn new(weather: WeatherService, generator: OllamaClient, metrics: Arc<AppMetrics>) -> Self {
        Self {
            weather,
            generator,
            metrics,
        }
    }

    pub fn weather(&self) -> &WeatherService {
        &self.weather
    }

    pub fn generator(&self) -> &OllamaClient {
        &self.generator
    }

    /// Only the text-generation fallback can fail; every other handler answers
    /// with a fixed or locally built line.
    #[instrument(skip(self, context))]
    pub async fn process(
        &self,
        command: &str,
        context: &CommandContext,
    ) -> Result<String, ProviderError> {
        let started = Instant::now();
        self.metrics.inc_command();

        let intent = classify_intent(command);
        let reply = match intent {
            Intent::Navigation => Ok(navigation_reply(command)),
            Intent::Stop => Ok(STOP_ACKNOWLEDGEMENT.to_string()),
            Intent::Time => Ok(time_reply(Local::now().time())),
            Intent::Weather => Ok(self.weather.respond(command, context).await),
            Intent::Bilingual => Ok(bilingual_reply(command).to_string()),
            Intent::General => {
                self.metrics.inc_text_generation();
                self.generator
                    .generate(&build_prompt(command, context))
                    .await
            }
        };

        self.metrics.observe_latency(started.elapsed());
        match &reply {
            Ok(text) => info!(intent = intent.as_code(), chars = text.len(), "command handled"),
            Err(error) => {
                self.metrics.inc_provider_failure(Provider::TextGeneration);
                warn!(intent = intent.as_code(), error = %error, "command failed");
            }
        }
        reply
    }

    pub fn translate(&self, text: &str, target: Language) -> String {
        translate(text, target)
    }
}
