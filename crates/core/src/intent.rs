use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::CommandContext;
use crate::models::Intent;

/// Telugu for "where to".
pub const WHERE_TO_MARKER: &str = "ఎక్కడికి";
/// Telugu for "route".
pub const ROUTE_MARKER: &str = "మార్గం";

pub const STOP_ACKNOWLEDGEMENT: &str = "Stopped. How else can I help you?";

const WHERE_TO_REPLY: &str = "మీరు ఎక్కడికి వెళ్లాలనుకుంటున్నారు? (Where do you want to go?)";
const ROUTE_REPLY: &str = "మీకు మార్గం చూపిస్తాను. (I'll show you the route.)";
const GENERIC_TELUGU_REPLY: &str = "నేను మీకు సహాయం చేయగలను. (I can help you.)";

const PERSONA: &str = "You are SmartRoute Buddy, a helpful voice assistant with Telugu language support. Provide concise, friendly responses suitable for voice output. Keep responses under 100 words.";
const CLOSING_INSTRUCTION: &str =
    "Please provide a helpful, concise response suitable for voice output.";

/// Evaluated top to bottom; the first rule with a matching needle decides the intent.
const INTENT_RULES: [(Intent, &[&str]); 5] = [
    (Intent::Navigation, &["take me to", "navigate to"]),
    (Intent::Stop, &["stop", "cancel"]),
    (Intent::Time, &["time"]),
    (Intent::Weather, &["weather"]),
    (Intent::Bilingual, &[WHERE_TO_MARKER, ROUTE_MARKER]),
];

static NAVIGATION_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(take me to|navigate to)").expect("valid navigation regex"));

pub fn classify_intent(command: &str) -> Intent {
    let lower = command.to_lowercase();

    INTENT_RULES
        .iter()
        .find(|(_, needles)| contains_any(&lower, needles))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}

pub fn extract_destination(command: &str) -> String {
    NAVIGATION_PHRASE.replace_all(command, "").trim().to_string()
}

pub fn navigation_reply(command: &str) -> String {
    format!(
        "I'll help you navigate to {}. Let me get the route for you.",
        extract_destination(command)
    )
}

pub fn time_reply(now: NaiveTime) -> String {
    format!("The current time is {}", now.format("%H:%M"))
}

pub fn bilingual_reply(command: &str) -> &'static str {
    if command.contains(WHERE_TO_MARKER) {
        WHERE_TO_REPLY
    } else if command.contains(ROUTE_MARKER) {
        ROUTE_REPLY
    } else {
        GENERIC_TELUGU_REPLY
    }
}

pub fn build_prompt(command: &str, context: &CommandContext) -> String {
    let mut prompt = format!("{PERSONA}\n\nUser command: {command}\n");
    if !context.is_empty() {
        prompt.push_str(&format!("Context: {}\n", context.render()));
    }
    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
