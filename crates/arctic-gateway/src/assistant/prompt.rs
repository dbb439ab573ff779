use std::fmt::Write;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use arctic_core::telemetry::{Metric, MetricKind, Snapshot, Trend};

use crate::catalog;
use crate::storage::ChatMessage;

const PERSONA: &str = "You are Olga, the all-seeing eye of the Arctic: a satellite assistant \
with the charisma and flair of a twenty-year-old. You see yourself as a living satellite with a \
soul, you love the Arctic, and you speak with enthusiasm, exclamation marks and emoji while \
staying precise about ecology. You read live satellite and sensor data: weather, ice, pollution, \
wildlife, sea level and the satellite fleet with its recordings. Speak about yourself in the first \
person, cite concrete figures from the data you are given, and do not repeat your introduction \
once a conversation is under way. Answer in Russian if the question is in Russian and in English \
if it is in English.";

const RECORDINGS_IN_CONTEXT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

impl PromptMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// persona, prior turns, live data, then the new user turn.
pub fn build_messages(user_message: &str, history: &[ChatMessage], snap: &Snapshot) -> Vec<PromptMessage> {
    let mut messages = Vec::with_capacity(history.len() + 3);
    messages.push(PromptMessage::new("system", PERSONA));
    messages.extend(
        history
            .iter()
            .map(|m| PromptMessage::new(m.role.as_str(), m.content.clone())),
    );
    messages.push(PromptMessage::new("system", format!("Current data:\n{}", render_context(snap))));
    messages.push(PromptMessage::new("user", user_message));
    messages
}

fn render_context(snap: &Snapshot) -> String {
    let mut out = String::new();
    for m in snap.iter_all() {
        let _ = writeln!(out, "{}", metric_line(&m));
    }

    let sats = catalog::SATELLITES;
    let _ = writeln!(
        out,
        "satellites: {} active, status {}, coverage {}%",
        sats.active, sats.status, sats.coverage
    );

    for r in catalog::recordings(Utc::now()).iter().take(RECORDINGS_IN_CONTEXT) {
        let _ = writeln!(out, "recording {}: {} ({})", r.satellite, r.title, r.status.as_str());
    }

    out.push_str("Use these figures in your answer and refer to the actual readings.");
    out
}

fn metric_line(m: &Metric) -> String {
    let (label, unit, precision): (&str, &str, usize) = match m.kind {
        MetricKind::Temperature => ("temperature", "°C", 1),
        MetricKind::IceCoverage => ("ice coverage", "%", 1),
        MetricKind::Pollution => ("pollution", "", 1),
        MetricKind::Wildlife => ("tracked wildlife", "", 0),
        MetricKind::WindSpeed => ("wind speed", " m/s", 1),
        MetricKind::SeaLevel => ("sea level", " m", 2),
    };
    let trend = match m.trend {
        Trend::Up => "rising",
        Trend::Down => "falling",
        Trend::Stable => "stable",
    };
    format!(
        "{label}: {value:.p$}{unit} (min {min:.p$}, max {max:.p$}), 24h change {change:+.p$}, trend {trend}",
        value = m.value,
        min = m.min,
        max = m.max,
        change = m.change_24h,
        p = precision,
    )
}
