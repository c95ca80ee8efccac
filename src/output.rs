use crate::dom::DomEvent;
use crate::error::ErrorPayload;
use crate::picker::PickOutcome;
use crate::types::DomSnapshot;
use serde::{Deserialize, Serialize};

/// Schema version for output payloads.
pub const RUIO_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RuioOutput {
    Paint(PaintOutput),
    Pick(PickOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintOutput {
    pub version: String,
    pub root: String,
    pub depth: u32,
    pub enabled: bool,
    /// Keys of elements carrying the border marker after painting.
    #[serde(default)]
    pub bordered: Vec<String>,
    pub applied: usize,
    pub cleared: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom: Option<DomSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickOutput {
    pub version: String,
    pub root: String,
    pub depth: u32,
    /// Key of the picked element, if the session resolved.
    pub selected: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
    /// Document listeners still installed after the overlay was torn down.
    pub listeners_after_teardown: usize,
    #[serde(default)]
    pub bordered: Vec<String>,
}

/// One replayed event and what it did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event: DomEvent,
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Ignored,
    Hovered,
    Suppressed,
    Selected,
    Cancelled,
}

impl From<PickOutcome> for OutcomeKind {
    fn from(outcome: PickOutcome) -> Self {
        match outcome {
            PickOutcome::Ignored => OutcomeKind::Ignored,
            PickOutcome::Hovered { .. } => OutcomeKind::Hovered,
            PickOutcome::Suppressed => OutcomeKind::Suppressed,
            PickOutcome::Selected(_) => OutcomeKind::Selected,
            PickOutcome::Cancelled => OutcomeKind::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    pub message: Option<String>,
    pub error: ErrorPayload,
}
