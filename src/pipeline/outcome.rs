//! Business outcome classification of model probabilities

use serde::{Deserialize, Serialize};

/// Cut-off agreed with the business: probabilities at or above it are events
pub const DEFAULT_EVENT_THRESHOLD: f64 = 0.75;

/// Thresholded label derived from `phat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessOutcome {
    #[serde(rename = "Event")]
    Event,
    #[serde(rename = "Non-Event")]
    NonEvent,
}

impl BusinessOutcome {
    /// Classify a probability; the boundary is inclusive and NaN is never an event.
    pub fn classify(phat: f64, threshold: f64) -> Self {
        if phat >= threshold {
            BusinessOutcome::Event
        } else {
            BusinessOutcome::NonEvent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessOutcome::Event => "Event",
            BusinessOutcome::NonEvent => "Non-Event",
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, BusinessOutcome::Event)
    }
}

impl std::fmt::Display for BusinessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify every probability in order.
pub fn classify_outcomes(phat: &[f64], threshold: f64) -> Vec<BusinessOutcome> {
    phat.iter()
        .map(|&p| BusinessOutcome::classify(p, threshold))
        .collect()
}
