//! Confirmation escalation for low-confidence classifications.
//!
//! Results below the confidence threshold are wrapped in a
//! [`ConfirmationRequest`] carrying the proposed intent and a short list
//! of alternatives for the user to pick from.

use tracing::debug;

use crate::classifier;
use crate::types::{Classification, Intent, IntentKey};

/// Routing outcome for one piece of input.
#[derive(Debug)]
pub enum Dispatch {
    /// Confident enough to process directly.
    Immediate(Classification),
    /// Too uncertain; the user picks from the offered options.
    NeedsChoice(ConfirmationRequest),
}

/// A pending request for the user to confirm or override an intent.
#[derive(Debug)]
pub struct ConfirmationRequest {
    /// The trimmed input, kept for processing after the choice.
    pub input: String,
    /// The classifier's best guess.
    pub proposed: Classification,
    /// Choices to present, best guess first.
    pub options: Vec<&'static Intent>,
}

impl ConfirmationRequest {
    fn new(input: &str, proposed: Classification) -> Self {
        let alternatives = proposed.intent.alternatives();
        let mut options = Vec::with_capacity(1 + alternatives.len());
        options.push(proposed.intent.info());
        options.extend(alternatives.iter().map(|key| key.info()));
        Self {
            input: input.to_string(),
            proposed,
            options,
        }
    }

    /// Resolve the request with the user's choice.
    ///
    /// Any catalog intent is accepted, not just the offered options. The
    /// produced result carries full confidence and never re-escalates.
    pub fn confirm(self, choice: IntentKey) -> Classification {
        debug!(intent = %choice, "Confirmation resolved");
        Classification::confirmed(choice)
    }
}

/// Classify input and decide whether it can be dispatched directly.
///
/// Returns `None` when the input is empty or whitespace-only.
pub fn route(input: &str) -> Option<Dispatch> {
    let result = classifier::classify(input)?;
    if result.needs_confirmation() {
        debug!(
            intent = %result.intent,
            confidence = result.confidence,
            "Escalating to confirmation"
        );
        let request = ConfirmationRequest::new(input.trim(), result);
        return Some(Dispatch::NeedsChoice(request));
    }
    Some(Dispatch::Immediate(result))
}
