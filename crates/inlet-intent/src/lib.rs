//! Intent classification for dropped-in text and URLs.
//!
//! Routes each input to one of eight fixed intents through a two-level
//! waterfall: deterministic URL rules first, then content heuristics.
//! Low-confidence results are escalated to user confirmation instead of
//! being dispatched silently.

pub mod classifier;
pub mod confirmation;
pub mod types;

pub use classifier::classify;
pub use confirmation::{route, ConfirmationRequest, Dispatch};
pub use types::{
    catalog, Classification, ClassificationLevel, Intent, IntentKey, CONFIRM_THRESHOLD,
};
