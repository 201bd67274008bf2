//! Inlet Cleaner crate - transcript normalization pipeline.
//!
//! Turns raw dictation transcripts into readable text through five pure
//! stages applied in fixed order:
//!
//! 1. `filler` - remove spoken filler words and disfluency runs
//! 2. `correction` - resolve mid-sentence self-corrections
//! 3. `punctuation` - normalize punctuation and terminal marks
//! 4. `structure` - break detected enumerations into lines
//! 5. `cleanup` - final whitespace and separator tidy
//!
//! Every stage is a total function over arbitrary input; `clean_text` is
//! deterministic and idempotent.

pub mod cleanup;
pub mod correction;
pub mod filler;
pub mod punctuation;
pub mod structure;

/// A named transform stage in the cleaning pipeline.
pub struct CleanStage {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

static STAGES: [CleanStage; 5] = [
    CleanStage {
        name: "filler",
        apply: filler::apply,
    },
    CleanStage {
        name: "correction",
        apply: correction::apply,
    },
    CleanStage {
        name: "punctuation",
        apply: punctuation::apply,
    },
    CleanStage {
        name: "structure",
        apply: structure::apply,
    },
    CleanStage {
        name: "cleanup",
        apply: cleanup::apply,
    },
];

/// The ordered list of pipeline stages.
pub fn stages() -> &'static [CleanStage] {
    &STAGES
}

/// Clean a raw transcript.
///
/// Empty or whitespace-only input short-circuits to an empty string without
/// invoking the stages.
pub fn clean_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    stages()
        .iter()
        .fold(raw.to_string(), |text, stage| (stage.apply)(&text))
}
