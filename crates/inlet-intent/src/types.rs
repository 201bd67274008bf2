//! Core types for intent classification.
//!
//! Defines the fixed intent catalog, classification results, and the
//! confidence threshold shared by the waterfall and the confirmation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence below which a classification is escalated to the user.
pub const CONFIRM_THRESHOLD: f32 = 0.85;

// =============================================================================
// Intent catalog
// =============================================================================

/// The eight intents an input can be routed to.
///
/// Wire keys are stable identifiers shared with downstream pipelines;
/// `DeepSummary` deliberately serializes as `note`, `ArticleFormat` as
/// `article`, and `StudyPack` as `study`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKey {
    #[serde(rename = "bookmark")]
    Bookmark,
    #[serde(rename = "readlater")]
    ReadLater,
    #[serde(rename = "note")]
    DeepSummary,
    #[serde(rename = "inspiration")]
    Inspiration,
    #[serde(rename = "article")]
    ArticleFormat,
    #[serde(rename = "study")]
    StudyPack,
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "meeting")]
    Meeting,
}

impl fmt::Display for IntentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentKey::Bookmark => write!(f, "bookmark"),
            IntentKey::ReadLater => write!(f, "readlater"),
            IntentKey::DeepSummary => write!(f, "note"),
            IntentKey::Inspiration => write!(f, "inspiration"),
            IntentKey::ArticleFormat => write!(f, "article"),
            IntentKey::StudyPack => write!(f, "study"),
            IntentKey::Todo => write!(f, "todo"),
            IntentKey::Meeting => write!(f, "meeting"),
        }
    }
}

impl std::str::FromStr for IntentKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bookmark" => Ok(IntentKey::Bookmark),
            "readlater" => Ok(IntentKey::ReadLater),
            "note" => Ok(IntentKey::DeepSummary),
            "inspiration" => Ok(IntentKey::Inspiration),
            "article" => Ok(IntentKey::ArticleFormat),
            "study" => Ok(IntentKey::StudyPack),
            "todo" => Ok(IntentKey::Todo),
            "meeting" => Ok(IntentKey::Meeting),
            _ => Err(format!("Unknown intent key: {}", s)),
        }
    }
}

/// A catalog record describing how an intent is presented and processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Intent {
    pub key: IntentKey,
    /// Emoji-prefixed display label.
    pub label: &'static str,
    /// Accent color as a hex string.
    pub color: &'static str,
    /// Downstream pipeline identifier (camelCase, external contract).
    pub pipeline: &'static str,
}

/// The fixed catalog, in presentation order.
static CATALOG: [Intent; 8] = [
    Intent {
        key: IntentKey::Bookmark,
        label: "📌 书签",
        color: "#f59e0b",
        pipeline: "bookmark",
    },
    Intent {
        key: IntentKey::ReadLater,
        label: "📖 稍后阅读",
        color: "#06b6d4",
        pipeline: "readlater",
    },
    Intent {
        key: IntentKey::DeepSummary,
        label: "📝 深度总结",
        color: "#3b82f6",
        pipeline: "deepSummary",
    },
    Intent {
        key: IntentKey::Inspiration,
        label: "💡 灵感",
        color: "#a78bfa",
        pipeline: "inspiration",
    },
    Intent {
        key: IntentKey::ArticleFormat,
        label: "✍️ 文章排版",
        color: "#10b981",
        pipeline: "articleFormat",
    },
    Intent {
        key: IntentKey::StudyPack,
        label: "🎓 学习包",
        color: "#f472b6",
        pipeline: "studyPack",
    },
    Intent {
        key: IntentKey::Todo,
        label: "📋 待办事项",
        color: "#fb923c",
        pipeline: "todo",
    },
    Intent {
        key: IntentKey::Meeting,
        label: "📋 会议纪要",
        color: "#38bdf8",
        pipeline: "meeting",
    },
];

/// All catalog records, in presentation order.
pub fn catalog() -> &'static [Intent] {
    &CATALOG
}

impl IntentKey {
    /// Catalog record for this intent.
    pub fn info(self) -> &'static Intent {
        match self {
            IntentKey::Bookmark => &CATALOG[0],
            IntentKey::ReadLater => &CATALOG[1],
            IntentKey::DeepSummary => &CATALOG[2],
            IntentKey::Inspiration => &CATALOG[3],
            IntentKey::ArticleFormat => &CATALOG[4],
            IntentKey::StudyPack => &CATALOG[5],
            IntentKey::Todo => &CATALOG[6],
            IntentKey::Meeting => &CATALOG[7],
        }
    }

    /// Intents offered as alternatives when this one needs confirmation.
    ///
    /// At most three entries, never containing `self`, in fixed order.
    pub fn alternatives(self) -> &'static [IntentKey] {
        match self {
            IntentKey::Bookmark => &[
                IntentKey::ReadLater,
                IntentKey::DeepSummary,
                IntentKey::Inspiration,
            ],
            IntentKey::ReadLater => &[
                IntentKey::Bookmark,
                IntentKey::DeepSummary,
                IntentKey::Inspiration,
            ],
            IntentKey::DeepSummary => &[
                IntentKey::ArticleFormat,
                IntentKey::Inspiration,
                IntentKey::Bookmark,
            ],
            IntentKey::Inspiration => &[
                IntentKey::DeepSummary,
                IntentKey::ArticleFormat,
                IntentKey::Todo,
            ],
            IntentKey::ArticleFormat => &[IntentKey::DeepSummary, IntentKey::Inspiration],
            IntentKey::StudyPack => &[IntentKey::DeepSummary, IntentKey::Bookmark],
            IntentKey::Todo => &[IntentKey::Inspiration, IntentKey::DeepSummary],
            IntentKey::Meeting => &[IntentKey::DeepSummary, IntentKey::Todo],
        }
    }
}

// =============================================================================
// Classification results
// =============================================================================

/// How far down the waterfall a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationLevel {
    /// Deterministic URL rule.
    Rule,
    /// Length- and keyword-based content heuristic.
    Heuristic,
    /// Explicit user choice.
    Confirmed,
}

impl ClassificationLevel {
    /// Numeric rank, 1 through 3.
    pub fn as_u8(self) -> u8 {
        match self {
            ClassificationLevel::Rule => 1,
            ClassificationLevel::Heuristic => 2,
            ClassificationLevel::Confirmed => 3,
        }
    }
}

impl fmt::Display for ClassificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationLevel::Rule => write!(f, "rule"),
            ClassificationLevel::Heuristic => write!(f, "heuristic"),
            ClassificationLevel::Confirmed => write!(f, "confirmed"),
        }
    }
}

impl std::str::FromStr for ClassificationLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rule" => Ok(ClassificationLevel::Rule),
            "heuristic" => Ok(ClassificationLevel::Heuristic),
            "confirmed" => Ok(ClassificationLevel::Confirmed),
            _ => Err(format!("Unknown classification level: {}", s)),
        }
    }
}

/// The outcome of classifying one piece of input.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub intent: IntentKey,
    pub confidence: f32,
    pub level: ClassificationLevel,
    pub reason: &'static str,
}

impl Classification {
    /// Whether this result is too uncertain to dispatch without asking.
    pub fn needs_confirmation(&self) -> bool {
        self.confidence < CONFIRM_THRESHOLD
    }

    /// Synthetic result for an intent the user picked explicitly.
    pub fn confirmed(intent: IntentKey) -> Self {
        Self {
            intent,
            confidence: 1.0,
            level: ClassificationLevel::Confirmed,
            reason: "User-confirmed",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
