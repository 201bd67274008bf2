//! Stage 5: final cleanup.
//!
//! Tidies the artifacts left by the earlier stages: excess blank lines,
//! ragged line edges, and separators orphaned at the start of a line.

use std::sync::OnceLock;

use regex::Regex;

struct CleanupPatterns {
    blank_lines: Regex,
    orphaned_separator: Regex,
}

impl CleanupPatterns {
    fn compile() -> Self {
        Self {
            blank_lines: Regex::new(r"\n{3,}").expect("Invalid blank-line regex"),
            orphaned_separator: Regex::new("\n[，,、]").expect("Invalid separator regex"),
        }
    }
}

fn patterns() -> &'static CleanupPatterns {
    static PATTERNS: OnceLock<CleanupPatterns> = OnceLock::new();
    PATTERNS.get_or_init(CleanupPatterns::compile)
}

/// Final tidy pass over the structured text.
pub fn apply(text: &str) -> String {
    let p = patterns();

    let out = p.blank_lines.replace_all(text, "\n\n").into_owned();
    let out = out
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    let out = p.orphaned_separator.replace_all(&out, "\n").into_owned();
    out.trim().to_string()
}
