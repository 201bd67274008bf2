//! Stage 3: punctuation normalization.
//!
//! Collapses stuttered punctuation, tidies spacing, capitalizes sentence
//! starts, and guarantees a terminal mark matching the script of the final
//! character.

use std::sync::OnceLock;

use regex::{Captures, Regex};

struct PunctuationPatterns {
    comma_runs: Regex,
    period_runs: Regex,
    space_after_comma: Regex,
    leading_separators: Regex,
    whitespace_runs: Regex,
    sentence_start: Regex,
}

impl PunctuationPatterns {
    fn compile() -> Self {
        Self {
            comma_runs: Regex::new("[，,]{2,}").expect("Invalid comma-run regex"),
            period_runs: Regex::new("[。.]{2,}").expect("Invalid period-run regex"),
            space_after_comma: Regex::new("，\\s+").expect("Invalid comma-space regex"),
            leading_separators: Regex::new("^[，,\\s]+").expect("Invalid leading-separator regex"),
            whitespace_runs: Regex::new("\\s{2,}").expect("Invalid whitespace-run regex"),
            sentence_start: Regex::new(r"([.!?]\s+)([a-z])").expect("Invalid sentence-start regex"),
        }
    }
}

fn patterns() -> &'static PunctuationPatterns {
    static PATTERNS: OnceLock<PunctuationPatterns> = OnceLock::new();
    PATTERNS.get_or_init(PunctuationPatterns::compile)
}

/// A run of repeated marks collapses to its first mark, preserving script.
fn leading_mark(caps: &Captures) -> String {
    caps[0].chars().take(1).collect()
}

fn is_han(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Normalize punctuation and ensure a terminal mark.
pub fn apply(text: &str) -> String {
    let p = patterns();

    let mut out = p.comma_runs.replace_all(text, leading_mark).into_owned();
    out = p.period_runs.replace_all(&out, leading_mark).into_owned();
    out = p.space_after_comma.replace_all(&out, "，").into_owned();
    out = p.leading_separators.replace(&out, "").into_owned();
    out = p.whitespace_runs.replace_all(&out, " ").into_owned();
    out = p
        .sentence_start
        .replace_all(&out, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned();

    let tidy = out.trim();
    if tidy.ends_with(['。', '！', '？', '.', '!', '?']) {
        return tidy.to_string();
    }

    match tidy.chars().last() {
        Some(c) if is_han(c) => format!("{}。", tidy),
        Some(_) => format!("{}.", tidy),
        None => out,
    }
}
