//! Stage 4: list and step structurization.
//!
//! Detects enumeration markers (第N ordinals, sequential adverbs, numeric
//! list markers) and breaks the text into lines at each marker. A detector
//! activates only past its occurrence threshold, so a lone "第一" in prose
//! stays inline. Breaks are inserted only when the marker is not already at
//! the start of a line, which keeps the whole stage idempotent.

use std::sync::OnceLock;

use regex::Regex;

/// Sequential adverbs treated as one marker family.
const SEQUENCE_WORDS: &[&str] = &["首先", "其次", "再次", "然后", "接着", "最后", "另外", "此外"];

struct StructurePatterns {
    /// 第 + ordinal numeral + optional separator.
    ordinal: Regex,
    /// Numeric list marker: digits + separator punctuation.
    numbered: Regex,
    /// One literal pattern per sequence word.
    sequence: Vec<Regex>,
}

impl StructurePatterns {
    fn compile() -> Self {
        Self {
            ordinal: Regex::new(r"第[一二三四五六七八九十\d]+[，,、:：]?\s*")
                .expect("Invalid ordinal regex"),
            numbered: Regex::new(r"(\d+)[.、．]\s*").expect("Invalid numbered-list regex"),
            sequence: SEQUENCE_WORDS
                .iter()
                .map(|w| Regex::new(&regex::escape(w)).expect("Invalid sequence-word regex"))
                .collect(),
        }
    }
}

fn patterns() -> &'static StructurePatterns {
    static PATTERNS: OnceLock<StructurePatterns> = OnceLock::new();
    PATTERNS.get_or_init(StructurePatterns::compile)
}

/// Insert a line break before every match that is not already at line start.
fn break_before(text: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let at_line_start = m.start() == 0 || text[..m.start()].ends_with('\n');
        if !at_line_start {
            out.push('\n');
        }
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Like `break_before`, but also rewrites each numeric marker to `N. `.
fn break_numbered(text: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        let at_line_start = whole.start() == 0 || text[..whole.start()].ends_with('\n');
        if !at_line_start {
            out.push('\n');
        }
        out.push_str(digits.as_str());
        out.push_str(". ");
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Break enumerations into lines when enough markers are present.
pub fn apply(text: &str) -> String {
    let p = patterns();
    let mut out = text.to_string();

    if p.ordinal.find_iter(&out).count() >= 2 {
        out = break_before(&out, &p.ordinal);
    }

    let distinct = SEQUENCE_WORDS.iter().filter(|w| out.contains(**w)).count();
    if distinct >= 2 {
        for re in &p.sequence {
            out = break_before(&out, re);
        }
    }

    if p.numbered.find_iter(&out).count() >= 2 {
        out = break_numbered(&out, &p.numbered);
    }

    out
}
