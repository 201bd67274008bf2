//! Stage 1: filler-word removal.
//!
//! Strips spoken filler from both supported languages. Chinese fillers are
//! removed only when bounded by punctuation, whitespace, or a text edge on
//! both sides, so words that merely contain a filler substring are untouched.
//! English fillers are matched with word boundaries, longest alternative
//! first. Runs of two or more repeated disfluency glyphs are dropped last.

use std::sync::OnceLock;

use regex::Regex;

/// Chinese filler vocabulary, in removal order.
const FILLERS_ZH: &[&str] = &[
    "嗯", "啊", "呃", "额", "哦", "噢", "唔", "那个", "就是", "就是说", "然后呢", "然后", "对吧",
    "对不对", "你知道吗", "你知道的", "怎么说呢", "我觉得吧", "反正就是", "基本上", "其实吧",
    "说白了就是", "等一下", "稍等", "我想想", "所以说", "也就是说", "换句话说",
];

/// English filler vocabulary.
const FILLERS_EN: &[&str] = &[
    "um", "uh", "uhh", "umm", "hmm", "hm", "like", "you know", "i mean", "basically", "actually",
    "literally", "right", "so yeah", "kind of", "sort of", "well", "anyway", "anyways",
];

/// Single-character interjection glyphs that also appear as stutter runs.
const DISFLUENCY_GLYPHS: &[&str] = &["嗯", "啊", "呃", "额", "哦", "噢", "唔"];

struct FillerPatterns {
    /// One bounded pattern per Chinese vocabulary entry.
    zh: Vec<Regex>,
    /// Word-bounded alternation over the English vocabulary.
    en: Regex,
    /// Runs of >= 2 of the same disfluency glyph.
    runs: Regex,
}

impl FillerPatterns {
    fn compile() -> Self {
        let zh = FILLERS_ZH
            .iter()
            .map(|word| {
                let pattern = format!(
                    "(^|[，,。.！!？?、\\s]){}([，,。.！!？?、\\s]|$)",
                    regex::escape(word)
                );
                Regex::new(&pattern).expect("Invalid Chinese filler regex")
            })
            .collect();

        // Longest-first so "uhh" wins over "uh" under leftmost-first
        // alternation.
        let mut en_words: Vec<&str> = FILLERS_EN.to_vec();
        en_words.sort_by_key(|w| std::cmp::Reverse(w.len()));
        let en_pattern = format!(r"(?i)\b({})\b[,.]?\s*", en_words.join("|"));
        let en = Regex::new(&en_pattern).expect("Invalid English filler regex");

        let runs_pattern = DISFLUENCY_GLYPHS
            .iter()
            .map(|g| format!("{}{{2,}}", g))
            .collect::<Vec<_>>()
            .join("|");
        let runs = Regex::new(&runs_pattern).expect("Invalid disfluency regex");

        Self { zh, en, runs }
    }
}

fn patterns() -> &'static FillerPatterns {
    static PATTERNS: OnceLock<FillerPatterns> = OnceLock::new();
    PATTERNS.get_or_init(FillerPatterns::compile)
}

/// Remove filler words and disfluency runs.
pub fn apply(text: &str) -> String {
    let p = patterns();

    let mut out = text.to_string();
    for re in &p.zh {
        out = re.replace_all(&out, "${1}${2}").into_owned();
    }
    out = p.en.replace_all(&out, " ").into_owned();
    out = p.runs.replace_all(&out, "").into_owned();
    out
}
