//! Stage 2: self-correction resolution.
//!
//! Speakers retract and restate mid-sentence. Each pattern below keeps the
//! corrected segment and drops the retracted one together with the correction
//! marker. Patterns are applied globally, in a fixed order.

use std::sync::OnceLock;

use regex::Regex;

/// A retraction pattern and its replacement, applied in declaration order.
struct CorrectionPattern {
    regex: Regex,
    replacement: &'static str,
}

fn patterns() -> &'static Vec<CorrectionPattern> {
    static PATTERNS: OnceLock<Vec<CorrectionPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let table: Vec<(&str, &str)> = vec![
            // Doubled denial followed by the restatement marker.
            (r"不对不对[，,]?\s*(应该是|是)\s*", ""),
            (r"不是不是[，,]?\s*(应该是|是)\s*", ""),
            // "A, 不, B" keeps B.
            (r"([^，。！？]+)[，,]\s*不[，,]\s*([^，。！？]+)", "${2}"),
            // "A, 哦不对, B" keeps B.
            (r"([^，。！？]+)[，,]\s*哦?\s*不对[，,]?\s*([^，。！？]+)", "${2}"),
            // "A, 我说错了," drops the whole retraction.
            (r"([^。！？]+)[，,]\s*(我说错了|说反了|说错了)[，,]?\s*", ""),
            // English: the word before the marker is the retracted one.
            // ASCII \w so a Han character before the marker is not consumed.
            (
                r"(?i)(?-u:\b\w+)[,.]?\s*(wait no|no wait|i mean|sorry i meant)\s*",
                "",
            ),
        ];

        table
            .into_iter()
            .map(|(pattern, replacement)| CorrectionPattern {
                regex: Regex::new(pattern).expect("Invalid correction regex"),
                replacement,
            })
            .collect()
    })
}

/// Resolve self-corrections, keeping the speaker's final wording.
pub fn apply(text: &str) -> String {
    let mut out = text.to_string();
    for p in patterns() {
        out = p.regex.replace_all(&out, p.replacement).into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubled_denial_with_restatement() {
        assert_eq!(apply("不对不对，应该是明天开会"), "明天开会");
        assert_eq!(apply("不是不是，是周四"), "周四");
    }

    #[test]
    fn test_short_denial_keeps_correction() {
        assert_eq!(apply("周三交稿，不，周四交稿"), "周四交稿");
    }

    #[test]
    fn test_denial_with_oh_marker() {
        assert_eq!(apply("发给小王，哦不对，发给小李"), "发给小李");
    }

    #[test]
    fn test_misspoke_marker_drops_segment() {
        assert_eq!(apply("下午三点，我说错了，下午四点开会"), "下午四点开会");
    }

    #[test]
    fn test_english_wait_no() {
        assert_eq!(apply("send the report, no wait the invoice"), "send the the invoice");
    }

    #[test]
    fn test_english_sorry_i_meant() {
        assert_eq!(apply("ping Alice, sorry I meant Bob"), "ping Bob");
    }

    #[test]
    fn test_only_first_segment_before_denial_is_dropped() {
        // The segment before the marker is bounded by the previous comma.
        assert_eq!(apply("早上九点，周三交，不，周四交"), "早上九点，周四交");
    }

    #[test]
    fn test_no_marker_untouched() {
        assert_eq!(apply("周四下午交稿"), "周四下午交稿");
        assert_eq!(apply("send it on Thursday"), "send it on Thursday");
    }

    #[test]
    fn test_patterns_apply_in_order() {
        // The doubled-denial pattern must fire before the generic "不" one.
        assert_eq!(apply("不对不对，是下周一"), "下周一");
    }
}
