//! Two-level classification waterfall.
//!
//! Level 1 applies deterministic URL rules to the trimmed input; level 2
//! falls back to length- and keyword-based content heuristics. The first
//! matching rule decides, so rule order is part of the contract.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::types::{Classification, ClassificationLevel, IntentKey};

/// Compiled rule and keyword patterns, built once and reused.
struct RuleSet {
    youtube: Regex,
    bilibili: Regex,
    pdf_suffix: Regex,
    url_scheme: Regex,
    micro_post: Regex,
    lone_url: Regex,
    article_hosts: Regex,
    article_paths: Regex,
    todo_keywords: Regex,
    imperative_opener: Regex,
    action_verbs: Regex,
    meeting_keywords: Regex,
    thought_keywords: Regex,
}

impl RuleSet {
    fn new() -> Self {
        Self {
            youtube: Regex::new(
                r"(?i)(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)[A-Za-z0-9_-]{11}",
            )
            .expect("Invalid YouTube regex"),
            bilibili: Regex::new(r"(?i)(?:https?://)?(?:www\.)?bilibili\.com/video/")
                .expect("Invalid Bilibili regex"),
            pdf_suffix: Regex::new(r"(?i)\.pdf(\?.*)?$").expect("Invalid PDF suffix regex"),
            url_scheme: Regex::new(r"(?i)^https?://").expect("Invalid URL scheme regex"),
            micro_post: Regex::new(r"(?i)(?:https?://)?(?:www\.)?(?:twitter\.com|x\.com)/")
                .expect("Invalid Twitter/X regex"),
            lone_url: Regex::new(r"(?i)^https?://\S+$").expect("Invalid URL regex"),
            article_hosts: Regex::new(
                r"(?i)medium\.com|substack\.com|zhihu\.com/p/|mp\.weixin\.qq\.com|dev\.to|hackernoon\.com|paulgraham\.com|blog\.",
            )
            .expect("Invalid article host regex"),
            article_paths: Regex::new(r"(?i)/(blog|article|post|story|p|entry|news)/")
                .expect("Invalid article path regex"),
            todo_keywords: Regex::new(r"TODO|待办|提醒|deadline|截止|明天|下周|今天要")
                .expect("Invalid todo keyword regex"),
            imperative_opener: Regex::new(r"^(请|帮我|记得|别忘了|需要|要|去)")
                .expect("Invalid imperative opener regex"),
            action_verbs: Regex::new(
                r"[做去看写发送完成检查确认提交创建删除修改更新回复联系购买预约安排]",
            )
            .expect("Invalid action verb regex"),
            meeting_keywords: Regex::new(
                r"(?i)会议|meeting|讨论|决定|参会|纪要|action item|跟进|follow up",
            )
            .expect("Invalid meeting keyword regex"),
            thought_keywords: Regex::new(
                r"(?i)想到|觉得|思考|感觉|也许|可能|如果|假设|idea|thought|maybe",
            )
            .expect("Invalid thought keyword regex"),
        }
    }
}

fn rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(RuleSet::new)
}

fn rule(intent: IntentKey, confidence: f32, reason: &'static str) -> Classification {
    Classification {
        intent,
        confidence,
        level: ClassificationLevel::Rule,
        reason,
    }
}

fn heuristic(intent: IntentKey, confidence: f32, reason: &'static str) -> Classification {
    Classification {
        intent,
        confidence,
        level: ClassificationLevel::Heuristic,
        reason,
    }
}

/// Classify one piece of input.
///
/// Returns `None` when the input is empty or whitespace-only. Otherwise
/// always produces a result; low confidence is reported, not hidden.
pub fn classify(input: &str) -> Option<Classification> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let result = match_url_rules(trimmed).unwrap_or_else(|| match_heuristics(trimmed));
    debug!(
        intent = %result.intent,
        confidence = result.confidence,
        level = result.level.as_u8(),
        reason = result.reason,
        "Classified input"
    );
    Some(result)
}

/// Level 1: deterministic URL rules, in priority order.
///
/// Host rules match anywhere in the text; only the trailing generic rule
/// requires the whole input to be a single URL token.
fn match_url_rules(text: &str) -> Option<Classification> {
    let r = rules();

    if r.youtube.is_match(text) {
        return Some(rule(IntentKey::StudyPack, 0.98, "YouTube URL detected"));
    }
    if r.bilibili.is_match(text) {
        return Some(rule(IntentKey::StudyPack, 0.95, "Bilibili URL detected"));
    }
    if r.pdf_suffix.is_match(text) && r.url_scheme.is_match(text) {
        return Some(rule(IntentKey::DeepSummary, 0.92, "PDF URL detected"));
    }
    if r.micro_post.is_match(text) {
        return Some(rule(IntentKey::Bookmark, 0.90, "Twitter/X URL detected"));
    }
    if r.lone_url.is_match(text) {
        if r.article_hosts.is_match(text) || r.article_paths.is_match(text) {
            return Some(rule(
                IntentKey::ReadLater,
                0.90,
                "Article-like URL → read later",
            ));
        }
        return Some(rule(IntentKey::Bookmark, 0.90, "Generic URL → bookmark"));
    }

    None
}

/// Level 2: content heuristics over the character count.
///
/// Counts Unicode scalar values, not bytes, so Chinese text lands in the
/// intended buckets.
fn match_heuristics(text: &str) -> Classification {
    let r = rules();
    let chars = text.chars().count();

    if chars < 100 {
        let actionable = r.todo_keywords.is_match(text)
            || (r.imperative_opener.is_match(text) && r.action_verbs.is_match(text));
        if actionable {
            return heuristic(IntentKey::Todo, 0.88, "Short text with action words → todo");
        }
        return heuristic(IntentKey::Inspiration, 0.90, "Short text → inspiration");
    }

    if chars < 800 {
        if r.meeting_keywords.is_match(text) {
            return heuristic(IntentKey::Meeting, 0.85, "Medium text with meeting keywords");
        }
        if r.thought_keywords.is_match(text) {
            return heuristic(
                IntentKey::Inspiration,
                0.82,
                "Medium text with thought keywords",
            );
        }
        return heuristic(IntentKey::DeepSummary, 0.80, "Medium text → deep summary");
    }

    if chars >= 800 {
        return heuristic(
            IntentKey::ArticleFormat,
            0.92,
            "Long text (>800 chars) → article format",
        );
    }

    heuristic(IntentKey::DeepSummary, 0.70, "Fallback → deep summary")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_some(input: &str) -> Classification {
        classify(input).expect("expected a classification")
    }

    // =====================================================================
    // Empty input
    // =====================================================================

    #[test]
    fn test_empty_input_returns_none() {
        assert!(classify("").is_none());
    }

    #[test]
    fn test_whitespace_only_returns_none() {
        assert!(classify("   \n\t  ").is_none());
    }

    // =====================================================================
    // Level 1: video URLs
    // =====================================================================

    #[test]
    fn test_youtube_watch_url() {
        let result = classify_some("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(result.intent, IntentKey::StudyPack);
        assert!((result.confidence - 0.98).abs() < f32::EPSILON);
        assert_eq!(result.level, ClassificationLevel::Rule);
        assert_eq!(result.reason, "YouTube URL detected");
    }

    #[test]
    fn test_youtube_short_link() {
        let result = classify_some("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(result.intent, IntentKey::StudyPack);
        assert!((result.confidence - 0.98).abs() < f32::EPSILON);
    }

    #[test]
    fn test_youtube_shorts_and_embed() {
        let shorts = classify_some("youtube.com/shorts/abcdefghijk");
        assert_eq!(shorts.intent, IntentKey::StudyPack);

        let embed = classify_some("https://www.youtube.com/embed/abcdefghijk");
        assert_eq!(embed.intent, IntentKey::StudyPack);
    }

    #[test]
    fn test_youtube_without_scheme() {
        let result = classify_some("www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(result.intent, IntentKey::StudyPack);
        assert_eq!(result.level, ClassificationLevel::Rule);
    }

    #[test]
    fn test_youtube_embedded_in_sentence() {
        // Host rules are unanchored.
        let result = classify_some("看看这个 https://youtu.be/dQw4w9WgXcQ 讲得很好");
        assert_eq!(result.intent, IntentKey::StudyPack);
        assert!((result.confidence - 0.98).abs() < f32::EPSILON);
    }

    #[test]
    fn test_short_video_id_is_not_youtube() {
        // Ten characters after youtu.be/ does not satisfy the id rule;
        // the whole input is still a lone URL, so it books as generic.
        let result = classify_some("https://youtu.be/abc");
        assert_eq!(result.intent, IntentKey::Bookmark);
        assert_eq!(result.reason, "Generic URL → bookmark");
    }

    #[test]
    fn test_bilibili_url() {
        let result = classify_some("https://www.bilibili.com/video/BV1xx411c7mD");
        assert_eq!(result.intent, IntentKey::StudyPack);
        assert!((result.confidence - 0.95).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Bilibili URL detected");
    }

    #[test]
    fn test_bilibili_without_scheme() {
        let result = classify_some("bilibili.com/video/BV1xx411c7mD");
        assert!((result.confidence - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn test_youtube_wins_over_micro_post() {
        // Both hosts present; the earlier rule decides.
        let result = classify_some("https://twitter.com/clip https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(result.intent, IntentKey::StudyPack);
        assert!((result.confidence - 0.98).abs() < f32::EPSILON);
    }

    // =====================================================================
    // Level 1: PDF and micro-post URLs
    // =====================================================================

    #[test]
    fn test_pdf_url() {
        let result = classify_some("https://example.com/papers/attention.pdf");
        assert_eq!(result.intent, IntentKey::DeepSummary);
        assert!((result.confidence - 0.92).abs() < f32::EPSILON);
        assert_eq!(result.reason, "PDF URL detected");
    }

    #[test]
    fn test_pdf_url_with_query() {
        let result = classify_some("https://example.com/paper.pdf?download=1");
        assert_eq!(result.intent, IntentKey::DeepSummary);
        assert!((result.confidence - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pdf_without_scheme_is_not_pdf_rule() {
        // Needs both the suffix and the scheme.
        let result = classify_some("paper.pdf");
        assert_eq!(result.intent, IntentKey::Inspiration);
        assert_eq!(result.level, ClassificationLevel::Heuristic);
    }

    #[test]
    fn test_twitter_url() {
        let result = classify_some("https://twitter.com/user/status/123456");
        assert_eq!(result.intent, IntentKey::Bookmark);
        assert!((result.confidence - 0.90).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Twitter/X URL detected");
    }

    #[test]
    fn test_x_dot_com_url() {
        let result = classify_some("x.com/someone/status/987");
        assert_eq!(result.intent, IntentKey::Bookmark);
        assert_eq!(result.reason, "Twitter/X URL detected");
    }

    // =====================================================================
    // Level 1: generic URLs
    // =====================================================================

    #[test]
    fn test_article_host_url() {
        let result = classify_some("https://medium.com/@writer/why-rust-is-nice");
        assert_eq!(result.intent, IntentKey::ReadLater);
        assert!((result.confidence - 0.90).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Article-like URL → read later");
    }

    #[test]
    fn test_blog_subdomain_url() {
        let result = classify_some("https://blog.example.com/2024/release-notes");
        assert_eq!(result.intent, IntentKey::ReadLater);
    }

    #[test]
    fn test_article_path_url() {
        let result = classify_some("https://example.com/blog/how-we-scaled");
        assert_eq!(result.intent, IntentKey::ReadLater);
    }

    #[test]
    fn test_wechat_article_url() {
        let result = classify_some("https://mp.weixin.qq.com/s/AbCdEf");
        assert_eq!(result.intent, IntentKey::ReadLater);
    }

    #[test]
    fn test_zhihu_post_url() {
        let result = classify_some("https://zhihu.com/p/123456789");
        assert_eq!(result.intent, IntentKey::ReadLater);
    }

    #[test]
    fn test_generic_url_is_bookmark() {
        let result = classify_some("https://example.com");
        assert_eq!(result.intent, IntentKey::Bookmark);
        assert!((result.confidence - 0.90).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Generic URL → bookmark");
    }

    #[test]
    fn test_url_with_surrounding_text_is_not_generic_rule() {
        // The generic rule wants the whole input to be one URL token.
        let result = classify_some("https://example.com 有空看一下");
        assert_eq!(result.level, ClassificationLevel::Heuristic);
        assert_eq!(result.intent, IntentKey::Inspiration);
    }

    #[test]
    fn test_input_is_trimmed_before_rules() {
        let result = classify_some("   https://example.com   ");
        assert_eq!(result.intent, IntentKey::Bookmark);
        assert_eq!(result.level, ClassificationLevel::Rule);
    }

    // =====================================================================
    // Level 2: short text
    // =====================================================================

    #[test]
    fn test_short_text_with_todo_keyword() {
        let result = classify_some("TODO 给客户回邮件");
        assert_eq!(result.intent, IntentKey::Todo);
        assert!((result.confidence - 0.88).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Short text with action words → todo");
    }

    #[test]
    fn test_short_text_with_deadline_keyword() {
        let result = classify_some("明天交季度报告");
        assert_eq!(result.intent, IntentKey::Todo);
        assert!((result.confidence - 0.88).abs() < f32::EPSILON);
    }

    #[test]
    fn test_todo_keyword_is_case_sensitive() {
        // Lowercase "todo" is not a keyword and there is no imperative opener.
        let result = classify_some("todo list app idea");
        assert_eq!(result.intent, IntentKey::Inspiration);
        assert!((result.confidence - 0.90).abs() < f32::EPSILON);
    }

    #[test]
    fn test_short_imperative_with_action_verb() {
        let result = classify_some("帮我检查一下服务器日志");
        assert_eq!(result.intent, IntentKey::Todo);
        assert_eq!(result.reason, "Short text with action words → todo");
    }

    #[test]
    fn test_imperative_without_action_verb_is_not_todo() {
        let result = classify_some("记得那家店的名字吗");
        assert_eq!(result.intent, IntentKey::Inspiration);
    }

    #[test]
    fn test_short_fragment_is_inspiration() {
        let result = classify_some("用颜色区分不同类型的笔记");
        assert_eq!(result.intent, IntentKey::Inspiration);
        assert!((result.confidence - 0.90).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Short text → inspiration");
    }

    // =====================================================================
    // Level 2: medium and long text
    // =====================================================================

    #[test]
    fn test_medium_text_with_meeting_keywords() {
        let text = "今天的会议确定了下个季度的产品方向，大家对新功能的优先级做了排序，".repeat(4);
        assert!(text.chars().count() >= 100 && text.chars().count() < 800);
        let result = classify_some(&text);
        assert_eq!(result.intent, IntentKey::Meeting);
        assert!((result.confidence - 0.85).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Medium text with meeting keywords");
    }

    #[test]
    fn test_meeting_keyword_case_insensitive() {
        let text = "Weekly sync notes from the MEETING about the rollout plan, \
                    covering ownership and the remaining migration work for the quarter."
            .repeat(2);
        assert!(text.chars().count() >= 100 && text.chars().count() < 800);
        let result = classify_some(&text);
        assert_eq!(result.intent, IntentKey::Meeting);
    }

    #[test]
    fn test_medium_text_with_thought_keywords() {
        let text = "我觉得这个方案还有不少改进空间，特别是加载速度方面的体验，".repeat(4);
        assert!(text.chars().count() >= 100 && text.chars().count() < 800);
        let result = classify_some(&text);
        assert_eq!(result.intent, IntentKey::Inspiration);
        assert!((result.confidence - 0.82).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Medium text with thought keywords");
        assert!(result.needs_confirmation());
    }

    #[test]
    fn test_medium_plain_text_is_deep_summary() {
        let text = "这份文档描述了系统的整体架构与部署流程，并给出了每个组件的职责边界，".repeat(4);
        assert!(text.chars().count() >= 100 && text.chars().count() < 800);
        let result = classify_some(&text);
        assert_eq!(result.intent, IntentKey::DeepSummary);
        assert!((result.confidence - 0.80).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Medium text → deep summary");
        assert!(result.needs_confirmation());
    }

    #[test]
    fn test_long_text_is_article_format() {
        let text = "字".repeat(800);
        let result = classify_some(&text);
        assert_eq!(result.intent, IntentKey::ArticleFormat);
        assert!((result.confidence - 0.92).abs() < f32::EPSILON);
        assert_eq!(result.reason, "Long text (>800 chars) → article format");
    }

    // =====================================================================
    // Length boundaries
    // =====================================================================

    #[test]
    fn test_boundary_at_100_chars() {
        let short = "字".repeat(99);
        assert_eq!(classify_some(&short).intent, IntentKey::Inspiration);

        let medium = "字".repeat(100);
        let result = classify_some(&medium);
        assert_eq!(result.intent, IntentKey::DeepSummary);
        assert!((result.confidence - 0.80).abs() < f32::EPSILON);
    }

    #[test]
    fn test_boundary_at_800_chars() {
        let medium = "字".repeat(799);
        assert_eq!(classify_some(&medium).intent, IntentKey::DeepSummary);

        let long = "字".repeat(800);
        assert_eq!(classify_some(&long).intent, IntentKey::ArticleFormat);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 50 CJK characters are 150 UTF-8 bytes but stay in the short bucket.
        let text = "字".repeat(50);
        assert_eq!(text.len(), 150);
        let result = classify_some(&text);
        assert_eq!(result.intent, IntentKey::Inspiration);
    }

    // =====================================================================
    // Confirmation threshold interplay
    // =====================================================================

    #[test]
    fn test_rule_results_never_need_confirmation() {
        for input in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://example.com",
            "https://medium.com/@a/b",
            "https://twitter.com/a/status/1",
        ] {
            let result = classify_some(input);
            assert_eq!(result.level, ClassificationLevel::Rule);
            assert!(!result.needs_confirmation(), "{} should not escalate", input);
        }
    }

    #[test]
    fn test_meeting_at_threshold_does_not_need_confirmation() {
        let text = "会议纪要：确定了发布时间表和负责人分工，所有参会的人都认领了后续的跟进任务，".repeat(3);
        assert!(text.chars().count() >= 100 && text.chars().count() < 800);
        let result = classify_some(&text);
        assert_eq!(result.intent, IntentKey::Meeting);
        assert!(!result.needs_confirmation());
    }
}
