use regex::Regex;
use std::sync::OnceLock;

/// Keywords that mark an update as important and get bolded in rendered text.
pub const IMPORTANT_KEYWORDS: &[&str] = &[
    "GA",
    "一般提供開始",
    "プレビュー",
    "新機能",
    "新リージョン",
    "リリース",
    "サポート終了",
    "価格改定",
    "セキュリティ",
    "脆弱性",
];

const ELLIPSIS: &str = "...";
const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimStrategy {
    /// Always cut at `limit - 3` characters.
    Hard,
    /// Prefer ending on a sentence terminator in the last 30% of the budget.
    SentenceAware,
}

fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"<[^<]+?>").expect("tag pattern is valid"))
}

/// Removes tag-like substrings and decodes HTML entities.
pub fn strip_markup(text: &str) -> String {
    let without_tags = tag_regex().replace_all(text, "");
    html_escape::decode_html_entities(&without_tags).into_owned()
}

pub fn clean_summary(text: &str) -> String {
    strip_markup(text).trim().to_string()
}

/// Truncates to at most `limit` characters, ending with an ellipsis when cut.
pub fn trim(text: &str, limit: usize, strategy: TrimStrategy) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit < ELLIPSIS.len() {
        return text.chars().take(limit).collect();
    }

    let budget = limit - ELLIPSIS.len();
    let head: Vec<char> = text.chars().take(budget).collect();

    if strategy == TrimStrategy::SentenceAware {
        if let Some(pos) = head.iter().rposition(|c| SENTENCE_TERMINATORS.contains(c)) {
            if pos * 10 >= limit * 7 {
                let mut out: String = head[..=pos].iter().collect();
                out.push_str(ELLIPSIS);
                return out;
            }
        }
    }

    let mut out: String = head.into_iter().collect();
    out.push_str(ELLIPSIS);
    out
}

/// Wraps every keyword occurrence in `**`.
///
/// Plain substring replacement: running it twice bolds keywords again.
pub fn highlight_keywords(text: &str) -> String {
    IMPORTANT_KEYWORDS
        .iter()
        .fold(text.to_string(), |acc, keyword| {
            acc.replace(keyword, &format!("**{}**", keyword))
        })
}

pub fn is_important(title: &str, summary: &str) -> bool {
    IMPORTANT_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword) || summary.contains(keyword))
}
