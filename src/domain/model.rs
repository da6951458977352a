use crate::utils::error::{DigestError, Result};
use chrono::{Duration, NaiveDate};

/// Raw entry as delivered by a feed source.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    /// UTC calendar day of publication; entries without one are skipped.
    pub published: Option<NaiveDate>,
}

/// Entries fetched from one named source (a blog, or the updates feed).
#[derive(Debug, Clone)]
pub struct FeedBatch {
    pub source: String,
    pub entries: Vec<FeedEntry>,
}

/// A classified service update.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: NaiveDate,
    pub service: Option<String>,
    pub category: String,
    pub important: bool,
    pub translated_title: Option<String>,
    pub translated_summary: Option<String>,
}

impl Item {
    pub fn display_title(&self) -> &str {
        self.translated_title.as_deref().unwrap_or(&self.title)
    }

    pub fn display_summary(&self) -> &str {
        self.translated_summary.as_deref().unwrap_or(&self.summary)
    }
}

/// A blog post; unlike [`Item`] it is never classified.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub title: String,
    pub link: String,
    /// Markup stripped and whitespace trimmed.
    pub summary: String,
    pub published: NaiveDate,
    pub translated_title: Option<String>,
    pub translated_summary: Option<String>,
}

impl BlogPost {
    pub fn display_title(&self) -> &str {
        self.translated_title.as_deref().unwrap_or(&self.title)
    }

    pub fn display_summary(&self) -> &str {
        self.translated_summary.as_deref().unwrap_or(&self.summary)
    }
}

/// A Sunday-to-Saturday reporting week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    start: NaiveDate,
}

impl WeekRange {
    pub(crate) fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }
}

/// Inclusive date window used for filtering and file naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DigestError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl From<WeekRange> for DateRange {
    fn from(week: WeekRange) -> Self {
        Self {
            start: week.start(),
            end: week.end(),
        }
    }
}

/// Rendered output of one run, ready to be written.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub markdown: String,
    pub item_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::new(date(2025, 8, 3), date(2025, 8, 9)).unwrap();
        assert!(range.contains(date(2025, 8, 3)));
        assert!(range.contains(date(2025, 8, 9)));
        assert!(!range.contains(date(2025, 8, 2)));
        assert!(!range.contains(date(2025, 8, 10)));
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2025, 11, 25), date(2025, 11, 23)).unwrap_err();
        assert!(matches!(err, DigestError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_item_display_falls_back_to_source_text() {
        let mut item = Item {
            title: "Amazon EC2 update".to_string(),
            link: "https://aws.amazon.com/x".to_string(),
            summary: "Summary".to_string(),
            published: date(2025, 8, 5),
            service: Some("EC2".to_string()),
            category: "コンピュート系".to_string(),
            important: false,
            translated_title: None,
            translated_summary: None,
        };
        assert_eq!(item.display_title(), "Amazon EC2 update");

        item.translated_title = Some("Amazon EC2 の更新".to_string());
        assert_eq!(item.display_title(), "Amazon EC2 の更新");
        assert_eq!(item.display_summary(), "Summary");
    }

    #[test]
    fn test_blog_post_display_falls_back_to_source_text() {
        let mut post = BlogPost {
            title: "Building with Amazon Bedrock".to_string(),
            link: "https://aws.amazon.com/blogs/aws/bedrock/".to_string(),
            summary: "How to get started".to_string(),
            published: date(2025, 8, 6),
            translated_title: None,
            translated_summary: Some("はじめ方".to_string()),
        };
        assert_eq!(post.display_title(), "Building with Amazon Bedrock");
        assert_eq!(post.display_summary(), "はじめ方");

        post.translated_title = Some("Amazon Bedrock で構築する".to_string());
        assert_eq!(post.display_title(), "Amazon Bedrock で構築する");
    }
}
