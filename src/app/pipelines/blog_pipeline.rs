use crate::config::BlogSource;
use crate::core::report::{BlogReportBuilder, BlogSection};
use crate::core::sanitizer::clean_summary;
use crate::core::translate::Localizer;
use crate::core::{BlogPost, DateRange, Document, FeedBatch, FeedSource, Pipeline, Storage, Translator};
use crate::utils::error::Result;
use std::path::Path;

/// Weekly digest over a list of AWS blogs, one section per blog.
pub struct BlogPipeline<S: Storage, F: FeedSource, T: Translator> {
    storage: S,
    source: F,
    localizer: Localizer<T>,
    builder: BlogReportBuilder,
    blogs: Vec<BlogSource>,
    range: DateRange,
    output_dir: String,
}

impl<S: Storage, F: FeedSource, T: Translator> BlogPipeline<S, F, T> {
    pub fn new(
        storage: S,
        source: F,
        localizer: Localizer<T>,
        builder: BlogReportBuilder,
        blogs: Vec<BlogSource>,
        range: DateRange,
        output_dir: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            source,
            localizer,
            builder,
            blogs,
            range,
            output_dir: output_dir.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("awsblogs_{}_{}.md", self.range.start, self.range.end)
    }

    fn section(&self, batch: FeedBatch) -> BlogSection {
        let mut posts: Vec<BlogPost> = batch
            .entries
            .into_iter()
            .filter_map(|entry| {
                let published = entry.published?;
                self.range.contains(published).then(|| BlogPost {
                    summary: clean_summary(&entry.summary),
                    title: entry.title,
                    link: entry.link,
                    published,
                    translated_title: None,
                    translated_summary: None,
                })
            })
            .collect();

        // stable: same-day posts keep feed order
        posts.sort_by(|a, b| b.published.cmp(&a.published));

        BlogSection {
            name: batch.source,
            posts,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, F: FeedSource, T: Translator> Pipeline for BlogPipeline<S, F, T> {
    async fn extract(&self) -> Result<Vec<FeedBatch>> {
        let mut batches = Vec::with_capacity(self.blogs.len());
        for blog in &self.blogs {
            tracing::info!("Fetching {}", blog.name);
            let entries = self.source.fetch(&blog.url).await?;
            batches.push(FeedBatch {
                source: blog.name.clone(),
                entries,
            });
        }
        Ok(batches)
    }

    async fn transform(&self, batches: Vec<FeedBatch>) -> Result<Document> {
        let mut sections: Vec<BlogSection> =
            batches.into_iter().map(|batch| self.section(batch)).collect();

        for section in &mut sections {
            tracing::debug!("{}: {} post(s) in range", section.name, section.posts.len());
            for post in &mut section.posts {
                post.translated_title = Some(self.localizer.localize(&post.title).await);
                post.translated_summary = Some(self.localizer.localize(&post.summary).await);
            }
        }

        let item_count = sections.iter().map(|s| s.posts.len()).sum();
        Ok(Document {
            file_name: self.file_name(),
            markdown: self.builder.build(&sections, &self.range),
            item_count,
        })
    }

    async fn load(&self, document: Document) -> Result<String> {
        self.storage
            .write_file(&document.file_name, document.markdown.as_bytes())
            .await?;

        let path = Path::new(&self.output_dir).join(&document.file_name);
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::translate::NoopTranslator;
    use crate::core::translate::{RetryPolicy, SafeTranslator};
    use crate::core::FeedEntry;
    use crate::utils::error::DigestError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct NullStorage;

    impl Storage for NullStorage {
        async fn write_file(&self, _path: &str, _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    struct Feeds(HashMap<String, Vec<FeedEntry>>);

    #[async_trait]
    impl FeedSource for Feeds {
        async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| DigestError::FeedParseError {
                    message: format!("no feed at {}", url),
                })
        }
    }

    fn post(title: &str, published: NaiveDate) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: format!("https://aws.amazon.com/blogs/{}", title.replace(' ', "-")),
            summary: format!("  <p>{} &amp; more</p>  ", title),
            published: Some(published),
        }
    }

    fn blog(name: &str, url: &str) -> BlogSource {
        BlogSource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    async fn pipeline(feeds: Feeds, blogs: Vec<BlogSource>) -> BlogPipeline<NullStorage, Feeds, NoopTranslator> {
        let policy = RetryPolicy::new(1, std::time::Duration::ZERO, std::time::Duration::ZERO);
        let localizer = Localizer::prepare(SafeTranslator::new(NoopTranslator, policy), &[], "ja").await;
        BlogPipeline::new(
            NullStorage,
            feeds,
            localizer,
            BlogReportBuilder { summary_limit: 200 },
            blogs,
            DateRange::new(date(2025, 8, 3), date(2025, 8, 9)).unwrap(),
            "./output",
        )
    }

    #[tokio::test]
    async fn test_posts_sorted_newest_first_and_empty_blogs_skipped() {
        let mut feeds = HashMap::new();
        feeds.insert(
            "https://a.example/feed".to_string(),
            vec![
                post("Older post", date(2025, 8, 4)),
                post("Outside window", date(2025, 7, 30)),
                post("Newer post", date(2025, 8, 8)),
            ],
        );
        feeds.insert(
            "https://b.example/feed".to_string(),
            vec![post("Last month", date(2025, 7, 1))],
        );
        let pipeline = pipeline(
            Feeds(feeds),
            vec![
                blog("Blog A", "https://a.example/feed"),
                blog("Blog B", "https://b.example/feed"),
            ],
        )
        .await;

        let batches = pipeline.extract().await.unwrap();
        assert_eq!(batches.len(), 2);

        let document = pipeline.transform(batches).await.unwrap();
        let md = &document.markdown;

        assert_eq!(document.item_count, 2);
        assert_eq!(document.file_name, "awsblogs_2025-08-03_2025-08-09.md");
        assert!(md.starts_with("# AWS ブログ記事まとめ (2025-08-03 ～ 2025-08-09)"));
        assert!(md.contains("## Blog A"));
        assert!(!md.contains("## Blog B"));
        assert!(!md.contains("Outside window"));
        assert!(md.find("### Newer post").unwrap() < md.find("### Older post").unwrap());
        assert!(md.contains("- **概要**: Newer post & more"));
    }

    #[tokio::test]
    async fn test_section_builds_unclassified_posts() {
        let pipeline = pipeline(Feeds(HashMap::new()), Vec::new()).await;

        let section = pipeline.section(FeedBatch {
            source: "AWS News Blog".to_string(),
            entries: vec![post("Same day first", date(2025, 8, 5)), post("Same day second", date(2025, 8, 5))],
        });

        assert_eq!(section.name, "AWS News Blog");
        assert_eq!(
            section.posts,
            vec![
                BlogPost {
                    title: "Same day first".to_string(),
                    link: "https://aws.amazon.com/blogs/Same-day-first".to_string(),
                    summary: "Same day first & more".to_string(),
                    published: date(2025, 8, 5),
                    translated_title: None,
                    translated_summary: None,
                },
                BlogPost {
                    title: "Same day second".to_string(),
                    link: "https://aws.amazon.com/blogs/Same-day-second".to_string(),
                    summary: "Same day second & more".to_string(),
                    published: date(2025, 8, 5),
                    translated_title: None,
                    translated_summary: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_error_is_fatal() {
        let pipeline = pipeline(
            Feeds(HashMap::new()),
            vec![blog("Missing", "https://missing.example/feed")],
        )
        .await;

        assert!(pipeline.extract().await.is_err());
    }
}
