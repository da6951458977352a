use crate::core::classifier::Classifier;
use crate::core::report::{Report, ReportBuilder};
use crate::core::sanitizer::{is_important, strip_markup};
use crate::core::translate::Localizer;
use crate::core::{DateRange, Document, FeedBatch, FeedSource, Item, Pipeline, Storage, Translator};
use crate::utils::error::Result;
use std::path::Path;

pub const WEEKLY_INTRO: &str = "先週の AWS サービスアップデート情報をまとめています。";
pub const CUSTOM_RANGE_INTRO: &str = "期間内の AWS サービスアップデート情報をまとめています。";

/// Service-update digest over the "what's new" feed.
pub struct UpdatesPipeline<S: Storage, F: FeedSource, T: Translator> {
    storage: S,
    source: F,
    localizer: Localizer<T>,
    classifier: Classifier,
    builder: ReportBuilder,
    feed_url: String,
    range: DateRange,
    output_dir: String,
}

impl<S: Storage, F: FeedSource, T: Translator> UpdatesPipeline<S, F, T> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        storage: S,
        source: F,
        localizer: Localizer<T>,
        classifier: Classifier,
        builder: ReportBuilder,
        feed_url: impl Into<String>,
        range: DateRange,
        output_dir: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            source,
            localizer,
            classifier,
            builder,
            feed_url: feed_url.into(),
            range,
            output_dir: output_dir.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("awsupdates_{}_{}.md", self.range.start, self.range.end)
    }

    fn to_items(&self, batches: Vec<FeedBatch>) -> Vec<Item> {
        let mut items = Vec::new();

        for entry in batches.into_iter().flat_map(|batch| batch.entries) {
            let Some(published) = entry.published else {
                tracing::debug!("Skipping entry without publish date: {}", entry.title);
                continue;
            };
            if !self.range.contains(published) {
                continue;
            }

            let summary = strip_markup(&entry.summary);
            let (category, service) = self.classifier.classify(&entry.title);
            let important = is_important(&entry.title, &summary);

            items.push(Item {
                title: entry.title,
                link: entry.link,
                summary,
                published,
                service,
                category,
                important,
                translated_title: None,
                translated_summary: None,
            });
        }

        items
    }
}

#[async_trait::async_trait]
impl<S: Storage, F: FeedSource, T: Translator> Pipeline for UpdatesPipeline<S, F, T> {
    async fn extract(&self) -> Result<Vec<FeedBatch>> {
        let entries = self.source.fetch(&self.feed_url).await?;
        Ok(vec![FeedBatch {
            source: self.feed_url.clone(),
            entries,
        }])
    }

    async fn transform(&self, batches: Vec<FeedBatch>) -> Result<Document> {
        let items = self.to_items(batches);
        tracing::info!(
            "{} item(s) between {} and {}",
            items.len(),
            self.range.start,
            self.range.end
        );

        let mut report = Report::assemble(items, &self.classifier);
        for item in report.items_mut() {
            item.translated_title = Some(self.localizer.localize(&item.title).await);
            item.translated_summary = Some(self.localizer.localize(&item.summary).await);
        }

        Ok(Document {
            file_name: self.file_name(),
            markdown: self.builder.build(&report, &self.range),
            item_count: report.total(),
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
