use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives a pipeline through extract, transform and load.
pub struct DigestEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DigestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Returns the path of the written document.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting digest run");

        tracing::info!("Fetching feeds...");
        let batches = self.pipeline.extract().await?;
        let fetched: usize = batches.iter().map(|b| b.entries.len()).sum();
        tracing::info!("Fetched {} entries from {} source(s)", fetched, batches.len());

        tracing::info!("Building report...");
        let document = self.pipeline.transform(batches).await?;
        tracing::info!(
            "Rendered {} item(s) into {}",
            document.item_count,
            document.file_name
        );

        let output_path = self.pipeline.load(document).await?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Document, FeedBatch, FeedEntry};
    use crate::utils::error::DigestError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingPipeline {
        stages: Mutex<Vec<&'static str>>,
        fail_extract: bool,
    }

    impl RecordingPipeline {
        fn new(fail_extract: bool) -> Self {
            Self {
                stages: Mutex::new(Vec::new()),
                fail_extract,
            }
        }
    }

    #[async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<Vec<FeedBatch>> {
            self.stages.lock().unwrap().push("extract");
            if self.fail_extract {
                return Err(DigestError::FeedParseError {
                    message: "broken feed".to_string(),
                });
            }
            Ok(vec![FeedBatch {
                source: "test".to_string(),
                entries: vec![FeedEntry {
                    title: "t".to_string(),
                    link: "l".to_string(),
                    summary: "s".to_string(),
                    published: None,
                }],
            }])
        }

        async fn transform(&self, batches: Vec<FeedBatch>) -> Result<Document> {
            self.stages.lock().unwrap().push("transform");
            Ok(Document {
                file_name: "out.md".to_string(),
                markdown: "# out".to_string(),
                item_count: batches[0].entries.len(),
            })
        }

        async fn load(&self, document: Document) -> Result<String> {
            self.stages.lock().unwrap().push("load");
            Ok(format!("/tmp/{}", document.file_name))
        }
    }

    #[tokio::test]
    async fn test_run_executes_stages_in_order() {
        let engine = DigestEngine::new(RecordingPipeline::new(false));
        let path = engine.run().await.unwrap();

        assert_eq!(path, "/tmp/out.md");
        assert_eq!(
            *engine.pipeline.stages.lock().unwrap(),
            vec!["extract", "transform", "load"]
        );
    }

    #[tokio::test]
    async fn test_extract_failure_stops_the_run() {
        let engine = DigestEngine::new(RecordingPipeline::new(true));
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, DigestError::FeedParseError { .. }));
        assert_eq!(*engine.pipeline.stages.lock().unwrap(), vec!["extract"]);
    }
}
