use crate::domain::model::{Document, FeedBatch, FeedEntry};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Destination for rendered reports.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Supplies raw entries for a feed URL.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>>;
}

/// A single, fallible machine-translation call.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, dest: &str) -> Result<String>;
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Box<T> {
    async fn translate(&self, text: &str, dest: &str) -> Result<String> {
        (**self).translate(text, dest).await
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<FeedBatch>>;
    async fn transform(&self, batches: Vec<FeedBatch>) -> Result<Document>;
    async fn load(&self, document: Document) -> Result<String>;
}
