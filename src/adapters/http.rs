use crate::domain::model::FeedEntry;
use crate::domain::ports::FeedSource;
use crate::utils::error::{DigestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        tracing::debug!("Fetching feed: {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        parse_feed(&body)
    }
}

/// Parses RSS/Atom content into raw entries.
pub fn parse_feed(content: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(content).map_err(|e| DigestError::FeedParseError {
        message: e.to_string(),
    })?;

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link: entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default(),
            summary: entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default(),
            published: entry.published.map(|dt| dt.date_naive()),
        })
        .collect();

    Ok(entries)
}
