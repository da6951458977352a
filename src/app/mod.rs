//! Wiring from a loaded configuration to a finished digest run.

pub mod pipelines;

use crate::adapters::http::HttpFeedSource;
use crate::adapters::storage::LocalStorage;
use crate::adapters::translate::{GoogleTranslator, NoopTranslator};
use crate::config::toml_config::{DigestConfig, TranslationConfig};
use crate::core::classifier::{CategoryTable, Classifier};
use crate::core::etl::DigestEngine;
use crate::core::report::{BlogReportBuilder, ReportBuilder};
use crate::core::translate::{Localizer, SafeTranslator};
use crate::core::{DateRange, Translator};
use crate::utils::error::Result;
use chrono::Local;
use pipelines::{BlogPipeline, UpdatesPipeline};

pub fn translator(config: &TranslationConfig) -> Result<Box<dyn Translator>> {
    if config.enabled {
        Ok(Box::new(GoogleTranslator::new(
            &config.endpoint,
            config.timeout(),
        )?))
    } else {
        Ok(Box::new(NoopTranslator))
    }
}

/// Builds the localizer, translating `terms` up front so they can be restored later.
pub async fn localizer(
    config: &TranslationConfig,
    terms: &[String],
) -> Result<Localizer<Box<dyn Translator>>> {
    let safe = SafeTranslator::new(translator(config)?, config.retry_policy());
    Ok(Localizer::prepare(safe, terms, &config.dest_lang).await)
}

/// Runs the service-update digest over `range` and returns the written path.
pub async fn run_updates(config: &DigestConfig, range: DateRange, intro: &str) -> Result<String> {
    let classifier = Classifier::new(CategoryTable::load(&config.report.mappings_path));
    let localizer = localizer(&config.translation, &config.translation.exceptional_terms).await?;
    let builder = ReportBuilder::new(
        intro,
        config.report.summary_limit,
        Local::now().date_naive(),
    );

    let pipeline = UpdatesPipeline::new(
        LocalStorage::new(&config.report.output_dir),
        HttpFeedSource::new(config.fetch_timeout(), &config.source.user_agent)?,
        localizer,
        classifier,
        builder,
        config.source.updates_feed.clone(),
        range,
        config.report.output_dir.clone(),
    );

    DigestEngine::new(pipeline).run().await
}

/// Runs the blog digest over `range` and returns the written path.
pub async fn run_blogs(config: &DigestConfig, range: DateRange) -> Result<String> {
    let localizer = localizer(&config.translation, &[]).await?;
    let builder = BlogReportBuilder {
        summary_limit: config.report.blog_summary_limit,
    };

    let pipeline = BlogPipeline::new(
        LocalStorage::new(&config.report.output_dir),
        HttpFeedSource::new(config.fetch_timeout(), &config.source.user_agent)?,
        localizer,
        builder,
        config.blogs.clone(),
        range,
        config.report.output_dir.clone(),
    );

    DigestEngine::new(pipeline).run().await
}
