pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::DigestArgs;

pub use adapters::{http::HttpFeedSource, storage::LocalStorage, translate::GoogleTranslator};
pub use config::DigestConfig;
pub use crate::core::{etl::DigestEngine, window};
pub use domain::model::{DateRange, WeekRange};
pub use utils::error::{DigestError, Result};
