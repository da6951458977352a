use crate::adapters::translate::DEFAULT_TRANSLATE_ENDPOINT;
use crate::core::translate::{RetryPolicy, DEFAULT_EXCEPTIONAL_TERMS};
use crate::utils::error::{DigestError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_UPDATES_FEED: &str = "https://aws.amazon.com/about-aws/whats-new/recent/feed/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub source: SourceConfig,
    pub blogs: Vec<BlogSource>,
    pub translation: TranslationConfig,
    pub report: ReportConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            blogs: default_blogs(),
            translation: TranslationConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub updates_feed: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            updates_feed: DEFAULT_UPDATES_FEED.to_string(),
            timeout_seconds: 30,
            user_agent: format!("aws-digest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogSource {
    pub name: String,
    pub url: String,
}

fn default_blogs() -> Vec<BlogSource> {
    [
        ("AWS News Blog", "https://aws.amazon.com/blogs/aws/feed/"),
        ("AWS Architecture Blog", "https://aws.amazon.com/blogs/architecture/feed/"),
        ("Amazon Web Services ブログ", "https://aws.amazon.com/jp/blogs/news/feed/"),
    ]
    .into_iter()
    .map(|(name, url)| BlogSource {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub dest_lang: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub max_attempts: usize,
    pub backoff_min_ms: u64,
    pub backoff_max_ms: u64,
    pub exceptional_terms: Vec<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dest_lang: "ja".to_string(),
            endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            timeout_seconds: 15,
            max_attempts: 3,
            backoff_min_ms: 1_000,
            backoff_max_ms: 3_000,
            exceptional_terms: DEFAULT_EXCEPTIONAL_TERMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TranslationConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.backoff_min_ms),
            Duration::from_millis(self.backoff_max_ms),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: String,
    pub mappings_path: String,
    pub summary_limit: usize,
    pub blog_summary_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            mappings_path: "service_mappings.json".to_string(),
            summary_limit: 200,
            blog_summary_limit: 200,
        }
    }
}

impl DigestConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when it exists, otherwise falls back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            tracing::info!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DigestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_RE: OnceLock<Regex> = OnceLock::new();
        let re = ENV_RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }
}

impl Validate for DigestConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.updates_feed", &self.source.updates_feed)?;
        validation::validate_positive_number(
            "source.timeout_seconds",
            self.source.timeout_seconds as usize,
            1,
        )?;

        for blog in &self.blogs {
            validation::validate_non_empty_string("blogs.name", &blog.name)?;
            validation::validate_url("blogs.url", &blog.url)?;
        }

        if self.translation.enabled {
            validation::validate_url("translation.endpoint", &self.translation.endpoint)?;
            validation::validate_non_empty_string(
                "translation.dest_lang",
                &self.translation.dest_lang,
            )?;
            validation::validate_positive_number(
                "translation.max_attempts",
                self.translation.max_attempts,
                1,
            )?;
            validation::validate_ordered(
                "translation.backoff_ms",
                self.translation.backoff_min_ms,
                self.translation.backoff_max_ms,
            )?;
        }

        validation::validate_path("report.output_dir", &self.report.output_dir)?;
        validation::validate_positive_number("report.summary_limit", self.report.summary_limit, 1)?;
        validation::validate_positive_number(
            "report.blog_summary_limit",
            self.report.blog_summary_limit,
            1,
        )?;

        Ok(())
    }
}
