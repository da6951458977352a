use crate::config::toml_config::DigestConfig;
use chrono::{Local, NaiveDate};
use clap::Args;

/// Flags shared by every digest binary; all of them are optional.
#[derive(Debug, Clone, Args)]
pub struct DigestArgs {
    /// Path to the TOML configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "aws-digest.toml")]
    pub config: String,

    /// Reference date (YYYY-MM-DD) used to compute the reporting week; defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Override the output directory from the configuration
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Keep source text instead of calling the translation service
    #[arg(long)]
    pub no_translate: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl DigestArgs {
    pub fn init_logging(&self) {
        if self.json_logs {
            crate::utils::logger::init_json_logger();
        } else {
            crate::utils::logger::init_cli_logger(self.verbose);
        }
    }

    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut DigestConfig) {
        if let Some(output_dir) = &self.output_dir {
            tracing::info!("Output directory overridden to: {}", output_dir);
            config.report.output_dir = output_dir.clone();
        }
        if self.no_translate {
            tracing::info!("Translation disabled from the command line");
            config.translation.enabled = false;
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}
