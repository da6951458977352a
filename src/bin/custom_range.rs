use aws_digest::app::{self, pipelines::CUSTOM_RANGE_INTRO};
use aws_digest::utils::validation::Validate;
use aws_digest::{window, DateRange, DigestArgs, DigestConfig, DigestError};
use chrono::NaiveDate;
use clap::Parser;

/// Writes the AWS "what's new" digest for an explicit date range.
#[derive(Parser, Debug)]
#[command(name = "custom-range", version, about)]
struct Cli {
    /// First day of the range (YYYY-MM-DD), inclusive; defaults to the reporting week's Sunday
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD), inclusive; defaults to the reporting week's Saturday
    #[arg(long)]
    end: Option<NaiveDate>,

    #[command(flatten)]
    args: DigestArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.args.init_logging();

    tracing::info!("Starting custom-range");
    if let Err(e) = run(&cli).await {
        tracing::error!("❌ Digest failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli) -> Result<(), DigestError> {
    let week = window::compute(cli.args.reference_date());
    let range = DateRange::new(
        cli.start.unwrap_or(week.start()),
        cli.end.unwrap_or(week.end()),
    )?;
    tracing::info!("Reporting range: {} ～ {}", range.start, range.end);

    let mut config = DigestConfig::load_or_default(&cli.args.config)?;
    cli.args.apply(&mut config);
    config.validate()?;

    let path = app::run_updates(&config, range, CUSTOM_RANGE_INTRO).await?;
    println!("✅ 更新情報を {} に出力しました。", path);
    Ok(())
}
