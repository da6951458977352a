use aws_digest::app::{self, pipelines::WEEKLY_INTRO};
use aws_digest::utils::validation::Validate;
use aws_digest::{window, DateRange, DigestArgs, DigestConfig, DigestError};
use clap::Parser;

/// Writes last week's AWS "what's new" digest as Markdown.
#[derive(Parser, Debug)]
#[command(name = "aws-digest", version, about)]
struct Cli {
    #[command(flatten)]
    args: DigestArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.args.init_logging();

    tracing::info!("Starting aws-digest");
    if let Err(e) = run(&cli.args).await {
        tracing::error!("❌ Digest failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: &DigestArgs) -> Result<(), DigestError> {
    let mut config = DigestConfig::load_or_default(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    let week = window::compute(args.reference_date());
    tracing::info!("Reporting week: {} ～ {}", week.start(), week.end());

    let path = app::run_updates(&config, DateRange::from(week), WEEKLY_INTRO).await?;
    println!("✅ 更新情報を {} に出力しました。", path);
    Ok(())
}
