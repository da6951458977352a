use aws_digest::app;
use aws_digest::utils::validation::Validate;
use aws_digest::{window, DateRange, DigestArgs, DigestConfig, DigestError};
use clap::Parser;

/// Writes last week's posts from the configured AWS blogs as Markdown.
#[derive(Parser, Debug)]
#[command(name = "blog-digest", version, about)]
struct Cli {
    #[command(flatten)]
    args: DigestArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.args.init_logging();

    tracing::info!("Starting blog-digest");
    if let Err(e) = run(&cli.args).await {
        tracing::error!("❌ Blog digest failed: {}", e);
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
    tracing::info!(
        "Collecting posts from {} blog(s) for {} ～ {}",
        config.blogs.len(),
        week.start(),
        week.end()
    );

    let path = app::run_blogs(&config, DateRange::from(week)).await?;
    println!("✅ ブログまとめを {} に出力しました。", path);
    Ok(())
}
