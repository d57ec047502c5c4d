// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use image_scout::utils::logging::{format_info, format_success, format_warning};
use image_scout::utils::prompt::ask_user_query;
use image_scout::{Config, Credentials, ImagePipeline, RunOutcome};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "image_scout")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Find images for a free-text request via an LLM-optimized search", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Query to use instead of the interactive prompt
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Where to write the image URLs (overrides output.path)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    image_scout::utils::logging::init_logger(cli.color, cli.verbose);
    dotenvy::dotenv().ok();

    let mut config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    if let Some(output) = cli.output {
        config.output.path = output;
        config.validate().context("Invalid output path")?;
    }

    let credentials = Credentials::from_env().context("Missing API credentials")?;

    let user_query = match cli.query {
        Some(query) => query,
        None => ask_user_query().context("Failed to read query from stdin")?,
    };

    let pipeline = ImagePipeline::from_config(&config, credentials).with_progress(true);
    let outcome = pipeline.run(&user_query).await.context("Image lookup failed")?;

    println!("{}", format_info(&format!("Searched for: {}", outcome.query().query)));

    match outcome {
        RunOutcome::Saved {
            path, count, stats, ..
        } => {
            println!(
                "{}",
                format_success(&format!("Image URLs saved to {}", path.display()))
            );
            info!(
                "{} url(s) in {:.2}s",
                count,
                stats.total_duration().as_secs_f64()
            );
        }
        RunOutcome::NoImages { .. } => {
            println!("{}", format_warning("No images found."));
        }
    }

    Ok(())
}
