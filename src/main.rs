use std::process::ExitCode;

use clap::Parser;
use reviewxai::cli::*;
use reviewxai::AppConfig;
use reviewxai::Result;
use tracing::error;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    if cli.verbose {
        reviewxai::logging::init_logging_with_level("debug")?;
    } else {
        reviewxai::logging::init_logging_with_config(Some(&config))?;
    }
    if config.logging.backtrace && std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }
    info!("Configuration loaded successfully");

    match cli.command {
        Commands::Analyze {
            text,
            gauge,
            keywords,
        } => handle_analyze_command(&config, text, gauge, keywords).await,
        Commands::Batch {
            csv,
            column,
            out_dir,
        } => handle_batch_command(&config, csv, column, out_dir).await,
        Commands::Wordcloud {
            input,
            output,
            seed,
        } => handle_wordcloud_command(&config, input, output, seed).await,
        Commands::Serve { host, port, cors } => handle_serve_api(&config, host, port, cors).await,
        Commands::Config => handle_config_command(&config).await,
    }
}
