//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "reviewxai")]
#[command(about = "ReviewXAI: sentiment, keywords and word clouds for product reviews")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single review
    Analyze {
        /// Review text; read from stdin when omitted
        text: Option<String>,
        /// Save the polarity gauge as a PNG
        #[arg(long)]
        gauge: Option<PathBuf>,
        /// Override the number of keywords shown
        #[arg(short = 'n', long)]
        keywords: Option<usize>,
    },
    /// Analyze one text column of a CSV file
    Batch {
        /// CSV file with a header row
        csv: PathBuf,
        /// Column holding the review text
        #[arg(long)]
        column: String,
        /// Directory for results.csv and the chart PNGs (default: from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Render a word cloud from a text file ("-" for stdin)
    Wordcloud {
        /// Input text file
        input: PathBuf,
        /// Output PNG
        #[arg(short, long, default_value = "wordcloud.png")]
        output: PathBuf,
        /// Fixed layout seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default: from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS
        #[arg(long)]
        cors: bool,
    },
    /// Show current configuration
    Config,
}
