//! Standalone word cloud rendering

use std::path::PathBuf;

use tracing::info;

use crate::analysis::wordcloud::WordCloud;
use crate::charts;
use crate::cli::handlers::read_input;
use crate::cli::output::*;
use crate::lexicon::Lexicons;
use crate::AppConfig;
use crate::Result;

pub async fn handle_wordcloud_command(
    config: &AppConfig,
    input: PathBuf,
    output: PathBuf,
    seed: Option<u64>,
) -> Result<()> {
    let text = read_input(&input)?;
    let lexicons = Lexicons::from_config(&config.analysis)?;

    let mut cloud = WordCloud::new(lexicons, &config.wordcloud);
    if let Some(seed) = seed {
        cloud = cloud.with_seed(seed);
    }

    let layout = cloud.layout(&text)?;
    info!(
        "Placed {} words on a {}x{} canvas",
        layout.words.len(),
        layout.width,
        layout.height
    );

    let image = charts::draw_word_cloud(&layout)?;
    charts::save_png(&image, &output)?;
    print_success(&format!(
        "Word cloud with {} words saved to {}",
        layout.words.len(),
        output.display()
    ));
    Ok(())
}
