//! Single review analysis

use std::path::PathBuf;

use tracing::info;

use crate::cli::handlers::read_input;
use crate::cli::output::*;
use crate::dashboard::Dashboard;
use crate::AppConfig;
use crate::Result;

pub async fn handle_analyze_command(
    config: &AppConfig,
    text: Option<String>,
    gauge: Option<PathBuf>,
    keywords: Option<usize>,
) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => read_input(&PathBuf::from("-"))?,
    };

    let mut config = config.clone();
    if let Some(n) = keywords {
        config.analysis.keyword_count = n;
    }

    let dashboard = Dashboard::from_config(&config)?;
    let mut view = ConsoleView::new();
    if let Some(path) = gauge {
        view = view.with_gauge_path(path);
    }

    print_info("🔍 Analyzing review...");
    if let Some(report) = dashboard.analyze_single(&text, &mut view)? {
        info!(
            "Review scored {} with {} keywords",
            report.sentiment.label,
            report.keywords.len()
        );
    }
    Ok(())
}
