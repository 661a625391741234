//! CSV batch analysis

use std::path::PathBuf;

use tracing::info;

use crate::cli::output::*;
use crate::dashboard::Dashboard;
use crate::dashboard::ReviewTable;
use crate::AppConfig;
use crate::Result;

pub async fn handle_batch_command(
    config: &AppConfig,
    csv: PathBuf,
    column: String,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let out_dir = out_dir.unwrap_or_else(|| config.charts.output_dir.clone());

    print_info(&format!("📂 Loading {}", csv.display()));
    let table = ReviewTable::from_path(&csv)?;
    info!("Loaded {} rows from {}", table.len(), csv.display());

    ensure_dir(&out_dir)?;
    let dashboard = Dashboard::from_config(config)?;
    let mut view = ConsoleView::new().with_out_dir(&out_dir);

    print_info(&format!("⏳ Analyzing column '{column}'..."));
    let report = dashboard.analyze_batch(&table, &column, &mut view)?;

    print_success(&format!(
        "Analyzed {} reviews, {} files written to {}",
        report.table.len(),
        view.written().len(),
        out_dir.display()
    ));
    Ok(())
}
