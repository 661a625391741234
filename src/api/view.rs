//! Dashboard view that collects panels into a JSON report

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::warn;

use crate::analysis::wordcloud::CloudLayout;
use crate::api::types::DashboardReport;
use crate::api::types::TableData;
use crate::api::types::TablePreview;
use crate::api::types::WordCloudPanel;
use crate::charts;
use crate::dashboard::BatchTable;
use crate::dashboard::DashboardView;
use crate::dashboard::Gauge;
use crate::dashboard::Metric;
use crate::models::HistogramBin;
use crate::models::LabelCount;
use crate::Result;

#[derive(Debug, Default)]
pub struct JsonView {
    report: DashboardReport,
    render_cloud: bool,
}

impl JsonView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also rasterize the word cloud into a base64 PNG
    pub fn with_cloud_png(mut self) -> Self {
        self.render_cloud = true;
        self
    }

    pub fn into_report(self) -> DashboardReport {
        self.report
    }
}

impl DashboardView for JsonView {
    fn warning(&mut self, message: &str) -> Result<()> {
        self.report.warnings.push(message.to_string());
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        self.report.notices.push(message.to_string());
        Ok(())
    }

    fn metrics(&mut self, metrics: &[Metric]) -> Result<()> {
        self.report.metrics.extend_from_slice(metrics);
        Ok(())
    }

    fn gauge(&mut self, gauge: &Gauge) -> Result<()> {
        self.report.gauge = Some(gauge.clone());
        Ok(())
    }

    fn keywords(&mut self, keywords: &[String]) -> Result<()> {
        self.report.keywords = Some(keywords.to_vec());
        Ok(())
    }

    fn preview(&mut self, headers: &[String], rows: &[Vec<Option<String>>]) -> Result<()> {
        self.report.preview = Some(TablePreview {
            headers: headers.to_vec(),
            rows: rows.to_vec(),
        });
        Ok(())
    }

    fn table(&mut self, table: &BatchTable) -> Result<()> {
        self.report.table = Some(TableData {
            headers: table.headers(),
            rows: table.rows(),
        });
        Ok(())
    }

    fn pie(&mut self, counts: &[LabelCount]) -> Result<()> {
        self.report.pie = Some(counts.to_vec());
        Ok(())
    }

    fn histogram(&mut self, bins: &[HistogramBin]) -> Result<()> {
        self.report.histogram = Some(bins.to_vec());
        Ok(())
    }

    fn word_cloud(&mut self, layout: &CloudLayout) -> Result<()> {
        let png_base64 = if self.render_cloud {
            match charts::draw_word_cloud(layout).and_then(|image| charts::encode_png(&image)) {
                Ok(png) => Some(BASE64.encode(png)),
                Err(e) => {
                    // placed words are still returned for client-side drawing
                    warn!("Word cloud rasterization failed: {}", e);
                    None
                }
            }
        } else {
            None
        };

        self.report.word_cloud = Some(WordCloudPanel {
            width: layout.width,
            height: layout.height,
            words: layout.words.clone(),
            png_base64,
        });
        Ok(())
    }
}
