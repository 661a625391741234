//! Raster rendering of dashboard panels with plotters
//!
//! Everything draws into an in-memory RGB buffer so the CLI can save PNG
//! files and the API can inline them as base64.

use std::f64::consts::PI;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::debug;

use crate::analysis::wordcloud::CloudLayout;
use crate::models::GaugeBand;
use crate::models::HistogramBin;
use crate::models::LabelCount;
use crate::ReviewXaiError;
use crate::Result;

/// Slice colors of the sentiment pie, in slice order
pub const PIE_PALETTE: [&str; 3] = ["#A1D99B", "#2A5470", "#009688"];
pub const HISTOGRAM_COLOR: &str = "#00C29A";

const GAUGE_SIZE: (u32, u32) = (600, 340);
const PIE_SIZE: (u32, u32) = (560, 400);
const HISTOGRAM_SIZE: (u32, u32) = (640, 400);
const FONT: &str = "sans-serif";
/// Polygon points per full turn when approximating arcs
const ARC_STEPS: usize = 180;

/// Parse `#RRGGBB`
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn rgb(hex: &str) -> RGBColor {
    let (r, g, b) = parse_hex_color(hex).unwrap_or((0, 0, 0));
    RGBColor(r, g, b)
}

fn render_err<E: std::fmt::Display>(e: E) -> ReviewXaiError {
    ReviewXaiError::Render(e.to_string())
}

fn rasterize<F>(width: u32, height: u32, draw: F) -> Result<RgbImage>
where
    F: for<'a> FnOnce(&DrawingArea<BitMapBackend<'a>, Shift>) -> Result<()>,
{
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(&root)?;
        root.present().map_err(render_err)?;
    }
    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ReviewXaiError::Render("raster buffer size mismatch".to_string()))
}

/// Points along a circle arc; angles in radians, counter-clockwise, y pointing down
fn arc(center: (i32, i32), radius: f64, from: f64, to: f64) -> Vec<(i32, i32)> {
    let steps = ((ARC_STEPS as f64) * (to - from).abs() / (2.0 * PI)).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let angle = from + (to - from) * i as f64 / steps as f64;
            (
                center.0 + (radius * angle.cos()).round() as i32,
                center.1 - (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// Draw a laid-out word cloud
pub fn draw_word_cloud(layout: &CloudLayout) -> Result<RgbImage> {
    debug!("Rendering word cloud with {} words", layout.words.len());
    rasterize(layout.width, layout.height, |root| {
        let (r, g, b) = layout.background;
        root.fill(&RGBColor(r, g, b)).map_err(render_err)?;

        for word in &layout.words {
            let (r, g, b) = word.color;
            let color = RGBColor(r, g, b);
            let font = (FONT, word.font_size).into_font();
            let (style, anchor) = if word.rotated {
                // Rotated text hangs to the left of its anchor
                (
                    font.transform(FontTransform::Rotate90).color(&color),
                    ((word.x + word.width) as i32, word.y as i32),
                )
            } else {
                (font.color(&color), (word.x as i32, word.y as i32))
            };
            root.draw(&Text::new(word.word.as_str(), anchor, style))
                .map_err(render_err)?;
        }
        Ok(())
    })
}

/// Half-circle gauge of `polarity` over [-1, 1] with colored bands
pub fn draw_gauge(polarity: f64, bands: &[GaugeBand], bar_color: &str) -> Result<RgbImage> {
    let (width, height) = GAUGE_SIZE;
    rasterize(width, height, |root| {
        root.fill(&WHITE).map_err(render_err)?;

        let center = (width as i32 / 2, height as i32 - 50);
        let (outer, inner) = (230.0, 150.0);
        // -1 sits at the left end of the dial, +1 at the right
        let angle = |value: f64| PI * (1.0 - (value.clamp(-1.0, 1.0) + 1.0) / 2.0);

        for band in bands {
            let mut points = arc(center, outer, angle(band.from), angle(band.to));
            points.extend(arc(center, inner, angle(band.to), angle(band.from)));
            root.draw(&Polygon::new(points, rgb(&band.color).filled()))
                .map_err(render_err)?;
        }

        let mut bar = arc(center, 210.0, angle(-1.0), angle(polarity));
        bar.extend(arc(center, 170.0, angle(polarity), angle(-1.0)));
        root.draw(&Polygon::new(bar, rgb(bar_color).filled()))
            .map_err(render_err)?;

        let title = (FONT, 26).into_font().color(&BLACK);
        root.draw(&Text::new("Sentiment Polarity", (center.0 - 110, 12), title))
            .map_err(render_err)?;
        let value = (FONT, 40).into_font().color(&BLACK);
        root.draw(&Text::new(
            format!("{polarity:.2}"),
            (center.0 - 40, center.1 - 60),
            value,
        ))
        .map_err(render_err)?;

        let tick = (FONT, 16).into_font().color(&BLACK);
        for (label, x) in [("-1", center.0 - 240), ("0", center.0 - 5), ("1", center.0 + 232)] {
            let y = if label == "0" { center.1 - 255 } else { center.1 + 8 };
            root.draw(&Text::new(label, (x, y), tick.clone()))
                .map_err(render_err)?;
        }
        Ok(())
    })
}

/// Pie of label counts, slices clockwise from twelve o'clock
pub fn draw_pie(counts: &[LabelCount]) -> Result<RgbImage> {
    let (width, height) = PIE_SIZE;
    let total: usize = counts.iter().map(|c| c.count).sum();
    rasterize(width, height, |root| {
        root.fill(&WHITE).map_err(render_err)?;
        let title = (FONT, 24).into_font().color(&BLACK);
        root.draw(&Text::new("Sentiment Distribution", (20, 12), title))
            .map_err(render_err)?;
        if total == 0 {
            return Ok(());
        }

        let center = (200, 220);
        let radius = 150.0;
        let legend = (FONT, 16).into_font().color(&BLACK);
        let mut start = PI / 2.0;

        for (i, slice) in counts.iter().enumerate() {
            let color = rgb(PIE_PALETTE[i % PIE_PALETTE.len()]);
            let share = slice.count as f64 / total as f64;
            let end = start - share * 2.0 * PI;

            let mut points = vec![center];
            points.extend(arc(center, radius, start, end));
            root.draw(&Polygon::new(points, color.filled()))
                .map_err(render_err)?;
            start = end;

            let y = 80 + 28 * i as i32;
            root.draw(&Rectangle::new([(390, y), (406, y + 16)], color.filled()))
                .map_err(render_err)?;
            root.draw(&Text::new(
                format!("{} {:.1}%", slice.label, share * 100.0),
                (414, y),
                legend.clone(),
            ))
            .map_err(render_err)?;
        }
        Ok(())
    })
}

/// Bar histogram of polarity bins
pub fn draw_histogram(bins: &[HistogramBin]) -> Result<RgbImage> {
    let (width, height) = HISTOGRAM_SIZE;
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Err(ReviewXaiError::InvalidInput(
            "histogram needs at least one bin".to_string(),
        ));
    };
    let x_range = first.start..last.end;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    let color = rgb(HISTOGRAM_COLOR);

    rasterize(width, height, |root| {
        root.fill(&WHITE).map_err(render_err)?;
        let mut chart = ChartBuilder::on(root)
            .caption("Polarity Distribution", (FONT, 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, 0f64..max_count * 1.1)
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .x_desc("Polarity")
            .y_desc("count")
            .draw()
            .map_err(render_err)?;
        chart
            .draw_series(bins.iter().map(|bin| {
                Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], color.filled())
            }))
            .map_err(render_err)?;
        Ok(())
    })
}

/// PNG bytes of an image
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Write an image as PNG, creating parent directories
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, encode_png(image)?)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
