//! Pitch export: capture the rendered layout and write it to disk.

use chrono::{DateTime, Utc};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

use crate::constants::export::{CARD_WIDTH, DEFAULT_SCALE, PITCH_WIDTH, ROW_HEIGHT};
use crate::constants::ui::DEFAULT_TEXT_WIDTH;
use crate::error::AppError;
use crate::pitch::{PitchLayout, truncate};

/// Encoded capture ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    /// File extension without the dot
    pub extension: &'static str,
}

/// Turns a pitch layout into an image (or image-like) document.
pub trait PitchCapture {
    fn capture(&self, layout: &PitchLayout) -> Result<CapturedImage, AppError>;
}

/// Scalable vector capture of the pitch.
#[derive(Debug, Clone, Copy)]
pub struct SvgCapture {
    pub scale: u32,
}

impl Default for SvgCapture {
    fn default() -> Self {
        SvgCapture {
            scale: DEFAULT_SCALE,
        }
    }
}

const HEADER_HEIGHT: u32 = 40;
const CARD_HEIGHT: u32 = 60;
const PITCH_GREEN: &str = "#2e7d32";
const LINE_WHITE: &str = "#ffffff";
const EMPTY_CARD_FILL: &str = "#ffffff33";
const FILLED_CARD_FILL: &str = "#0d47a1";

const PHOTO_SIZE: u32 = 20;

impl SvgCapture {
    fn render(&self, layout: &PitchLayout) -> Result<String, fmt::Error> {
        let width = PITCH_WIDTH;
        let height = HEADER_HEIGHT + ROW_HEIGHT * layout.rows().len() as u32;
        let mut svg = String::new();

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {width} {height}">"#,
            width * self.scale,
            height * self.scale
        )?;
        writeln!(
            svg,
            r#"  <rect x="0" y="0" width="{width}" height="{height}" fill="{PITCH_GREEN}" stroke="{LINE_WHITE}" stroke-width="2"/>"#
        )?;
        writeln!(
            svg,
            r#"  <text x="{}" y="26" fill="{LINE_WHITE}" font-family="sans-serif" font-size="18" text-anchor="middle">{}</text>"#,
            width / 2,
            escape_xml(layout.formation().key())
        )?;

        for (row_number, row) in layout.rows().iter().enumerate() {
            let count = row.cards.len().max(1) as u32;
            let column_width = width / count;
            let card_width = CARD_WIDTH.min(column_width.saturating_sub(8));
            let top = HEADER_HEIGHT + ROW_HEIGHT * row_number as u32 + (ROW_HEIGHT - CARD_HEIGHT) / 2;

            for (column, card) in row.cards.iter().enumerate() {
                let center_x = column_width * column as u32 + column_width / 2;
                let left = center_x - card_width / 2;
                let fill = if card.is_empty() {
                    EMPTY_CARD_FILL
                } else {
                    FILLED_CARD_FILL
                };
                writeln!(
                    svg,
                    r#"  <g data-slot="{}"><rect x="{left}" y="{top}" width="{card_width}" height="{CARD_HEIGHT}" rx="8" fill="{fill}" stroke="{LINE_WHITE}"/>"#,
                    card.index
                )?;
                if let Some(player) = &card.player {
                    writeln!(
                        svg,
                        r#"    <image href="{}" x="{}" y="{}" width="{PHOTO_SIZE}" height="{PHOTO_SIZE}"/>"#,
                        escape_xml(player.photo_or_placeholder()),
                        left + 4,
                        top + 4
                    )?;
                }
                writeln!(
                    svg,
                    r#"    <text x="{center_x}" y="{}" fill="{LINE_WHITE}" font-family="sans-serif" font-size="12" font-weight="bold" text-anchor="middle">{}</text>"#,
                    top + 20,
                    card.position.code()
                )?;
                writeln!(
                    svg,
                    r#"    <text x="{center_x}" y="{}" fill="{LINE_WHITE}" font-family="sans-serif" font-size="11" text-anchor="middle">{}</text></g>"#,
                    top + 42,
                    escape_xml(&truncate(card.label(), 18))
                )?;
            }
        }
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

impl PitchCapture for SvgCapture {
    fn capture(&self, layout: &PitchLayout) -> Result<CapturedImage, AppError> {
        if self.scale == 0 {
            return Err(AppError::export_error("scale must be at least 1"));
        }

        let svg = self
            .render(layout)
            .map_err(|e| AppError::export_error(format!("cannot render SVG: {e}")))?;

        Ok(CapturedImage {
            bytes: svg.into_bytes(),
            extension: "svg",
        })
    }
}

/// Plain-text capture, the same rendering `--once` prints.
#[derive(Debug, Clone, Copy)]
pub struct TextCapture {
    pub width: usize,
}

impl Default for TextCapture {
    fn default() -> Self {
        TextCapture {
            width: DEFAULT_TEXT_WIDTH,
        }
    }
}

impl PitchCapture for TextCapture {
    fn capture(&self, layout: &PitchLayout) -> Result<CapturedImage, AppError> {
        let mut text = layout.to_text(self.width).join("\n");
        text.push('\n');
        Ok(CapturedImage {
            bytes: text.into_bytes(),
            extension: "txt",
        })
    }
}

/// `lineup-{formation}-{unix_millis}.{ext}`
pub fn export_file_name(formation_key: &str, now: DateTime<Utc>, extension: &str) -> String {
    format!(
        "lineup-{formation_key}-{}.{extension}",
        now.timestamp_millis()
    )
}

/// Captures `layout` and writes it into `dir`, creating the directory when
/// needed. Returns the written path.
#[instrument(skip(capture, layout), fields(formation = %layout.formation()))]
pub async fn export_pitch(
    capture: &dyn PitchCapture,
    layout: &PitchLayout,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, AppError> {
    let image = capture.capture(layout)?;

    fs::create_dir_all(dir).await.map_err(|e| {
        AppError::export_error(format!("cannot create '{}': {e}", dir.display()))
    })?;

    let path = dir.join(export_file_name(
        layout.formation().key(),
        now,
        image.extension,
    ));
    fs::write(&path, &image.bytes).await.map_err(|e| {
        AppError::export_error(format!("cannot write '{}': {e}", path.display()))
    })?;

    info!("Exported {} bytes to {}", image.bytes.len(), path.display());
    Ok(path)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
