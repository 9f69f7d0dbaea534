//! Text flow for the PDF export: word wrap and automatic page breaks.
//!
//! Layout is purely arithmetic: paragraphs are greedily wrapped at the text
//! width measured with static font metrics, then poured into fixed-height
//! pages. No caller-controlled page breaks exist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::font_metrics::{get_metrics, FontMetricTable, PdfFont};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry and font settings for the paginated export. All lengths in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    /// Distance from the bottom edge at which a page break is forced.
    pub margin_bottom: f32,
    pub font: PdfFont,
    pub font_size_pt: f32,
    pub line_height: f32,
}

/// Returns the default layout for the given font.
///
/// A4 portrait, 12pt text on a 10mm line, 10mm side/top margins and a 15mm
/// auto-break margin at the bottom.
pub fn default_page_layout(font: PdfFont) -> PageLayout {
    PageLayout {
        page_width: 210.0 * POINTS_PER_MM,
        page_height: 297.0 * POINTS_PER_MM,
        margin_left: 10.0 * POINTS_PER_MM,
        margin_right: 10.0 * POINTS_PER_MM,
        margin_top: 10.0 * POINTS_PER_MM,
        margin_bottom: 15.0 * POINTS_PER_MM,
        font,
        font_size_pt: 12.0,
        line_height: 10.0 * POINTS_PER_MM,
    }
}

impl PageLayout {
    pub fn text_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn text_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Number of line slots on one page. Zero means nothing fits.
    pub fn lines_per_page(&self) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        (self.text_height() / self.line_height).floor().max(0.0) as usize
    }

    /// Baseline of the `slot`-th line on a page, in PDF user space (origin
    /// bottom-left). Text sits vertically centred in its line slot.
    pub fn baseline_y(&self, slot: usize) -> f32 {
        let slot_top = self.page_height - self.margin_top - slot as f32 * self.line_height;
        slot_top - self.line_height / 2.0 - self.font_size_pt * 0.3
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.font_size_pt.is_nan() || self.font_size_pt <= 0.0 {
            return Err(LayoutError::InvalidFontSize(self.font_size_pt));
        }
        if self.text_width().is_nan() || self.text_width() <= 0.0 {
            return Err(LayoutError::NoTextWidth);
        }
        if self.lines_per_page() == 0 {
            return Err(LayoutError::NoVerticalSpace);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("font size must be positive, got {0}")]
    InvalidFontSize(f32),

    #[error("margins leave no horizontal space for text")]
    NoTextWidth,

    #[error("page has no room for a single line")]
    NoVerticalSpace,
}

// ────────────────────────────────────────────────────────────────────────────
// Flow
// ────────────────────────────────────────────────────────────────────────────

/// One laid-out page: a line per slot, top to bottom. Empty strings are blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

/// Wraps every paragraph and distributes the lines over as many pages as needed.
///
/// Embedded newlines inside a paragraph become hard line breaks; blank lines
/// that would land at the top of a fresh page are dropped. At least one page
/// is always returned.
pub fn paginate(paragraphs: &[String], layout: &PageLayout) -> Result<Vec<Page>, LayoutError> {
    layout.validate()?;

    let metrics = get_metrics(layout.font);
    let per_page = layout.lines_per_page();

    let mut pages = Vec::new();
    let mut current: Vec<String> = Vec::with_capacity(per_page);

    for line in paragraphs
        .iter()
        .flat_map(|p| wrap_paragraph(p, metrics, layout))
    {
        if current.len() == per_page {
            pages.push(Page {
                lines: std::mem::take(&mut current),
            });
        }
        if current.is_empty() && line.is_empty() && !pages.is_empty() {
            continue;
        }
        current.push(line);
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(Page { lines: current });
    }

    Ok(pages)
}

/// Wraps one paragraph into lines no wider than the text width.
fn wrap_paragraph(paragraph: &str, metrics: &FontMetricTable, layout: &PageLayout) -> Vec<String> {
    paragraph
        .split('\n')
        .flat_map(|hard_line| wrap_line(hard_line.trim_end_matches('\r'), metrics, layout))
        .collect()
}

/// Greedy word wrap of a single hard line. Returns one empty string for a
/// blank input so blank lines survive as vertical space.
fn wrap_line(text: &str, metrics: &FontMetricTable, layout: &PageLayout) -> Vec<String> {
    let max_width = layout.text_width();
    let size = layout.font_size_pt;
    let space_w = metrics.space_width(size);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in split_oversized(word, metrics, size, max_width) {
            let piece_w = metrics.measure_str(&piece, size);

            if current.is_empty() {
                current_width = piece_w;
                current = piece;
            } else if current_width + space_w + piece_w > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = piece_w;
                current = piece;
            } else {
                current.push(' ');
                current.push_str(&piece);
                current_width += space_w + piece_w;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits a word wider than the line into line-sized chunks by character.
fn split_oversized(
    word: &str,
    metrics: &FontMetricTable,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    if metrics.measure_str(word, size) <= max_width {
        return vec![word.to_string()];
    }

    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut width = 0.0_f32;
    for c in word.chars() {
        let w = metrics.char_units(c) as f32 * size / 1000.0;
        if !chunk.is_empty() && width + w > max_width {
            chunks.push(std::mem::take(&mut chunk));
            width = 0.0;
        }
        chunk.push(c);
        width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
