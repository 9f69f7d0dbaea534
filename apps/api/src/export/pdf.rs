//! PDF export: text-only, unstyled, paginated.
//!
//! Pipeline: document → plain paragraphs → sanitize → paginate → PDF objects.
//! The whole file is built in memory; a layout failure returns before any
//! byte is produced, so callers never see a truncated PDF.
//!
//! Object numbering is fixed (catalog, page tree, font, then two objects per
//! page), and no info dictionary or timestamp is written, so the same
//! document always yields the same bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use tracing::debug;

use crate::assembly::Document;
use crate::export::pagination::{paginate, Page, PageLayout};
use crate::export::sanitize::{encode_win_ansi, Sanitizer};
use crate::export::ExportError;

const FONT_RESOURCE: Name<'static> = Name(b"F1");

/// Flattens the document into the paragraphs that make up the text stream:
/// title, description, then a blank line, the block name and its text for
/// each block.
pub fn document_paragraphs(document: &Document) -> Vec<String> {
    let mut paragraphs = vec![
        document.title().to_string(),
        document.description().to_string(),
    ];
    for block in document.blocks() {
        paragraphs.push(String::new());
        paragraphs.push(block.name().to_string());
        paragraphs.push(block.text.clone());
    }
    paragraphs
}

/// Renders the document as PDF bytes.
pub fn render_pdf(
    document: &Document,
    layout: &PageLayout,
    sanitizer: &Sanitizer,
) -> Result<Vec<u8>, ExportError> {
    let paragraphs: Vec<String> = document_paragraphs(document)
        .iter()
        .map(|p| sanitizer.apply(p))
        .collect();

    let pages = paginate(&paragraphs, layout).map_err(|e| ExportError::pdf(e.to_string()))?;

    debug!(
        "Laid out '{}' on {} page(s) ({} lines/page)",
        document.title(),
        pages.len(),
        layout.lines_per_page()
    );

    Ok(write_pdf(&pages, layout))
}

fn write_pdf(pages: &[Page], layout: &PageLayout) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);

    // (page, content) pairs from object 4 onwards.
    let page_refs: Vec<(Ref, Ref)> = (0..pages.len() as i32)
        .map(|i| (Ref::new(4 + 2 * i), Ref::new(5 + 2 * i)))
        .collect();

    let mut pdf = Pdf::new();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_refs.iter().map(|(page_id, _)| *page_id))
        .count(pages.len() as i32);

    pdf.type1_font(font_id)
        .base_font(Name(layout.font.base_font()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let media_box = Rect::new(0.0, 0.0, layout.page_width, layout.page_height);

    for (page, (page_id, content_id)) in pages.iter().zip(&page_refs) {
        let mut page_writer = pdf.page(*page_id);
        page_writer
            .media_box(media_box)
            .parent(page_tree_id)
            .contents(*content_id);
        page_writer.resources().fonts().pair(FONT_RESOURCE, font_id);
        page_writer.finish();

        let content = page_content(page, layout);
        pdf.stream(*content_id, &content);
    }

    pdf.finish()
}

/// Content stream for one page: one text object, one `Tj` per non-blank line.
fn page_content(page: &Page, layout: &PageLayout) -> Vec<u8> {
    let mut content = Content::new();
    content.begin_text();
    content.set_font(FONT_RESOURCE, layout.font_size_pt);

    // Td is relative to the previous line start, so track where we are.
    let mut cursor_y = 0.0_f32;
    let mut placed = false;
    for (slot, line) in page.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = layout.baseline_y(slot);
        if placed {
            content.next_line(0.0, y - cursor_y);
        } else {
            content.next_line(layout.margin_left, y);
            placed = true;
        }
        cursor_y = y;
        content.show(Str(&encode_win_ansi(line)));
    }

    content.end_text();
    content.finish().to_vec()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble;
    use crate::assembly::blocks::{BlockKind, ContentBlock};
    use crate::assembly::theme::PaletteInput;
    use crate::export::font_metrics::PdfFont;
    use crate::export::pagination::default_page_layout;
    use crate::export::ExportFormat;

    fn doc(blocks: &[(BlockKind, &str)]) -> Document {
        let blocks = blocks
            .iter()
            .map(|(kind, text)| {
                let mut b = ContentBlock::new(*kind, true, "p");
                b.fulfill(*text);
                b
            })
            .collect();
        assemble(
            "My Awesome Product",
            "Our product…",
            "Light",
            &PaletteInput::default(),
            blocks,
        )
        .unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn render(document: &Document) -> Vec<u8> {
        render_pdf(
            document,
            &default_page_layout(PdfFont::Helvetica),
            &Sanitizer::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_paragraph_order() {
        let d = doc(&[
            (BlockKind::Features, "Fast."),
            (BlockKind::AboutUs, "We build tools."),
        ]);
        assert_eq!(
            document_paragraphs(&d),
            vec![
                "My Awesome Product",
                "Our product…",
                "",
                "About Us",
                "We build tools.",
                "",
                "Features",
                "Fast.",
            ]
        );
    }

    #[test]
    fn test_pdf_has_header_and_trailer() {
        let bytes = render(&doc(&[(BlockKind::AboutUs, "We build tools.")]));
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"%%EOF"));
        assert!(contains(&bytes, b"/Helvetica"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_pdf_contains_sanitized_text() {
        let bytes = render(&doc(&[(BlockKind::AboutUs, "We build tools.")]));
        assert!(contains(&bytes, b"(We build tools.)"));
        assert!(contains(&bytes, b"(Our product...)"));
        // neither the UTF-8 ellipsis nor its WinAnsi code point survive
        assert!(!contains(&bytes, "…".as_bytes()));
        assert!(!bytes.contains(&0x85));
    }

    #[test]
    fn test_ellipsis_replaced_at_same_position_in_block_text() {
        let bytes = render(&doc(&[(BlockKind::Pricing, "Plans start at $5… per month")]));
        assert!(contains(&bytes, b"(Plans start at $5... per month)"));
    }

    #[test]
    fn test_zero_blocks_renders_title_and_description() {
        let bytes = render(&doc(&[]));
        assert!(!bytes.is_empty());
        assert!(contains(&bytes, b"(My Awesome Product)"));
        assert!(contains(&bytes, b"(Our product...)"));
        assert!(!contains(&bytes, b"(About Us)"));
    }

    #[test]
    fn test_render_is_byte_identical_across_calls() {
        let d = doc(&[
            (BlockKind::AboutUs, "We build tools."),
            (BlockKind::CallToAction, "Sign up today!"),
        ]);
        assert_eq!(render(&d), render(&d));
    }

    #[test]
    fn test_long_document_spans_multiple_pages() {
        let layout = default_page_layout(PdfFont::Helvetica);
        let long = "Our platform keeps your builds fast and your teams happy. ".repeat(120);
        let d = doc(&[(BlockKind::Features, &long)]);

        let expected_pages = paginate(&document_paragraphs(&d), &layout).unwrap().len();
        assert!(expected_pages > 1);

        let bytes = render(&d);
        let count_entry = format!("/Count {expected_pages}");
        assert!(contains(&bytes, count_entry.as_bytes()));
    }

    #[test]
    fn test_layout_failure_yields_export_error() {
        let mut layout = default_page_layout(PdfFont::Helvetica);
        layout.font_size_pt = 0.0;
        let err = render_pdf(&doc(&[]), &layout, &Sanitizer::default()).unwrap_err();
        assert_eq!(err.format, ExportFormat::Pdf);
        assert!(err.reason.contains("font size"));
    }

    #[test]
    fn test_balanced_parentheses_pass_through() {
        let bytes = render(&doc(&[(BlockKind::AboutUs, "Tools (for you) back\\slash")]));
        assert!(contains(&bytes, br"(Tools (for you) back\\slash) Tj"));
    }

    #[test]
    fn test_unbalanced_parentheses_are_escaped() {
        let bytes = render(&doc(&[(BlockKind::AboutUs, "Tools :) and ( open")]));
        assert!(contains(&bytes, br"(Tools :\) and \( open) Tj"));
    }
}
