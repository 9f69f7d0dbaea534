//! HTML export: a single self-contained page with inline theme styles.
//!
//! Generated block text is interpolated verbatim. Whatever markup the content
//! source returns ends up in the page, so callers that do not trust their
//! content source must filter it upstream. Title and description are caller
//! input, not generated text, and are escaped.

use std::fmt::Write as _;

use crate::assembly::{BlockKind, Document, DocumentBlock};

/// Renders one section of the page body.
pub type SectionRenderer = fn(&DocumentBlock, &Document) -> String;

/// Section renderers keyed by block kind, in canonical order.
pub const SECTION_RENDERERS: [(BlockKind, SectionRenderer); 5] = [
    (BlockKind::AboutUs, render_text_section),
    (BlockKind::Features, render_text_section),
    (BlockKind::Pricing, render_text_section),
    (BlockKind::Testimonials, render_text_section),
    (BlockKind::CallToAction, render_text_section),
];

fn renderer_for(kind: BlockKind) -> SectionRenderer {
    SECTION_RENDERERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, render)| *render)
        .unwrap_or(render_text_section)
}

/// Heading in the secondary brand color, then the generated text as one paragraph.
fn render_text_section(block: &DocumentBlock, document: &Document) -> String {
    format!(
        "<div class=\"section\" id=\"{slug}\">\n\
         <h2 style=\"color:{color};\">{name}</h2>\n\
         <p>{text}</p>\n\
         </div>\n",
        slug = block.kind.slug(),
        color = document.palette().secondary,
        name = block.name(),
        text = block.text,
    )
}

/// Renders the full HTML document.
pub fn render_html(document: &Document) -> String {
    let colors = document.colors();
    let palette = document.palette();
    let title = escape_html(document.title());

    let mut html = String::with_capacity(1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = write!(
        html,
        "<style>\n\
         body {{ background-color: {bg}; color: {fg}; font-family: Arial, sans-serif; padding: 30px; }}\n\
         h1 {{ color: {primary}; }}\n\
         h2 {{ color: {secondary}; }}\n\
         .section {{ margin-top: 30px; }}\n\
         </style>\n",
        bg = colors.background,
        fg = colors.foreground,
        primary = palette.primary,
        secondary = palette.secondary,
    );
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    let _ = writeln!(html, "<p>{}</p>", escape_html(document.description()));

    for block in document.blocks() {
        html.push_str(&renderer_for(block.kind)(block, document));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Minimal escaping for text content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use scraper::{Html, Selector};

    use crate::assembly::assemble;
    use crate::assembly::blocks::ContentBlock;
    use crate::assembly::theme::PaletteInput;

    fn doc_with(theme: &str, blocks: &[(BlockKind, &str)]) -> Document {
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
            theme,
            &PaletteInput::default(),
            blocks,
        )
        .unwrap()
    }

    fn select_texts(html: &str, selector: &str) -> Vec<String> {
        let parsed = Html::parse_document(html);
        let selector = Selector::parse(selector).unwrap();
        parsed
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    #[test]
    fn test_every_kind_has_a_renderer() {
        for kind in BlockKind::CANONICAL {
            assert!(SECTION_RENDERERS.iter().any(|(k, _)| *k == kind));
        }
    }

    #[test]
    fn test_scenario_markup() {
        let html = render_html(&doc_with("Light", &[(BlockKind::AboutUs, "We build tools.")]));
        assert!(html.contains("<h1>My Awesome Product</h1>"));
        assert!(html.contains("<h2 style=\"color:#ff7043;\">About Us</h2>"));
        assert!(html.contains("<p>We build tools.</p>"));
        assert!(html.contains("<p>Our product…</p>"));
        assert!(html.contains("<meta charset=\"utf-8\">"));
    }

    #[test]
    fn test_head_embeds_theme_and_palette_colors() {
        let html = render_html(&doc_with("Dark", &[]));
        assert!(html.contains("background-color: #333333; color: #FFFFFF;"));
        assert!(html.contains("h1 { color: #1a73e8; }"));
        assert!(html.contains("h2 { color: #ff7043; }"));
    }

    #[test]
    fn test_round_trip_block_names_match_document() {
        let d = doc_with(
            "Custom",
            &[
                (BlockKind::Testimonials, "Loved it."),
                (BlockKind::AboutUs, "We build tools."),
                (BlockKind::CallToAction, "Join now."),
            ],
        );
        let html = render_html(&d);

        let parsed: BTreeSet<String> = select_texts(&html, "h2").into_iter().collect();
        let expected: BTreeSet<String> = d.blocks().iter().map(|b| b.name().to_string()).collect();
        assert_eq!(parsed, expected);

        // and in canonical order
        assert_eq!(
            select_texts(&html, "h2"),
            vec!["About Us", "Testimonials", "Call to Action"]
        );
    }

    #[test]
    fn test_zero_blocks_is_well_formed() {
        let html = render_html(&doc_with("Light", &[]));
        assert_eq!(select_texts(&html, "h1"), vec!["My Awesome Product"]);
        assert!(select_texts(&html, "h2").is_empty());
        assert_eq!(select_texts(&html, "body > p"), vec!["Our product…"]);
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let d = doc_with("Light", &[(BlockKind::Pricing, "$5/month")]);
        assert_eq!(render_html(&d), render_html(&d));
    }

    #[test]
    fn test_generated_text_is_not_escaped() {
        let html = render_html(&doc_with("Light", &[(BlockKind::Features, "<b>Fast</b> & safe")]));
        assert!(html.contains("<p><b>Fast</b> & safe</p>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let blocks = vec![];
        let d = assemble(
            "Tom & Jerry <3",
            "a \"quoted\" tale",
            "Light",
            &PaletteInput::default(),
            blocks,
        )
        .unwrap();
        let html = render_html(&d);
        assert!(html.contains("<h1>Tom &amp; Jerry &lt;3</h1>"));
        assert!(html.contains("<title>Tom &amp; Jerry &lt;3</title>"));
        assert!(html.contains("<p>a &quot;quoted&quot; tale</p>"));
    }
}
