//! Document assembly: theme + palette + fulfilled blocks → canonical `Document`.
//!
//! Pure transform. Blocks that were not selected, or whose generation failed,
//! are dropped silently; the resulting document never carries placeholders.

use serde::Serialize;
use tracing::debug;

use crate::assembly::blocks::{BlockKind, ContentBlock};
use crate::assembly::theme::{BrandPalette, PaletteInput, Theme, ThemeColors};
use crate::assembly::AssemblyError;

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

/// A fulfilled block as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentBlock {
    pub kind: BlockKind,
    pub text: String,
}

impl DocumentBlock {
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }
}

/// The canonical in-memory page every exporter renders from.
///
/// Invariant: `blocks` is sorted by `BlockKind` and holds at most one entry
/// per kind. Fields are private so the invariant cannot be broken after
/// `assemble` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    title: String,
    description: String,
    theme: Theme,
    colors: ThemeColors,
    palette: BrandPalette,
    blocks: Vec<DocumentBlock>,
}

impl Document {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn colors(&self) -> ThemeColors {
        self.colors
    }

    pub fn palette(&self) -> &BrandPalette {
        &self.palette
    }

    pub fn blocks(&self) -> &[DocumentBlock] {
        &self.blocks
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Validates the styling inputs shared by `assemble` and the request handlers.
///
/// Handlers call this before issuing any generation call so a bad theme or
/// color never costs an LLM round-trip.
pub fn validate_styling(
    theme: &str,
    palette: &PaletteInput,
) -> Result<(Theme, BrandPalette), AssemblyError> {
    let theme: Theme = theme.parse()?;
    let palette = BrandPalette::parse(palette)?;
    Ok((theme, palette))
}

/// Composes the canonical document.
///
/// Blocks may arrive in any order; the output is always in canonical order.
/// When the same kind appears more than once, the first fulfilled entry wins.
pub fn assemble(
    title: &str,
    description: &str,
    theme: &str,
    palette: &PaletteInput,
    blocks: Vec<ContentBlock>,
) -> Result<Document, AssemblyError> {
    let (theme, palette) = validate_styling(theme, palette)?;

    let mut fulfilled: Vec<DocumentBlock> = blocks
        .into_iter()
        .filter(ContentBlock::is_fulfilled)
        .filter_map(|block| {
            let kind = block.kind();
            block.generated().map(|text| DocumentBlock {
                kind,
                text: text.to_string(),
            })
        })
        .collect();

    // Stable sort keeps first-seen order among duplicates, so dedup keeps the first.
    fulfilled.sort_by_key(|b| b.kind);
    fulfilled.dedup_by_key(|b| b.kind);

    debug!(
        "Assembled document '{}' with theme {} and {} block(s)",
        title,
        theme.name(),
        fulfilled.len()
    );

    Ok(Document {
        title: title.to_string(),
        description: description.to_string(),
        theme,
        colors: theme.colors(),
        palette,
        blocks: fulfilled,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
