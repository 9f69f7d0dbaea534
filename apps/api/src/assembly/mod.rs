// Document Assembler
// Implements: block catalog, theme/palette validation, concurrent block fulfillment,
// canonical document assembly.
// All LLM calls go through the ContentSource trait; no direct Gemini calls here.

pub mod assembler;
pub mod blocks;
pub mod fulfillment;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod theme;

use thiserror::Error;

pub use assembler::{assemble, validate_styling, Document, DocumentBlock};
pub use blocks::{BlockKind, ContentBlock};

/// Input validation failures raised while assembling a document.
/// Any of these aborts the request before generation or export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("invalid theme '{0}': expected one of Light, Dark, Custom")]
    InvalidTheme(String),

    #[error("invalid {field} color '{value}': expected #RGB or #RRGGBB")]
    InvalidColor { field: &'static str, value: String },
}
