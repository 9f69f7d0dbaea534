//! Content blocks: the optional sections of a landing page.
//!
//! `BlockKind` declaration order IS the canonical render order. Everything that
//! sorts or iterates blocks relies on the derived `Ord`, so new kinds must be
//! inserted where they should appear on the page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assembly::prompts::{
    ABOUT_US_TEMPLATE, CALL_TO_ACTION_TEMPLATE, FEATURES_TEMPLATE, PRICING_TEMPLATE,
    TESTIMONIALS_TEMPLATE,
};

// ────────────────────────────────────────────────────────────────────────────
// Block kinds
// ────────────────────────────────────────────────────────────────────────────

/// Identity of a content block slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    AboutUs,
    Features,
    Pricing,
    Testimonials,
    CallToAction,
}

impl BlockKind {
    /// All kinds in canonical order.
    pub const CANONICAL: [BlockKind; 5] = [
        BlockKind::AboutUs,
        BlockKind::Features,
        BlockKind::Pricing,
        BlockKind::Testimonials,
        BlockKind::CallToAction,
    ];

    /// Heading shown on the rendered page.
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockKind::AboutUs => "About Us",
            BlockKind::Features => "Features",
            BlockKind::Pricing => "Pricing",
            BlockKind::Testimonials => "Testimonials",
            BlockKind::CallToAction => "Call to Action",
        }
    }

    /// Stable identifier used in API payloads and HTML ids.
    pub fn slug(&self) -> &'static str {
        match self {
            BlockKind::AboutUs => "about_us",
            BlockKind::Features => "features",
            BlockKind::Pricing => "pricing",
            BlockKind::Testimonials => "testimonials",
            BlockKind::CallToAction => "call_to_action",
        }
    }

    /// Prompt used when the caller selects a block without describing it.
    pub fn default_prompt(&self) -> &'static str {
        match self {
            BlockKind::AboutUs => "We are a tech company making the world a better place.",
            BlockKind::Features => "Fast, Secure, Scalable",
            BlockKind::Pricing => "Affordable subscription-based pricing.",
            BlockKind::Testimonials => "This product has changed the way I work!",
            BlockKind::CallToAction => "Sign up for free and start using our product!",
        }
    }

    /// Builds the full instruction sent to the content source for this block.
    pub fn generation_prompt(&self, user_prompt: &str) -> String {
        let template = match self {
            BlockKind::AboutUs => ABOUT_US_TEMPLATE,
            BlockKind::Features => FEATURES_TEMPLATE,
            BlockKind::Pricing => PRICING_TEMPLATE,
            BlockKind::Testimonials => TESTIMONIALS_TEMPLATE,
            BlockKind::CallToAction => CALL_TO_ACTION_TEMPLATE,
        };
        template.replace("{prompt}", user_prompt.trim())
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a section identifier matches no block kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section '{0}'")]
pub struct UnknownBlockKind(pub String);

impl FromStr for BlockKind {
    type Err = UnknownBlockKind;

    /// Accepts either the slug (`call_to_action`) or the display name
    /// (`Call to Action`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BlockKind::CANONICAL
            .into_iter()
            .find(|kind| {
                kind.slug().eq_ignore_ascii_case(needle)
                    || kind.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownBlockKind(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content block
// ────────────────────────────────────────────────────────────────────────────

/// A block slot as collected at request time.
///
/// `generated` is written at most once by `fulfill`; later writes are ignored
/// so the first successful generation is the one that reaches the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    kind: BlockKind,
    selected: bool,
    prompt: String,
    generated: Option<String>,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, selected: bool, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            selected,
            prompt: prompt.into(),
            generated: None,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// Selected and carrying generated text.
    pub fn is_fulfilled(&self) -> bool {
        self.selected && self.generated.is_some()
    }

    /// Stores generated text. Returns false (and leaves the block untouched)
    /// if the block was already fulfilled.
    pub fn fulfill(&mut self, text: impl Into<String>) -> bool {
        if self.generated.is_some() {
            return false;
        }
        self.generated = Some(text.into());
        true
    }
}

/// Builds one block per kind, in canonical order, flagging the kinds present
/// in `selection`. `prompt_for` supplies the caller's prompt for a kind, or
/// `None` to fall back to the kind's default prompt.
pub fn blocks_for_selection<F>(selection: &[BlockKind], prompt_for: F) -> Vec<ContentBlock>
where
    F: Fn(BlockKind) -> Option<String>,
{
    BlockKind::CANONICAL
        .into_iter()
        .map(|kind| {
            let prompt = prompt_for(kind)
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| kind.default_prompt().to_string());
            ContentBlock::new(kind, selection.contains(&kind), prompt)
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
