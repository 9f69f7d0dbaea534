//! Character sanitization for the PDF export.
//!
//! The standard Type1 fonts only cover the WinAnsi repertoire. Before layout,
//! every code point with a defined ASCII stand-in is replaced through a
//! mapping table; anything unmapped is passed through and left to the encoder
//! (which degrades it to `?`).

use std::collections::BTreeMap;

/// Horizontal ellipsis and its mandated replacement.
pub const ELLIPSIS: char = '\u{2026}';

/// Default substitutions applied before PDF layout.
const DEFAULT_MAPPINGS: &[(char, &str)] = &[
    (ELLIPSIS, "..."),
    ('\u{2018}', "'"),  // left single quote
    ('\u{2019}', "'"),  // right single quote / apostrophe
    ('\u{201C}', "\""), // left double quote
    ('\u{201D}', "\""), // right double quote
    ('\u{2013}', "-"),  // en dash
    ('\u{2014}', "--"), // em dash
    ('\u{2022}', "*"),  // bullet
    ('\u{00A0}', " "),  // no-break space
];

/// Code point → replacement table.
///
/// `BTreeMap` keeps iteration (and therefore `Debug` output) stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitizer {
    mappings: BTreeMap<char, String>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        let mut sanitizer = Self::empty();
        for (from, to) in DEFAULT_MAPPINGS {
            sanitizer.insert(*from, *to);
        }
        sanitizer
    }
}

impl Sanitizer {
    /// A table with no mappings; every character passes through.
    pub fn empty() -> Self {
        Self {
            mappings: BTreeMap::new(),
        }
    }

    /// Adds or overrides a mapping.
    pub fn insert(&mut self, from: char, to: impl Into<String>) -> &mut Self {
        self.mappings.insert(from, to.into());
        self
    }

    /// Applies the table to `text`.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.mappings.get(&c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        out
    }
}

/// Encodes sanitized text into single-byte WinAnsi for a PDF string.
///
/// ASCII and the Latin-1 block map to themselves; everything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E => c as u8,
            0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsis_becomes_three_periods_in_place() {
        let out = Sanitizer::default().apply("Our product… is great");
        assert_eq!(out, "Our product... is great");
        assert!(!out.contains(ELLIPSIS));
    }

    #[test]
    fn test_typographic_punctuation_is_flattened() {
        let out = Sanitizer::default().apply("\u{201C}Fast\u{201D} \u{2014} it\u{2019}s true");
        assert_eq!(out, "\"Fast\" -- it's true");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        let out = Sanitizer::default().apply("naïve 日本 🚀");
        assert_eq!(out, "naïve 日本 🚀");
    }

    #[test]
    fn test_empty_table_is_identity() {
        assert_eq!(Sanitizer::empty().apply("wait…"), "wait…");
    }

    #[test]
    fn test_table_is_extensible() {
        let mut sanitizer = Sanitizer::default();
        sanitizer.insert('→', "->").insert(ELLIPSIS, "(...)");
        assert_eq!(sanitizer.apply("a → b… “ok”"), "a -> b(...) \"ok\"");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Hi!"), b"Hi!".to_vec());
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("日…"), b"??".to_vec());
        // control characters never reach a content stream
        assert_eq!(encode_win_ansi("\t"), b"?".to_vec());
    }
}
