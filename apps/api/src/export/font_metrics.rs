//! Static glyph-width tables for the standard PDF Type1 fonts used by the PDF export.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em, so a glyph's width in
//! points is `width * font_size / 1000`. Tables cover printable ASCII
//! 0x20..=0x7E and the Latin-1 half of WinAnsi 0xA0..=0xFF, i.e. every glyph
//! the PDF encoder can emit. Any other character is drawn as `?` and measured
//! as one.
#![allow(dead_code)]

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// Base-14 fonts the PDF export can set text in. No font embedding happens;
/// every PDF viewer ships these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfFont {
    /// Proportional sans-serif (stand-in for Arial).
    Helvetica,
    /// Monospaced typewriter face.
    Courier,
}

impl PdfFont {
    /// PostScript name written into the font dictionary.
    pub fn base_font(&self) -> &'static [u8] {
        match self {
            PdfFont::Helvetica => b"Helvetica",
            PdfFont::Courier => b"Courier",
        }
    }
}

impl FromStr for PdfFont {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" => Ok(PdfFont::Helvetica),
            "courier" => Ok(PdfFont::Courier),
            other => Err(format!("unsupported PDF font '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
///
/// `latin1` holds 0xA0..=0xFF in code order, index = (char as usize) - 0xA0.
pub struct FontMetricTable {
    pub font: PdfFont,
    widths: [u16; 95],
    latin1: [u16; 96],
}

impl FontMetricTable {
    /// Width of a single character in 1/1000 em, as the WinAnsi encoder will draw it.
    pub fn char_units(&self, c: char) -> u16 {
        let code = c as usize;
        match code {
            0x20..=0x7E => self.widths[code - 0x20],
            0xA0..=0xFF => self.latin1[code - 0xA0],
            _ => self.widths['?' as usize - 0x20],
        }
    }

    /// Rendered width of a string in points at `font_size_pt`.
    pub fn measure_str(&self, s: &str, font_size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| self.char_units(c) as u32).sum();
        units as f32 * font_size_pt / 1000.0
    }

    /// Width of one space in points at `font_size_pt`.
    pub fn space_width(&self, font_size_pt: f32) -> f32 {
        self.char_units(' ') as f32 * font_size_pt / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: PdfFont::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    #[rustfmt::skip]
    latin1: [
        // nbsp ¡    ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // °    ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // À    Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // Ð    Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // à    á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // ð    ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
};

static COURIER_TABLE: FontMetricTable = FontMetricTable {
    font: PdfFont::Courier,
    widths: [600; 95],
    latin1: [600; 96],
};

/// Returns the static metric table for a font.
pub fn get_metrics(font: PdfFont) -> &'static FontMetricTable {
    match font {
        PdfFont::Helvetica => &HELVETICA_TABLE,
        PdfFont::Courier => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(PdfFont::Helvetica).measure_str("", 12.0), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(PdfFont::Helvetica);
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056 units → 24.672pt at 12pt
        let width = metrics.measure_str("Rust", 12.0);
        assert!((width - 24.672).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_latin1_glyphs_use_their_own_widths() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert_eq!(metrics.char_units('Æ'), 1000);
        assert_eq!(metrics.char_units('½'), 834);
        assert_eq!(metrics.char_units('é'), metrics.char_units('e'));
        assert_eq!(metrics.char_units('\u{A0}'), metrics.char_units(' '));
    }

    #[test]
    fn test_unencodable_characters_measure_as_question_mark() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert_eq!(metrics.char_units('日'), metrics.char_units('?'));
        assert_eq!(metrics.char_units('\t'), metrics.char_units('?'));
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = get_metrics(PdfFont::Courier);
        assert_eq!(
            metrics.measure_str("iiii", 10.0),
            metrics.measure_str("WWWW", 10.0)
        );
        assert!((metrics.space_width(10.0) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_narrow_glyphs_narrower_than_wide_ones() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert!(metrics.measure_str("iiii", 12.0) < metrics.measure_str("WWWW", 12.0));
    }

    #[test]
    fn test_font_from_str() {
        assert_eq!("Helvetica".parse::<PdfFont>().unwrap(), PdfFont::Helvetica);
        assert_eq!("arial".parse::<PdfFont>().unwrap(), PdfFont::Helvetica);
        assert_eq!("COURIER".parse::<PdfFont>().unwrap(), PdfFont::Courier);
        assert!("Comic Sans".parse::<PdfFont>().is_err());
    }
}
