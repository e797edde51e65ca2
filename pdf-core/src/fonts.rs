use crate::writer::win_ansi_byte;

/// The builtin Helvetica family. These are among the 14 standard
/// fonts every PDF viewer provides without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 4] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
        BuiltinFont::HelveticaBoldOblique,
    ];

    /// Resource name used in content streams (e.g. "F1").
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
            BuiltinFont::HelveticaBoldOblique => "F4",
        }
    }

    /// The `/BaseFont` name.
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }
}

/// Font and size for a run of placed text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font: BuiltinFont::Helvetica,
            font_size: 12.0,
        }
    }
}

// Adobe AFM advance widths for ASCII 32..=126, in 1/1000 em.
// The oblique faces share the upright widths.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584,
    278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722,
    722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556,
    556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584,
    278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722,
    722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611,
    611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// WinAnsi 0xA0..=0xFF (Latin-1 supplement), same AFM source.
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556,
    584, 333, 737, 333, 400, 584, 333, 333, 333, 556, 537, 278,
    333, 333, 365, 556, 834, 834, 834, 611, 667, 667, 667, 667,
    667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722,
    722, 667, 667, 611, 556, 556, 556, 556, 556, 556, 889, 500,
    556, 556, 556, 556, 278, 278, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const HELVETICA_BOLD_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556,
    584, 333, 737, 333, 400, 584, 333, 333, 333, 611, 556, 278,
    333, 333, 365, 556, 834, 834, 834, 611, 722, 722, 722, 722,
    722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722,
    722, 667, 667, 611, 556, 556, 556, 556, 556, 556, 889, 556,
    556, 556, 556, 556, 278, 278, 278, 278, 611, 611, 611, 611,
    611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Fallback for encoding bytes without a listed width.
const DEFAULT_WIDTH: u16 = 278;

/// Metrics for the builtin fonts.
pub struct FontMetrics;

impl FontMetrics {
    /// Advance width of `ch` in 1/1000 em, for the glyph the
    /// WinAnsi encoding draws.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        let bold = matches!(
            font,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        );
        let code = match win_ansi_byte(ch) {
            Some(code) => code,
            // Unencodable characters are drawn as `?`.
            None => b'?',
        };
        match code {
            0x20..=0x7E => {
                let index = usize::from(code - 0x20);
                if bold {
                    HELVETICA_BOLD_WIDTHS[index]
                } else {
                    HELVETICA_WIDTHS[index]
                }
            }
            0xA0..=0xFF => {
                let index = usize::from(code - 0xA0);
                if bold {
                    HELVETICA_BOLD_LATIN1_WIDTHS[index]
                } else {
                    HELVETICA_LATIN1_WIDTHS[index]
                }
            }
            _ => punctuation_width(code, bold),
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let total: u32 = text
            .chars()
            .map(|ch| u32::from(Self::char_width(font, ch)))
            .sum();
        f64::from(total) * font_size / 1000.0
    }
}

/// Widths for the WinAnsi 0x80..=0x9F punctuation `escape_pdf_string`
/// emits.
fn punctuation_width(code: u8, bold: bool) -> u16 {
    match (code, bold) {
        (0x80, _) => 556,                   // Euro
        (0x82 | 0x91 | 0x92, false) => 222, // single quotes
        (0x82 | 0x91 | 0x92, true) => 278,
        (0x84 | 0x93 | 0x94, false) => 333, // double quotes
        (0x84 | 0x93 | 0x94, true) => 500,
        (0x85 | 0x97 | 0x99, _) => 1000,    // ellipsis, em dash, trademark
        (0x95, _) => 350,                   // bullet
        (0x96, _) => 556,                   // en dash
        _ => DEFAULT_WIDTH,
    }
}
