//! Fixed page geometry.
//!
//! Layout is expressed top-down in millimetres and converted to PDF
//! points (bottom-left origin) only when drawing.

use pdf_core::{BuiltinFont, Color, FontMetrics, TextStyle};

/// Points per millimetre.
pub const MM_TO_PT: f64 = 72.0 / 25.4;

pub const FOOTER_FONT_SIZE: f64 = 8.0;

/// Smallest rule spacing accepted, in mm. Caps a page at a few
/// thousand rules.
pub const MIN_RULE_SPACING: f64 = 0.1;

/// Millimetres to points.
pub fn mm(v: f64) -> f64 {
    v * MM_TO_PT
}

/// A single-sheet page: header cell, ruled region, footer cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    /// Left and right page margin.
    pub margin: f64,
    /// Inset of text from the cell edges.
    pub cell_padding: f64,
    pub header_top: f64,
    pub header_height: f64,
    pub footer_top: f64,
    pub footer_height: f64,
    /// First rule line.
    pub rule_top: f64,
    /// Rules stop before this offset.
    pub rule_bottom: f64,
    pub rule_left: f64,
    pub rule_right: f64,
    pub rule_width: f64,
    pub header_color: Color,
    pub footer_color: Color,
    pub rule_color: Color,
}

impl PageLayout {
    /// A4 portrait with 10 mm side margins.
    pub const A4: PageLayout = PageLayout {
        width: 210.0,
        height: 297.0,
        margin: 10.0,
        cell_padding: 1.0,
        header_top: 10.0,
        header_height: 12.0,
        footer_top: 287.0,
        footer_height: 10.0,
        rule_top: 20.0,
        rule_bottom: 298.0,
        rule_left: 10.0,
        rule_right: 200.0,
        rule_width: 0.2,
        header_color: Color {
            r: 100.0 / 255.0,
            g: 100.0 / 255.0,
            b: 100.0 / 255.0,
        },
        footer_color: Color {
            r: 180.0 / 255.0,
            g: 180.0 / 255.0,
            b: 180.0 / 255.0,
        },
        rule_color: Color::BLACK,
    };

    /// Page size in points.
    pub fn page_size_pt(&self) -> (f64, f64) {
        (mm(self.width), mm(self.height))
    }

    /// Convert a top-down offset in mm to a PDF y coordinate.
    pub fn pdf_y(&self, offset: f64) -> f64 {
        mm(self.height - offset)
    }

    /// Number of rule lines that fit between `rule_top` and
    /// `rule_bottom` at the given spacing. Spacing below
    /// `MIN_RULE_SPACING` draws nothing.
    pub fn rule_count(&self, spacing: f64) -> usize {
        if !(spacing.is_finite() && spacing >= MIN_RULE_SPACING) {
            return 0;
        }
        ((self.rule_bottom - self.rule_top) / spacing).floor() as usize
    }

    /// Top-down offsets of every rule line on a page.
    pub fn rule_offsets(&self, spacing: f64) -> Vec<f64> {
        (0..self.rule_count(spacing))
            .map(|i| self.rule_top + i as f64 * spacing)
            .collect()
    }

    pub fn header_style(font_size: f64) -> TextStyle {
        TextStyle {
            font: BuiltinFont::HelveticaBold,
            font_size,
        }
    }

    pub fn footer_style() -> TextStyle {
        TextStyle {
            font: BuiltinFont::HelveticaOblique,
            font_size: FOOTER_FONT_SIZE,
        }
    }

    /// Baseline offset for text vertically centred in a cell.
    fn baseline(cell_top: f64, cell_height: f64, font_size: f64) -> f64 {
        let font_mm = font_size / MM_TO_PT;
        cell_top + cell_height / 2.0 + 0.3 * font_mm
    }

    /// Left-aligned header origin, in points.
    pub fn header_origin(&self, font_size: f64) -> (f64, f64) {
        let y = Self::baseline(self.header_top, self.header_height, font_size);
        (mm(self.margin + self.cell_padding), self.pdf_y(y))
    }

    /// Right-aligned footer origin for `text`, in points.
    pub fn footer_origin(&self, text: &str) -> (f64, f64) {
        let style = Self::footer_style();
        let text_width = FontMetrics::measure_text(text, style.font, style.font_size);
        let right = mm(self.width - self.margin - self.cell_padding);
        let y = Self::baseline(self.footer_top, self.footer_height, style.font_size);
        (right - text_width, self.pdf_y(y))
    }
}

/// Rule offsets on the standard A4 layout.
pub fn rule_offsets(spacing: f64) -> Vec<f64> {
    PageLayout::A4.rule_offsets(spacing)
}
