/// RGB color for stroke and fill operators.
///
/// Components run from 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Grayscale color (r = g = b = level).
    pub fn gray(level: f64) -> Self {
        Color::rgb(level, level, level)
    }

    /// Color from 8-bit channels, e.g. `Color::from_rgb8(100, 100, 100)`.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_scales_to_unit_range() {
        let c = Color::from_rgb8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-12);
    }

    #[test]
    fn gray_sets_all_channels() {
        assert_eq!(Color::gray(0.0), Color::BLACK);
    }
}
