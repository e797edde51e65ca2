use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::layout::MIN_RULE_SPACING;

pub const DEFAULT_OUTPUT: &str = "output.pdf";
/// Millimetres between rule lines.
pub const DEFAULT_LINE_SPACING: f64 = 10.0;
/// Header size in points.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Settings for one CSV-to-PDF run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Vertical gap between rule lines, in millimetres.
    pub line_spacing: f64,
    /// Header font size, in points.
    pub font_size: f64,
    /// Destination file. An existing file is replaced.
    pub output: PathBuf,
    /// FlateDecode the page content streams.
    pub compress: bool,
    /// Document title recorded in the PDF info dictionary.
    pub title: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            line_spacing: DEFAULT_LINE_SPACING,
            font_size: DEFAULT_FONT_SIZE,
            output: PathBuf::from(DEFAULT_OUTPUT),
            compress: false,
            title: None,
        }
    }
}

impl RenderConfig {
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_compression(mut self, on: bool) -> Self {
        self.compress = on;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reject settings that cannot produce a page. Runs before any
    /// page is drawn.
    pub fn validate(&self) -> Result<()> {
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(Error::Config(format!(
                "line spacing must be a positive number, got {}",
                self.line_spacing
            )));
        }
        if self.line_spacing < MIN_RULE_SPACING {
            return Err(Error::Config(format!(
                "line spacing must be at least {} mm, got {}",
                MIN_RULE_SPACING, self.line_spacing
            )));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(Error::Config(format!(
                "font size must be a positive number, got {}",
                self.font_size
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::Config("output path is empty".into()));
        }
        Ok(())
    }
}
