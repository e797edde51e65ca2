pub mod objects;
pub mod writer;
pub mod document;
pub mod fonts;
pub mod graphics;

pub use document::PdfDocument;
pub use fonts::{BuiltinFont, FontMetrics, TextStyle};
pub use graphics::Color;
