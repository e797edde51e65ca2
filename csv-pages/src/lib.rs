//! Turn a CSV of topics into a ruled, paginated PDF.
//!
//! Every CSV row names a `Topic` and how many `Pages` to print for it.
//! Each page carries the topic as a header, evenly spaced rule lines
//! and a small right-aligned footer.

pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod render;

pub use config::RenderConfig;
pub use error::{Error, Result};
pub use layout::PageLayout;
pub use loader::{load_rows, read_rows, Row};
pub use render::{plan_pages, render, render_to_file, RenderSummary};
