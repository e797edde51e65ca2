//! CSV input: read topic rows and coerce their page counts.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};

pub const TOPIC_COLUMN: &str = "Topic";
pub const PAGES_COLUMN: &str = "Pages";

/// One CSV record: a topic and how many pages to print for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub topic: String,
    /// Coerced `Pages` value. May be zero or negative.
    pub pages: i64,
}

impl Row {
    pub fn new(topic: impl Into<String>, pages: i64) -> Self {
        Row {
            topic: topic.into(),
            pages,
        }
    }

    /// Pages this row produces. Never less than one.
    pub fn page_count(&self) -> usize {
        usize::try_from(self.pages.max(1)).unwrap_or(usize::MAX)
    }
}

/// Load all rows from the CSV file at `path`, in file order.
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path)
        .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
    let rows = read_rows(BufReader::new(file))?;
    info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse CSV from any reader. The first record is the header row
/// and must name both `Topic` and `Pages`; other columns are ignored.
///
/// Short rows are padded: a missing `Topic` is empty and a missing
/// `Pages` defaults to 1. Rows longer than the header are an error.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::Parse("no columns to parse from file".into()));
    }

    let topic_idx = headers.iter().position(|h| h == TOPIC_COLUMN);
    let pages_idx = headers.iter().position(|h| h == PAGES_COLUMN);
    let (topic_idx, pages_idx) = match (topic_idx, pages_idx) {
        (Some(t), Some(p)) => (t, p),
        (t, p) => {
            let mut missing = Vec::new();
            if t.is_none() {
                missing.push(TOPIC_COLUMN);
            }
            if p.is_none() {
                missing.push(PAGES_COLUMN);
            }
            return Err(Error::Schema { missing });
        }
    };

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(Error::Parse(format!(
                "line {}: found {} fields, but the header has {}",
                line,
                record.len(),
                headers.len()
            )));
        }
        let topic = record.get(topic_idx).unwrap_or_default();
        let raw_pages = record.get(pages_idx).unwrap_or_default();
        let pages = coerce_pages(raw_pages).unwrap_or_else(|| {
            let line = record.position().map_or(0, |p| p.line());
            warn!(
                "line {}: Pages value {:?} for topic {:?} is not a number, using 1",
                line, raw_pages, topic
            );
            1
        });
        debug!("row {:?} -> {} pages", topic, pages);
        rows.push(Row::new(topic, pages));
    }
    Ok(rows)
}

/// Coerce a raw `Pages` cell to an integer.
///
/// Integers are taken as-is and finite decimals are truncated
/// toward zero. `None` means the value should default to 1.
pub fn coerce_pages(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}
