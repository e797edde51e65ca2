//! Page rendering: drive a `PdfDocument` through every page and
//! write the result.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use pdf_core::PdfDocument;
use tempfile::NamedTempFile;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::layout::{mm, PageLayout};
use crate::loader::Row;

pub const CREATOR: &str = "csv-pages";

/// Outcome of a successful `render_to_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub rows: usize,
    pub pages: usize,
    pub output: PathBuf,
}

/// The topic printed on each page, in output order.
pub fn plan_pages(rows: &[Row]) -> Vec<&str> {
    rows.iter()
        .flat_map(|row| std::iter::repeat(row.topic.as_str()).take(row.page_count()))
        .collect()
}

/// Render every row into a PDF written to `writer` and return the
/// writer once the document is complete.
pub fn render<W: Write>(rows: &[Row], config: &RenderConfig, writer: W) -> Result<W> {
    config.validate()?;

    let layout = PageLayout::A4;
    let rules = layout.rule_offsets(config.line_spacing);
    debug!(
        "{} rule lines per page at {} mm spacing",
        rules.len(),
        config.line_spacing
    );

    let mut doc = PdfDocument::new(writer)?;
    doc.set_compression(config.compress);
    doc.set_info("Creator", CREATOR);
    if let Some(title) = &config.title {
        doc.set_info("Title", title);
    }

    for row in rows {
        debug!("rendering {:?} ({} pages)", row.topic, row.page_count());
        // The first page is unconditional; a Pages value of 1 or
        // less adds nothing after it.
        draw_page(&mut doc, &layout, &rules, &row.topic, config.font_size)?;
        for _ in 1..row.pages {
            draw_page(&mut doc, &layout, &rules, &row.topic, config.font_size)?;
        }
    }

    Ok(doc.end_document()?)
}

fn draw_page<W: Write>(
    doc: &mut PdfDocument<W>,
    layout: &PageLayout,
    rules: &[f64],
    topic: &str,
    font_size: f64,
) -> io::Result<()> {
    let (width, height) = layout.page_size_pt();
    doc.begin_page(width, height);

    let (x, y) = layout.header_origin(font_size);
    doc.set_fill_color(layout.header_color);
    doc.place_text_styled(topic, x, y, &PageLayout::header_style(font_size));

    doc.set_stroke_color(layout.rule_color);
    doc.set_line_width(mm(layout.rule_width));
    let (left, right) = (mm(layout.rule_left), mm(layout.rule_right));
    for &offset in rules {
        let y = layout.pdf_y(offset);
        doc.move_to(left, y).line_to(right, y).stroke();
    }

    let (x, y) = layout.footer_origin(topic);
    doc.set_fill_color(layout.footer_color);
    doc.place_text_styled(topic, x, y, &PageLayout::footer_style());

    doc.end_page()
}

/// Render into a temporary file beside `config.output` and move it
/// into place only once the document is complete. On failure the
/// temporary file is removed and the output path is left untouched.
pub fn render_to_file(rows: &[Row], config: &RenderConfig) -> Result<RenderSummary> {
    config.validate()?;

    let output = config.output.as_path();
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    let tmp = render(rows, config, BufWriter::new(tmp))?
        .into_inner()
        .map_err(|e| e.into_error())?;
    tmp.as_file().sync_all()?;
    tmp.persist(output).map_err(|e| e.error)?;
    restore_default_permissions(output)?;

    let summary = RenderSummary {
        rows: rows.len(),
        pages: rows.iter().map(Row::page_count).sum(),
        output: output.to_path_buf(),
    };
    info!(
        "wrote {} pages for {} rows to {}",
        summary.pages,
        summary.rows,
        output.display()
    );
    Ok(summary)
}

/// Temporary files are created owner-only; give the finished
/// document the usual 0644.
#[cfg(unix)]
fn restore_default_permissions(output: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(output, std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn restore_default_permissions(_output: &Path) -> io::Result<()> {
    Ok(())
}
