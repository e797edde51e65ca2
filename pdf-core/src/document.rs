use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fonts::{BuiltinFont, TextStyle};
use crate::graphics::Color;
use crate::objects::{ObjId, PdfObject};
use crate::writer::{escape_pdf_string, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
/// Builtin fonts occupy objects 3.. in `BuiltinFont::ALL` order.
const FIRST_FONT_OBJ_NUM: u32 = 3;
const FIRST_PAGE_OBJ_NUM: u32 =
    FIRST_FONT_OBJ_NUM + BuiltinFont::ALL.len() as u32;

/// High-level API for building PDF documents.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Pages are written incrementally: `end_page()` flushes the page
/// to the writer and frees its content, so memory stays flat no
/// matter how many pages the document has.
///
/// Drawing calls never panic. A call made while no page is open, or
/// a write failure while auto-closing a page, is held back and
/// returned by the next `end_page()` or `end_document()`.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    next_obj_num: u32,
    compress: bool,
    deferred: Option<io::Error>,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a new PDF document that writes to a file.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a document over `writer`. The header and the shared
    /// font objects are written immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        for (font, id) in BuiltinFont::ALL.iter().zip(font_obj_ids()) {
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            pdf_writer.write_object(id, &dict)?;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            next_obj_num: FIRST_PAGE_OBJ_NUM,
            compress: false,
            deferred: None,
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_owned(), value.to_owned()));
        self
    }

    /// FlateDecode-compress page content streams written from now on.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Number of pages completed so far.
    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len()
    }

    /// Begin a new page with the given dimensions in points.
    /// An open page is closed first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> &mut Self {
        if self.current_page.is_some() {
            if let Err(e) = self.end_page() {
                self.deferred.get_or_insert(e);
            }
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
        });
        self
    }

    /// Place a single line of text with its baseline starting at
    /// (x, y). Coordinates use PDF's bottom-left origin.
    pub fn place_text_styled(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> &mut Self {
        if let Some(ops) = self.content("place_text_styled") {
            ops.extend_from_slice(
                format!(
                    "BT\n/{} {} Tf\n{} {} Td\n(",
                    style.font.pdf_name(),
                    format_coord(style.font_size),
                    format_coord(x),
                    format_coord(y),
                )
                .as_bytes(),
            );
            ops.extend_from_slice(&escape_pdf_string(text));
            ops.extend_from_slice(b") Tj\nET\n");
        }
        self
    }

    /// Set the color used for filled shapes and text.
    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.push_op("set_fill_color", &color_op(color, "rg"))
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.push_op("set_stroke_color", &color_op(color, "RG"))
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.push_op("set_line_width", &format!("{} w", format_coord(width)))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(
            "move_to",
            &format!("{} {} m", format_coord(x), format_coord(y)),
        )
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(
            "line_to",
            &format!("{} {} l", format_coord(x), format_coord(y)),
        )
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.push_op("stroke", "S")
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.push_op("save_state", "q")
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.push_op("restore_state", "Q")
    }

    fn push_op(&mut self, caller: &'static str, op: &str) -> &mut Self {
        if let Some(ops) = self.content(caller) {
            ops.extend_from_slice(op.as_bytes());
            ops.push(b'\n');
        }
        self
    }

    fn content(&mut self, caller: &'static str) -> Option<&mut Vec<u8>> {
        match self.current_page.as_mut() {
            Some(page) => Some(&mut page.content_ops),
            None => {
                self.deferred.get_or_insert_with(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("{} called with no open page", caller),
                    )
                });
                None
            }
        }
    }

    fn take_deferred(&mut self) -> io::Result<()> {
        match self.deferred.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// End the current page. Writes the page objects and frees the
    /// page content.
    pub fn end_page(&mut self) -> io::Result<()> {
        self.take_deferred()?;
        let page = self.current_page.take().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "end_page called with no open page",
            )
        })?;

        let content_id = self.alloc_obj();
        let page_id = self.alloc_obj();

        let content_stream = if self.compress {
            let mut encoder =
                ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&page.content_ops)?;
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                encoder.finish()?,
            )
        } else {
            PdfObject::stream(vec![], page.content_ops)
        };
        self.writer.write_object(content_id, &content_stream)?;

        let fonts = BuiltinFont::ALL
            .iter()
            .zip(font_obj_ids())
            .map(|(font, id)| (font.pdf_name(), PdfObject::Reference(id)))
            .collect();
        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            ("MediaBox", PdfObject::rect(0.0, 0.0, page.width, page.height)),
            ("Contents", PdfObject::Reference(content_id)),
            (
                "Resources",
                PdfObject::dict(vec![("Font", PdfObject::dict(fonts))]),
            ),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        Ok(())
    }

    fn alloc_obj(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    /// Finish the document: info dictionary, pages tree, catalog,
    /// xref table and trailer. The writer is flushed and returned.
    pub fn end_document(mut self) -> io::Result<W> {
        self.take_deferred()?;
        if self.current_page.is_some() {
            self.end_page()?;
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.alloc_obj();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        self.writer.flush()?;
        Ok(self.writer.into_inner())
    }
}

fn font_obj_ids() -> impl Iterator<Item = ObjId> {
    (FIRST_FONT_OBJ_NUM..FIRST_PAGE_OBJ_NUM).map(|n| ObjId(n, 0))
}

fn color_op(color: Color, op: &str) -> String {
    format!(
        "{} {} {} {}",
        format_coord(color.r),
        format_coord(color.g),
        format_coord(color.b),
        op
    )
}

/// Format a number for content streams: integers without a
/// fraction, everything else to at most four decimals.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}
