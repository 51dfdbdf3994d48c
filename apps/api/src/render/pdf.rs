//! PDF export of an assembled block list.
//!
//! A4 pages, builtin Helvetica fonts. Text is wrapped by character count and a
//! new page starts whenever the cursor reaches the bottom margin.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use thiserror::Error;

use crate::render::document::Block;

pub const EXPORT_FILENAME: &str = "CV_Blindado_CVSincero.pdf";
const DOCUMENT_TITLE: &str = "CV Blindado";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP: f32 = 280.0;
const BOTTOM_MARGIN: f32 = 20.0;
const LEFT: f32 = 20.0;
const BULLET_INDENT: f32 = 25.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF save error: {0}")]
    Save(String),
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Cursor over the current page. Moves to a fresh page when space runs out.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn line(&mut self, text: &str, size: f32, x: f32, advance: f32, font: &IndirectFontRef) {
        if self.y - advance < BOTTOM_MARGIN {
            self.new_page();
        }
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= advance;
    }

    fn gap(&mut self, amount: f32) {
        self.y -= amount;
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
        self.pages += 1;
    }
}

pub fn export_pdf(blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(DOCUMENT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Font(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Font(e.to_string()))?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| ExportError::Font(e.to_string()))?,
    };

    let pages = {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page1).get_layer(layer1),
            y: TOP,
            pages: 1,
        };
        for block in blocks {
            write_block(&mut writer, &fonts, block);
        }
        writer.pages
    };
    tracing::debug!(blocks = blocks.len(), pages, "Laid out PDF");

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Save(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| ExportError::Save(e.to_string()))
}

fn write_block(w: &mut PageWriter<'_>, fonts: &Fonts, block: &Block) {
    match block {
        Block::Header { name, contact } => {
            w.line(name, 18.0, LEFT, 8.0, &fonts.bold);
            if let Some(contact) = contact {
                for line in wrap_text(contact, 95) {
                    w.line(&line, 9.0, LEFT, 4.5, &fonts.regular);
                }
            }
            w.gap(4.0);
        }
        Block::Heading { text, .. } => {
            w.gap(3.0);
            w.line(text, 12.0, LEFT, 7.0, &fonts.bold);
        }
        Block::Entry { title, detail } => {
            let text = format!("{title}{detail}");
            let mut lines = wrap_text(&text, 80).into_iter();
            if let Some(first) = lines.next() {
                w.line(&first, 10.5, LEFT, 5.0, &fonts.bold);
            }
            for line in lines {
                w.line(&line, 10.5, LEFT, 5.0, &fonts.regular);
            }
        }
        Block::Body { text, italic } => {
            let font = if *italic { &fonts.italic } else { &fonts.regular };
            for line in wrap_text(text, 90) {
                w.line(&line, 10.0, LEFT, 5.0, font);
            }
            w.gap(1.0);
        }
        Block::Bullet { text } => {
            for (i, line) in wrap_text(text, 85).iter().enumerate() {
                let line = if i == 0 {
                    format!("- {line}")
                } else {
                    format!("  {line}")
                };
                w.line(&line, 10.0, BULLET_INDENT, 4.8, &fonts.regular);
            }
        }
        Block::Spacer => w.gap(4.0),
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let len = current.chars().count();
        if len + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
