use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use super::metrics::{self, FontStyle, PT_TO_MM};
use super::transliterate::to_ascii;
use super::ReportError;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 10.0;
const MARGIN_TOP: f32 = 10.0;
const MARGIN_BOTTOM: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl FontSet {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

/// Top-down, flowing A4 page writer with automatic page breaks.
///
/// `cursor` is the distance in millimetres from the top edge of the current
/// page to the top of the next line.
pub(crate) struct ReportCanvas {
    document: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: FontSet,
    cursor: f32,
    pages: usize,
}

impl ReportCanvas {
    pub(crate) fn new(title: &str) -> Result<Self, ReportError> {
        let (document, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let fonts = FontSet {
            regular: builtin(&document, BuiltinFont::Helvetica)?,
            bold: builtin(&document, BuiltinFont::HelveticaBold)?,
            italic: builtin(&document, BuiltinFont::HelveticaOblique)?,
        };
        let layer = document.get_page(page).get_layer(layer);

        Ok(Self {
            document,
            layer,
            fonts,
            cursor: MARGIN_TOP,
            pages: 1,
        })
    }

    pub(crate) fn printable_width() -> f32 {
        PAGE_WIDTH - 2.0 * MARGIN_X
    }

    pub(crate) fn pages(&self) -> usize {
        self.pages
    }

    /// Single line of text occupying `height` millimetres.
    pub(crate) fn cell(&mut self, text: &str, style: FontStyle, size: f32, height: f32, align: Align) {
        let text = to_ascii(text).replace('\n', " ");
        self.line(&text, style, size, height, align);
    }

    /// Word-wrapped block, one `line_height` per wrapped line.
    pub(crate) fn paragraph(&mut self, text: &str, style: FontStyle, size: f32, line_height: f32) {
        let text = to_ascii(text);
        for line in metrics::wrap(&text, style, size, Self::printable_width()) {
            self.line(&line, style, size, line_height, Align::Left);
        }
    }

    /// Vertical gap; never starts a page on its own.
    pub(crate) fn gap(&mut self, height: f32) {
        self.cursor += height;
    }

    pub(crate) fn finish(self) -> Result<Vec<u8>, ReportError> {
        self.document
            .save_to_bytes()
            .map_err(|err| ReportError::Pdf(err.to_string()))
    }

    fn line(&mut self, text: &str, style: FontStyle, size: f32, height: f32, align: Align) {
        if self.cursor + height > PAGE_HEIGHT - MARGIN_BOTTOM {
            self.new_page();
        }

        if !text.trim().is_empty() {
            let width = metrics::text_width(text, style, size);
            let x = match align {
                Align::Left => MARGIN_X,
                Align::Center => MARGIN_X + ((Self::printable_width() - width) / 2.0).max(0.0),
            };
            // Baseline sits roughly a third of the font size below the cell's midline.
            let baseline = PAGE_HEIGHT - (self.cursor + height / 2.0 + 0.3 * size * PT_TO_MM);
            self.layer
                .use_text(text, size, Mm(x), Mm(baseline), self.fonts.get(style));
        }

        self.cursor += height;
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.document.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.document.get_page(page).get_layer(layer);
        self.cursor = MARGIN_TOP;
    }
}

fn builtin(document: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ReportError> {
    document
        .add_builtin_font(font)
        .map_err(|err| ReportError::Pdf(err.to_string()))
}
