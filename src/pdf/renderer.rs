use super::layout::{
    body_top_mm, line_height_mm, paginate, wrap_text, BODY_FONT_SIZE_PT, MARGIN_MM,
    PAGE_HEIGHT_MM, PAGE_WIDTH_MM, TEXT_WIDTH_MM, TITLE_FONT_SIZE_PT,
};
use super::{PdfService, OUTPUT_FILENAME};
use crate::fsutil::write_atomic;
use crate::{Error, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::path::PathBuf;
use tracing::info;

fn pdf_error(e: impl std::fmt::Display) -> Error {
    Error::Pdf(e.to_string())
}

/// Characters in the 0x80..=0x9F block of WinAnsiEncoding.
const WIN_ANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Whether the built-in Helvetica font (WinAnsiEncoding) can show `c`.
/// Whitespace is laid out by the wrapper, never drawn.
fn is_encodable(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
        || WIN_ANSI_EXTRAS.contains(&c)
}

/// Refuse text the built-in font would silently drop.
fn check_encodable(text: &str) -> Result<()> {
    let unsupported: String = text.chars().filter(|c| !is_encodable(*c)).take(5).collect();
    if unsupported.is_empty() {
        Ok(())
    } else {
        Err(Error::Pdf(format!(
            "Text contains characters the PDF font cannot encode: {}",
            unsupported
        )))
    }
}

/// Render the letter to PDF bytes.
///
/// Fails with [`Error::Pdf`] if any character falls outside the built-in
/// font's encoding.
pub fn render_pdf(title: &str, body: &str) -> Result<Vec<u8>> {
    check_encodable(title)?;
    check_encodable(body)?;

    let pages = paginate(
        wrap_text(body, TEXT_WIDTH_MM, BODY_FONT_SIZE_PT),
        BODY_FONT_SIZE_PT,
    );
    let line_height = line_height_mm(BODY_FONT_SIZE_PT);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text(
        title,
        TITLE_FONT_SIZE_PT,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - MARGIN_MM),
        &font,
    );

    for (index, lines) in pages.iter().enumerate() {
        if index > 0 {
            let (page, page_layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Layer {}", index + 1),
            );
            layer = doc.get_page(page).get_layer(page_layer);
        }

        let top = body_top_mm(index);
        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = PAGE_HEIGHT_MM - (top + row as f32 * line_height);
            layer.use_text(line.as_str(), BODY_FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

/// Writes `cover-letter.pdf` into a fixed output directory.
pub struct PdfExporter {
    output_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl PdfService for PdfExporter {
    fn export(&self, title: &str, body: &str) -> Result<PathBuf> {
        let bytes = render_pdf(title, body)?;
        let path = write_atomic(&self.output_dir, OUTPUT_FILENAME, &bytes)?;
        info!("Saved PDF ({} bytes) to {}", bytes.len(), path.display());
        Ok(path)
    }
}
