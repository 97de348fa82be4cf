//! PDF export of the generated letter
//!
//! Lays the letter out on A4 pages under a "Cover Letter" title and saves it
//! under a fixed filename.

pub mod layout;
pub mod mock;
pub mod renderer;

pub use mock::MockPdfRenderer;
pub use renderer::{render_pdf, PdfExporter};

use crate::Result;
use std::path::PathBuf;

pub const DOCUMENT_TITLE: &str = "Cover Letter";
pub const OUTPUT_FILENAME: &str = "cover-letter.pdf";

pub trait PdfService: Send + Sync {
    /// Render `body` under `title` and save it, returning where it was written.
    fn export(&self, title: &str, body: &str) -> Result<PathBuf>;
}
