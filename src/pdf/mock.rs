use super::{PdfService, OUTPUT_FILENAME};
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockPdfRenderer {
    exports: Arc<Mutex<Vec<(String, String)>>>,
    base_path: String,
    fail: bool,
}

impl MockPdfRenderer {
    pub fn new() -> Self {
        Self {
            exports: Arc::new(Mutex::new(Vec::new())),
            base_path: "/tmp/mock-pdf".to_string(),
            fail: false,
        }
    }

    pub fn with_base_path(mut self, base_path: String) -> Self {
        self.base_path = base_path;
        self
    }

    /// Every export fails, as when the renderer throws.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// `(title, body)` of every export attempt.
    pub fn get_exports(&self) -> Vec<(String, String)> {
        self.exports.lock().unwrap().clone()
    }
}

impl Default for MockPdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfService for MockPdfRenderer {
    fn export(&self, title: &str, body: &str) -> Result<PathBuf> {
        self.exports
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));

        if self.fail {
            return Err(Error::Pdf("mock renderer failure".to_string()));
        }
        Ok(PathBuf::from(&self.base_path).join(OUTPUT_FILENAME))
    }
}
