use super::ClipboardService;
use crate::{Error, Result};
use clipboard::{ClipboardContext, ClipboardProvider};

/// The host's clipboard. A fresh context is opened per write because the
/// provider handle is not `Send`.
///
/// On X11 the selection is owned by this process, so the contents disappear
/// when it exits unless a clipboard manager has taken them over.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardService for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut ctx = ClipboardContext::new()
            .map_err(|e| Error::Clipboard(format!("Failed to open clipboard: {}", e)))?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| Error::Clipboard(format!("Failed to write clipboard: {}", e)))?;
        tracing::debug!("Copied {} chars to clipboard", text.len());
        Ok(())
    }
}
