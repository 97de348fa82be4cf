use super::ClipboardService;
use crate::{Error, Result};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    write_count: Arc<Mutex<usize>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails, as when no clipboard is available.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn get_contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    pub fn get_write_count(&self) -> usize {
        *self.write_count.lock().unwrap()
    }
}

impl ClipboardService for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        *self.write_count.lock().unwrap() += 1;
        if self.fail {
            return Err(Error::Clipboard("clipboard unavailable".to_string()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}
