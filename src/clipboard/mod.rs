//! Clipboard access
//!
//! Write-only: the application only ever places the full letter text on the
//! clipboard.

pub mod memory;
pub mod system;

pub use memory::MemoryClipboard;
pub use system::SystemClipboard;

use crate::Result;

pub trait ClipboardService: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}
