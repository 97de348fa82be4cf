//! Persistence of the reusable applicant profile
//!
//! A single entry under a fixed key holds `{name, recentPosition, background}`.
//! Saving replaces the entry wholesale; clearing removes it.

pub mod file;
pub mod memory;

pub use file::FileProfileStore;
pub use memory::MemoryProfileStore;

use crate::models::ProfileFields;
use crate::Result;

pub const STORAGE_KEY: &str = "ai_cover_letter_user_profile";

pub trait ProfileStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved. Malformed data is an
    /// error; callers decide whether to surface it.
    fn load(&self) -> Result<Option<ProfileFields>>;
    fn save(&self, profile: &ProfileFields) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
