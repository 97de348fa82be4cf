use super::{ProfileStore, STORAGE_KEY};
use crate::fsutil::write_atomic;
use crate::models::ProfileFields;
use crate::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

/// Stores the profile as pretty JSON in `{dir}/ai_cover_letter_user_profile.json`.
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn filename() -> String {
        format!("{}.json", STORAGE_KEY)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::filename())
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Option<ProfileFields>> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No saved profile at {}", path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let profile = serde_json::from_str(&content)?;
        debug!("Loaded saved profile from {}", path.display());
        Ok(Some(profile))
    }

    fn save(&self, profile: &ProfileFields) -> Result<()> {
        let json = serde_json::to_string_pretty(profile)?;
        let path = write_atomic(&self.dir, &Self::filename(), json.as_bytes())?;
        info!("Saved profile to {}", path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed saved profile at {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
