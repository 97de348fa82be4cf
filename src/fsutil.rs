use crate::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Atomically write `content` to `{dir}/{filename}`: write a temp file in the
/// same directory, then rename it over the target.
pub(crate) fn write_atomic(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}
