use crate::shared::Result;
use anyhow::{bail, Context};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Maximum size accepted for credential and config files (1 MB)
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Fails when `path` is a symbolic link. A path that does not exist yet passes.
pub fn reject_symlink(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => bail!(
            "Security: {} is a symbolic link. Refusing to follow it.",
            path.display()
        ),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to inspect {}", path.display())),
    }
}

/// Reads a credential or config file
///
/// The path must name a regular file (symbolic links are refused) of at
/// most [`MAX_FILE_SIZE`] bytes.
pub fn read_small_file(path: &Path, file_description: &str) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to read {} metadata", file_description))?;

    if metadata.is_symlink() {
        bail!(
            "Security: {} {} is a symbolic link. Refusing to follow it.",
            file_description,
            path.display()
        );
    }
    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }
    if metadata.len() > MAX_FILE_SIZE {
        bail!(
            "Security: {} is too large ({} bytes, limit {}).",
            path.display(),
            metadata.len(),
            MAX_FILE_SIZE
        );
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", file_description))
}
