//! Prepend new release sections to the changelog file.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::error::ChangelogError;

/// Prepend `block` to the changelog at `path`, creating the file if absent.
///
/// The existing content follows the new block byte-for-byte. The file is
/// read whole and rewritten in place, which is enough for a single local writer.
pub fn prepend(path: &Path, block: &str) -> Result<(), ChangelogError> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|source| ChangelogError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let mut existing = Vec::new();
    file.read_to_end(&mut existing)
        .map_err(|source| ChangelogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let write_err = |source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut content = Vec::with_capacity(block.len() + existing.len());
    content.extend_from_slice(block.as_bytes());
    content.extend_from_slice(&existing);

    file.seek(SeekFrom::Start(0)).map_err(write_err)?;
    file.write_all(&content).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    debug!(
        path = %path.display(),
        added = block.len(),
        kept = existing.len(),
        "Prepended changelog section"
    );

    Ok(())
}
