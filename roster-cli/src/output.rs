//! All-or-nothing writes of a run's output files

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// A fully built output file waiting to be written
#[derive(Debug)]
pub struct PendingFile<'a> {
    /// Shown in error messages, e.g. "Excel file"
    pub kind: &'static str,
    pub path: &'a Path,
    pub bytes: Vec<u8>,
}

/// Write every file or none of them.
///
/// Each file is staged in a temp file beside its destination; only when all
/// of them staged are they renamed into place. Staged temp files are removed
/// on failure.
pub fn persist_all(files: Vec<PendingFile<'_>>) -> Result<()> {
    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let tmp = stage(file.path, &file.bytes).with_context(|| {
            format!("Failed to save {}: {}", file.kind, file.path.display())
        })?;
        staged.push((file.kind, file.path, tmp));
    }

    for (kind, path, tmp) in staged {
        tmp.persist(path)
            .map_err(|err| err.error)
            .with_context(|| format!("Failed to save {}: {}", kind, path.display()))?;
        log::info!("{} saved to: {}", kind, path.display());
    }
    Ok(())
}

fn stage(path: &Path, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    // `Path::parent` is empty for bare file names like `out.xlsx`
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}
