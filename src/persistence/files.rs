use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Ensure the parent directory of a file exists
pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let dir = match path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("Could not determine current directory")?,
    };

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(&dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content)
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Append bytes to a file with a single write followed by a sync
pub fn append_to_file<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open file for appending: {}", path.display()))?;

    file.write_all(content)
        .context("Failed to append to file")?;

    file.sync_all().context("Failed to sync file")?;

    Ok(())
}

/// True when the file is missing or has no content
pub fn is_missing_or_empty<P: AsRef<Path>>(path: P) -> bool {
    match fs::metadata(path.as_ref()) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    }
}

/// Whether a non-empty file ends with '\n' (false means a torn last line)
pub fn ends_with_newline<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Whether the file ends inside an open CSV quoted field, i.e. it holds an
/// odd number of '"' bytes. Escaped quotes come in pairs and keep the count even.
pub fn ends_inside_quotes<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    let content =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let quotes = content.iter().filter(|&&b| b == b'"').count();
    Ok(quotes % 2 == 1)
}
