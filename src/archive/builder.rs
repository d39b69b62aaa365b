//! Packs conversion outputs into one deflate-compressed zip

use crate::io::error::{ConverterError, Result, WithPath};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Finished archive held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArchive {
    file_name: String,
    bytes: Vec<u8>,
}

impl OutputArchive {
    /// Suggested download name, `<base>.zip`
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw zip bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reader positioned at the start of the archive
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(&self.bytes)
    }

    /// Take ownership of the zip bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Flat entry name for `path`, its final component
fn entry_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ConverterError::InvalidParameter {
            parameter: "archive entry",
            value: path.display().to_string(),
            reason: "path has no file name".to_string(),
        })
}

/// Build a zip with one deflated entry per file, named by base name
///
/// Any failure aborts the whole archive; partial archives are never
/// returned.
///
/// # Errors
///
/// Returns an error if:
/// - A path has no file name component
/// - A file cannot be read
/// - Two files share a base name or the zip cannot be written
pub fn build_archive<P: AsRef<Path>>(files: &[P], archive_name: &str) -> Result<OutputArchive> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for file in files {
        let path = file.as_ref();
        let name = entry_name(path)?;
        let contents = std::fs::read(path).with_path(path, "read archive entry")?;

        writer
            .start_file(name.as_str(), options)
            .map_err(|source| ConverterError::Archive {
                entry: name.clone(),
                source,
            })?;
        writer
            .write_all(&contents)
            .with_path(path, "compress archive entry")?;
        debug!(entry = %name, bytes = contents.len(), "Archived");
    }

    let cursor = writer.finish().map_err(|source| ConverterError::Archive {
        entry: archive_name.to_string(),
        source,
    })?;

    Ok(OutputArchive {
        file_name: archive_name.to_string(),
        bytes: cursor.into_inner(),
    })
}

/// Paths to archive for one request: exports first, preview last
pub fn archive_inputs(exports: impl IntoIterator<Item = PathBuf>, preview: PathBuf) -> Vec<PathBuf> {
    exports.into_iter().chain(std::iter::once(preview)).collect()
}
