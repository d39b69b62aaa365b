//! Encode one pattern into every selected format

use crate::export::codec::Codec;
use crate::io::error::WithPath;
use crate::pattern::stitch::StitchPattern;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One encoder output persisted to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Format extension, lowercase without the dot
    pub extension: String,
    /// Location of the written file
    pub path: PathBuf,
}

/// Write `pattern` as `<output_dir>/<base_name>.<ext>` for each format
///
/// A failing encoder or write is logged and skipped; the rest of the batch
/// still runs. Artifacts come back in `formats` order.
pub fn export_all<C: Codec + ?Sized>(
    codec: &C,
    pattern: &StitchPattern,
    output_dir: &Path,
    base_name: &str,
    formats: &[String],
) -> Vec<ExportArtifact> {
    let mut artifacts = Vec::with_capacity(formats.len());

    for extension in formats {
        let path = output_dir.join(format!("{base_name}.{extension}"));
        let written = codec
            .encode(pattern, extension)
            .and_then(|bytes| std::fs::write(&path, bytes).with_path(&path, "write export"));

        match written {
            Ok(()) => {
                info!(path = %path.display(), "Exported");
                artifacts.push(ExportArtifact {
                    extension: extension.clone(),
                    path,
                });
            }
            Err(error) => warn!(extension = %extension, %error, "Failed to export"),
        }
    }

    artifacts
}
