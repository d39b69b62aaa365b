//! One request end to end: acquire, export, preview, archive

use crate::archive::builder::{OutputArchive, archive_inputs, build_archive};
use crate::export::batch::export_all;
use crate::export::codec::Codec;
use crate::export::formats::{ExportSettings, normalize_extension, target_formats};
use crate::io::configuration::{ARCHIVE_EXTENSION, PREVIEW_SUFFIX};
use crate::io::error::{ConverterError, Result, WithPath};
use crate::pattern::acquisition::acquire;
use crate::preview::render::render_preview;
use std::path::Path;
use tempfile::TempDir;
use tracing::info;

/// Base name and lowercase extension of an uploaded file name
///
/// Directory components are ignored. The extension is empty when the name
/// has none.
pub fn split_file_name(file_name: &str) -> (String, String) {
    let path = Path::new(file_name);
    let base = path
        .file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
    let extension = path
        .extension()
        .map_or_else(String::new, |ext| normalize_extension(&ext.to_string_lossy()));
    (base, extension)
}

/// Convert one upload into an archive of alternate formats plus preview
///
/// Scratch files live under the system temporary directory; see
/// [`convert_in`].
///
/// # Errors
///
/// Returns an error under the same conditions as [`convert_in`]
pub fn convert<C: Codec + ?Sized>(
    codec: &C,
    bytes: &[u8],
    original_file_name: &str,
    settings: &ExportSettings,
) -> Result<OutputArchive> {
    convert_in(&std::env::temp_dir(), codec, bytes, original_file_name, settings)
}

/// Convert one upload using a scratch directory created under `scratch_root`
///
/// All intermediate files live in a temporary directory that is removed
/// when this function returns, whether it succeeds or not.
///
/// # Errors
///
/// Returns an error if:
/// - Neither the codec nor the fixed-layout reader can decode `bytes`
/// - The temporary directory cannot be created
/// - The preview cannot be rendered or the archive cannot be built
pub fn convert_in<C: Codec + ?Sized>(
    scratch_root: &Path,
    codec: &C,
    bytes: &[u8],
    original_file_name: &str,
    settings: &ExportSettings,
) -> Result<OutputArchive> {
    let (base_name, extension) = split_file_name(original_file_name);

    let scratch =
        TempDir::new_in(scratch_root).with_path(scratch_root, "create temporary directory")?;

    let pattern =
        acquire(codec, bytes, &extension).map_err(|source| ConverterError::Decode {
            file_name: original_file_name.to_string(),
            source,
        })?;
    info!(
        file = original_file_name,
        stitches = pattern.len(),
        color_changes = pattern.color_change_count(),
        "Pattern acquired"
    );

    let formats = target_formats(codec.supported_extensions(), &settings.excluded, &extension);
    let artifacts = export_all(codec, &pattern, scratch.path(), &base_name, &formats);

    let preview_path = scratch.path().join(format!("{base_name}{PREVIEW_SUFFIX}.png"));
    render_preview(&pattern, &preview_path)?;

    let inputs = archive_inputs(artifacts.into_iter().map(|a| a.path), preview_path);
    let archive = build_archive(&inputs, &format!("{base_name}.{ARCHIVE_EXTENSION}"))?;

    info!(
        archive = archive.file_name(),
        entries = inputs.len(),
        bytes = archive.bytes().len(),
        "Archive built"
    );
    Ok(archive)
}
