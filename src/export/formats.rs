//! Target format selection for multi-format export

use crate::io::configuration::{DEFAULT_EXCLUDED_FORMATS, INTERNAL_EXTENSION};
use std::collections::BTreeSet;

/// Export options fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    /// Extensions never exported, lowercase without the dot
    pub excluded: Vec<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            excluded: DEFAULT_EXCLUDED_FORMATS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ExportSettings {
    /// Settings with no denylist; `emb` and the source format are still skipped
    pub const fn without_exclusions() -> Self {
        Self {
            excluded: Vec::new(),
        }
    }

    /// Add extra extensions to the denylist
    #[must_use]
    pub fn exclude<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded.extend(
            extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .filter(|ext| !ext.is_empty()),
        );
        self
    }
}

/// Lowercase an extension and strip any leading dot
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Compute the sorted list of formats to export
///
/// Drops the denylist, the internal `emb` extension and the source
/// extension, then deduplicates. Sorting makes archive contents
/// reproducible regardless of registry iteration order.
pub fn target_formats<I, S>(registry: I, excluded: &[String], source_extension: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let source = normalize_extension(source_extension);
    let excluded: BTreeSet<String> = excluded.iter().map(|e| normalize_extension(e)).collect();

    registry
        .into_iter()
        .map(|ext| normalize_extension(ext.as_ref()))
        .filter(|ext| !ext.is_empty())
        .filter(|ext| ext != INTERNAL_EXTENSION && *ext != source)
        .filter(|ext| !excluded.contains(ext))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
