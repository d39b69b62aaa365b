//! Error types for decoding, conversion and delivery

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a stitch pattern could not be obtained from raw bytes
#[derive(Debug)]
pub enum DecodeError {
    /// The codec has no reader for this extension
    Unsupported {
        /// Extension that was requested, without the leading dot
        extension: String,
    },

    /// The codec reader rejected the bytes
    Codec {
        /// Reader's description of the failure
        reason: String,
    },

    /// Decoding succeeded but produced no stitches
    EmptyPattern,

    /// Fixed-layout header did not start with the expected magic literal
    BadMagic {
        /// Bytes found where the magic literal was expected
        found: Vec<u8>,
    },

    /// Input ended before the fixed-layout header was complete
    TruncatedHeader {
        /// Number of bytes available
        length: usize,
    },

    /// Input ended before all declared stitch records were read
    TruncatedRecords {
        /// Stitch count declared in the header
        declared: u32,
        /// Complete records actually present
        available: u32,
    },

    /// Both the primary codec and the fallback parser failed
    Exhausted {
        /// Failure reported by the primary codec
        primary: Box<DecodeError>,
        /// Failure reported by the fallback parser
        fallback: Box<DecodeError>,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { extension } => {
                write!(f, "No reader available for '.{extension}' files")
            }
            Self::Codec { reason } => write!(f, "Codec rejected input: {reason}"),
            Self::EmptyPattern => write!(f, "Pattern contains no stitches"),
            Self::BadMagic { found } => {
                write!(f, "Invalid header magic {}", String::from_utf8_lossy(found))
            }
            Self::TruncatedHeader { length } => {
                write!(f, "Header truncated after {length} bytes")
            }
            Self::TruncatedRecords {
                declared,
                available,
            } => {
                write!(
                    f,
                    "Stitch data truncated: header declares {declared} records, found {available}"
                )
            }
            Self::Exhausted { primary, fallback } => {
                write!(
                    f,
                    "All decoders failed (primary: {primary}; fallback: {fallback})"
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Exhausted { fallback, .. } => Some(fallback.as_ref()),
            _ => None,
        }
    }
}

/// Main error type for conversion requests
#[derive(Debug)]
pub enum ConverterError {
    /// Input file extension is not in the accepted set
    UnsupportedInput {
        /// Name of the rejected file
        file_name: String,
        /// Extensions that would have been accepted
        allowed: Vec<String>,
    },

    /// No stitch pattern could be read from the input
    Decode {
        /// Name of the file being decoded
        file_name: String,
        /// Underlying decode failure
        source: DecodeError,
    },

    /// Encoder for one target format failed
    Encode {
        /// Target extension
        extension: String,
        /// Encoder's description of the failure
        reason: String,
    },

    /// Chat transport operation failed
    Transport {
        /// Name of the transport operation
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save the rendered preview
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Failed to write an entry into the output archive
    Archive {
        /// Entry being written when the failure happened
        entry: String,
        /// Underlying zip error
        source: zip::result::ZipError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Socket operation on the liveness endpoint failed
    Network {
        /// Address involved in the operation
        addr: String,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedInput { file_name, allowed } => {
                write!(
                    f,
                    "Unsupported input '{file_name}' (accepted: {})",
                    allowed.join(", ")
                )
            }
            Self::Decode { file_name, source } => {
                write!(f, "Failed to decode '{file_name}': {source}")
            }
            Self::Encode { extension, reason } => {
                write!(f, "Failed to encode '.{extension}': {reason}")
            }
            Self::Transport { operation, reason } => {
                write!(f, "Transport error during {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Archive { entry, source } => {
                write!(f, "Failed to archive '{entry}': {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Network {
                addr,
                operation,
                source,
            } => {
                write!(f, "Network error during {operation} on '{addr}': {source}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConverterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::Archive { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::Network { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for conversion results
pub type Result<T> = std::result::Result<T, ConverterError>;

/// Attaches the offending path to file system errors
pub trait WithPath<T> {
    /// Map an I/O failure into [`ConverterError::FileSystem`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::io::Result<T> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| ConverterError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ConverterError {
    ConverterError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a transport error
pub fn transport_error(operation: &'static str, reason: &impl ToString) -> ConverterError {
    ConverterError::Transport {
        operation,
        reason: reason.to_string(),
    }
}
