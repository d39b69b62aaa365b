//! Conversion constants and runtime configuration defaults

use crate::preview::segments::PaletteColor;

// Input acceptance
/// Extensions accepted from users, compared case-insensitively
pub const ACCEPTED_EXTENSIONS: [&str; 7] = [".jef", ".pes", ".dst", ".exp", ".emb", ".vp3", ".xxx"];

/// Extension of the proprietary source format, never written back out
pub const INTERNAL_EXTENSION: &str = "emb";

/// Magic literal opening every fixed-layout fallback file
pub const FALLBACK_MAGIC: [u8; 4] = *b"EMB1";

/// Size of the fallback header (magic plus stitch count)
pub const FALLBACK_HEADER_LEN: usize = 8;

/// Size of one fallback stitch record (two little-endian `i16`)
pub const FALLBACK_RECORD_LEN: usize = 4;

// Formats that are lossy, non-standard or useless for sharing
/// Extensions skipped during multi-format export unless overridden
pub const DEFAULT_EXCLUDED_FORMATS: [&str; 39] = [
    "col", "edr", "gcode", "inf", "pmv", "csv", "json", "txt", "fxy", "new", "zxy", "tap", "10o",
    "bro", "max", "dat", "stc", "inb", "100", "stx", "jpx", "mit", "pcd", "gt", "shv", "pcs",
    "dsb", "emd", "pcq", "dsz", "exy", "hus", "phc", "pcm", "sew", "spx", "zhs", "ksm", "phb",
];

// Preview rendering
/// Thread colors assigned to successive color blocks, wrapping on overflow
pub const PREVIEW_PALETTE: [PaletteColor; 7] = [
    PaletteColor::new("blue", [0, 0, 255]),
    PaletteColor::new("green", [0, 128, 0]),
    PaletteColor::new("red", [255, 0, 0]),
    PaletteColor::new("orange", [255, 165, 0]),
    PaletteColor::new("purple", [128, 0, 128]),
    PaletteColor::new("brown", [165, 42, 42]),
    PaletteColor::new("cyan", [0, 255, 255]),
];

/// Width and height of the preview image in pixels
pub const PREVIEW_SIZE: u32 = 1000;
/// Space reserved left of the plot area for the y label
pub const PLOT_MARGIN_LEFT: u32 = 80;
/// Space reserved right of the plot area
pub const PLOT_MARGIN_RIGHT: u32 = 40;
/// Space reserved above the plot area for the title
pub const PLOT_MARGIN_TOP: u32 = 70;
/// Space reserved below the plot area for the x label
pub const PLOT_MARGIN_BOTTOM: u32 = 70;
/// Gap between the outermost stitches and the plot frame
pub const PLOT_PADDING: u32 = 20;

/// Background color of the preview
pub const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];
/// Color of frame, title and labels
pub const INK_COLOR: [u8; 3] = [0, 0, 0];
/// Marker color for the first stitch
pub const START_MARKER_COLOR: [u8; 3] = [0, 128, 0];
/// Marker color for the last stitch
pub const END_MARKER_COLOR: [u8; 3] = [255, 0, 0];
/// Radius of the start marker and half-width of the end marker
pub const MARKER_RADIUS: i32 = 6;
/// Integer upscale applied to the 8x8 bitmap font
pub const TEXT_SCALE: u32 = 2;

/// Title drawn above the plot
pub const PREVIEW_TITLE: &str = "Embroidery Preview";
/// Label under the horizontal axis
pub const X_AXIS_LABEL: &str = "X Position";
/// Label beside the vertical axis
pub const Y_AXIS_LABEL: &str = "Y Position";

// Output naming
/// Suffix added to the preview image filename
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Extension of the delivered archive
pub const ARCHIVE_EXTENSION: &str = "zip";

// User-facing messages
/// Reply to `/start` and `/help`
pub const WELCOME_MESSAGE: &str = "Welcome to the Embroidery File Converter Bot!\n\n\
    Send me an embroidery file (supported formats: .jef, .pes, .dst, .exp, etc.) \
    and I'll convert it to multiple formats and send you a zip file with all the conversions \
    along with a preview image.";
/// Acknowledgement sent before processing starts
pub const PROCESSING_MESSAGE: &str = "Processing your embroidery file... Please wait.";
/// Prefix of the rejection message; the accepted extensions follow
pub const REJECTION_MESSAGE: &str = "Sorry, this doesn't appear to be a supported embroidery file. \
    Please send a file with one of these extensions: ";
/// Shown when no decoder could read the file
pub const DECODE_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't process your embroidery file. Please try with a different file.";
/// Prefix of the generic error message; the error description follows
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An error occurred while processing your file: ";
/// Caption of the delivered archive
pub const DELIVERY_CAPTION: &str = "Here are your converted embroidery files and preview image!";

// Liveness endpoint
/// Body returned by the liveness endpoint
pub const HEALTH_RESPONSE_BODY: &str = "Bot is running";

// Front end defaults
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Default log level when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default sender name for files picked up from disk
pub const DEFAULT_SENDER: &str = "local";
/// Default delay between inbox scans in watch mode
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
