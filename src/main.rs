//! CLI entry point for the embroidery conversion bot

use clap::Parser;
use stitchbox::io::cli::{Cli, FileProcessor};
use stitchbox::io::logging;

fn main() -> stitchbox::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let mut processor = FileProcessor::new(cli);
    let summary = processor.process()?;
    tracing::info!(
        delivered = summary.delivered,
        rejected = summary.rejected,
        failed = summary.failed,
        "Done"
    );
    Ok(())
}
