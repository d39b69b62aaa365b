//! Command-line front end that feeds files from disk through the bot

use crate::export::codec::{Codec, UnavailableCodec};
use crate::export::formats::ExportSettings;
use crate::io::configuration::{
    ARCHIVE_EXTENSION, DEFAULT_LOG_LEVEL, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SENDER,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::mailbox::MailboxTransport;
use crate::io::progress::{BatchSummary, ProgressManager};
use crate::service::handler::{ConversionBot, RequestOutcome};
use crate::service::health::HealthServer;
use crate::service::transport::{ChatId, IncomingDocument, Sender};
use clap::Parser;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Chat standing in for the person dropping files into the inbox
pub const INBOX_CHAT: ChatId = ChatId(1);
/// Chat standing in for the broadcast group
pub const RELAY_CHAT: ChatId = ChatId(-1);

#[derive(Parser, Debug)]
#[command(name = "stitchbox")]
#[command(
    author,
    version,
    about = "Convert embroidery files into a zip of alternate formats plus a stitch preview"
)]
/// Command-line arguments for the conversion front end
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Embroidery file or inbox directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory receiving archives (defaults to the input's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory receiving copies of originals and archives
    #[arg(long, env = "STITCHBOX_RELAY_DIR")]
    pub relay_dir: Option<PathBuf>,

    /// Name recorded as the uploader
    #[arg(long, env = "STITCHBOX_SENDER", default_value = DEFAULT_SENDER)]
    pub sender: String,

    /// Extra formats to skip during export (comma separated)
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Ignore the built-in export denylist
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Keep scanning the inbox for new files
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds between inbox scans in watch mode
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    pub interval: u64,

    /// Serve a liveness endpoint on this address, e.g. 0.0.0.0:8080
    #[arg(long, env = "STITCHBOX_HEALTH_ADDR")]
    pub health_addr: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if their archive exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if inputs with an existing archive should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Export settings implied by the denylist flags
    pub fn export_settings(&self) -> ExportSettings {
        let base = if self.no_default_excludes {
            ExportSettings::without_exclusions()
        } else {
            ExportSettings::default()
        };
        base.exclude(&self.exclude)
    }

    /// Directory archives are written to
    pub fn output_dir(&self) -> PathBuf {
        if let Some(ref output) = self.output {
            return output.clone();
        }
        if self.target.is_dir() {
            return self.target.clone();
        }
        match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Runs inbox files through a [`ConversionBot`] backed by the file system
pub struct FileProcessor<C = UnavailableCodec> {
    cli: Cli,
    bot: ConversionBot<C, MailboxTransport>,
    progress_manager: Option<ProgressManager>,
    handled: HashSet<PathBuf>,
    health: Option<HealthServer>,
}

impl FileProcessor<UnavailableCodec> {
    /// Create a processor without a codec library
    pub fn new(cli: Cli) -> Self {
        Self::with_codec(cli, UnavailableCodec)
    }
}

impl<C: Codec> FileProcessor<C> {
    /// Create a processor that decodes and encodes through `codec`
    pub fn with_codec(cli: Cli, codec: C) -> Self {
        let mut transport = MailboxTransport::new().route(INBOX_CHAT, cli.output_dir());
        if let Some(ref relay_dir) = cli.relay_dir {
            transport = transport.route(RELAY_CHAT, relay_dir.clone());
        }

        let mut bot = ConversionBot::new(codec, transport, cli.export_settings());
        if cli.relay_dir.is_some() {
            bot = bot.with_relay(RELAY_CHAT);
        }

        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            bot,
            progress_manager,
            handled: HashSet::new(),
            health: None,
        }
    }

    /// Address of the running liveness endpoint, if any
    pub fn health_addr(&self) -> Option<SocketAddr> {
        self.health.as_ref().map(HealthServer::local_addr)
    }

    /// Transport holding the conversation so far
    pub const fn transport(&self) -> &MailboxTransport {
        self.bot.transport()
    }

    /// Process files according to CLI arguments
    ///
    /// In watch mode this only returns on error.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation fails or the liveness endpoint
    /// cannot be started
    pub fn process(&mut self) -> Result<BatchSummary> {
        if self.cli.watch && self.cli.interval == 0 {
            return Err(invalid_parameter(
                "interval",
                &self.cli.interval,
                &"must be at least one second in watch mode",
            ));
        }

        if let Some(ref addr) = self.cli.health_addr
            && self.health.is_none()
        {
            self.health = Some(HealthServer::spawn(addr)?);
        }

        if !self.cli.watch {
            return self.run_once();
        }

        let interval = Duration::from_secs(self.cli.interval);
        info!(inbox = %self.cli.target.display(), "Watching for embroidery files");
        loop {
            let summary = self.run_once()?;
            if summary.total() > 0 {
                info!(
                    delivered = summary.delivered,
                    rejected = summary.rejected,
                    failed = summary.failed,
                    "Inbox scan complete"
                );
            }
            std::thread::sleep(interval);
        }
    }

    /// Handle every pending file once
    ///
    /// A file that cannot be read counts as a failed request.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be listed
    pub fn run_once(&mut self) -> Result<BatchSummary> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(BatchSummary::default());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut summary = BatchSummary::default();
        for file in &files {
            let outcome = self.process_file(file);
            summary.record(&outcome);
            if let Some(ref pm) = self.progress_manager {
                pm.complete_file(&outcome);
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory entry")?.path();
                if path.is_file() && !is_archive(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an embroidery file or a directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if self.handled.contains(input_path) {
            return false;
        }
        if !self.cli.skip_existing() {
            return true;
        }

        let archive_path = self.archive_path(input_path);
        if archive_path.exists() {
            debug!(input = %input_path.display(), "Skipping, archive exists");
            false
        } else {
            true
        }
    }

    // Unreadable inputs fail their own request and leave the batch running
    fn process_file(&mut self, input_path: &Path) -> RequestOutcome {
        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }
        if self.cli.watch {
            self.handled.insert(input_path.to_path_buf());
        }

        let bytes = match std::fs::read(input_path).with_path(input_path, "read input") {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(input = %input_path.display(), error = %e, "Failed to read input");
                return RequestOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };
        let file_name = input_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        let incoming = IncomingDocument {
            chat: INBOX_CHAT,
            file_name,
            bytes,
            sender: Sender::named(self.cli.sender.clone()),
        };

        self.bot.handle_document(&incoming)
    }

    /// Where the archive for `input_path` lands
    pub fn archive_path(&self, input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let archive_name = format!("{}.{ARCHIVE_EXTENSION}", stem.to_string_lossy());
        self.cli.output_dir().join(archive_name)
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}
