//! Chat-facing request handling with per-request failure isolation

use crate::archive::builder::OutputArchive;
use crate::export::codec::Codec;
use crate::export::formats::ExportSettings;
use crate::io::configuration::{
    ACCEPTED_EXTENSIONS, DECODE_FAILURE_MESSAGE, DELIVERY_CAPTION, PROCESSING_MESSAGE,
    REJECTION_MESSAGE, UNEXPECTED_FAILURE_MESSAGE, WELCOME_MESSAGE,
};
use crate::io::error::{ConverterError, Result};
use crate::service::pipeline::{convert, split_file_name};
use crate::service::transport::{ChatId, IncomingDocument, OutgoingDocument, Transport};
use tracing::{error, info, warn};

/// How a document request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Archive sent to the requester
    Delivered {
        /// Name of the delivered archive
        archive_name: String,
    },
    /// Extension not accepted; nothing was processed
    Rejected,
    /// Processing failed; the requester was told why
    Failed {
        /// Description of the failure
        reason: String,
    },
}

/// Check that `file_name` carries one of the accepted extensions
///
/// # Errors
///
/// Returns [`ConverterError::UnsupportedInput`] listing the accepted set
pub fn ensure_accepted(file_name: &str) -> Result<()> {
    let (_, extension) = split_file_name(file_name);
    let accepted = !extension.is_empty()
        && ACCEPTED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.trim_start_matches('.') == extension);

    if accepted {
        Ok(())
    } else {
        Err(ConverterError::UnsupportedInput {
            file_name: file_name.to_string(),
            allowed: ACCEPTED_EXTENSIONS.iter().map(ToString::to_string).collect(),
        })
    }
}

/// Converts uploads and answers over a chat transport
///
/// Codec and transport are injected so the handler holds no global state.
/// Every request is isolated: failures become a [`RequestOutcome`] and the
/// bot stays ready for the next upload.
pub struct ConversionBot<C, T> {
    codec: C,
    transport: T,
    settings: ExportSettings,
    relay: Option<ChatId>,
}

impl<C: Codec, T: Transport> ConversionBot<C, T> {
    /// Create a bot without a relay destination
    pub const fn new(codec: C, transport: T, settings: ExportSettings) -> Self {
        Self {
            codec,
            transport,
            settings,
            relay: None,
        }
    }

    /// Copy originals and archives to `chat`
    #[must_use]
    pub const fn with_relay(mut self, chat: ChatId) -> Self {
        self.relay = Some(chat);
        self
    }

    /// Borrow the transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Answer a `/start` or `/help` command
    ///
    /// Returns `false` for commands the bot does not know.
    pub fn handle_command(&mut self, chat: ChatId, command: &str) -> bool {
        match command.trim_start_matches('/') {
            "start" | "help" => {
                if let Err(e) = self.transport.send_text(chat, WELCOME_MESSAGE) {
                    warn!(%chat, error = %e, "Failed to send welcome");
                }
                true
            }
            _ => false,
        }
    }

    /// Convert an uploaded document and reply with the archive
    pub fn handle_document(&mut self, incoming: &IncomingDocument) -> RequestOutcome {
        match self.process_document(incoming) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(file = %incoming.file_name, error = %e, "Error processing document");
                let message = format!("{UNEXPECTED_FAILURE_MESSAGE}{e}");
                if let Err(reply_error) = self.transport.send_text(incoming.chat, &message) {
                    warn!(chat = %incoming.chat, error = %reply_error, "Failed to report error");
                }
                RequestOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn process_document(&mut self, incoming: &IncomingDocument) -> Result<RequestOutcome> {
        let chat = incoming.chat;
        let status = self.transport.send_text(chat, PROCESSING_MESSAGE)?;

        if let Err(rejection) = ensure_accepted(&incoming.file_name) {
            info!(error = %rejection, "Rejected upload");
            let text = format!("{REJECTION_MESSAGE}{}", ACCEPTED_EXTENSIONS.join(", "));
            self.transport.edit_text(chat, status, &text)?;
            return Ok(RequestOutcome::Rejected);
        }

        self.relay_document(OutgoingDocument {
            file_name: incoming.file_name.clone(),
            bytes: incoming.bytes.clone(),
            caption: format!("Original file from {}", incoming.sender),
        });

        let archive = match convert(
            &self.codec,
            &incoming.bytes,
            &incoming.file_name,
            &self.settings,
        ) {
            Ok(archive) => archive,
            Err(ConverterError::Decode { file_name, source }) => {
                error!(file = %file_name, error = %source, "Failed to process embroidery file");
                self.transport.edit_text(chat, status, DECODE_FAILURE_MESSAGE)?;
                return Ok(RequestOutcome::Failed {
                    reason: source.to_string(),
                });
            }
            Err(other) => return Err(other),
        };

        let archive_name = archive.file_name().to_string();
        self.transport
            .send_document(chat, &delivery(&archive, DELIVERY_CAPTION.to_string()))?;
        if let Err(e) = self.transport.delete_message(chat, status) {
            warn!(%chat, error = %e, "Failed to remove processing notice");
        }

        let converted_caption = format!("Converted file for {}", incoming.sender);
        self.relay_document(delivery(&archive, converted_caption));

        info!(archive = %archive_name, %chat, "Delivered");
        Ok(RequestOutcome::Delivered { archive_name })
    }

    // Relay problems are logged and never reach the requester
    fn relay_document(&mut self, document: OutgoingDocument) {
        let Some(relay) = self.relay else {
            return;
        };
        if let Err(e) = self.transport.send_document(relay, &document) {
            error!(%relay, file = %document.file_name, error = %e, "Failed to relay document");
        }
    }
}

fn delivery(archive: &OutputArchive, caption: String) -> OutgoingDocument {
    OutgoingDocument {
        file_name: archive.file_name().to_string(),
        bytes: archive.bytes().to_vec(),
        caption,
    }
}
