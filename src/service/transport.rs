//! Seam to the chat service that delivers files and replies

use crate::io::error::Result;
use std::fmt;

/// Conversation identifier on the chat service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier within a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

/// Who sent an upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sender {
    /// Given name
    pub first_name: String,
    /// Family name, if shared
    pub last_name: Option<String>,
    /// Account handle without the `@`
    pub username: Option<String>,
}

impl Sender {
    /// Sender known only by a first name
    pub fn named(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_name)?;
        if let Some(last) = &self.last_name {
            write!(f, " {last}")?;
        }
        if let Some(handle) = &self.username {
            write!(f, " (@{handle})")?;
        }
        Ok(())
    }
}

/// Uploaded file awaiting conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingDocument {
    /// Chat the upload arrived in; replies go here
    pub chat: ChatId,
    /// Original file name including extension
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// Uploader
    pub sender: Sender,
}

/// File to send back over the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingDocument {
    /// Name the recipient sees
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// Text shown with the file
    pub caption: String,
}

/// Chat service operations used by the bot
pub trait Transport {
    /// Post a text message
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConverterError::Transport`] if the message is not delivered
    fn send_text(&mut self, chat: ChatId, text: &str) -> Result<MessageId>;

    /// Replace the text of an earlier message
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConverterError::Transport`] if the edit is rejected
    fn edit_text(&mut self, chat: ChatId, message: MessageId, text: &str) -> Result<()>;

    /// Remove an earlier message
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConverterError::Transport`] if the message cannot be removed
    fn delete_message(&mut self, chat: ChatId, message: MessageId) -> Result<()>;

    /// Post a file
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConverterError::Transport`] if the upload fails
    fn send_document(&mut self, chat: ChatId, document: &OutgoingDocument) -> Result<()>;
}
