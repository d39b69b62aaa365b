//! Directory-backed transport for running the bot against local files

use crate::io::error::{Result, WithPath, transport_error};
use crate::service::transport::{ChatId, MessageId, OutgoingDocument, Transport};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Text message as recorded by [`MailboxTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxMessage {
    /// Chat the message was posted to
    pub chat: ChatId,
    /// Identifier handed back to the sender
    pub id: MessageId,
    /// Current text; `None` once deleted
    pub text: Option<String>,
}

/// Transport that writes documents into one directory per chat
///
/// Text messages are logged and kept in memory so callers can inspect the
/// conversation. Sending a document to a chat with no directory fails like
/// an unreachable chat would.
#[derive(Debug, Default)]
pub struct MailboxTransport {
    routes: HashMap<ChatId, PathBuf>,
    messages: Vec<MailboxMessage>,
    next_id: u64,
}

impl MailboxTransport {
    /// Create a transport with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver documents for `chat` into `directory`
    #[must_use]
    pub fn route(mut self, chat: ChatId, directory: impl Into<PathBuf>) -> Self {
        self.routes.insert(chat, directory.into());
        self
    }

    /// Directory serving `chat`, if routed
    pub fn directory(&self, chat: ChatId) -> Option<&Path> {
        self.routes.get(&chat).map(PathBuf::as_path)
    }

    /// Every text message posted so far, deleted ones included
    pub fn messages(&self) -> &[MailboxMessage] {
        &self.messages
    }

    /// Texts still visible in `chat`, oldest first
    pub fn visible_texts(&self, chat: ChatId) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.chat == chat)
            .filter_map(|m| m.text.as_deref())
            .collect()
    }

    fn message_mut(&mut self, chat: ChatId, id: MessageId) -> Result<&mut MailboxMessage> {
        self.messages
            .iter_mut()
            .find(|m| m.chat == chat && m.id == id)
            .ok_or_else(|| transport_error("lookup message", &format!("no message {} in chat {chat}", id.0)))
    }
}

impl Transport for MailboxTransport {
    fn send_text(&mut self, chat: ChatId, text: &str) -> Result<MessageId> {
        self.next_id += 1;
        let id = MessageId(self.next_id);
        info!(%chat, message = id.0, "{text}");
        self.messages.push(MailboxMessage {
            chat,
            id,
            text: Some(text.to_string()),
        });
        Ok(id)
    }

    fn edit_text(&mut self, chat: ChatId, message: MessageId, text: &str) -> Result<()> {
        let entry = self.message_mut(chat, message)?;
        entry.text = Some(text.to_string());
        info!(%chat, message = message.0, "{text}");
        Ok(())
    }

    fn delete_message(&mut self, chat: ChatId, message: MessageId) -> Result<()> {
        self.message_mut(chat, message)?.text = None;
        Ok(())
    }

    fn send_document(&mut self, chat: ChatId, document: &OutgoingDocument) -> Result<()> {
        let directory = self
            .routes
            .get(&chat)
            .ok_or_else(|| transport_error("send document", &format!("chat {chat} is not routed")))?;

        std::fs::create_dir_all(directory).with_path(directory, "create directory")?;
        let path = directory.join(&document.file_name);
        std::fs::write(&path, &document.bytes).with_path(&path, "write document")?;

        info!(%chat, path = %path.display(), caption = %document.caption, "Document delivered");
        Ok(())
    }
}
