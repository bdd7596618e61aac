//! Messages, mailboxes and direct delivery.

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use super::cipher;
use super::errors::SocialError;
use super::store::SocialStore;
use crate::logutil::{body_summary, escape_log};
use crate::validation::{validate_message_body, validate_username};

/// An obfuscated message as it sits in a mailbox or group log.
///
/// The body is stored already XORed with the sender's username; it is only
/// turned back into text by [`Message::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: String,
    body: Vec<u8>,
    sent_at: DateTime<Utc>,
}

impl Message {
    /// Obfuscate `plaintext` with `sender` as the key.
    pub(crate) fn seal(sender: &str, plaintext: &str) -> Self {
        Message {
            sender: sender.to_string(),
            body: cipher::obfuscate(plaintext.as_bytes(), sender),
            sent_at: Utc::now(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// The stored (obfuscated) bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Recover the plaintext using the recorded sender as key.
    pub fn open(&self) -> ReceivedMessage {
        let plain = cipher::reveal(&self.body, &self.sender);
        ReceivedMessage {
            sender: self.sender.clone(),
            text: String::from_utf8_lossy(&plain).into_owned(),
            sent_at: self.sent_at,
        }
    }
}

/// A de-obfuscated message handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedMessage {
    pub sender: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ReceivedMessage {
    /// `(sender, text)` view for comparisons and rendering.
    pub fn pair(&self) -> (&str, &str) {
        (&self.sender, &self.text)
    }
}

/// Per-account message list, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Mailbox {
    messages: Vec<Message>,
}

impl Mailbox {
    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// All messages, de-obfuscated, in arrival order.
    pub fn read_all(&self) -> Vec<ReceivedMessage> {
        self.messages.iter().map(Message::open).collect()
    }
}

impl SocialStore {
    /// Obfuscate `text` with `sender` as key and append it to `recipient`'s mailbox.
    pub fn send_direct_message(
        &mut self,
        sender: &str,
        recipient: &str,
        text: &str,
    ) -> Result<(), SocialError> {
        validate_username(sender, self.limits())?;
        validate_message_body(text, self.limits())?;
        if !self.exists(recipient) {
            return Err(SocialError::RecipientNotFound(recipient.to_string()));
        }
        let message = Message::seal(sender, text);
        self.deliver(recipient, message)
    }

    /// Append an already-sealed message to a mailbox. Shared by direct messages and
    /// group fan-out.
    pub(crate) fn deliver(&mut self, recipient: &str, message: Message) -> Result<(), SocialError> {
        let node = self
            .node_mut(recipient)
            .ok_or_else(|| SocialError::RecipientNotFound(recipient.to_string()))?;
        debug!(
            "deliver from={} to={} body={}",
            escape_log(message.sender()),
            escape_log(recipient),
            body_summary(message.body())
        );
        node.mailbox.push(message);
        Ok(())
    }

    /// Every message in `username`'s mailbox, oldest first. Does not drain the mailbox.
    pub fn read_mailbox(&self, username: &str) -> Result<Vec<ReceivedMessage>, SocialError> {
        self.node(username)
            .map(|node| node.mailbox.read_all())
            .ok_or_else(|| SocialError::NotFound(username.to_string()))
    }

    pub fn mailbox_len(&self, username: &str) -> Result<usize, SocialError> {
        self.node(username)
            .map(|node| node.mailbox.len())
            .ok_or_else(|| SocialError::NotFound(username.to_string()))
    }
}
