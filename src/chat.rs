//! Support Chat
//!
//! One conversation per signed-in user, keyed by the user's id. Messages
//! carry epoch-millisecond timestamps on the wire.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{TypedId, UserId};

/// Message Id
pub type MessageId = TypedId<ChatMessage>;

/// Chat bookkeeping errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    /// Message text was blank.
    #[error("message is empty")]
    EmptyMessage,

    /// Message addressed to a different conversation.
    #[error("message belongs to conversation {message}, not {conversation}")]
    WrongConversation {
        /// Conversation being updated
        conversation: UserId,

        /// Conversation named by the message
        message: UserId,
    },
}

/// Message author side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The customer
    User,

    /// Shop staff
    Admin,
}

impl Sender {
    /// The other side of the conversation.
    pub fn counterpart(self) -> Self {
        match self {
            Self::User => Self::Admin,
            Self::Admin => Self::User,
        }
    }
}

/// Delivery state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Stored by the backend
    Sent,

    /// Fetched by the recipient
    Delivered,

    /// Seen by the recipient
    Read,
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Backend-assigned id
    pub id: MessageId,

    /// Conversation (the customer's user id)
    pub conversation_id: UserId,

    /// Author side
    pub sender: Sender,

    /// Body
    pub text: String,

    /// Send time
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub timestamp: Timestamp,

    /// Delivery state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
}

/// A message awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    /// Conversation (the customer's user id)
    pub conversation_id: UserId,

    /// Author side
    pub sender: Sender,

    /// Trimmed body
    pub text: String,

    /// Send time
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub timestamp: Timestamp,

    /// Always [`MessageStatus::Sent`]
    pub status: MessageStatus,
}

impl NewChatMessage {
    /// Compose a message.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyMessage`] for blank text.
    pub fn new(
        conversation_id: UserId,
        sender: Sender,
        text: &str,
        timestamp: Timestamp,
    ) -> Result<Self, ChatError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        Ok(Self {
            conversation_id,
            sender,
            text: text.to_string(),
            timestamp,
            status: MessageStatus::Sent,
        })
    }
}

/// Conversation summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConversation {
    /// The customer's user id
    pub id: UserId,

    /// Customer display name
    pub user_name: String,

    /// Most recent message text
    pub last_message: String,

    /// Most recent message time
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub last_timestamp: Timestamp,

    /// Messages the customer has not seen
    pub unread_user: u32,

    /// Messages staff have not seen
    pub unread_admin: u32,
}

impl ChatConversation {
    /// An empty conversation for `user_id`.
    pub fn open(user_id: UserId, user_name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: user_id,
            user_name: user_name.into(),
            last_message: String::new(),
            last_timestamp: now,
            unread_user: 0,
            unread_admin: 0,
        }
    }

    /// Unread messages for `reader`.
    pub fn unread_for(&self, reader: Sender) -> u32 {
        match reader {
            Sender::User => self.unread_user,
            Sender::Admin => self.unread_admin,
        }
    }

    /// Record a new message: update the preview and bump the recipient's
    /// unread counter.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::WrongConversation`] when the message targets
    /// another conversation.
    pub fn record(&mut self, message: &NewChatMessage) -> Result<(), ChatError> {
        if message.conversation_id != self.id {
            return Err(ChatError::WrongConversation {
                conversation: self.id.clone(),
                message: message.conversation_id.clone(),
            });
        }

        self.last_message.clone_from(&message.text);
        self.last_timestamp = message.timestamp;

        let unread = match message.sender.counterpart() {
            Sender::User => &mut self.unread_user,
            Sender::Admin => &mut self.unread_admin,
        };

        *unread = unread.saturating_add(1);

        Ok(())
    }

    /// Clear `reader`'s unread counter.
    pub fn mark_read(&mut self, reader: Sender) {
        match reader {
            Sender::User => self.unread_user = 0,
            Sender::Admin => self.unread_admin = 0,
        }
    }
}

/// Mark every message sent to `reader` as read. Returns how many changed.
pub fn mark_messages_read(messages: &mut [ChatMessage], reader: Sender) -> usize {
    let mut changed = 0;

    for message in messages.iter_mut().filter(|message| {
        message.sender == reader.counterpart() && message.status != Some(MessageStatus::Read)
    }) {
        message.status = Some(MessageStatus::Read);
        changed += 1;
    }

    changed
}
