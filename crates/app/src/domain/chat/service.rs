//! Chat service.
//!
//! Request/response only: conversations and messages are read and written
//! through the row store, nothing is pushed.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use quire::{
    chat::{ChatConversation, ChatMessage, MessageStatus, NewChatMessage, Sender},
    ids::UserId,
};
use serde_json::json;

use crate::{
    domain::chat::errors::ChatServiceError,
    store::{Collection, Direction, Filter, RowStore, decode, decode_all, encode},
};

#[derive(Clone)]
pub struct StoreChatService {
    store: Arc<dyn RowStore>,
}

impl StoreChatService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChatService for StoreChatService {
    async fn conversation(
        &self,
        user: UserId,
    ) -> Result<Option<ChatConversation>, ChatServiceError> {
        let rows = self
            .store
            .select(
                Collection::ChatConversations,
                Filter::eq("id", user.as_str()).limit(1),
            )
            .await?;

        Ok(rows.into_iter().next().map(decode).transpose()?)
    }

    async fn list_conversations(&self) -> Result<Vec<ChatConversation>, ChatServiceError> {
        let rows = self
            .store
            .select(
                Collection::ChatConversations,
                Filter::all().order_by("lastTimestamp", Direction::Descending),
            )
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn messages(&self, conversation: UserId) -> Result<Vec<ChatMessage>, ChatServiceError> {
        let rows = self
            .store
            .select(
                Collection::ChatMessages,
                Filter::eq("conversationId", conversation.as_str())
                    .order_by("timestamp", Direction::Ascending),
            )
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn send(
        &self,
        message: NewChatMessage,
        user_name: String,
    ) -> Result<ChatMessage, ChatServiceError> {
        let mut conversation = self
            .conversation(message.conversation_id.clone())
            .await?
            .unwrap_or_else(|| {
                ChatConversation::open(
                    message.conversation_id.clone(),
                    user_name,
                    message.timestamp,
                )
            });

        conversation.record(&message)?;

        let stored = self
            .store
            .insert(Collection::ChatMessages, encode(&message)?)
            .await?;

        self.store
            .upsert(Collection::ChatConversations, encode(&conversation)?, "id")
            .await?;

        Ok(decode(stored)?)
    }

    async fn mark_read(&self, conversation: UserId, reader: Sender) -> Result<u64, ChatServiceError> {
        let updated = self
            .store
            .update(
                Collection::ChatMessages,
                Filter::eq("conversationId", conversation.as_str())
                    .and_eq("sender", json!(reader.counterpart())),
                json!({ "status": MessageStatus::Read }),
            )
            .await?;

        let Some(mut summary) = self.conversation(conversation).await? else {
            return Err(ChatServiceError::NotFound);
        };

        summary.mark_read(reader);

        self.store
            .upsert(Collection::ChatConversations, encode(&summary)?, "id")
            .await?;

        Ok(u64::try_from(updated.len()).unwrap_or(u64::MAX))
    }
}

#[automock]
#[async_trait]
pub trait ChatService: Send + Sync {
    /// One customer's conversation summary.
    async fn conversation(
        &self,
        user: UserId,
    ) -> Result<Option<ChatConversation>, ChatServiceError>;

    /// Every conversation, most recently active first.
    async fn list_conversations(&self) -> Result<Vec<ChatConversation>, ChatServiceError>;

    /// A conversation's messages, oldest first.
    async fn messages(&self, conversation: UserId) -> Result<Vec<ChatMessage>, ChatServiceError>;

    /// Stores a message and updates the conversation summary, opening it
    /// under `user_name` on first contact.
    async fn send(
        &self,
        message: NewChatMessage,
        user_name: String,
    ) -> Result<ChatMessage, ChatServiceError>;

    /// Marks everything sent to `reader` as read and clears their unread
    /// counter. Returns how many messages were updated.
    async fn mark_read(&self, conversation: UserId, reader: Sender) -> Result<u64, ChatServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::test::MemoryRowStore;

    use super::*;

    fn message(sender: Sender, text: &str, millis: i64) -> TestResult<NewChatMessage> {
        Ok(NewChatMessage::new(
            "u-1".into(),
            sender,
            text,
            Timestamp::from_millisecond(millis)?,
        )?)
    }

    #[tokio::test]
    async fn first_message_opens_the_conversation() -> TestResult {
        let service = StoreChatService::new(Arc::new(MemoryRowStore::new()));

        service
            .send(message(Sender::User, "Do you ship to Giza?", 1_000)?, "Nour".to_string())
            .await?;

        let Some(conversation) = service.conversation("u-1".into()).await? else {
            panic!("conversation should exist after the first message");
        };

        assert_eq!(conversation.user_name, "Nour");
        assert_eq!(conversation.last_message, "Do you ship to Giza?");
        assert_eq!(conversation.unread_for(Sender::Admin), 1);
        assert_eq!(conversation.unread_for(Sender::User), 0);

        Ok(())
    }

    #[tokio::test]
    async fn replies_are_ordered_and_marked_read() -> TestResult {
        let service = StoreChatService::new(Arc::new(MemoryRowStore::new()));

        service
            .send(message(Sender::User, "Hello?", 1_000)?, "Nour".to_string())
            .await?;
        service
            .send(message(Sender::Admin, "Hi! Yes we do.", 2_000)?, "Nour".to_string())
            .await?;
        service
            .send(message(Sender::Admin, "Delivery takes 3 days.", 3_000)?, "Nour".to_string())
            .await?;

        let texts: Vec<String> = service
            .messages("u-1".into())
            .await?
            .into_iter()
            .map(|message| message.text)
            .collect();

        assert_eq!(texts, ["Hello?", "Hi! Yes we do.", "Delivery takes 3 days."]);

        let marked = service.mark_read("u-1".into(), Sender::User).await?;

        assert_eq!(marked, 2);

        let Some(conversation) = service.conversation("u-1".into()).await? else {
            panic!("conversation should exist");
        };

        assert_eq!(conversation.unread_for(Sender::User), 0);
        assert_eq!(conversation.unread_for(Sender::Admin), 1);

        let statuses: Vec<Option<MessageStatus>> = service
            .messages("u-1".into())
            .await?
            .into_iter()
            .map(|message| message.status)
            .collect();

        assert_eq!(
            statuses,
            [
                Some(MessageStatus::Sent),
                Some(MessageStatus::Read),
                Some(MessageStatus::Read),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn marking_an_unknown_conversation_is_not_found() {
        let service = StoreChatService::new(Arc::new(MemoryRowStore::new()));

        let result = service.mark_read("nobody".into(), Sender::Admin).await;

        assert!(
            matches!(result, Err(ChatServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
