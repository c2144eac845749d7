//! Chat client boundary
//!
//! Message transport, offline storage and sync live in the hosted chat
//! service. The app only queries and creates channels through [`ChatClient`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::channel::{
    mock_channel_extras, streamer_channel_extras, Channel, ChannelExtras,
    LIVESTREAM_CHANNEL_TYPE, STREAMER_CHANNEL_ID,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("chat client is not connected")]
    NotConnected,
    #[error("chat client error: {0}")]
    Client(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Filter and ordering used to list channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelQuery {
    pub channel_type: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
}

impl ChannelQuery {
    /// Live channels, most recently updated first.
    pub fn livestreams() -> Self {
        Self {
            channel_type: LIVESTREAM_CHANNEL_TYPE.to_string(),
            sort_field: "last_updated".to_string(),
            sort_direction: SortDirection::Descending,
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    fn current_user_id(&self) -> Option<String>;

    async fn query_channels(&self, query: &ChannelQuery) -> Result<Vec<Channel>, ChatError>;

    /// Creates the channel, or returns the existing one with the same type and id.
    async fn create_channel(
        &self,
        channel_type: &str,
        channel_id: &str,
        member_ids: Vec<String>,
        extras: ChannelExtras,
    ) -> Result<Channel, ChatError>;
}

/// Creates the demo channels shown when no livestream exists yet.
pub async fn create_mock_channels(client: &dyn ChatClient) -> Result<Vec<Channel>, ChatError> {
    let members: Vec<String> = client.current_user_id().into_iter().collect();
    let mut channels = Vec::new();
    for (index, extras) in mock_channel_extras().into_iter().enumerate() {
        let channel_id = format!("livestream{}", index + 1);
        let channel = client
            .create_channel(LIVESTREAM_CHANNEL_TYPE, &channel_id, members.clone(), extras)
            .await?;
        channels.push(channel);
    }
    Ok(channels)
}

/// Creates (or fetches) the channel the current user broadcasts on.
pub async fn create_streamer_channel(client: &dyn ChatClient) -> Result<Channel, ChatError> {
    let members: Vec<String> = client.current_user_id().into_iter().collect();
    client
        .create_channel(
            LIVESTREAM_CHANNEL_TYPE,
            STREAMER_CHANNEL_ID,
            members,
            streamer_channel_extras(),
        )
        .await
}

/// A channel as the chat service keeps it, with untyped extra data.
#[derive(Debug, Clone)]
struct StoredChannel {
    channel_type: String,
    id: String,
    member_ids: Vec<String>,
    last_updated: DateTime<Utc>,
    extra_data: Map<String, Value>,
}

impl StoredChannel {
    fn to_channel(&self) -> Channel {
        Channel {
            channel_type: self.channel_type.clone(),
            id: self.id.clone(),
            name: self.id.clone(),
            member_ids: self.member_ids.clone(),
            last_updated: self.last_updated,
            extras: ChannelExtras::from_extra_data(&self.extra_data),
        }
    }
}

/// Chat client keeping channels in memory.
#[derive(Debug)]
pub struct InMemoryChatClient {
    user_id: Option<String>,
    channels: Mutex<Vec<StoredChannel>>,
}

impl InMemoryChatClient {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id,
            channels: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatClient for InMemoryChatClient {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    async fn query_channels(&self, query: &ChannelQuery) -> Result<Vec<Channel>, ChatError> {
        let channels = self.channels.lock().await;
        let mut matching: Vec<&StoredChannel> = channels
            .iter()
            .filter(|channel| channel.channel_type == query.channel_type)
            .collect();
        matching.sort_by(|a, b| match query.sort_direction {
            SortDirection::Ascending => a.last_updated.cmp(&b.last_updated),
            SortDirection::Descending => b.last_updated.cmp(&a.last_updated),
        });
        Ok(matching.into_iter().map(StoredChannel::to_channel).collect())
    }

    async fn create_channel(
        &self,
        channel_type: &str,
        channel_id: &str,
        member_ids: Vec<String>,
        extras: ChannelExtras,
    ) -> Result<Channel, ChatError> {
        let mut channels = self.channels.lock().await;
        if let Some(existing) = channels
            .iter()
            .find(|channel| channel.channel_type == channel_type && channel.id == channel_id)
        {
            return Ok(existing.to_channel());
        }

        let stored = StoredChannel {
            channel_type: channel_type.to_string(),
            id: channel_id.to_string(),
            member_ids,
            last_updated: Utc::now(),
            extra_data: extras.to_extra_data(),
        };
        let channel = stored.to_channel();
        channels.push(stored);
        Ok(channel)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_mock_channels_are_listed() {
        let client = InMemoryChatClient::new(Some("viewer".to_string()));
        assert!(client
            .query_channels(&ChannelQuery::livestreams())
            .await
            .unwrap()
            .is_empty());

        create_mock_channels(&client).await.unwrap();
        let channels = client
            .query_channels(&ChannelQuery::livestreams())
            .await
            .unwrap();
        assert_eq!(channels.len(), 2);
        assert!(channels
            .iter()
            .all(|channel| channel.member_ids == vec!["viewer".to_string()]));
    }

    #[tokio::test]
    async fn test_query_sorts_by_last_updated_descending() {
        let client = InMemoryChatClient::new(None);
        create_mock_channels(&client).await.unwrap();
        let channels = client
            .query_channels(&ChannelQuery::livestreams())
            .await
            .unwrap();
        assert!(channels[0].last_updated >= channels[1].last_updated);
    }

    #[tokio::test]
    async fn test_query_filters_by_type() {
        let client = InMemoryChatClient::new(None);
        client
            .create_channel("messaging", "general", vec![], ChannelExtras::default())
            .await
            .unwrap();
        let channels = client
            .query_channels(&ChannelQuery::livestreams())
            .await
            .unwrap();
        assert!(channels.is_empty());
    }

    #[tokio::test]
    async fn test_streamer_channel_is_created_once() {
        let client = InMemoryChatClient::new(Some("host".to_string()));
        let first = create_streamer_channel(&client).await.unwrap();
        let second = create_streamer_channel(&client).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.cid(), "livestream:streamer");
        assert_eq!(first.display_name(), "Streamer");
    }

    #[tokio::test]
    async fn test_listed_channels_carry_typed_extras() {
        let client = InMemoryChatClient::new(None);
        let created = create_streamer_channel(&client).await.unwrap();
        let listed = client
            .query_channels(&ChannelQuery::livestreams())
            .await
            .unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(listed[0].extras, streamer_channel_extras());
    }
}
