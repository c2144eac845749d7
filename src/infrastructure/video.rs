//! Video calling client boundary
//!
//! Signalling and media transport belong to the hosted video service. This
//! module only defines the calls the app makes and an in-process client used
//! by the demo binary and the tests.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

pub const LIVESTREAM_CALL_TYPE: &str = "livestream";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallHandle {
    pub call_type: String,
    pub id: String,
}

impl CallHandle {
    pub fn new(call_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            call_type: call_type.into(),
            id: id.into(),
        }
    }

    pub fn cid(&self) -> String {
        format!("{}:{}", self.call_type, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoError {
    #[error("call {0} does not exist")]
    CallNotFound(String),
    #[error("video client error: {0}")]
    Client(String),
}

#[async_trait]
pub trait VideoClient: Send + Sync {
    async fn active_call(&self) -> Option<CallHandle>;

    /// Joins `call`, creating it first when `create` is set.
    async fn join(&self, call: &CallHandle, create: bool) -> Result<(), VideoError>;

    async fn leave(&self, call: &CallHandle);
}

/// Joins `call_type:call_id`, leaving any other active call first.
///
/// An already active call with the same id is reused.
pub async fn join_call(
    client: &dyn VideoClient,
    call_type: &str,
    call_id: &str,
) -> Result<CallHandle, VideoError> {
    let call = match client.active_call().await {
        Some(active) if active.id == call_id => active,
        Some(active) => {
            log::info!("Video: leaving {} before joining {call_id}", active.cid());
            client.leave(&active).await;
            CallHandle::new(call_type, call_id)
        }
        None => CallHandle::new(call_type, call_id),
    };
    client.join(&call, true).await?;
    Ok(call)
}

#[derive(Debug, Default)]
struct LocalCalls {
    existing: HashSet<CallHandle>,
    active: Option<CallHandle>,
}

/// In-process video client that tracks calls without any media.
#[derive(Debug, Default)]
pub struct LocalVideoClient {
    calls: Mutex<LocalCalls>,
}

impl LocalVideoClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoClient for LocalVideoClient {
    async fn active_call(&self) -> Option<CallHandle> {
        self.calls.lock().await.active.clone()
    }

    async fn join(&self, call: &CallHandle, create: bool) -> Result<(), VideoError> {
        let mut calls = self.calls.lock().await;
        if !calls.existing.contains(call) {
            if !create {
                return Err(VideoError::CallNotFound(call.cid()));
            }
            calls.existing.insert(call.clone());
        }
        calls.active = Some(call.clone());
        Ok(())
    }

    async fn leave(&self, call: &CallHandle) {
        let mut calls = self.calls.lock().await;
        if calls.active.as_ref() == Some(call) {
            calls.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct CountingClient {
        inner: LocalVideoClient,
        leaves: AtomicUsize,
    }

    #[async_trait]
    impl VideoClient for CountingClient {
        async fn active_call(&self) -> Option<CallHandle> {
            self.inner.active_call().await
        }

        async fn join(&self, call: &CallHandle, create: bool) -> Result<(), VideoError> {
            self.inner.join(call, create).await
        }

        async fn leave(&self, call: &CallHandle) {
            self.leaves.fetch_add(1, Ordering::SeqCst);
            self.inner.leave(call).await
        }
    }

    #[tokio::test]
    async fn test_join_creates_call() {
        let client = LocalVideoClient::new();
        let call = join_call(&client, LIVESTREAM_CALL_TYPE, "streamer")
            .await
            .unwrap();
        assert_eq!(call, CallHandle::new("livestream", "streamer"));
        assert_eq!(client.active_call().await, Some(call));
    }

    #[tokio::test]
    async fn test_join_same_call_reuses_it() {
        let client = CountingClient::default();
        join_call(&client, LIVESTREAM_CALL_TYPE, "streamer")
            .await
            .unwrap();
        join_call(&client, LIVESTREAM_CALL_TYPE, "streamer")
            .await
            .unwrap();
        assert_eq!(client.leaves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_join_other_call_leaves_previous() {
        let client = CountingClient::default();
        join_call(&client, LIVESTREAM_CALL_TYPE, "first")
            .await
            .unwrap();
        let second = join_call(&client, LIVESTREAM_CALL_TYPE, "second")
            .await
            .unwrap();
        assert_eq!(client.leaves.load(Ordering::SeqCst), 1);
        assert_eq!(client.active_call().await, Some(second));
    }

    #[tokio::test]
    async fn test_join_without_create_fails_for_unknown_call() {
        let client = LocalVideoClient::new();
        let err = client
            .join(&CallHandle::new("livestream", "nope"), false)
            .await
            .unwrap_err();
        assert_eq!(err, VideoError::CallNotFound("livestream:nope".to_string()));
    }

    #[tokio::test]
    async fn test_leave_clears_active_call() {
        let client = LocalVideoClient::new();
        let call = join_call(&client, LIVESTREAM_CALL_TYPE, "streamer")
            .await
            .unwrap();
        client.leave(&call).await;
        assert_eq!(client.active_call().await, None);
    }
}
