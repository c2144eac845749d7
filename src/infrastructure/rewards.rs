//! Channel point rewards: remote service, local cache and the offline-first repository.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::reward::Reward;

pub const DEFAULT_REWARDS_BASE_URL: &str = "https://gist.githubusercontent.com/skydoves/c2da9e382222ba50aba7a01fcace76e1/raw/d87a6fdfa4cff479d8dae7b32ac19a0c6d16817a/";
pub const REWARDS_FILE: &str = "rewards.json";

#[derive(Debug, Error)]
pub enum RewardsError {
    #[error("failed to fetch rewards: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rewards cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("rewards cache is corrupt: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("rewards service error: {0}")]
    Service(String),
}

#[async_trait]
pub trait RewardsService: Send + Sync {
    async fn fetch_rewards(&self) -> Result<Vec<Reward>, RewardsError>;
}

#[derive(Debug, Clone)]
pub struct HttpRewardsService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRewardsService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{REWARDS_FILE}", self.base_url)
    }
}

#[async_trait]
impl RewardsService for HttpRewardsService {
    async fn fetch_rewards(&self) -> Result<Vec<Reward>, RewardsError> {
        let url = self.endpoint();
        log::debug!("Rewards: GET {url}");
        let rewards = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Reward>>()
            .await?;
        Ok(rewards)
    }
}

/// Local cache of the last fetched rewards.
#[async_trait]
pub trait RewardStore: Send + Sync {
    async fn get_rewards(&self) -> Result<Vec<Reward>, RewardsError>;
    async fn insert_rewards(&self, rewards: Vec<Reward>) -> Result<(), RewardsError>;
}

/// Stores rewards as a JSON array in a file.
#[derive(Debug, Clone)]
pub struct FileRewardStore {
    path: PathBuf,
}

impl FileRewardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl RewardStore for FileRewardStore {
    async fn get_rewards(&self) -> Result<Vec<Reward>, RewardsError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces entries with the same name and keeps the others.
    async fn insert_rewards(&self, rewards: Vec<Reward>) -> Result<(), RewardsError> {
        let mut stored = self.get_rewards().await?;
        merge_rewards(&mut stored, rewards);
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&stored)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRewardStore {
    rewards: Mutex<Vec<Reward>>,
}

#[async_trait]
impl RewardStore for InMemoryRewardStore {
    async fn get_rewards(&self) -> Result<Vec<Reward>, RewardsError> {
        Ok(self.rewards.lock().await.clone())
    }

    async fn insert_rewards(&self, rewards: Vec<Reward>) -> Result<(), RewardsError> {
        merge_rewards(&mut *self.rewards.lock().await, rewards);
        Ok(())
    }
}

fn merge_rewards(stored: &mut Vec<Reward>, rewards: Vec<Reward>) {
    for reward in rewards {
        match stored.iter_mut().find(|r| r.name == reward.name) {
            Some(existing) => *existing = reward,
            None => stored.push(reward),
        }
    }
}

/// Offline-first access to rewards.
#[derive(Clone)]
pub struct RewardRepository {
    service: Arc<dyn RewardsService>,
    store: Arc<dyn RewardStore>,
}

impl RewardRepository {
    pub fn new(service: Arc<dyn RewardsService>, store: Arc<dyn RewardStore>) -> Self {
        Self { service, store }
    }

    /// Returns cached rewards, fetching and caching them when the cache is empty.
    pub async fn reward_stream(&self) -> Result<Vec<Reward>, RewardsError> {
        let offline = self.store.get_rewards().await?;
        if !offline.is_empty() {
            log::debug!("Rewards: serving {} cached rewards", offline.len());
            return Ok(offline);
        }

        let response = self.service.fetch_rewards().await;
        self.update_rewards(&response).await?;
        response
    }

    /// Caches a successful response; failures leave the cache untouched.
    pub async fn update_rewards(
        &self,
        response: &Result<Vec<Reward>, RewardsError>,
    ) -> Result<(), RewardsError> {
        let Ok(rewards) = response else {
            return Ok(());
        };
        self.store.insert_rewards(rewards.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    fn reward(name: &str, token_amount: u32) -> Reward {
        Reward {
            name: name.to_string(),
            color: "#F97B2A".to_string(),
            icon: "LockOpen".to_string(),
            token_amount,
        }
    }

    struct FakeService {
        response: Option<Vec<Reward>>,
        calls: AtomicUsize,
    }

    impl FakeService {
        fn new(response: Option<Vec<Reward>>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RewardsService for FakeService {
        async fn fetch_rewards(&self) -> Result<Vec<Reward>, RewardsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .ok_or_else(|| RewardsError::Service("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_cache_fetches_and_stores() {
        let service = Arc::new(FakeService::new(Some(vec![reward("Hydrate", 100)])));
        let store = Arc::new(InMemoryRewardStore::default());
        let repository = RewardRepository::new(service.clone(), store.clone());

        let rewards = repository.reward_stream().await.unwrap();
        assert_eq!(rewards, vec![reward("Hydrate", 100)]);
        assert_eq!(store.get_rewards().await.unwrap(), rewards);

        // Second read is served from the cache.
        repository.reward_stream().await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_rewards_skip_service() {
        let service = Arc::new(FakeService::new(Some(vec![reward("Remote", 1)])));
        let store = Arc::new(InMemoryRewardStore::default());
        store.insert_rewards(vec![reward("Cached", 5)]).await.unwrap();
        let repository = RewardRepository::new(service.clone(), store);

        assert_eq!(
            repository.reward_stream().await.unwrap(),
            vec![reward("Cached", 5)]
        );
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let service = Arc::new(FakeService::new(None));
        let store = Arc::new(InMemoryRewardStore::default());
        let repository = RewardRepository::new(service, store.clone());

        assert!(repository.reward_stream().await.is_err());
        assert!(store.get_rewards().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRewardStore::new(dir.path().join("cache").join(REWARDS_FILE));

        assert!(store.get_rewards().await.unwrap().is_empty());

        store
            .insert_rewards(vec![reward("Hydrate", 100), reward("Stretch", 200)])
            .await
            .unwrap();
        store.insert_rewards(vec![reward("Hydrate", 150)]).await.unwrap();

        assert_eq!(
            store.get_rewards().await.unwrap(),
            vec![reward("Hydrate", 150), reward("Stretch", 200)]
        );
    }

    #[tokio::test]
    async fn test_file_store_corrupt_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REWARDS_FILE);
        std::fs::write(&path, b"not json").unwrap();
        let store = FileRewardStore::new(path);
        assert!(matches!(
            store.get_rewards().await,
            Err(RewardsError::Decode(_))
        ));
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            HttpRewardsService::new("https://example.com/data").endpoint(),
            "https://example.com/data/rewards.json"
        );
    }
}
