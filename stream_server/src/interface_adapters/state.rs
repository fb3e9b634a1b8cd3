use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::entities::SessionRecord;
use crate::domain::ports::{Clock, StreamingApi, TokenStore};
use crate::use_cases::StreamSettings;

// Longest possible stream duration; tokens never outlive it.
pub const TOKEN_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

// Application state shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: InMemoryTokenStore,
    // We use Arc<dyn Trait> so tests can swap in a fake streaming backend.
    pub streaming: Arc<dyn StreamingApi>,
    pub settings: Arc<StreamSettings>,
}

impl AppState {
    pub fn new(streaming: Arc<dyn StreamingApi>, settings: StreamSettings) -> Self {
        Self {
            store: InMemoryTokenStore::new(TOKEN_RETENTION),
            streaming,
            settings: Arc::new(settings),
        }
    }
}

// In-memory connection token table. Each insert schedules its own purge.
#[derive(Clone)]
pub struct InMemoryTokenStore {
    records: Arc<Mutex<HashMap<String, SessionRecord>>>,
    retention: Duration,
}

impl InMemoryTokenStore {
    pub fn new(retention: Duration) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            retention,
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    fn schedule_purge(&self, token: String, created_at_ms: u64) {
        let records = self.records.clone();
        let retention = self.retention;
        tokio::spawn(async move {
            tokio::time::sleep(retention).await;
            let mut records = records.lock().await;
            // Leave a record alone if the token was overwritten since.
            if records
                .get(&token)
                .is_some_and(|record| record.created_at_ms == created_at_ms)
            {
                records.remove(&token);
                tracing::debug!(%token, "connection token purged after retention window");
            }
        });
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn insert(&self, token: String, record: SessionRecord) {
        let created_at_ms = record.created_at_ms;
        {
            let mut records = self.records.lock().await;
            records.insert(token.clone(), record);
        }
        self.schedule_purge(token, created_at_ms);
    }

    async fn get(&self, token: &str) -> Option<SessionRecord> {
        let records = self.records.lock().await;
        records.get(token).cloned()
    }

    async fn remove(&self, token: &str) -> bool {
        let mut records = self.records.lock().await;
        records.remove(token).is_some()
    }
}

// System clock adapter used by session use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
