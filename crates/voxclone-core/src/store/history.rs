//! Append-only generation history.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::GenerationRecord;

#[async_trait]
pub trait GenerationHistoryStore: Send + Sync {
    async fn append(&self, record: GenerationRecord) -> Result<GenerationRecord>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<GenerationRecord>>;

    async fn get(&self, id: &str) -> Result<Option<GenerationRecord>>;

    /// Insert `records` only when history is empty. Returns whether anything was added.
    async fn seed(&self, records: Vec<GenerationRecord>) -> Result<bool>;
}

#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<GenerationRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenerationHistoryStore for InMemoryHistoryStore {
    async fn append(&self, record: GenerationRecord) -> Result<GenerationRecord> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<GenerationRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<GenerationRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn seed(&self, records: Vec<GenerationRecord>) -> Result<bool> {
        let mut current = self.records.write().await;
        if !current.is_empty() {
            return Ok(false);
        }
        current.extend(records);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str) -> GenerationRecord {
        GenerationRecord {
            id: id.to_string(),
            voice_profile_id: "voice_1".to_string(),
            voice_profile_name: "Narrator".to_string(),
            text: "Hello".to_string(),
            audio_url: "https://placehold.co/600x100".to_string(),
            created_at: Utc::now(),
            duration: 10.0,
        }
    }

    #[tokio::test]
    async fn append_then_list_and_get() {
        let store = InMemoryHistoryStore::new();
        store.append(record("gen_1")).await.unwrap();
        store.append(record("gen_2")).await.unwrap();

        let ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["gen_1", "gen_2"]);
        assert!(store.get("gen_2").await.unwrap().is_some());
        assert!(store.get("gen_3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seed_is_skipped_once_history_exists() {
        let store = InMemoryHistoryStore::new();
        store.append(record("gen_live")).await.unwrap();
        assert!(!store.seed(vec![record("gen_sample")]).await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
