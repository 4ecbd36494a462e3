//! In-memory `ProcessedEventStore`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EventId, Timestamp};
use crate::ports::ProcessedEventStore;

/// Remembers `(event_id, handler_name)` pairs with the time they were recorded.
#[derive(Default)]
pub struct InMemoryProcessedEventStore {
    processed: RwLock<HashMap<(String, String), Timestamp>>,
}

impl InMemoryProcessedEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded pairs.
    pub async fn len(&self) -> usize {
        self.processed.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.processed.read().await.is_empty()
    }
}

fn key(event_id: &EventId, handler_name: &str) -> (String, String) {
    (event_id.as_str().to_string(), handler_name.to_string())
}

#[async_trait]
impl ProcessedEventStore for InMemoryProcessedEventStore {
    async fn contains(&self, event_id: &EventId, handler_name: &str) -> Result<bool, DomainError> {
        Ok(self
            .processed
            .read()
            .await
            .contains_key(&key(event_id, handler_name)))
    }

    async fn mark_processed(&self, event_id: &EventId, handler_name: &str) -> Result<(), DomainError> {
        self.processed
            .write()
            .await
            .insert(key(event_id, handler_name), Timestamp::now());
        Ok(())
    }

    async fn delete_before(&self, timestamp: Timestamp) -> Result<u64, DomainError> {
        let mut processed = self.processed.write().await;
        let before = processed.len();
        processed.retain(|_, recorded_at| !recorded_at.is_before(&timestamp));
        Ok((before - processed.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn marks_per_handler() {
        let store = InMemoryProcessedEventStore::new();
        let event_id = EventId::from_string("evt-1");

        store.mark_processed(&event_id, "XpAssignedHandler").await.unwrap();

        assert!(store.contains(&event_id, "XpAssignedHandler").await.unwrap());
        assert!(!store.contains(&event_id, "OtherHandler").await.unwrap());
        assert!(!store
            .contains(&EventId::from_string("evt-2"), "XpAssignedHandler")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn delete_before_drops_older_entries() {
        let store = InMemoryProcessedEventStore::new();
        store
            .mark_processed(&EventId::from_string("evt-1"), "H")
            .await
            .unwrap();
        store
            .mark_processed(&EventId::from_string("evt-2"), "H")
            .await
            .unwrap();

        let far_past = Timestamp::now().minus_days(1);
        assert_eq!(store.delete_before(far_past).await.unwrap(), 0);
        assert_eq!(store.len().await, 2);

        let future = Timestamp::from_datetime(*Timestamp::now().as_datetime() + chrono::Duration::days(1));
        assert_eq!(store.delete_before(future).await.unwrap(), 2);
        assert!(store.is_empty().await);
    }
}
