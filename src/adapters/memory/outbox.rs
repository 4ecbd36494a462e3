//! In-memory `OutboxWriter`.
//!
//! Shared by the in-memory repositories, which append to it while holding
//! their own write lock. Entries keep insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, Timestamp};
use crate::ports::{OutboxEntry, OutboxStatus, OutboxWriter};

#[derive(Default)]
pub struct InMemoryOutbox {
    entries: RwLock<Vec<OutboxEntry>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry, oldest first.
    pub async fn entries(&self) -> Vec<OutboxEntry> {
        self.entries.read().await.clone()
    }

    /// Envelopes of the unpublished entries, oldest first.
    pub async fn pending_events(&self) -> Vec<EventEnvelope> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.is_unpublished())
            .map(|e| e.event.clone())
            .collect()
    }

    pub async fn pending_count(&self) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.is_unpublished())
            .count()
    }

    pub async fn published_count(&self) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.status == OutboxStatus::Published)
            .count()
    }

    async fn update_entry(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut OutboxEntry),
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let entry = entries.iter_mut().find(|e| e.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, format!("Outbox entry not found: {}", id))
        })?;
        change(entry);
        Ok(())
    }
}

#[async_trait]
impl OutboxWriter for InMemoryOutbox {
    async fn write(
        &self,
        event: &EventEnvelope,
        partition_key: &str,
    ) -> Result<OutboxEntry, DomainError> {
        let entry = OutboxEntry::new(event.clone(), partition_key);
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn write_batch(
        &self,
        events: &[EventEnvelope],
        partition_key: &str,
    ) -> Result<Vec<OutboxEntry>, DomainError> {
        let written: Vec<OutboxEntry> = events
            .iter()
            .map(|event| OutboxEntry::new(event.clone(), partition_key))
            .collect();
        self.entries.write().await.extend(written.iter().cloned());
        Ok(written)
    }

    async fn get_pending(&self, limit: u32) -> Result<Vec<OutboxEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.is_unpublished())
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_published(&self, id: Uuid) -> Result<(), DomainError> {
        self.update_entry(id, OutboxEntry::mark_published).await
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), DomainError> {
        self.update_entry(id, |entry| entry.mark_failed(error)).await
    }

    async fn cleanup_old(&self, older_than: Timestamp) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| {
            e.is_unpublished()
                || e
                    .processed_at
                    .map_or(true, |processed| !processed.is_before(&older_than))
        });
        Ok((before - entries.len()) as u64)
    }
}
