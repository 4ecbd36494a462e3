//! Redis-backed `PjRepository`.
//!
//! Layout, under a configurable key prefix:
//!
//! | Key | Type | Content |
//! |-----|------|---------|
//! | `{prefix}:pj:{pj_id}` | string | JSON-serialized PJ |
//! | `{prefix}:campaign:{campaign_id}:pjs` | set | ids of the campaign's PJs |
//!
//! Every write runs as one Lua script that stores the PJ, indexes it and
//! `RPUSH`es the write's events onto the event queue list. Redis runs a
//! script atomically, so the queue list plays the outbox role here: the PJ
//! and its events are stored together or not at all, and no separate relay
//! is needed.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::Script;

use crate::domain::campaign::Pj;
use crate::domain::foundation::{CampaignId, DomainError, ErrorCode, EventEnvelope, PjId};
use crate::ports::PjRepository;

/// KEYS: pj, campaign index, queue. ARGV: mode, pj json, pj id, envelopes...
///
/// Returns 0 when an update targets a missing PJ, 1 otherwise.
const WRITE_PJ_SCRIPT: &str = r#"
if ARGV[1] == 'update' and redis.call('EXISTS', KEYS[1]) == 0 then
    return 0
end
redis.call('SET', KEYS[1], ARGV[2])
redis.call('SADD', KEYS[2], ARGV[3])
for i = 4, #ARGV do
    redis.call('RPUSH', KEYS[3], ARGV[i])
end
return 1
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Save,
    Update,
}

impl WriteMode {
    fn as_str(self) -> &'static str {
        match self {
            WriteMode::Save => "save",
            WriteMode::Update => "update",
        }
    }
}

#[derive(Clone)]
pub struct RedisPjRepository {
    conn: MultiplexedConnection,
    key_prefix: String,
    queue_name: String,
    write_script: Script,
}

impl RedisPjRepository {
    /// `queue_name` is the list the event worker consumes.
    pub fn new(
        conn: MultiplexedConnection,
        key_prefix: impl Into<String>,
        queue_name: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            queue_name: queue_name.into(),
            write_script: Script::new(WRITE_PJ_SCRIPT),
        }
    }

    fn pj_key(&self, id: &PjId) -> String {
        pj_key(&self.key_prefix, id.as_str())
    }

    fn campaign_key(&self, campaign_id: &CampaignId) -> String {
        format!("{}:campaign:{}:pjs", self.key_prefix, campaign_id.as_str())
    }

    async fn write(
        &self,
        pj: &Pj,
        events: &[EventEnvelope],
        mode: WriteMode,
    ) -> Result<(), DomainError> {
        let body = serde_json::to_string(pj)?;
        let payloads = events
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<String>, _>>()?;

        let mut invocation = self.write_script.prepare_invoke();
        invocation
            .key(self.pj_key(pj.id()))
            .key(self.campaign_key(pj.campaign_id()))
            .key(&self.queue_name)
            .arg(mode.as_str())
            .arg(body)
            .arg(pj.id().as_str());
        for payload in &payloads {
            invocation.arg(payload);
        }

        let mut conn = self.conn.clone();
        let written: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(database_error)?;

        if written == 0 {
            return Err(DomainError::new(
                ErrorCode::PjNotFound,
                format!("PJ not found: {}", pj.id()),
            ));
        }

        tracing::debug!(
            pj_id = %pj.id(),
            events = payloads.len(),
            queue = %self.queue_name,
            "pj written"
        );
        Ok(())
    }
}

fn pj_key(prefix: &str, id: &str) -> String {
    format!("{}:pj:{}", prefix, id)
}

fn database_error(err: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, err.to_string())
}

fn decode_pj(raw: &str) -> Result<Pj, DomainError> {
    serde_json::from_str(raw).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Stored PJ is unreadable: {}", e))
    })
}

#[async_trait]
impl PjRepository for RedisPjRepository {
    async fn save(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError> {
        self.write(pj, events, WriteMode::Save).await
    }

    async fn update(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError> {
        self.write(pj, events, WriteMode::Update).await
    }

    async fn find_by_id(&self, id: &PjId) -> Result<Option<Pj>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(self.pj_key(id))
            .query_async(&mut conn)
            .await
            .map_err(database_error)?;

        raw.as_deref().map(decode_pj).transpose()
    }

    async fn find_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Pj>, DomainError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = redis::cmd("SMEMBERS")
            .arg(self.campaign_key(campaign_id))
            .query_async(&mut conn)
            .await
            .map_err(database_error)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids
            .iter()
            .map(|id| pj_key(&self.key_prefix, id))
            .collect();
        let raw: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .map_err(database_error)?;

        let mut pjs = raw
            .iter()
            .flatten()
            .map(|body| decode_pj(body))
            .collect::<Result<Vec<Pj>, _>>()?;
        pjs.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        Ok(pjs)
    }
}

impl std::fmt::Debug for RedisPjRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPjRepository")
            .field("key_prefix", &self.key_prefix)
            .field("queue_name", &self.queue_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::RedisEventQueue;
    use crate::domain::campaign::{test_pj, PjType};
    use crate::ports::EventSource;
    use serde_json::json;
    use std::time::Duration;

    async fn connect() -> MultiplexedConnection {
        redis::Client::open("redis://127.0.0.1/")
            .unwrap()
            .get_multiplexed_tokio_connection()
            .await
            .unwrap()
    }

    #[test]
    fn pj_keys_use_the_prefix() {
        assert_eq!(pj_key("meye", "pj-1"), "meye:pj:pj-1");
        assert_eq!(pj_key("meye:test", "pj-1"), "meye:test:pj:pj-1");
    }

    #[test]
    fn write_modes_match_the_script() {
        assert!(WRITE_PJ_SCRIPT.contains(WriteMode::Update.as_str()));
        assert_eq!(WriteMode::Save.as_str(), "save");
    }

    #[test]
    fn redis_errors_map_to_database_error() {
        let err = database_error(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        )));
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn unreadable_pj_is_a_database_error() {
        let err = decode_pj("{\"id\": 3}").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    /// Needs Redis on localhost: `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn save_stores_the_pj_and_queues_its_events() {
        let conn = connect().await;
        let queue_name = "meye:test:pj-save";
        let repo = RedisPjRepository::new(conn.clone(), "meye:test:save", queue_name);
        let queue = RedisEventQueue::new(conn, queue_name);
        let pj = test_pj(PjType::Human);

        repo.save(&pj, &[EventEnvelope::new("xp_consumed", "pj-1", "pj", json!({}))])
            .await
            .unwrap();

        assert_eq!(repo.find_by_id(pj.id()).await.unwrap(), Some(pj.clone()));
        let listed = repo.find_by_campaign(pj.campaign_id()).await.unwrap();
        assert!(listed.iter().any(|p| p.id() == pj.id()));
        let queued = queue.receive(Duration::from_secs(1)).await.unwrap().unwrap();
        assert_eq!(queued.event_type, "xp_consumed");
    }

    /// Needs Redis on localhost: `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn update_of_unknown_pj_queues_nothing() {
        let conn = connect().await;
        let queue_name = "meye:test:pj-missing";
        let repo = RedisPjRepository::new(conn.clone(), "meye:test:missing", queue_name);
        let queue = RedisEventQueue::new(conn, queue_name);
        let pj = test_pj(PjType::Human);

        let err = repo
            .update(&pj, &[EventEnvelope::new("xp_consumed", "pj-1", "pj", json!({}))])
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::PjNotFound);
        assert!(queue.receive(Duration::from_millis(100)).await.unwrap().is_none());
    }
}
