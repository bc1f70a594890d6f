//! Pending-batch store.
//!
//! Holds at most one validated batch per session, awaiting user confirmation.
//! Per-session lifecycle: EMPTY -> PENDING (store) -> EMPTY (cancel or
//! confirm); a re-upload while PENDING silently overwrites. The mutex guards
//! store/cancel/confirm against the lost-update race between a confirm and a
//! concurrent re-upload for the same session.

use std::collections::HashMap;
use std::sync::Arc;

use incidentcast_core::{AppError, ValidationBatch};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct PendingBatchStore {
    inner: Arc<Mutex<HashMap<Uuid, ValidationBatch>>>,
}

impl PendingBatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly validated batch for a session, replacing any batch
    /// already pending there.
    pub async fn store(&self, session: Uuid, batch: ValidationBatch) {
        let mut map = self.inner.lock().await;
        if map.insert(session, batch).is_some() {
            tracing::debug!(session = %session, "Replaced previously pending batch");
        }
    }

    /// Discard the pending batch for a session. Returns whether anything was
    /// pending; cancelling an empty session is a no-op, not an error.
    pub async fn cancel(&self, session: Uuid) -> bool {
        self.inner.lock().await.remove(&session).is_some()
    }

    /// Remove and return the pending batch for submission.
    ///
    /// Fails with `NothingToSend` when the session has no pending batch, or
    /// when the pending batch has no valid records. In the latter case the
    /// batch stays pending: it can only be cancelled or replaced, never sent.
    pub async fn take_submittable(&self, session: Uuid) -> Result<ValidationBatch, AppError> {
        let mut map = self.inner.lock().await;
        match map.remove(&session) {
            None => Err(AppError::NothingToSend),
            Some(batch) if !batch.is_submittable() => {
                map.insert(session, batch);
                Err(AppError::NothingToSend)
            }
            Some(batch) => Ok(batch),
        }
    }

    /// Whether a batch is currently pending for the session.
    pub async fn is_pending(&self, session: Uuid) -> bool {
        self.inner.lock().await.contains_key(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use incidentcast_core::IncidentRecord;

    fn submittable_batch(user_id: &str) -> ValidationBatch {
        ValidationBatch::new(
            vec![IncidentRecord {
                user_id: user_id.to_string(),
                incident_name: "Outage".to_string(),
                short_description: "Primary region down".to_string(),
                event_time: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            }],
            Vec::new(),
            1,
        )
    }

    fn empty_batch() -> ValidationBatch {
        ValidationBatch::new(
            Vec::new(),
            vec![incidentcast_core::RowError::MissingField {
                row: 1,
                field: "user_id",
            }],
            1,
        )
    }

    #[tokio::test]
    async fn test_store_then_take_clears_session() {
        let store = PendingBatchStore::new();
        let session = Uuid::new_v4();

        store.store(session, submittable_batch("12345")).await;
        assert!(store.is_pending(session).await);

        let batch = store.take_submittable(session).await.unwrap();
        assert_eq!(batch.records().len(), 1);
        assert!(!store.is_pending(session).await);
    }

    #[tokio::test]
    async fn test_take_on_empty_session_is_nothing_to_send() {
        let store = PendingBatchStore::new();
        let result = store.take_submittable(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NothingToSend)));
    }

    #[tokio::test]
    async fn test_second_take_fails_after_first_succeeds() {
        let store = PendingBatchStore::new();
        let session = Uuid::new_v4();

        store.store(session, submittable_batch("12345")).await;
        store.take_submittable(session).await.unwrap();

        let result = store.take_submittable(session).await;
        assert!(matches!(result, Err(AppError::NothingToSend)));
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let store = PendingBatchStore::new();
        let session = Uuid::new_v4();

        store.store(session, submittable_batch("12345")).await;
        assert!(store.cancel(session).await);
        assert!(!store.cancel(session).await);
        assert!(!store.is_pending(session).await);
    }

    #[tokio::test]
    async fn test_zero_valid_batch_never_submits_but_stays_pending() {
        let store = PendingBatchStore::new();
        let session = Uuid::new_v4();

        store.store(session, empty_batch()).await;
        let result = store.take_submittable(session).await;
        assert!(matches!(result, Err(AppError::NothingToSend)));
        // Still pending: only cancel or a new upload replace it.
        assert!(store.is_pending(session).await);
    }

    #[tokio::test]
    async fn test_reupload_overwrites_pending_batch() {
        let store = PendingBatchStore::new();
        let session = Uuid::new_v4();

        store.store(session, submittable_batch("first")).await;
        store.store(session, submittable_batch("second")).await;

        let batch = store.take_submittable(session).await.unwrap();
        assert_eq!(batch.records()[0].user_id, "second");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = PendingBatchStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.store(a, submittable_batch("alpha")).await;
        store.store(b, submittable_batch("beta")).await;

        assert!(store.cancel(a).await);
        assert!(store.is_pending(b).await);
        let batch = store.take_submittable(b).await.unwrap();
        assert_eq!(batch.records()[0].user_id, "beta");
    }
}
