/// Play-history store contract
use crate::error::Result;
use crate::ids::{SessionId, UserId};
use crate::types::{HistorySnapshot, PlayStatistics};
use async_trait::async_trait;
use std::sync::Arc;

/// Contract against the external play-history persistence service
///
/// The store holds, per user and track URL, a cumulative play count and a
/// "played in current session" flag. Implementations:
/// - `lumen_history_client::HistoryClient` — HTTP adapter to the hosted store
/// - `lumen_shuffle::MemoryHistoryStore` — in-process store for tests and
///   offline operation
///
/// The increment performed by `record_play` must be an atomic counter bump
/// at the store, not a read-modify-write, so concurrent players for the same
/// user lose ordering but never lose increments.
#[async_trait]
pub trait PlayHistoryStore: Send + Sync {
    /// Increment the play count for a track and flag it as played in the
    /// given session
    ///
    /// Returns the play count after the increment.
    async fn record_play(
        &self,
        user_id: &UserId,
        track_url: &str,
        track_name: &str,
        session_id: &SessionId,
    ) -> Result<u64>;

    /// Fetch history for exactly the requested URLs
    ///
    /// URLs with no record are omitted from the snapshot; the snapshot's
    /// lookup reads them as zero plays, not in session.
    async fn get_play_history(
        &self,
        user_id: &UserId,
        track_urls: &[String],
    ) -> Result<HistorySnapshot>;

    /// Begin a new session, carrying the *new* id
    ///
    /// Instructs the store to treat any prior session's played-in-session
    /// flags as stale. This is the only mechanism that clears the flags.
    async fn reset_session(&self, user_id: &UserId, session_id: &SessionId) -> Result<()>;

    /// Aggregate play statistics for the user, computed store-side
    async fn get_statistics(&self, user_id: &UserId) -> Result<PlayStatistics>;

    /// Irreversibly delete all history records for the user
    ///
    /// Returns the number of deleted records.
    async fn clear_history(&self, user_id: &UserId) -> Result<u64>;
}

// A shared handle to a store is itself a store, so one instance can back
// both a controller and an observer (tests, diagnostics).
#[async_trait]
impl<S: PlayHistoryStore + ?Sized> PlayHistoryStore for Arc<S> {
    async fn record_play(
        &self,
        user_id: &UserId,
        track_url: &str,
        track_name: &str,
        session_id: &SessionId,
    ) -> Result<u64> {
        (**self)
            .record_play(user_id, track_url, track_name, session_id)
            .await
    }

    async fn get_play_history(
        &self,
        user_id: &UserId,
        track_urls: &[String],
    ) -> Result<HistorySnapshot> {
        (**self).get_play_history(user_id, track_urls).await
    }

    async fn reset_session(&self, user_id: &UserId, session_id: &SessionId) -> Result<()> {
        (**self).reset_session(user_id, session_id).await
    }

    async fn get_statistics(&self, user_id: &UserId) -> Result<PlayStatistics> {
        (**self).get_statistics(user_id).await
    }

    async fn clear_history(&self, user_id: &UserId) -> Result<u64> {
        (**self).clear_history(user_id).await
    }
}
