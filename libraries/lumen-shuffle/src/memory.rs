//! In-memory play-history store
//!
//! A complete implementation of the store contract for tests and offline
//! operation. Counter bumps happen under a single write lock, so concurrent
//! recorders may lose ordering but never lose increments.

use async_trait::async_trait;
use lumen_core::{
    HistorySnapshot, PlayHistoryStore, PlayStatistics, Result, SessionId, TrackHistory, UserId,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// One (user, track) history record
#[derive(Debug, Clone)]
struct PlayRecord {
    play_count: u64,
    track_name: String,
    /// Session the track was last played in
    last_session: SessionId,
}

/// Per-user history state
#[derive(Debug, Default)]
struct UserHistory {
    records: HashMap<String, PlayRecord>,
    /// The session whose flags are considered current
    current_session: Option<SessionId>,
}

impl UserHistory {
    fn in_current_session(&self, record: &PlayRecord) -> bool {
        self.current_session
            .as_ref()
            .is_some_and(|current| *current == record.last_session)
    }
}

/// In-process play-history store
///
/// Holds per-user play counts and session flags behind one `RwLock`. The
/// "played in current session" flag is derived: a record carries the id of
/// the session it was last played in, and reads compare it against the
/// user's current session id. Resetting the session therefore invalidates
/// every prior flag without touching the records.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    users: RwLock<HashMap<UserId, UserHistory>>,
}

impl MemoryHistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayHistoryStore for MemoryHistoryStore {
    async fn record_play(
        &self,
        user_id: &UserId,
        track_url: &str,
        track_name: &str,
        session_id: &SessionId,
    ) -> Result<u64> {
        let mut users = self.users.write().await;
        let user = users.entry(user_id.clone()).or_default();

        // A user with no session yet adopts the first recorded one; an
        // explicit reset always overrides it
        if user.current_session.is_none() {
            user.current_session = Some(session_id.clone());
        }

        let record = user
            .records
            .entry(track_url.to_string())
            .and_modify(|record| {
                record.play_count += 1;
                record.track_name = track_name.to_string();
                record.last_session = session_id.clone();
            })
            .or_insert_with(|| PlayRecord {
                play_count: 1,
                track_name: track_name.to_string(),
                last_session: session_id.clone(),
            });

        Ok(record.play_count)
    }

    async fn get_play_history(
        &self,
        user_id: &UserId,
        track_urls: &[String],
    ) -> Result<HistorySnapshot> {
        let users = self.users.read().await;

        let Some(user) = users.get(user_id) else {
            return Ok(HistorySnapshot::new());
        };

        let mut snapshot = HistorySnapshot::new();
        for url in track_urls {
            if let Some(record) = user.records.get(url) {
                snapshot.insert(
                    url.clone(),
                    TrackHistory::new(record.play_count, user.in_current_session(record)),
                );
            }
        }

        Ok(snapshot)
    }

    async fn reset_session(&self, user_id: &UserId, session_id: &SessionId) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.entry(user_id.clone()).or_default();

        // Ids are never reused, so adopting the new id makes every earlier
        // flag stale in one assignment
        user.current_session = Some(session_id.clone());
        Ok(())
    }

    async fn get_statistics(&self, user_id: &UserId) -> Result<PlayStatistics> {
        let users = self.users.read().await;

        let Some(user) = users.get(user_id) else {
            return Ok(PlayStatistics::default());
        };

        if user.records.is_empty() {
            return Ok(PlayStatistics::default());
        }

        let counts: Vec<u64> = user.records.values().map(|r| r.play_count).collect();
        let total_plays: u64 = counts.iter().sum();
        let total_tracks = counts.len() as u64;

        Ok(PlayStatistics {
            total_tracks,
            total_plays,
            avg_plays_per_track: total_plays as f64 / total_tracks as f64,
            max_plays: counts.iter().copied().max().unwrap_or(0),
            min_plays: counts.iter().copied().min().unwrap_or(0),
            tracks_played_in_session: user
                .records
                .values()
                .filter(|record| user.in_current_session(record))
                .count() as u64,
        })
    }

    async fn clear_history(&self, user_id: &UserId) -> Result<u64> {
        let mut users = self.users.write().await;

        let deleted = users
            .remove(user_id)
            .map_or(0, |user| user.records.len() as u64);

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1")
    }

    fn session(id: &str) -> SessionId {
        SessionId::new(id)
    }

    #[tokio::test]
    async fn record_play_counts_up_from_one() {
        let store = MemoryHistoryStore::new();
        let sid = session("s-1");

        assert_eq!(
            store.record_play(&user(), "/a", "Track A", &sid).await.unwrap(),
            1
        );
        assert_eq!(
            store.record_play(&user(), "/a", "Track A", &sid).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn snapshot_covers_only_requested_and_recorded_urls() {
        let store = MemoryHistoryStore::new();
        let sid = session("s-1");
        store.record_play(&user(), "/a", "A", &sid).await.unwrap();
        store.record_play(&user(), "/b", "B", &sid).await.unwrap();

        let snapshot = store
            .get_play_history(&user(), &["/a".to_string(), "/c".to_string()])
            .await
            .unwrap();

        // /b was not requested, /c was never recorded
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("/a").play_count, 1);
        assert_eq!(snapshot.get("/c"), TrackHistory::default());
    }

    #[tokio::test]
    async fn first_recorded_session_is_adopted_as_current() {
        let store = MemoryHistoryStore::new();
        let sid = session("s-1");
        store.record_play(&user(), "/a", "A", &sid).await.unwrap();

        let snapshot = store
            .get_play_history(&user(), &["/a".to_string()])
            .await
            .unwrap();
        assert!(snapshot.get("/a").played_in_current_session);
    }

    #[tokio::test]
    async fn reset_session_invalidates_prior_flags() {
        let store = MemoryHistoryStore::new();
        store
            .record_play(&user(), "/a", "A", &session("s-1"))
            .await
            .unwrap();

        store.reset_session(&user(), &session("s-2")).await.unwrap();

        let snapshot = store
            .get_play_history(&user(), &["/a".to_string()])
            .await
            .unwrap();
        assert!(!snapshot.get("/a").played_in_current_session);
        // The play count survives the reset untouched
        assert_eq!(snapshot.get("/a").play_count, 1);
    }

    #[tokio::test]
    async fn plays_in_the_new_session_flag_again_after_reset() {
        let store = MemoryHistoryStore::new();
        let old = session("s-1");
        let new = session("s-2");

        store.record_play(&user(), "/a", "A", &old).await.unwrap();
        store.reset_session(&user(), &new).await.unwrap();
        store.record_play(&user(), "/a", "A", &new).await.unwrap();

        let snapshot = store
            .get_play_history(&user(), &["/a".to_string()])
            .await
            .unwrap();
        assert!(snapshot.get("/a").played_in_current_session);
        assert_eq!(snapshot.get("/a").play_count, 2);
    }

    #[tokio::test]
    async fn statistics_aggregate_across_tracks() {
        let store = MemoryHistoryStore::new();
        let sid = session("s-1");

        for _ in 0..3 {
            store.record_play(&user(), "/a", "A", &sid).await.unwrap();
        }
        store.record_play(&user(), "/b", "B", &sid).await.unwrap();

        store.reset_session(&user(), &session("s-2")).await.unwrap();
        store.record_play(&user(), "/b", "B", &session("s-2")).await.unwrap();

        let stats = store.get_statistics(&user()).await.unwrap();
        assert_eq!(stats.total_tracks, 2);
        assert_eq!(stats.total_plays, 5);
        assert!((stats.avg_plays_per_track - 2.5).abs() < 1e-12);
        assert_eq!(stats.max_plays, 3);
        assert_eq!(stats.min_plays, 2);
        // Only /b was played since the reset
        assert_eq!(stats.tracks_played_in_session, 1);
    }

    #[tokio::test]
    async fn statistics_for_unknown_user_are_zero() {
        let store = MemoryHistoryStore::new();
        let stats = store.get_statistics(&user()).await.unwrap();
        assert_eq!(stats, PlayStatistics::default());
    }

    #[tokio::test]
    async fn clear_history_reports_deleted_count() {
        let store = MemoryHistoryStore::new();
        let sid = session("s-1");
        store.record_play(&user(), "/a", "A", &sid).await.unwrap();
        store.record_play(&user(), "/b", "B", &sid).await.unwrap();
        store.record_play(&user(), "/b", "B", &sid).await.unwrap();

        assert_eq!(store.clear_history(&user()).await.unwrap(), 2);
        assert_eq!(store.clear_history(&user()).await.unwrap(), 0);

        let stats = store.get_statistics(&user()).await.unwrap();
        assert_eq!(stats.total_plays, 0);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = MemoryHistoryStore::new();
        let sid = session("s-1");
        let other = UserId::new("user-2");

        store.record_play(&user(), "/a", "A", &sid).await.unwrap();

        let snapshot = store
            .get_play_history(&other, &["/a".to_string()])
            .await
            .unwrap();
        assert!(snapshot.is_empty());
    }
}
