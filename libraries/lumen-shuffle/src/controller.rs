//! Shuffle controller - core orchestration
//!
//! Coordinates the session tracker, weight calculator, selector, and the
//! play-history store. This is the only component with mutable state and the
//! only surface the playback UI consumes.

use crate::selector::{self, FallbackReason, SelectionOutcome};
use crate::session::SessionTracker;
use crate::types::ShuffleConfig;
use crate::weights;
use lumen_core::{PlayHistoryStore, PlayStatistics, Playlist, Result, SessionId, UserId};
use tracing::{debug, info, warn};

/// Session-aware weighted shuffle controller
///
/// One instance per player. `select_next_track` calls are never issued
/// concurrently by the same player (one media element advances one track at
/// a time), so the controller needs no internal locking; the enabled flag
/// and session id are plain fields.
///
/// Failure policy: selection degrades to a uniform-random pick when the
/// store is unavailable and never fails outright. Operations that carry
/// explicit user intent (`record_play`, `reset_current_session`,
/// `clear_play_history`) surface store errors to the caller instead.
pub struct ShuffleController<S> {
    store: S,
    user_id: UserId,
    config: ShuffleConfig,
    session: SessionTracker,
    enabled: bool,
}

impl<S: PlayHistoryStore> ShuffleController<S> {
    /// Create a controller with the default configuration
    pub fn new(store: S, user_id: UserId) -> Self {
        Self::with_config(store, user_id, ShuffleConfig::default())
    }

    /// Create a controller with explicit tunables
    pub fn with_config(store: S, user_id: UserId, config: ShuffleConfig) -> Self {
        let session = SessionTracker::with_prefix(config.session_id_prefix.clone());
        Self {
            store,
            user_id,
            config,
            session,
            enabled: false,
        }
    }

    /// Whether shuffle is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The current session id, if a session has been started
    pub fn current_session_id(&self) -> Option<&SessionId> {
        self.session.current()
    }

    /// Enable shuffle with a fresh session
    ///
    /// Always rotates the session, even when already enabled; enabling is a
    /// fresh-start guarantee. The store is told to invalidate prior
    /// session-scoped flags under the new id; that failure is returned, but
    /// the local enable and rotation stand regardless so playback continues.
    pub async fn enable(&mut self) -> Result<()> {
        self.enabled = true;
        let session_id = self.session.activate().clone();
        info!(session_id = %session_id, "Shuffle enabled with fresh session");

        self.store.reset_session(&self.user_id, &session_id).await
    }

    /// Disable shuffle
    ///
    /// Does not clear history or rotate the session; the id is retained and
    /// a later re-enable mints a fresh one.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.session.deactivate();
        debug!("Shuffle disabled");
    }

    /// Pick the next track to play from `candidates`
    ///
    /// Returns `None` when there is nothing playable. See
    /// [`select_next_track_outcome`](Self::select_next_track_outcome) for
    /// the tagged variant.
    pub async fn select_next_track(
        &mut self,
        candidates: &[usize],
        playlist: &Playlist,
    ) -> Option<usize> {
        self.select_next_track_outcome(candidates, playlist)
            .await
            .map(|outcome| outcome.index())
    }

    /// Pick the next track, reporting which selection path executed
    ///
    /// - empty `candidates` → `None`
    /// - exactly one candidate → returned directly, no store round trip
    /// - otherwise: fetch a history snapshot for the whole playlist, weight
    ///   the candidates, and draw. A store failure degrades to a
    ///   uniform-random pick over `candidates` rather than propagating.
    pub async fn select_next_track_outcome(
        &mut self,
        candidates: &[usize],
        playlist: &Playlist,
    ) -> Option<SelectionOutcome> {
        if candidates.is_empty() {
            return None;
        }

        // A forced choice needs no history round trip
        if candidates.len() == 1 {
            return Some(SelectionOutcome::Weighted {
                index: candidates[0],
            });
        }

        // The thread-local RNG is not Send, so it must not live across the
        // store await
        let snapshot = match self
            .store
            .get_play_history(&self.user_id, &playlist.urls())
            .await
        {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "History fetch failed, selecting uniformly");
                return selector::select_uniform(
                    candidates,
                    FallbackReason::StoreUnavailable,
                    &mut rand::thread_rng(),
                );
            }
        };

        let weight_vector = weights::compute_weights_with(
            candidates,
            playlist,
            &snapshot,
            self.config.session_penalty,
            self.config.min_weight,
        );

        selector::select(candidates, &weight_vector, &mut rand::thread_rng())
    }

    /// Record a play: bump the count and flag the track for this session
    ///
    /// Returns the play count after the increment. A failure is surfaced to
    /// the caller (for a UI warning) but must not block playback; the core
    /// does not retry.
    pub async fn record_play(&mut self, track_url: &str, track_name: &str) -> Result<u64> {
        let session_id = self.session.current_or_start().clone();
        debug!(track_url, session_id = %session_id, "Recording play");

        self.store
            .record_play(&self.user_id, track_url, track_name, &session_id)
            .await
    }

    /// Rotate the session id and invalidate prior session-scoped flags
    pub async fn reset_current_session(&mut self) -> Result<()> {
        let session_id = self.session.rotate().clone();
        info!(session_id = %session_id, "Session reset");

        self.store.reset_session(&self.user_id, &session_id).await
    }

    /// Aggregate play statistics, computed store-side
    pub async fn get_statistics(&self) -> Result<PlayStatistics> {
        self.store.get_statistics(&self.user_id).await
    }

    /// Irreversibly delete all history records for this user
    ///
    /// Returns the number of deleted records.
    pub async fn clear_play_history(&self) -> Result<u64> {
        self.store.clear_history(&self.user_id).await
    }
}
