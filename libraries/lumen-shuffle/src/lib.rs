//! Lumen Player - Session-Aware Weighted Shuffle
//!
//! Picks the next track to play such that rarely-played tracks are favored
//! and tracks already heard in the current listening session are strongly
//! deprioritized, while every track keeps a non-zero chance of selection.
//!
//! This crate provides:
//! - Weight computation (`(avg + 1) / (plays + 1)` rebalancing, ×0.1
//!   session penalty, 0.001 floor)
//! - Weighted-random selection with a tagged uniform fallback
//! - Session lifecycle (minting, rotation on reset, disable/re-enable)
//! - The `ShuffleController` orchestrator consumed by the playback UI
//! - An in-memory `PlayHistoryStore` for tests and offline operation
//!
//! Persistence is behind the `lumen_core::PlayHistoryStore` contract; the
//! HTTP adapter to the hosted history service lives in
//! `lumen-history-client`.
//!
//! # Example
//!
//! ```rust
//! use lumen_core::{Playlist, Track, UserId};
//! use lumen_shuffle::{MemoryHistoryStore, ShuffleController};
//!
//! # async fn demo() -> lumen_core::Result<()> {
//! let store = MemoryHistoryStore::new();
//! let mut controller = ShuffleController::new(store, UserId::new("user-1"));
//! controller.enable().await?;
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("/a.mp3", "Track A"),
//!     Track::new("/b.mp3", "Track B"),
//!     Track::new("/c.mp3", "Track C"),
//! ]);
//!
//! // The caller decides which indices are candidates for this draw
//! if let Some(index) = controller.select_next_track(&[0, 1, 2], &playlist).await {
//!     let track = playlist.get(index).unwrap();
//!     controller.record_play(&track.url, &track.name).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod memory;
mod selector;
mod session;
pub mod types;
mod weights;

// Public exports
pub use controller::ShuffleController;
pub use memory::MemoryHistoryStore;
pub use selector::{select, select_uniform, FallbackReason, SelectionOutcome};
pub use session::{SessionState, SessionTracker, SESSION_ID_PREFIX};
pub use types::ShuffleConfig;
pub use weights::{compute_weights, compute_weights_with, MIN_WEIGHT, SESSION_PENALTY};
