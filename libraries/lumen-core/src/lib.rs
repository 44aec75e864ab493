//! Lumen Player - Core Types
//!
//! Shared vocabulary for the Lumen Player shuffle engine:
//! - Id newtypes (`UserId`, `SessionId`)
//! - Track and playlist types
//! - Play-history snapshot and statistics types
//! - The `PlayHistoryStore` contract against the external history service
//! - The `HistoryError` taxonomy shared by store implementations
//!
//! This crate has no I/O of its own; store implementations live in
//! `lumen-history-client` (HTTP) and `lumen-shuffle` (in-memory).

mod error;
mod ids;
mod store;
pub mod types;

// Public exports
pub use error::{HistoryError, Result};
pub use ids::{SessionId, UserId};
pub use store::PlayHistoryStore;
pub use types::{HistorySnapshot, PlayStatistics, Playlist, Track, TrackHistory};
