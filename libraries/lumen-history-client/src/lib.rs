//! Lumen Player - Play-History Client
//!
//! HTTP client library for the Lumen Player play-history service.
//!
//! # Features
//!
//! - **Play recording**: atomic count bump plus session flagging
//! - **History snapshots**: per-track counts and session flags for a
//!   playlist's URLs
//! - **Session resets**: invalidate played-in-session flags under a new id
//! - **Statistics & clearing**: aggregate summaries and irreversible wipes
//!
//! The client implements `lumen_core::PlayHistoryStore`, so it plugs
//! directly into `lumen_shuffle::ShuffleController`:
//!
//! ```ignore
//! use lumen_core::UserId;
//! use lumen_history_client::{ClientConfig, HistoryClient};
//! use lumen_shuffle::ShuffleController;
//!
//! let client = HistoryClient::new(ClientConfig::new("https://history.example.com"))?;
//! let mut controller = ShuffleController::new(client, UserId::new("user-1"));
//! controller.enable().await?;
//! ```

mod client;
mod error;
mod types;

// Re-export main types
pub use client::HistoryClient;
pub use error::{HistoryClientError, Result};
pub use types::{
    ClearHistoryResponse, ClientConfig, PlayHistoryRequest, PlayHistoryResponse,
    RecordPlayRequest, RecordPlayResponse, ResetSessionRequest, StatisticsResponse,
    TrackHistoryPayload,
};
