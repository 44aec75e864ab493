//! Listening-session lifecycle
//!
//! Owns the session identifier: minting, rotation on reset, and the
//! enabled/disabled transitions of the shuffle feature. Rotating the id is
//! the only mechanism that invalidates played-in-session flags; the store
//! performs the invalidation when it is handed the new id.

use chrono::Utc;
use lumen_core::SessionId;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Default prefix for minted session ids
pub const SESSION_ID_PREFIX: &str = "session";

/// Length of the random suffix in a minted session id
const SUFFIX_LEN: usize = 8;

/// Lifecycle state of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started yet
    NoSession,

    /// A session is active
    Active,

    /// Shuffle was disabled; the id is retained but unused until re-enable
    Inactive,
}

/// Tracks the current session id through enable/reset/disable transitions
///
/// Ids are `prefix-millis-suffix`: an opaque, URL-safe token whose timestamp
/// and random components make reuse vanishingly unlikely.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    state: SessionState,
    current: Option<SessionId>,
    prefix: String,
}

impl SessionTracker {
    /// Create a tracker with the default id prefix
    pub fn new() -> Self {
        Self::with_prefix(SESSION_ID_PREFIX)
    }

    /// Create a tracker with a custom id prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            state: SessionState::NoSession,
            current: None,
            prefix: prefix.into(),
        }
    }

    /// Current session id, if one has been minted
    pub fn current(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Start (or restart) an active session with a fresh id
    ///
    /// Always mints a new id, even when already active: enabling shuffle is
    /// a fresh-start guarantee, and re-enabling after a disable is
    /// equivalent to an explicit reset.
    pub fn activate(&mut self) -> &SessionId {
        self.state = SessionState::Active;
        let id = self.mint();
        &*self.current.insert(id)
    }

    /// Rotate to a fresh id without changing the enabled/disabled state
    pub fn rotate(&mut self) -> &SessionId {
        if self.state == SessionState::NoSession {
            self.state = SessionState::Active;
        }
        let id = self.mint();
        &*self.current.insert(id)
    }

    /// Mark the session inactive, retaining the id
    pub fn deactivate(&mut self) {
        if self.current.is_some() {
            self.state = SessionState::Inactive;
        }
    }

    /// Current id, minting one first if no session was ever started
    ///
    /// Plays can be recorded before shuffle is ever enabled; they still need
    /// a session to be attributed to.
    pub fn current_or_start(&mut self) -> &SessionId {
        if self.current.is_none() {
            self.state = SessionState::Active;
            self.current = Some(self.mint());
        }
        self.current.as_ref().expect("minted above")
    }

    fn mint(&self) -> SessionId {
        let millis = Utc::now().timestamp_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();

        SessionId::new(format!("{}-{}-{}", self.prefix, millis, suffix))
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
