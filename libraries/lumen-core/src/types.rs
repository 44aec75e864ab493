//! Core types for the shuffle engine and the play-history store contract

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A playable track
///
/// Identity is by `url`; duplicate names are allowed and carry no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stream URL, the unique key for history lookups
    pub url: String,

    /// Display name
    pub name: String,
}

impl Track {
    /// Create a new track
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// An ordered list of tracks
///
/// Order is significant only for display; the shuffle engine treats the
/// playlist as an indexable set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist from tracks
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// All tracks, in display order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at `index`, if in bounds
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// URLs of every track, for a history snapshot fetch
    pub fn urls(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.url.clone()).collect()
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self::new(tracks)
    }
}

/// Per-track play history as seen by the shuffle engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackHistory {
    /// Cumulative play count for this (user, track) pair
    pub play_count: u64,

    /// Whether the track was already played in the current session
    pub played_in_current_session: bool,
}

impl TrackHistory {
    /// Create a history entry
    pub fn new(play_count: u64, played_in_current_session: bool) -> Self {
        Self {
            play_count,
            played_in_current_session,
        }
    }
}

/// History snapshot for a set of track URLs
///
/// Tracks absent from the snapshot read as never played: the lookup is
/// total, so callers never need to special-case missing entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    entries: HashMap<String, TrackHistory>,
}

impl HistorySnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// History for `url`, or zero/false if the store has no record
    pub fn get(&self, url: &str) -> TrackHistory {
        self.entries.get(url).copied().unwrap_or_default()
    }

    /// Insert or replace the entry for `url`
    pub fn insert(&mut self, url: impl Into<String>, history: TrackHistory) {
        self.entries.insert(url.into(), history);
    }

    /// Number of recorded entries (absent tracks are not counted)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, TrackHistory)> for HistorySnapshot {
    fn from_iter<I: IntoIterator<Item = (String, TrackHistory)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Aggregate play statistics for a user, computed store-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayStatistics {
    /// Number of tracks with at least one recorded play
    pub total_tracks: u64,

    /// Sum of play counts across all tracks
    pub total_plays: u64,

    /// Mean plays per recorded track
    pub avg_plays_per_track: f64,

    /// Highest play count of any track
    pub max_plays: u64,

    /// Lowest play count of any recorded track
    pub min_plays: u64,

    /// Tracks flagged as played in the current session
    pub tracks_played_in_session: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(url: &str) -> Track {
        Track::new(url, format!("Track at {}", url))
    }

    #[test]
    fn playlist_urls_preserve_order() {
        let playlist = Playlist::new(vec![track("/a.mp3"), track("/b.mp3"), track("/c.mp3")]);
        assert_eq!(playlist.urls(), vec!["/a.mp3", "/b.mp3", "/c.mp3"]);
        assert_eq!(playlist.len(), 3);
        assert!(!playlist.is_empty());
    }

    #[test]
    fn playlist_tolerates_duplicate_names() {
        let playlist = Playlist::new(vec![
            Track::new("/a.mp3", "Same Name"),
            Track::new("/b.mp3", "Same Name"),
        ]);
        // Identity is by url, so both tracks stay distinct
        assert_eq!(playlist.len(), 2);
        assert_ne!(playlist.get(0).unwrap().url, playlist.get(1).unwrap().url);
    }

    #[test]
    fn snapshot_lookup_is_total() {
        let mut snapshot = HistorySnapshot::new();
        snapshot.insert("/a.mp3", TrackHistory::new(5, true));

        let hit = snapshot.get("/a.mp3");
        assert_eq!(hit.play_count, 5);
        assert!(hit.played_in_current_session);

        // Absent entries read as never played
        let miss = snapshot.get("/nowhere.mp3");
        assert_eq!(miss.play_count, 0);
        assert!(!miss.played_in_current_session);
    }

    #[test]
    fn snapshot_from_iterator() {
        let snapshot: HistorySnapshot = vec![
            ("/a.mp3".to_string(), TrackHistory::new(1, false)),
            ("/b.mp3".to_string(), TrackHistory::new(2, true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("/b.mp3").play_count, 2);
    }
}
