//! Weight computation for session-aware shuffle
//!
//! Favors rarely-played tracks relative to the playlist's global average and
//! strongly deprioritizes tracks already heard in the current session.

use lumen_core::{HistorySnapshot, Playlist};

/// Multiplier applied to tracks already played in the current session
pub const SESSION_PENALTY: f64 = 0.1;

/// Floor for every weight, so no track ever becomes unselectable
pub const MIN_WEIGHT: f64 = 0.001;

/// Compute selection weights for `candidates` with the default penalty and
/// floor
///
/// Returns one weight per candidate, in candidate order.
pub fn compute_weights(
    candidates: &[usize],
    playlist: &Playlist,
    history: &HistorySnapshot,
) -> Vec<f64> {
    compute_weights_with(candidates, playlist, history, SESSION_PENALTY, MIN_WEIGHT)
}

/// Compute selection weights with explicit penalty and floor
///
/// The rebalancing denominator is the mean play count over the *entire*
/// playlist, not just the candidates. The global mean keeps weights stable
/// as the candidate set shrinks over a session instead of re-normalizing to
/// a shifting subset.
///
/// For a candidate with play count `p`, the base weight is
/// `(avg + 1) / (p + 1)`: monotone decreasing in `p`, never dividing by
/// zero, and converging toward 1 when all tracks are equally played. Tracks
/// flagged as played in the current session are multiplied by
/// `session_penalty`, and every weight is clamped up to `min_weight`.
pub fn compute_weights_with(
    candidates: &[usize],
    playlist: &Playlist,
    history: &HistorySnapshot,
    session_penalty: f64,
    min_weight: f64,
) -> Vec<f64> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let avg_play_count = average_play_count(playlist, history);

    candidates
        .iter()
        .map(|&index| {
            let entry = playlist
                .get(index)
                .map(|track| history.get(&track.url))
                .unwrap_or_default();

            let mut weight = (avg_play_count + 1.0) / (entry.play_count as f64 + 1.0);

            if entry.played_in_current_session {
                weight *= session_penalty;
            }

            weight.max(min_weight)
        })
        .collect()
}

/// Mean play count over every track in the playlist
///
/// Tracks absent from the snapshot count as zero plays.
fn average_play_count(playlist: &Playlist, history: &HistorySnapshot) -> f64 {
    if playlist.is_empty() {
        return 0.0;
    }

    let total: u64 = playlist
        .tracks()
        .iter()
        .map(|track| history.get(&track.url).play_count)
        .sum();

    total as f64 / playlist.len() as f64
}
