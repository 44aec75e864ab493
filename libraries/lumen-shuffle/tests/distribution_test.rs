//! Statistical tests for the weighted selector
//!
//! Seeded RNGs keep these deterministic: the draws are fixed, only the
//! tolerance reflects that the underlying process is stochastic.

use lumen_core::{HistorySnapshot, Playlist, Track, TrackHistory};
use lumen_shuffle::{compute_weights, select};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DRAWS: usize = 100_000;

/// Run `DRAWS` selections and return per-candidate empirical frequencies,
/// indexed by playlist index.
fn empirical_frequencies(candidates: &[usize], weights: &[f64], seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let upper = candidates.iter().max().copied().unwrap_or(0) + 1;
    let mut hits = vec![0u64; upper];

    for _ in 0..DRAWS {
        let outcome = select(candidates, weights, &mut rng).expect("non-empty candidates");
        assert!(!outcome.is_fallback(), "weighted path expected");
        hits[outcome.index()] += 1;
    }

    hits.iter().map(|&h| h as f64 / DRAWS as f64).collect()
}

#[test]
fn frequencies_converge_to_normalized_weights() {
    let candidates = [0, 1, 2, 3];
    let weights = [1.0, 2.0, 3.0, 4.0];
    let total: f64 = weights.iter().sum();

    let freq = empirical_frequencies(&candidates, &weights, 7);

    for (i, &w) in weights.iter().enumerate() {
        let expected = w / total;
        assert!(
            (freq[i] - expected).abs() < 0.01,
            "candidate {}: expected {:.3}, observed {:.3}",
            i,
            expected,
            freq[i]
        );
    }
}

#[test]
fn heavily_played_track_lands_near_seven_percent() {
    // Playlist of 3 with play counts [0, 0, 5]: avg = 5/3, weights
    // [2.667, 2.667, 0.444], so the heavy track should win ~7.7% of draws.
    let playlist = Playlist::new(vec![
        Track::new("/a.mp3", "A"),
        Track::new("/b.mp3", "B"),
        Track::new("/c.mp3", "C"),
    ]);
    let mut history = HistorySnapshot::new();
    history.insert("/c.mp3", TrackHistory::new(5, false));

    let candidates = [0, 1, 2];
    let weights = compute_weights(&candidates, &playlist, &history);
    assert!((weights[0] - 2.667).abs() < 0.001);
    assert!((weights[2] - 0.444).abs() < 0.001);

    let freq = empirical_frequencies(&candidates, &weights, 11);
    assert!(
        (freq[2] - 0.077).abs() < 0.01,
        "observed {:.3} for the heavy track",
        freq[2]
    );
}

#[test]
fn session_penalty_suppresses_selection_tenfold() {
    // Two equally-played tracks, one flagged for the current session: the
    // flagged track should win roughly 0.1/1.1 ≈ 9.1% of draws.
    let playlist = Playlist::new(vec![Track::new("/a.mp3", "A"), Track::new("/b.mp3", "B")]);
    let mut history = HistorySnapshot::new();
    history.insert("/a.mp3", TrackHistory::new(3, true));
    history.insert("/b.mp3", TrackHistory::new(3, false));

    let candidates = [0, 1];
    let weights = compute_weights(&candidates, &playlist, &history);
    let freq = empirical_frequencies(&candidates, &weights, 13);

    assert!(
        (freq[0] - 0.0909).abs() < 0.01,
        "observed {:.3} for the penalized track",
        freq[0]
    );
}

#[test]
fn extreme_imbalance_clamps_to_the_floor() {
    // 200 unplayed tracks and one with 10k plays in the current session:
    // the penalized weight lands below 0.001 and must clamp to it.
    let mut tracks: Vec<Track> = (0..200)
        .map(|i| Track::new(format!("/t{}.mp3", i), format!("T{}", i)))
        .collect();
    tracks.push(Track::new("/heavy.mp3", "Heavy"));
    let playlist = Playlist::new(tracks);

    let mut history = HistorySnapshot::new();
    history.insert("/heavy.mp3", TrackHistory::new(10_000, true));

    let candidates: Vec<usize> = (0..playlist.len()).collect();
    let weights = compute_weights(&candidates, &playlist, &history);

    assert_eq!(weights[200], lumen_shuffle::MIN_WEIGHT);
}

#[test]
fn floor_weight_keeps_a_track_reachable() {
    // A track at the floor competes against a full-weight track at odds of
    // about 1 in 1000; over 2M draws it must still be selected sometimes.
    let candidates = [0, 1];
    let weights = [lumen_shuffle::MIN_WEIGHT, 1.0];

    let mut rng = StdRng::seed_from_u64(17);
    let mut floor_hits = 0u64;
    for _ in 0..2_000_000 {
        if select(&candidates, &weights, &mut rng).unwrap().index() == 0 {
            floor_hits += 1;
        }
    }

    // Expectation is ~2000 hits; zero would mean the floor failed
    assert!(floor_hits > 0, "floored track was never selected");
}
