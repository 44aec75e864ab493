//! Weighted-random candidate selection
//!
//! Roulette-wheel sampling over a weight vector, with a uniform-random
//! fallback for malformed input. Selection never fails: a degraded pick is
//! always preferred over halting playback.

use rand::Rng;
use tracing::warn;

/// Why a selection fell back to uniform-random picking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Candidate and weight vectors had different lengths
    LengthMismatch,

    /// The weight total was zero or not a finite number
    ZeroTotalWeight,

    /// The play-history store could not be reached
    StoreUnavailable,
}

/// Result of one selection draw
///
/// The external contract is just an index; the tag records which path
/// produced it so tests and diagnostics can tell a weighted draw from a
/// degraded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The weighted draw ran normally
    Weighted {
        /// Chosen playlist index
        index: usize,
    },

    /// Input was unusable; a uniform-random candidate was chosen instead
    UniformFallback {
        /// Chosen playlist index
        index: usize,
        /// What forced the fallback
        reason: FallbackReason,
    },
}

impl SelectionOutcome {
    /// The chosen playlist index, whichever path produced it
    pub fn index(&self) -> usize {
        match *self {
            Self::Weighted { index } | Self::UniformFallback { index, .. } => index,
        }
    }

    /// Whether this pick came from the uniform fallback path
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::UniformFallback { .. })
    }
}

/// Pick one candidate by weighted-random (roulette wheel) sampling
///
/// Draws `r` uniformly from `[0, total)` and returns the first candidate
/// whose running weight sum reaches `r`. O(n) per draw, which is fine for
/// human-curated playlists of tens to low hundreds of tracks.
///
/// Degraded inputs never error:
/// - empty `candidates` returns `None`
/// - a candidate/weight length mismatch logs and falls back to uniform
/// - a zero or non-finite weight total logs and falls back to uniform
/// - floating-point drift at the end of the walk returns the last candidate
pub fn select(
    candidates: &[usize],
    weights: &[f64],
    rng: &mut impl Rng,
) -> Option<SelectionOutcome> {
    if candidates.is_empty() {
        return None;
    }

    if candidates.len() != weights.len() {
        warn!(
            candidates = candidates.len(),
            weights = weights.len(),
            "Candidate/weight length mismatch, falling back to uniform selection"
        );
        return select_uniform(candidates, FallbackReason::LengthMismatch, rng);
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        warn!(total, "Degenerate weight total, falling back to uniform selection");
        return select_uniform(candidates, FallbackReason::ZeroTotalWeight, rng);
    }

    let r = rng.gen_range(0.0..total);

    let mut running = 0.0;
    for (&candidate, &weight) in candidates.iter().zip(weights) {
        running += weight;
        if running >= r {
            return Some(SelectionOutcome::Weighted { index: candidate });
        }
    }

    // Floating-point drift left the walk short of r; the last candidate is
    // the deterministic fallback
    Some(SelectionOutcome::Weighted {
        index: *candidates.last().expect("candidates checked non-empty"),
    })
}

/// Pick one candidate uniformly at random, tagged with the fallback reason
pub fn select_uniform(
    candidates: &[usize],
    reason: FallbackReason,
    rng: &mut impl Rng,
) -> Option<SelectionOutcome> {
    if candidates.is_empty() {
        return None;
    }

    let index = candidates[rng.gen_range(0..candidates.len())];
    Some(SelectionOutcome::UniformFallback { index, reason })
}
