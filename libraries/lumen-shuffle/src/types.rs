//! Configuration for the shuffle engine

use crate::session::SESSION_ID_PREFIX;
use crate::weights::{MIN_WEIGHT, SESSION_PENALTY};
use serde::{Deserialize, Serialize};

/// Tunables for the shuffle controller
///
/// The defaults are the contract values; overriding them is intended for
/// experimentation, not for normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Multiplier for tracks already played this session (default: 0.1)
    pub session_penalty: f64,

    /// Weight floor guaranteeing selectability (default: 0.001)
    pub min_weight: f64,

    /// Prefix for minted session ids (default: "session")
    pub session_id_prefix: String,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            session_penalty: SESSION_PENALTY,
            min_weight: MIN_WEIGHT,
            session_id_prefix: SESSION_ID_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_contract_values() {
        let config = ShuffleConfig::default();
        assert_eq!(config.session_penalty, 0.1);
        assert_eq!(config.min_weight, 0.001);
        assert_eq!(config.session_id_prefix, "session");
    }
}
