//! Auction configuration.

use serde::{Deserialize, Serialize};

use crate::AuctionError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Length of one round in seconds.
    #[serde(default = "default_round_secs")]
    pub round_secs: u64,
}

fn default_round_secs() -> u64 {
    86_400
}

impl AuctionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, AuctionError> {
        toml::from_str(s).map_err(|e| AuctionError::Config(e.to_string()))
    }
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            round_secs: default_round_secs(),
        }
    }
}
