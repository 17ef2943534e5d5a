//! Nullable vote weight source.

use std::collections::BTreeMap;

use agora_ledger::VoteLedger;
use agora_types::{Address, Amount};

/// Weights set by hand; unknown accounts weigh zero.
#[derive(Clone, Debug, Default)]
pub struct NullLedger {
    weights: BTreeMap<Address, Amount>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: impl IntoIterator<Item = (Address, Amount)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    pub fn set_weight(&mut self, account: Address, weight: Amount) {
        self.weights.insert(account, weight);
    }
}

impl VoteLedger for NullLedger {
    fn weight(&self, account: &Address) -> Amount {
        self.weights.get(account).copied().unwrap_or(Amount::ZERO)
    }
}
