//! Deferred external calls.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// One deferred external call: send `value` to `target` with `payload` as
/// opaque call data.
///
/// The payload is never interpreted by whoever carries the action; only the
/// contract deployed at `target` decodes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub target: Address,
    pub value: Amount,
    pub payload: Vec<u8>,
}

impl Action {
    pub fn new(target: Address, value: Amount, payload: Vec<u8>) -> Self {
        Self {
            target,
            value,
            payload,
        }
    }

    /// A plain value transfer with no call data.
    pub fn transfer(target: Address, value: Amount) -> Self {
        Self::new(target, value, Vec::new())
    }
}
