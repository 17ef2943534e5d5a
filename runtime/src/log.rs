//! Log records emitted by contracts.

use agora_types::Address;
use serde::de::DeserializeOwned;

use crate::{codec, CallError};

/// One emitted event: who emitted it, its name, and its bincode-encoded body.
///
/// Logs are world state: a reverted frame drops the logs it emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Log {
    pub emitter: Address,
    pub name: String,
    pub data: Vec<u8>,
}

impl Log {
    /// Decode the event body.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CallError> {
        codec::decode(&self.data)
    }
}
