//! Payload and return-data encoding shared by contracts and their callers.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::CallError;

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CallError> {
    bincode::serialize(value).map_err(|e| CallError::MalformedCall(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CallError> {
    bincode::deserialize(bytes).map_err(|e| CallError::MalformedCall(e.to_string()))
}
