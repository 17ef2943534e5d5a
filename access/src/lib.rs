//! Ownership: a single privileged account that may hand itself over.

pub mod error;
pub mod ownable;

pub use error::AccessError;
pub use ownable::{ClaimableOwnership, Ownable, OwnershipEvent};
