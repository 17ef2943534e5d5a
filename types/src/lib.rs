//! Fundamental types for the agora governance workspace.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, amounts, timestamps, proposal identifiers, ballot choices and actions.

pub mod action;
pub mod address;
pub mod amount;
pub mod error;
pub mod time;
pub mod vote;

pub use action::Action;
pub use address::Address;
pub use amount::Amount;
pub use error::TypesError;
pub use time::Timestamp;
pub use vote::{Choice, ProposalId};
