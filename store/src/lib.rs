//! Storage traits for agora governance state.
//!
//! Every backend implements these traits; the governance engine depends
//! only on the traits. The in-memory backends in [`memory`] are what the
//! engine uses by default and what tests construct fresh per case.

pub mod ballot;
pub mod error;
pub mod memory;
pub mod proposal;

pub use ballot::{BallotRecord, BallotStore};
pub use error::StoreError;
pub use memory::{MemoryBallotStore, MemoryProposalStore};
pub use proposal::{ProposalRecord, ProposalStore};
