//! Token-weighted governance.
//!
//! Proposals bundle deferred calls ([`Action`](agora_types::Action)s) with an
//! opaque metadata URI. Holders of the voting token cast one ballot per
//! proposal, weighted by their balance at the time they vote. Any number of
//! executions may follow; each runs the whole bundle or nothing.
//!
//! The pieces compose inside [`GovernanceEngine`]:
//! - a [`ProposalStore`](agora_store::ProposalStore) for the append-only proposal list,
//! - a [`BallotBox`] for ballots and tallies,
//! - an [`ActionExecutor`] that replays bundles through an
//!   [`Invoker`](agora_runtime::Invoker),
//! - an [`ExecutionPolicy`] deciding who may trigger execution.
//!
//! Voting weight is read live from a [`VoteLedger`](agora_ledger::VoteLedger);
//! nothing is snapshotted at proposal creation.

pub mod ballot;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod policy;

pub use ballot::BallotBox;
pub use config::{ExecutionMode, GovernanceConfig};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use events::{EventBus, GovernanceEvent};
pub use executor::{ActionExecutor, ExecutionReceipt};
pub use policy::{ExecutionPolicy, OwnerOnly, Permissionless, ProposerOnly};
