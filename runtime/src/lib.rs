//! The call environment that proposal actions run against.
//!
//! A [`World`] holds native balances, contracts deployed at addresses, and an
//! append-only log. Every [`World::call`] is one call frame: it either
//! completes or leaves no trace, nested frames included. A contract that is
//! in the middle of a call cannot be entered again until that call returns.
//!
//! Callers that only need the "invoke" capability (the governance executor,
//! the auction) are written against the [`Invoker`] trait.

pub mod codec;
pub mod contract;
pub mod error;
pub mod invoker;
pub mod log;
pub mod world;

pub use contract::{CallContext, Contract, ContractObject};
pub use error::CallError;
pub use invoker::Invoker;
pub use log::Log;
pub use world::{World, WorldSnapshot, DEFAULT_MAX_DEPTH};
