//! Asset ledgers that governance actions and the auction operate on.
//!
//! - [`FungibleToken`]: balances and allowances; doubles as the vote weight
//!   source through [`VoteLedger`].
//! - [`CollectibleRegistry`]: one-of-a-kind items with per-item and
//!   operator approvals.
//!
//! Both are plain state machines usable directly, and both implement
//! [`agora_runtime::Contract`] so they can be deployed into a `World` and
//! driven by bincode payloads ([`TokenCall`], [`CollectibleCall`]).

pub mod call;
pub mod collectible;
pub mod error;
pub mod token;
pub mod weight;

pub use call::{CollectibleCall, ReceiverCall, TokenCall, RECEIVER_ACK};
pub use collectible::{CollectibleEvent, CollectibleRegistry};
pub use error::LedgerError;
pub use token::{FungibleToken, TokenEvent};
pub use weight::{DeployedToken, VoteLedger};
