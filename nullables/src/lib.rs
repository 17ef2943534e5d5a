//! Deterministic stand-ins for the things governance and the auction talk to.
//!
//! - [`NullClock`]: time that moves only when told to.
//! - [`NullLedger`]: vote weights set by hand.
//! - Scripted contracts ([`RevertingContract`], [`RecordingContract`],
//!   [`ReentrantContract`], [`CollectibleReceiver`]) to deploy into a `World`.

pub mod clock;
pub mod contracts;
pub mod ledger;

pub use clock::NullClock;
pub use contracts::{
    CollectibleReceiver, RecordedCall, RecordingContract, ReentrantContract, RevertingContract,
};
pub use ledger::NullLedger;
