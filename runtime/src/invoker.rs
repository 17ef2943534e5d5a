//! The uniform "invoke" capability.

use agora_types::{Address, Amount};

use crate::{CallError, World, WorldSnapshot};

/// Something that can run calls against external code and undo them.
///
/// Batch callers take a snapshot, run several calls, and restore the
/// snapshot if any of them fails, making the batch all-or-nothing.
pub trait Invoker {
    type Snapshot;

    fn invoke(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, CallError>;

    fn balance(&self, account: &Address) -> Amount;

    fn snapshot(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: Self::Snapshot);
}

impl Invoker for World {
    type Snapshot = WorldSnapshot;

    fn invoke(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, CallError> {
        self.call(caller, target, value, payload)
    }

    fn balance(&self, account: &Address) -> Amount {
        self.native_balance(account)
    }

    fn snapshot(&self) -> WorldSnapshot {
        self.checkpoint()
    }

    fn restore(&mut self, snapshot: WorldSnapshot) {
        self.rollback(snapshot);
    }
}
