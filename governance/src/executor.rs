//! Batch execution of deferred calls.
//!
//! The executor forwards each payload verbatim to its target and never looks
//! inside it. A batch is all-or-nothing: the world is snapshotted before the
//! first call and restored if any call fails.

use agora_runtime::Invoker;
use agora_types::{Action, Address, Amount};

use crate::GovernanceError;

/// Return data of every call in a successful batch, in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReceipt {
    pub return_data: Vec<Vec<u8>>,
}

impl ExecutionReceipt {
    /// All return data joined end to end.
    pub fn concatenated(&self) -> Vec<u8> {
        self.return_data.concat()
    }

    pub fn calls(&self) -> usize {
        self.return_data.len()
    }
}

/// Runs batches of calls with its own address as the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionExecutor {
    address: Address,
}

impl ActionExecutor {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Run a caller-supplied batch funded by `attached` native value.
    ///
    /// `attached` is moved from `caller` to the executor first and must cover
    /// the sum of `values`; whatever the calls do not spend goes back to the
    /// caller.
    pub fn execute<I: Invoker>(
        &self,
        world: &mut I,
        caller: &Address,
        attached: Amount,
        targets: &[Address],
        values: &[Amount],
        payloads: &[Vec<u8>],
    ) -> Result<ExecutionReceipt, GovernanceError> {
        if targets.len() != values.len() || values.len() != payloads.len() {
            return Err(GovernanceError::LengthMismatch {
                targets: targets.len(),
                values: values.len(),
                payloads: payloads.len(),
            });
        }
        let needed = Amount::checked_sum(values).ok_or(GovernanceError::Overflow)?;
        if attached < needed {
            return Err(GovernanceError::InsufficientFunds {
                needed,
                available: attached,
            });
        }

        let snapshot = world.snapshot();
        let result = self.run_funded(world, caller, attached, needed, targets, values, payloads);
        if result.is_err() {
            world.restore(snapshot);
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn run_funded<I: Invoker>(
        &self,
        world: &mut I,
        caller: &Address,
        attached: Amount,
        needed: Amount,
        targets: &[Address],
        values: &[Amount],
        payloads: &[Vec<u8>],
    ) -> Result<ExecutionReceipt, GovernanceError> {
        world
            .invoke(caller, &self.address, attached, &[])
            .map_err(GovernanceError::Funding)?;

        let calls = targets
            .iter()
            .zip(values)
            .zip(payloads)
            .map(|((target, value), payload)| (target, *value, payload.as_slice()));
        let receipt = self.run(world, calls)?;

        let surplus = attached.saturating_sub(needed);
        if !surplus.is_zero() {
            world
                .invoke(&self.address, caller, surplus, &[])
                .map_err(GovernanceError::Funding)?;
        }
        Ok(receipt)
    }

    /// Run a stored bundle, paid for out of the executor's own balance.
    ///
    /// Each call's value is drawn when that call runs, so value paid back to
    /// the executor by an earlier call can fund a later one. A call the
    /// balance cannot cover fails as [`GovernanceError::ActionReverted`].
    pub fn execute_actions<I: Invoker>(
        &self,
        world: &mut I,
        actions: &[Action],
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let snapshot = world.snapshot();
        let calls = actions
            .iter()
            .map(|action| (&action.target, action.value, action.payload.as_slice()));
        let result = self.run(world, calls);
        if result.is_err() {
            world.restore(snapshot);
        }
        result
    }

    fn run<'a, I: Invoker>(
        &self,
        world: &mut I,
        calls: impl Iterator<Item = (&'a Address, Amount, &'a [u8])>,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let mut receipt = ExecutionReceipt::default();
        for (index, (target, value, payload)) in calls.enumerate() {
            match world.invoke(&self.address, target, value, payload) {
                Ok(data) => receipt.return_data.push(data),
                Err(reason) => {
                    tracing::warn!(index, %target, error = %reason, "batch call reverted");
                    return Err(GovernanceError::ActionReverted { index, reason });
                }
            }
        }
        tracing::debug!(executor = %self.address, calls = receipt.calls(), "batch completed");
        Ok(receipt)
    }
}
