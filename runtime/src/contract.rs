//! The contract interface and the per-frame call context.

use std::any::Any;

use agora_types::{Address, Amount};
use serde::Serialize;

use crate::{CallError, World};

/// Code deployed at an address.
///
/// `call` receives the raw payload and decides what it means; the runtime
/// never looks inside it. Returning `Err` reverts the whole frame.
pub trait Contract: ContractObject {
    fn call(&mut self, ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError>;
}

/// Object-safety plumbing for [`Contract`]: cloning behind a box (for frame
/// snapshots) and downcasting (for typed reads from outside the runtime).
///
/// Implemented automatically for every `Contract + Clone + 'static`.
pub trait ContractObject {
    fn box_clone(&self) -> Box<dyn Contract>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Contract + Clone + 'static> ContractObject for T {
    fn box_clone(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn Contract> {
    fn clone(&self) -> Self {
        (**self).box_clone()
    }
}

/// What a contract sees while handling a call.
pub struct CallContext<'w> {
    world: &'w mut World,
    caller: Address,
    this: Address,
    value: Amount,
}

impl<'w> CallContext<'w> {
    pub(crate) fn new(world: &'w mut World, caller: Address, this: Address, value: Amount) -> Self {
        Self {
            world,
            caller,
            this,
            value,
        }
    }

    /// The immediate caller of this frame.
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// The address of the contract handling the call.
    pub fn this(&self) -> Address {
        self.this
    }

    /// Native value attached to this frame (already credited to `this`).
    pub fn value(&self) -> Amount {
        self.value
    }

    /// Fail unless the frame carries no native value.
    pub fn reject_value(&self) -> Result<(), CallError> {
        if self.value.is_zero() {
            Ok(())
        } else {
            Err(CallError::revert("contract does not accept native value"))
        }
    }

    pub fn balance(&self, account: &Address) -> Amount {
        self.world.native_balance(account)
    }

    pub fn is_contract(&self, account: &Address) -> bool {
        self.world.is_contract(account)
    }

    /// Make a nested call with `this` as the caller.
    pub fn call(
        &mut self,
        target: &Address,
        value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, CallError> {
        let this = self.this;
        self.world.call(&this, target, value, payload)
    }

    /// Append a log record attributed to `this`.
    pub fn emit<E: Serialize>(&mut self, name: &str, event: &E) -> Result<(), CallError> {
        let this = self.this;
        self.world.push_log(this, name, event)
    }
}
