//! The world: balances, contracts, logs, and call frames.

use std::collections::{BTreeMap, BTreeSet};

use agora_types::{Address, Amount};
use serde::Serialize;

use crate::contract::{CallContext, Contract};
use crate::{codec, CallError, Log};

/// Default bound on nested call frames.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Clone, Default)]
struct State {
    balances: BTreeMap<Address, Amount>,
    contracts: BTreeMap<Address, Box<dyn Contract>>,
}

/// A copy of the world state taken before a frame, restored if it fails.
///
/// The log is append-only, so only its length is recorded; rolling back
/// truncates it.
#[derive(Clone)]
pub struct WorldSnapshot {
    state: State,
    log_len: usize,
}

/// Native balances, deployed contracts and the log.
///
/// Contracts are moved out of the map while they execute; an address that is
/// currently executing is tracked in `active` and refuses new frames.
pub struct World {
    state: State,
    logs: Vec<Log>,
    active: BTreeSet<Address>,
    depth: usize,
    max_depth: usize,
}

impl World {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            state: State::default(),
            logs: Vec::new(),
            active: BTreeSet::new(),
            depth: 0,
            max_depth,
        }
    }

    // ── Native currency ─────────────────────────────────────────────────

    /// Credit `amount` of native currency out of thin air (genesis funding).
    pub fn mint_native(&mut self, to: &Address, amount: Amount) -> Result<(), CallError> {
        let balance = self.native_balance(to);
        let updated = balance
            .checked_add(amount)
            .ok_or(CallError::BalanceOverflow(*to))?;
        self.state.balances.insert(*to, updated);
        Ok(())
    }

    pub fn native_balance(&self, account: &Address) -> Amount {
        self.state
            .balances
            .get(account)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn move_native(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), CallError> {
        if amount.is_zero() {
            return Ok(());
        }
        let from_balance = self.native_balance(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(CallError::InsufficientBalance {
                needed: amount.raw(),
                available: from_balance.raw(),
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .native_balance(to)
            .checked_add(amount)
            .ok_or(CallError::BalanceOverflow(*to))?;
        self.state.balances.insert(*from, remaining);
        self.state.balances.insert(*to, credited);
        Ok(())
    }

    // ── Contracts ───────────────────────────────────────────────────────

    /// Deploy `contract` at `at`.
    pub fn deploy<C: Contract + 'static>(&mut self, at: Address, contract: C) -> Result<(), CallError> {
        if self.is_contract(&at) {
            return Err(CallError::AddressInUse(at));
        }
        tracing::debug!(address = %at, "contract deployed");
        self.state.contracts.insert(at, Box::new(contract));
        Ok(())
    }

    /// Whether `account` hosts a contract (including one that is mid-call).
    pub fn is_contract(&self, account: &Address) -> bool {
        self.state.contracts.contains_key(account) || self.active.contains(account)
    }

    /// Typed read access to a deployed contract.
    ///
    /// Returns `None` if nothing is deployed at `at`, the contract is mid-call,
    /// or it is not a `C`.
    pub fn contract<C: 'static>(&self, at: &Address) -> Option<&C> {
        self.state.contracts.get(at)?.as_any().downcast_ref::<C>()
    }

    /// Typed write access to a deployed contract, bypassing the call path.
    ///
    /// Intended for setup; state changed here is not part of any frame.
    pub fn contract_mut<C: 'static>(&mut self, at: &Address) -> Option<&mut C> {
        self.state
            .contracts
            .get_mut(at)?
            .as_any_mut()
            .downcast_mut::<C>()
    }

    // ── Logs ────────────────────────────────────────────────────────────

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Logs emitted by `emitter` under `name`, oldest first.
    pub fn logs_named<'a>(
        &'a self,
        emitter: &'a Address,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Log> + 'a {
        self.logs
            .iter()
            .filter(move |log| &log.emitter == emitter && log.name == name)
    }

    pub(crate) fn push_log<E: Serialize>(
        &mut self,
        emitter: Address,
        name: &str,
        event: &E,
    ) -> Result<(), CallError> {
        let data = codec::encode(event)?;
        self.logs.push(Log {
            emitter,
            name: name.to_string(),
            data,
        });
        Ok(())
    }

    // ── Frames ──────────────────────────────────────────────────────────

    pub fn checkpoint(&self) -> WorldSnapshot {
        WorldSnapshot {
            state: self.state.clone(),
            log_len: self.logs.len(),
        }
    }

    pub fn rollback(&mut self, snapshot: WorldSnapshot) {
        self.state = snapshot.state;
        self.logs.truncate(snapshot.log_len);
    }

    /// Run one call frame: move `value` from `caller` to `target`, then
    /// dispatch `payload` to the contract at `target` if there is one.
    ///
    /// A plain account accepts any payload and returns no data. If the frame
    /// fails, every change it made (nested frames included) is undone.
    pub fn call(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, CallError> {
        if self.depth >= self.max_depth {
            return Err(CallError::DepthExceeded(self.max_depth));
        }
        if self.active.contains(target) {
            return Err(CallError::Reentrancy(*target));
        }

        let snapshot = self.checkpoint();
        self.depth += 1;
        let result = self.enter(caller, target, value, payload);
        self.depth -= 1;

        if let Err(e) = &result {
            tracing::debug!(%caller, %target, error = %e, "call frame reverted");
            self.rollback(snapshot);
        }
        result
    }

    fn enter(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, CallError> {
        self.move_native(caller, target, value)?;

        let Some(mut contract) = self.state.contracts.remove(target) else {
            return Ok(Vec::new());
        };
        self.active.insert(*target);
        let result = {
            let mut ctx = CallContext::new(self, *caller, *target, value);
            contract.call(&mut ctx, payload)
        };
        self.active.remove(target);
        self.state.contracts.insert(*target, contract);
        result
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts calls, logs each one, and reverts on an empty payload.
    #[derive(Clone, Default)]
    struct Counter {
        hits: u32,
    }

    impl Contract for Counter {
        fn call(&mut self, ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError> {
            self.hits += 1;
            ctx.emit("Hit", &self.hits)?;
            if payload.is_empty() {
                return Err(CallError::revert("empty payload"));
            }
            Ok(payload.to_vec())
        }
    }

    /// Calls back into itself.
    #[derive(Clone)]
    struct SelfCaller;

    impl Contract for SelfCaller {
        fn call(&mut self, ctx: &mut CallContext<'_>, _payload: &[u8]) -> Result<Vec<u8>, CallError> {
            let me = ctx.this();
            ctx.call(&me, Amount::ZERO, b"again")
        }
    }

    /// Forwards every call to `next`.
    #[derive(Clone)]
    struct Relay {
        next: Address,
    }

    impl Contract for Relay {
        fn call(&mut self, ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError> {
            ctx.call(&self.next, Amount::ZERO, payload)
        }
    }

    /// Logs around a nested call whose failure it ignores.
    #[derive(Clone)]
    struct Swallower {
        next: Address,
    }

    impl Contract for Swallower {
        fn call(&mut self, ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError> {
            ctx.emit("Before", &0u8)?;
            let _ = ctx.call(&self.next, Amount::ZERO, payload);
            ctx.emit("After", &1u8)?;
            Ok(Vec::new())
        }
    }

    fn addr(label: &str) -> Address {
        Address::derive(label)
    }

    #[test]
    fn plain_account_call_moves_value() {
        let mut world = World::new();
        let (alice, bob) = (addr("alice"), addr("bob"));
        world.mint_native(&alice, Amount::new(10)).unwrap();

        let out = world.call(&alice, &bob, Amount::new(4), b"ignored").unwrap();
        assert!(out.is_empty());
        assert_eq!(world.native_balance(&alice), Amount::new(6));
        assert_eq!(world.native_balance(&bob), Amount::new(4));
    }

    #[test]
    fn insufficient_value_fails_without_effect() {
        let mut world = World::new();
        let (alice, bob) = (addr("alice"), addr("bob"));
        world.mint_native(&alice, Amount::new(1)).unwrap();

        let err = world.call(&alice, &bob, Amount::new(2), &[]).unwrap_err();
        assert_eq!(
            err,
            CallError::InsufficientBalance {
                needed: 2,
                available: 1
            }
        );
        assert_eq!(world.native_balance(&alice), Amount::new(1));
        assert_eq!(world.native_balance(&bob), Amount::ZERO);
    }

    #[test]
    fn successful_call_keeps_contract_state_and_logs() {
        let mut world = World::new();
        let counter = addr("counter");
        world.deploy(counter, Counter::default()).unwrap();

        let out = world.call(&addr("alice"), &counter, Amount::ZERO, b"hi").unwrap();
        assert_eq!(out, b"hi");
        assert_eq!(world.contract::<Counter>(&counter).unwrap().hits, 1);
        assert_eq!(world.logs_named(&counter, "Hit").count(), 1);
        assert_eq!(world.logs()[0].decode::<u32>().unwrap(), 1);
    }

    #[test]
    fn reverted_call_rolls_back_value_state_and_logs() {
        let mut world = World::new();
        let alice = addr("alice");
        let counter = addr("counter");
        world.mint_native(&alice, Amount::new(5)).unwrap();
        world.deploy(counter, Counter::default()).unwrap();

        let err = world.call(&alice, &counter, Amount::new(5), &[]).unwrap_err();
        assert_eq!(err, CallError::revert("empty payload"));
        assert_eq!(world.native_balance(&alice), Amount::new(5));
        assert_eq!(world.native_balance(&counter), Amount::ZERO);
        assert_eq!(world.contract::<Counter>(&counter).unwrap().hits, 0);
        assert!(world.logs().is_empty());
    }

    #[test]
    fn reentrant_call_is_refused() {
        let mut world = World::new();
        let target = addr("self-caller");
        world.deploy(target, SelfCaller).unwrap();

        let err = world.call(&addr("alice"), &target, Amount::ZERO, b"go").unwrap_err();
        assert_eq!(err, CallError::Reentrancy(target));
        // The contract is back in place after the failed frame.
        assert!(world.contract::<SelfCaller>(&target).is_some());
    }

    #[test]
    fn nested_failure_reverts_outer_frame() {
        let mut world = World::new();
        let relay = addr("relay");
        let counter = addr("counter");
        world.deploy(relay, Relay { next: counter }).unwrap();
        world.deploy(counter, Counter::default()).unwrap();

        assert!(world.call(&addr("alice"), &relay, Amount::ZERO, &[]).is_err());
        assert_eq!(world.contract::<Counter>(&counter).unwrap().hits, 0);

        world.call(&addr("alice"), &relay, Amount::ZERO, b"x").unwrap();
        assert_eq!(world.contract::<Counter>(&counter).unwrap().hits, 1);
    }

    #[test]
    fn caught_inner_revert_drops_only_inner_logs() {
        let mut world = World::new();
        let outer = addr("swallower");
        let counter = addr("counter");
        world.deploy(outer, Swallower { next: counter }).unwrap();
        world.deploy(counter, Counter::default()).unwrap();

        world.call(&addr("alice"), &counter, Amount::ZERO, b"x").unwrap();
        world.call(&addr("alice"), &outer, Amount::ZERO, &[]).unwrap();

        let names: Vec<&str> = world.logs().iter().map(|log| log.name.as_str()).collect();
        assert_eq!(names, ["Hit", "Before", "After"]);
        assert_eq!(world.contract::<Counter>(&counter).unwrap().hits, 1);

        let before = world.checkpoint();
        world.call(&addr("alice"), &counter, Amount::ZERO, b"y").unwrap();
        assert_eq!(world.logs().len(), 4);
        world.rollback(before);
        assert_eq!(world.logs().len(), 3);
        assert_eq!(world.contract::<Counter>(&counter).unwrap().hits, 1);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut world = World::with_max_depth(2);
        let (a, b, c) = (addr("a"), addr("b"), addr("c"));
        world.deploy(a, Relay { next: b }).unwrap();
        world.deploy(b, Relay { next: c }).unwrap();
        world.deploy(c, Counter::default()).unwrap();

        let err = world.call(&addr("alice"), &a, Amount::ZERO, b"x").unwrap_err();
        assert_eq!(err, CallError::DepthExceeded(2));
    }

    #[test]
    fn deploy_refuses_occupied_address() {
        let mut world = World::new();
        let at = addr("counter");
        world.deploy(at, Counter::default()).unwrap();
        assert_eq!(
            world.deploy(at, Counter::default()).unwrap_err(),
            CallError::AddressInUse(at)
        );
    }

    #[test]
    fn mint_overflow_is_reported() {
        let mut world = World::new();
        let alice = addr("alice");
        world.mint_native(&alice, Amount::MAX).unwrap();
        assert_eq!(
            world.mint_native(&alice, Amount::new(1)).unwrap_err(),
            CallError::BalanceOverflow(alice)
        );
    }
}
