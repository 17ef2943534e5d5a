//! Scripted contracts for deploying into a test `World`.

use agora_ledger::{ReceiverCall, RECEIVER_ACK};
use agora_runtime::{codec, CallContext, CallError, Contract};
use agora_types::{Address, Amount};

/// Fails every call with a fixed reason.
#[derive(Clone, Debug)]
pub struct RevertingContract {
    reason: String,
}

impl RevertingContract {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Contract for RevertingContract {
    fn call(&mut self, _ctx: &mut CallContext<'_>, _payload: &[u8]) -> Result<Vec<u8>, CallError> {
        Err(CallError::revert(self.reason.clone()))
    }
}

/// One call seen by a [`RecordingContract`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub caller: Address,
    pub value: Amount,
    pub payload: Vec<u8>,
}

/// Accepts anything (native value included), remembers it, and answers with
/// a fixed reply.
#[derive(Clone, Debug, Default)]
pub struct RecordingContract {
    calls: Vec<RecordedCall>,
    reply: Vec<u8>,
}

impl RecordingContract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: impl Into<Vec<u8>>) -> Self {
        Self {
            calls: Vec::new(),
            reply: reply.into(),
        }
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }
}

impl Contract for RecordingContract {
    fn call(&mut self, ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        self.calls.push(RecordedCall {
            caller: ctx.caller(),
            value: ctx.value(),
            payload: payload.to_vec(),
        });
        Ok(self.reply.clone())
    }
}

/// Forwards every call to `target` with a fixed payload, propagating the
/// outcome.
///
/// Pointed at whoever called it, it attempts a reentrant call.
#[derive(Clone, Debug)]
pub struct ReentrantContract {
    target: Address,
    payload: Vec<u8>,
}

impl ReentrantContract {
    pub fn new(target: Address, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            target,
            payload: payload.into(),
        }
    }
}

impl Contract for ReentrantContract {
    fn call(&mut self, ctx: &mut CallContext<'_>, _payload: &[u8]) -> Result<Vec<u8>, CallError> {
        ctx.call(&self.target, Amount::ZERO, &self.payload)
    }
}

/// Receives collectibles by safe transfer, or refuses them.
#[derive(Clone, Debug)]
pub struct CollectibleReceiver {
    accept: bool,
    received: Vec<u64>,
}

impl CollectibleReceiver {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            received: Vec::new(),
        }
    }

    pub fn refusing() -> Self {
        Self {
            accept: false,
            received: Vec::new(),
        }
    }

    pub fn received(&self) -> &[u64] {
        &self.received
    }
}

impl Contract for CollectibleReceiver {
    fn call(&mut self, _ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        let ReceiverCall::OnCollectibleReceived { id, .. } = codec::decode::<ReceiverCall>(payload)?;
        if !self.accept {
            return Ok(Vec::new());
        }
        self.received.push(id);
        Ok(RECEIVER_ACK.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_runtime::World;

    fn addr(label: &str) -> Address {
        Address::derive(label)
    }

    #[test]
    fn recording_contract_sees_caller_value_and_payload() {
        let mut world = World::new();
        let at = addr("recorder");
        world.mint_native(&addr("alice"), Amount::new(3)).unwrap();
        world.deploy(at, RecordingContract::replying(b"ok".to_vec())).unwrap();

        let out = world.call(&addr("alice"), &at, Amount::new(3), b"ping").unwrap();
        assert_eq!(out, b"ok");
        let recorder = world.contract::<RecordingContract>(&at).unwrap();
        assert_eq!(
            recorder.calls(),
            &[RecordedCall {
                caller: addr("alice"),
                value: Amount::new(3),
                payload: b"ping".to_vec(),
            }]
        );
    }

    #[test]
    fn reverting_contract_reverts() {
        let mut world = World::new();
        let at = addr("reverter");
        world.deploy(at, RevertingContract::new("nope")).unwrap();
        assert_eq!(
            world.call(&addr("alice"), &at, Amount::ZERO, &[]),
            Err(CallError::revert("nope"))
        );
    }

    #[test]
    fn ping_pong_is_reentrant() {
        let mut world = World::new();
        let (ping, pong) = (addr("ping"), addr("pong"));
        world.deploy(ping, ReentrantContract::new(pong, Vec::new())).unwrap();
        world.deploy(pong, ReentrantContract::new(ping, Vec::new())).unwrap();

        assert_eq!(
            world.call(&addr("alice"), &ping, Amount::ZERO, &[]),
            Err(CallError::Reentrancy(ping))
        );
    }
}
