//! Call payloads understood by the deployed ledgers.
//!
//! Payloads are bincode-encoded with [`agora_runtime::codec::encode`]; the
//! caller of a frame plays the role of the message sender.

use agora_runtime::{codec, CallError};
use agora_types::{Action, Address, Amount};
use serde::{Deserialize, Serialize};

/// Reply a collectible receiver must return from
/// [`ReceiverCall::OnCollectibleReceived`] to accept a safe transfer.
pub const RECEIVER_ACK: &[u8] = b"agora.collectible.received";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenCall {
    Transfer { to: Address, amount: Amount },
    Approve { spender: Address, amount: Amount },
    TransferFrom { from: Address, to: Address, amount: Amount },
    BalanceOf { owner: Address },
    Allowance { owner: Address, spender: Address },
    TotalSupply,
}

impl TokenCall {
    pub fn encode(&self) -> Result<Vec<u8>, CallError> {
        codec::encode(self)
    }

    /// An action calling `token` with this payload and no native value.
    pub fn to_action(&self, token: Address) -> Result<Action, CallError> {
        Ok(Action::new(token, Amount::ZERO, self.encode()?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleCall {
    TransferFrom { from: Address, to: Address, id: u64 },
    SafeTransferFrom { from: Address, to: Address, id: u64 },
    Approve { spender: Address, id: u64 },
    SetApprovalForAll { operator: Address, approved: bool },
    BalanceOf { owner: Address },
    OwnerOf { id: u64 },
    GetApproved { id: u64 },
    IsApprovedForAll { owner: Address, operator: Address },
}

impl CollectibleCall {
    pub fn encode(&self) -> Result<Vec<u8>, CallError> {
        codec::encode(self)
    }
}

/// Hook invoked on a contract that receives a collectible by safe transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiverCall {
    OnCollectibleReceived {
        operator: Address,
        from: Address,
        id: u64,
    },
}

impl ReceiverCall {
    pub fn encode(&self) -> Result<Vec<u8>, CallError> {
        codec::encode(self)
    }
}
