use agora_types::Address;
use thiserror::Error;

/// Why a call frame failed. Any of these rolls the frame back.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CallError {
    /// The callee rejected the call.
    #[error("{0}")]
    Reverted(String),

    #[error("insufficient native balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("native balance overflow for {0}")]
    BalanceOverflow(Address),

    #[error("reentrant call into {0}")]
    Reentrancy(Address),

    #[error("call depth limit of {0} exceeded")]
    DepthExceeded(usize),

    #[error("malformed call data: {0}")]
    MalformedCall(String),

    #[error("address {0} already hosts a contract")]
    AddressInUse(Address),
}

impl CallError {
    pub fn revert(reason: impl Into<String>) -> Self {
        Self::Reverted(reason.into())
    }
}
