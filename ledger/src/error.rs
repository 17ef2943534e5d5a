use agora_runtime::CallError;
use agora_types::Address;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Sender does not have sufficient balance to transfer")]
    InsufficientBalance,

    #[error("Spender does not have sufficient allowance to transfer")]
    InsufficientAllowance,

    #[error("Owner does not have sufficient balance to transfer")]
    OwnerInsufficientBalance,

    #[error("total supply overflow")]
    SupplyOverflow,

    #[error("balance overflow for {0}")]
    BalanceOverflow(Address),

    #[error("Unauthorized approver")]
    UnauthorizedApprover,

    #[error("Unauthorized sender")]
    UnauthorizedSender,

    #[error("From address is not the owner of collectible {0}")]
    NotOwner(u64),

    #[error("collectible {0} does not exist")]
    UnknownCollectible(u64),

    #[error("collectible {0} already exists")]
    CollectibleExists(u64),

    #[error("Recipient address does not handle collectibles")]
    UnsafeRecipient,
}

impl From<LedgerError> for CallError {
    fn from(e: LedgerError) -> Self {
        CallError::Reverted(e.to_string())
    }
}
