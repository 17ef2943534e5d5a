use agora_ledger::LedgerError;
use agora_runtime::CallError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuctionError {
    #[error("Current auction period has expired, auction must be settled")]
    Expired,

    #[error("Value is not higher than the current highest bid")]
    BidTooLow,

    #[error("Current auction period is still active")]
    StillActive,

    #[error("collectible ids exhausted")]
    IdsExhausted,

    #[error("transfer failed: {0}")]
    Call(#[from] CallError),

    #[error("mint failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("config error: {0}")]
    Config(String),
}
