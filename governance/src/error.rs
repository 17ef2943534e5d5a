use agora_access::AccessError;
use agora_runtime::CallError;
use agora_store::StoreError;
use agora_types::{Address, Amount, ProposalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} does not exist")]
    UnknownProposal(ProposalId),

    #[error("Address has already voted for this proposal")]
    AlreadyVoted { voter: Address, proposal: ProposalId },

    #[error("batch length mismatch: {targets} targets, {values} values, {payloads} payloads")]
    LengthMismatch {
        targets: usize,
        values: usize,
        payloads: usize,
    },

    #[error("action {index} reverted: {reason}")]
    ActionReverted { index: usize, reason: CallError },

    #[error("insufficient funds: batch needs {needed}, only {available} available")]
    InsufficientFunds { needed: Amount, available: Amount },

    #[error("{0} may not execute this proposal")]
    Unauthorized(Address),

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("amount overflow")]
    Overflow,

    #[error("could not move batch funds: {0}")]
    Funding(CallError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("config error: {0}")]
    Config(String),
}
