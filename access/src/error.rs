use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Caller is not owner")]
    NotOwner,

    #[error("Caller is not pending owner")]
    NotPendingOwner,
}
