//! Single-step and two-step ownership.

use agora_types::Address;
use serde::{Deserialize, Serialize};

use crate::AccessError;

/// A change of owner, `None` meaning "no owner".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnershipEvent {
    Transferred {
        previous: Option<Address>,
        new: Option<Address>,
    },
    TransferPending {
        owner: Address,
        pending: Address,
    },
}

/// Ownership that moves in one step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownable {
    owner: Option<Address>,
}

impl Ownable {
    pub fn new(owner: Address) -> Self {
        Self { owner: Some(owner) }
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    pub fn ensure_owner(&self, caller: &Address) -> Result<(), AccessError> {
        match self.owner {
            Some(owner) if owner == *caller => Ok(()),
            _ => Err(AccessError::NotOwner),
        }
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<OwnershipEvent, AccessError> {
        self.ensure_owner(caller)?;
        Ok(self.set_owner(Some(new_owner)))
    }

    /// Give up ownership for good; every guarded call fails afterwards.
    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<OwnershipEvent, AccessError> {
        self.ensure_owner(caller)?;
        Ok(self.set_owner(None))
    }

    fn set_owner(&mut self, new: Option<Address>) -> OwnershipEvent {
        let previous = std::mem::replace(&mut self.owner, new);
        tracing::info!(
            previous = ?previous,
            new = ?new,
            "ownership transferred"
        );
        OwnershipEvent::Transferred { previous, new }
    }
}

/// Ownership that must be accepted by the receiving account.
///
/// Starts with no owner and a pending owner that has to claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimableOwnership {
    inner: Ownable,
    pending: Option<Address>,
}

impl ClaimableOwnership {
    pub fn new(pending: Address) -> Self {
        Self {
            inner: Ownable { owner: None },
            pending: Some(pending),
        }
    }

    pub fn owner(&self) -> Option<Address> {
        self.inner.owner()
    }

    pub fn pending_owner(&self) -> Option<Address> {
        self.pending
    }

    pub fn ensure_owner(&self, caller: &Address) -> Result<(), AccessError> {
        self.inner.ensure_owner(caller)
    }

    pub fn claim_ownership(&mut self, caller: &Address) -> Result<OwnershipEvent, AccessError> {
        if self.pending != Some(*caller) {
            return Err(AccessError::NotPendingOwner);
        }
        self.pending = None;
        Ok(self.inner.set_owner(Some(*caller)))
    }

    /// Nominate `new_owner`; the current owner stays in charge until it claims.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<OwnershipEvent, AccessError> {
        self.inner.ensure_owner(caller)?;
        self.pending = Some(new_owner);
        tracing::info!(owner = %caller, pending = %new_owner, "ownership transfer pending");
        Ok(OwnershipEvent::TransferPending {
            owner: *caller,
            pending: new_owner,
        })
    }

    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<OwnershipEvent, AccessError> {
        let event = self.inner.renounce_ownership(caller)?;
        self.pending = None;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(label: &str) -> Address {
        Address::derive(label)
    }

    #[test]
    fn owner_can_transfer() {
        let (owner, next) = (addr("owner"), addr("next"));
        let mut own = Ownable::new(owner);
        assert_eq!(own.owner(), Some(owner));

        let event = own.transfer_ownership(&owner, next).unwrap();
        assert_eq!(
            event,
            OwnershipEvent::Transferred {
                previous: Some(owner),
                new: Some(next)
            }
        );
        assert_eq!(own.owner(), Some(next));
    }

    #[test]
    fn stranger_cannot_transfer() {
        let mut own = Ownable::new(addr("owner"));
        let err = own
            .transfer_ownership(&addr("x"), addr("x"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Caller is not owner");
        assert_eq!(own.owner(), Some(addr("owner")));
    }

    #[test]
    fn renounced_ownership_locks_everyone_out() {
        let owner = addr("owner");
        let mut own = Ownable::new(owner);
        own.renounce_ownership(&owner).unwrap();
        assert_eq!(own.owner(), None);
        assert_eq!(own.ensure_owner(&owner), Err(AccessError::NotOwner));
    }

    #[test]
    fn claim_sets_owner_and_clears_pending() {
        let owner = addr("owner");
        let mut own = ClaimableOwnership::new(owner);
        assert_eq!(own.owner(), None);
        assert_eq!(own.pending_owner(), Some(owner));

        let err = own.claim_ownership(&addr("x")).unwrap_err();
        assert_eq!(err.to_string(), "Caller is not pending owner");

        let event = own.claim_ownership(&owner).unwrap();
        assert_eq!(
            event,
            OwnershipEvent::Transferred {
                previous: None,
                new: Some(owner)
            }
        );
        assert_eq!(own.owner(), Some(owner));
        assert_eq!(own.pending_owner(), None);
    }

    #[test]
    fn transfer_only_nominates() {
        let (owner, next) = (addr("owner"), addr("next"));
        let mut own = ClaimableOwnership::new(owner);
        own.claim_ownership(&owner).unwrap();

        assert_eq!(
            own.transfer_ownership(&next, next),
            Err(AccessError::NotOwner)
        );
        let event = own.transfer_ownership(&owner, next).unwrap();
        assert_eq!(
            event,
            OwnershipEvent::TransferPending {
                owner,
                pending: next
            }
        );
        assert_eq!(own.owner(), Some(owner));
        assert_eq!(own.pending_owner(), Some(next));

        own.claim_ownership(&next).unwrap();
        assert_eq!(own.owner(), Some(next));
    }

    #[test]
    fn renounce_clears_pending_too() {
        let (owner, next) = (addr("owner"), addr("next"));
        let mut own = ClaimableOwnership::new(owner);
        own.claim_ownership(&owner).unwrap();
        own.transfer_ownership(&owner, next).unwrap();

        own.renounce_ownership(&owner).unwrap();
        assert_eq!(own.owner(), None);
        assert_eq!(own.pending_owner(), None);
        assert!(own.claim_ownership(&next).is_err());
    }
}
