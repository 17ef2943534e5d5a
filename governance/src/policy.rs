//! Who may trigger execution of a proposal.

use agora_access::Ownable;
use agora_store::ProposalRecord;
use agora_types::Address;

use crate::GovernanceError;

/// Decides whether `caller` may execute `proposal`.
///
/// Consulted by the engine before anything is written; the executor itself
/// never checks authorization.
pub trait ExecutionPolicy {
    fn authorize(&self, caller: &Address, proposal: &ProposalRecord) -> Result<(), GovernanceError>;
}

/// Anyone may execute any proposal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Permissionless;

impl ExecutionPolicy for Permissionless {
    fn authorize(&self, _caller: &Address, _proposal: &ProposalRecord) -> Result<(), GovernanceError> {
        Ok(())
    }
}

/// Only the owner may execute.
#[derive(Clone, Debug)]
pub struct OwnerOnly {
    ownership: Ownable,
}

impl OwnerOnly {
    pub fn new(owner: Address) -> Self {
        Self {
            ownership: Ownable::new(owner),
        }
    }

    pub fn ownership(&self) -> &Ownable {
        &self.ownership
    }

    pub fn ownership_mut(&mut self) -> &mut Ownable {
        &mut self.ownership
    }
}

impl From<Ownable> for OwnerOnly {
    fn from(ownership: Ownable) -> Self {
        Self { ownership }
    }
}

impl ExecutionPolicy for OwnerOnly {
    fn authorize(&self, caller: &Address, _proposal: &ProposalRecord) -> Result<(), GovernanceError> {
        self.ownership
            .ensure_owner(caller)
            .map_err(|_| GovernanceError::Unauthorized(*caller))
    }
}

/// Only the account that created a proposal may execute it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProposerOnly;

impl ExecutionPolicy for ProposerOnly {
    fn authorize(&self, caller: &Address, proposal: &ProposalRecord) -> Result<(), GovernanceError> {
        if *caller == proposal.proposer {
            Ok(())
        } else {
            Err(GovernanceError::Unauthorized(*caller))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::ProposalId;

    fn record(proposer: Address) -> ProposalRecord {
        ProposalRecord {
            id: ProposalId::new(0),
            proposer,
            metadata_uri: "ipfs://x".into(),
            actions: Vec::new(),
            executions: 0,
        }
    }

    #[test]
    fn owner_only_follows_ownership_changes() {
        let (owner, next) = (Address::derive("owner"), Address::derive("next"));
        let mut policy = OwnerOnly::new(owner);
        let proposal = record(next);

        assert!(policy.authorize(&owner, &proposal).is_ok());
        assert!(matches!(
            policy.authorize(&next, &proposal),
            Err(GovernanceError::Unauthorized(a)) if a == next
        ));

        policy
            .ownership_mut()
            .transfer_ownership(&owner, next)
            .unwrap();
        assert!(policy.authorize(&next, &proposal).is_ok());
        assert!(policy.authorize(&owner, &proposal).is_err());
    }

    #[test]
    fn proposer_only_checks_record() {
        let proposer = Address::derive("proposer");
        let proposal = record(proposer);
        assert!(ProposerOnly.authorize(&proposer, &proposal).is_ok());
        assert!(ProposerOnly
            .authorize(&Address::derive("other"), &proposal)
            .is_err());
        assert!(Permissionless
            .authorize(&Address::derive("other"), &proposal)
            .is_ok());
    }
}
