//! Ballots and tallies.

use agora_store::{BallotRecord, BallotStore, MemoryBallotStore, StoreError};
use agora_types::{Address, Amount, Choice, ProposalId};

use crate::GovernanceError;

/// One ballot per (proposal, voter), with per-choice weight tallies.
///
/// The box does not know which proposals exist; the engine checks that
/// before casting.
#[derive(Clone, Debug, Default)]
pub struct BallotBox<B = MemoryBallotStore> {
    store: B,
}

impl<B: BallotStore> BallotBox<B> {
    pub fn new(store: B) -> Self {
        Self { store }
    }

    /// Record `voter`'s ballot and add `weight` to the `choice` tally.
    ///
    /// A zero weight still uses up the voter's ballot. Returns the new tally.
    pub fn cast(
        &mut self,
        proposal: ProposalId,
        voter: &Address,
        choice: Choice,
        weight: Amount,
    ) -> Result<Amount, GovernanceError> {
        let ballot = BallotRecord { choice, weight };
        match self.store.record_ballot(proposal, voter, ballot) {
            Ok(tally) => Ok(tally),
            Err(StoreError::Duplicate(_)) => Err(GovernanceError::AlreadyVoted {
                voter: *voter,
                proposal,
            }),
            Err(StoreError::Overflow(_)) => Err(GovernanceError::Overflow),
            Err(e) => Err(e.into()),
        }
    }

    pub fn votes(&self, proposal: ProposalId, choice: Choice) -> Result<Amount, GovernanceError> {
        Ok(self.store.tally(proposal, choice)?)
    }

    pub fn has_voted(&self, voter: &Address, proposal: ProposalId) -> Result<bool, GovernanceError> {
        Ok(self.store.has_ballot(proposal, voter)?)
    }

    pub fn ballot(
        &self,
        voter: &Address,
        proposal: ProposalId,
    ) -> Result<Option<BallotRecord>, GovernanceError> {
        Ok(self.store.get_ballot(proposal, voter)?)
    }

    pub fn ballot_count(&self, proposal: ProposalId) -> Result<u64, GovernanceError> {
        Ok(self.store.ballot_count(proposal)?)
    }
}
