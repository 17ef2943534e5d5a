//! In-memory store backends.
//!
//! Single-owner: mutation goes through `&mut self`, so whoever owns the
//! store serializes every write.

use std::collections::HashMap;

use agora_types::{Action, Address, Amount, Choice, ProposalId};

use crate::ballot::{BallotRecord, BallotStore};
use crate::proposal::{ProposalRecord, ProposalStore};
use crate::StoreError;

/// Proposals kept in a vector; a proposal's id is its index.
#[derive(Clone, Debug, Default)]
pub struct MemoryProposalStore {
    proposals: Vec<ProposalRecord>,
}

impl MemoryProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(id: ProposalId) -> Result<usize, StoreError> {
        usize::try_from(id.raw()).map_err(|_| StoreError::NotFound(id.to_string()))
    }
}

impl ProposalStore for MemoryProposalStore {
    fn next_proposal_id(&self) -> ProposalId {
        ProposalId::new(self.proposals.len() as u64)
    }

    fn append_proposal(
        &mut self,
        proposer: Address,
        metadata_uri: String,
        actions: Vec<Action>,
    ) -> Result<ProposalId, StoreError> {
        let id = self.next_proposal_id();
        // The counter must be able to advance past `id`.
        id.next().ok_or(StoreError::Exhausted)?;
        self.proposals.push(ProposalRecord {
            id,
            proposer,
            metadata_uri,
            actions,
            executions: 0,
        });
        Ok(id)
    }

    fn get_proposal(&self, id: ProposalId) -> Result<ProposalRecord, StoreError> {
        self.proposals
            .get(Self::index(id)?)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn set_execution_count(&mut self, id: ProposalId, executions: u64) -> Result<(), StoreError> {
        let record = self
            .proposals
            .get_mut(Self::index(id)?)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.executions = executions;
        Ok(())
    }
}

/// Ballots and tallies kept in hash maps.
#[derive(Clone, Debug, Default)]
pub struct MemoryBallotStore {
    ballots: HashMap<(ProposalId, Address), BallotRecord>,
    tallies: HashMap<(ProposalId, Choice), Amount>,
    counts: HashMap<ProposalId, u64>,
}

impl MemoryBallotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BallotStore for MemoryBallotStore {
    fn get_ballot(
        &self,
        proposal: ProposalId,
        voter: &Address,
    ) -> Result<Option<BallotRecord>, StoreError> {
        Ok(self.ballots.get(&(proposal, *voter)).copied())
    }

    fn tally(&self, proposal: ProposalId, choice: Choice) -> Result<Amount, StoreError> {
        Ok(self
            .tallies
            .get(&(proposal, choice))
            .copied()
            .unwrap_or(Amount::ZERO))
    }

    fn record_ballot(
        &mut self,
        proposal: ProposalId,
        voter: &Address,
        ballot: BallotRecord,
    ) -> Result<Amount, StoreError> {
        if self.ballots.contains_key(&(proposal, *voter)) {
            return Err(StoreError::Duplicate(format!("{voter} on {proposal}")));
        }
        let current = self.tally(proposal, ballot.choice)?;
        let updated = current.checked_add(ballot.weight).ok_or_else(|| {
            StoreError::Overflow(format!("{} tally on {proposal}", ballot.choice))
        })?;

        self.ballots.insert((proposal, *voter), ballot);
        self.tallies.insert((proposal, ballot.choice), updated);
        *self.counts.entry(proposal).or_default() += 1;
        Ok(updated)
    }

    fn ballot_count(&self, proposal: ProposalId) -> Result<u64, StoreError> {
        Ok(self.counts.get(&proposal).copied().unwrap_or(0))
    }
}
