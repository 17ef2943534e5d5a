//! Ballot and tally storage trait.

use crate::StoreError;
use agora_types::{Address, Amount, Choice, ProposalId};
use serde::{Deserialize, Serialize};

/// What a voter cast on a proposal.
///
/// `weight` is fixed at cast time; later changes in the voter's balance do
/// not touch it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub choice: Choice,
    pub weight: Amount,
}

/// Per-proposal ballots and per-choice tallies.
pub trait BallotStore {
    /// The ballot `voter` cast on `proposal`, if any.
    fn get_ballot(
        &self,
        proposal: ProposalId,
        voter: &Address,
    ) -> Result<Option<BallotRecord>, StoreError>;

    /// Accumulated weight for `choice` on `proposal`; zero if nobody chose it.
    fn tally(&self, proposal: ProposalId, choice: Choice) -> Result<Amount, StoreError>;

    /// Record a ballot and add its weight to the matching tally.
    ///
    /// Both writes happen or neither does: fails with
    /// [`StoreError::Duplicate`] if `voter` already has a ballot on
    /// `proposal`, and with [`StoreError::Overflow`] if the tally would
    /// overflow. Returns the new tally.
    fn record_ballot(
        &mut self,
        proposal: ProposalId,
        voter: &Address,
        ballot: BallotRecord,
    ) -> Result<Amount, StoreError>;

    /// Number of ballots cast on `proposal`.
    fn ballot_count(&self, proposal: ProposalId) -> Result<u64, StoreError>;

    fn has_ballot(&self, proposal: ProposalId, voter: &Address) -> Result<bool, StoreError> {
        Ok(self.get_ballot(proposal, voter)?.is_some())
    }
}
