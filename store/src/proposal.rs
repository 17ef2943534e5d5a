//! Proposal storage trait.

use crate::StoreError;
use agora_types::{Action, Address, ProposalId};
use serde::{Deserialize, Serialize};

/// A stored proposal.
///
/// Everything except `executions` is fixed at creation and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: ProposalId,
    /// Who submitted the proposal.
    pub proposer: Address,
    /// Opaque pointer to off-chain metadata (e.g. a content-addressed URI).
    pub metadata_uri: String,
    /// Bundled calls; empty for a metadata-only proposal.
    pub actions: Vec<Action>,
    /// How many times the bundle has been executed successfully.
    pub executions: u64,
}

impl ProposalRecord {
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// Append-only proposal storage with sequential identifiers.
pub trait ProposalStore {
    /// The identifier the next appended proposal will receive.
    ///
    /// Equal to the number of proposals stored so far.
    fn next_proposal_id(&self) -> ProposalId;

    /// Append a proposal, assigning it [`next_proposal_id`](Self::next_proposal_id).
    fn append_proposal(
        &mut self,
        proposer: Address,
        metadata_uri: String,
        actions: Vec<Action>,
    ) -> Result<ProposalId, StoreError>;

    /// Get a proposal by id.
    fn get_proposal(&self, id: ProposalId) -> Result<ProposalRecord, StoreError>;

    /// Overwrite the execution counter of an existing proposal.
    fn set_execution_count(&mut self, id: ProposalId, executions: u64) -> Result<(), StoreError>;

    /// Whether `id` has been assigned.
    fn contains_proposal(&self, id: ProposalId) -> bool {
        id < self.next_proposal_id()
    }
}
