//! The governance engine: proposals, ballots and execution behind one owner.

use agora_ledger::VoteLedger;
use agora_runtime::Invoker;
use agora_store::{
    BallotRecord, BallotStore, MemoryBallotStore, MemoryProposalStore, ProposalRecord,
    ProposalStore, StoreError,
};
use agora_types::{Action, Address, Amount, Choice, ProposalId};

use crate::{
    ActionExecutor, BallotBox, EventBus, ExecutionMode, ExecutionPolicy, ExecutionReceipt,
    GovernanceConfig, GovernanceError, GovernanceEvent, Permissionless,
};

/// Owns the proposal list and the ballot box, and is the only thing that
/// writes to either.
///
/// Mutating operations take `&mut self`, so they are serialized by whoever
/// holds the engine. Contracts running inside an execution have no handle to
/// it and cannot re-enter.
pub struct GovernanceEngine<P = MemoryProposalStore, B = MemoryBallotStore> {
    proposals: P,
    ballots: BallotBox<B>,
    executor: ActionExecutor,
    policy: Box<dyn ExecutionPolicy>,
    mode: ExecutionMode,
    events: EventBus,
}

impl GovernanceEngine {
    /// An engine with fresh in-memory stores, executing from `address`.
    pub fn with_memory_store(address: Address) -> Self {
        Self::new(
            address,
            MemoryProposalStore::new(),
            MemoryBallotStore::new(),
        )
    }
}

impl<P: ProposalStore, B: BallotStore> GovernanceEngine<P, B> {
    /// Permissionless, repeatable execution; see [`with_policy`](Self::with_policy)
    /// and [`with_mode`](Self::with_mode).
    pub fn new(address: Address, proposals: P, ballots: B) -> Self {
        Self {
            proposals,
            ballots: BallotBox::new(ballots),
            executor: ActionExecutor::new(address),
            policy: Box::new(Permissionless),
            mode: ExecutionMode::default(),
            events: EventBus::new(),
        }
    }

    pub fn with_policy(mut self, policy: impl ExecutionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn configure(self, config: &GovernanceConfig) -> Self {
        self.with_mode(config.execution)
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// The account the engine executes from and holds its treasury in.
    pub fn address(&self) -> Address {
        self.executor.address()
    }

    pub fn executor(&self) -> &ActionExecutor {
        &self.executor
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    // ── Proposals ───────────────────────────────────────────────────────

    /// Store a new proposal and return its id.
    ///
    /// Actions are kept verbatim; an empty list makes a metadata-only
    /// proposal.
    pub fn create_proposal(
        &mut self,
        proposer: &Address,
        actions: Vec<Action>,
        metadata_uri: impl Into<String>,
    ) -> Result<ProposalId, GovernanceError> {
        let metadata_uri = metadata_uri.into();
        let action_count = actions.len();
        let id = self
            .proposals
            .append_proposal(*proposer, metadata_uri.clone(), actions)?;

        tracing::info!(
            proposal = %id,
            proposer = %proposer,
            actions = action_count,
            uri = %metadata_uri,
            "proposal created"
        );
        self.events.emit(&GovernanceEvent::ProposalCreated {
            id,
            proposer: *proposer,
            metadata_uri,
            actions: action_count,
        });
        Ok(id)
    }

    pub fn create_metadata_proposal(
        &mut self,
        proposer: &Address,
        metadata_uri: impl Into<String>,
    ) -> Result<ProposalId, GovernanceError> {
        self.create_proposal(proposer, Vec::new(), metadata_uri)
    }

    /// The id the next proposal will get, which is also the number of
    /// proposals created so far.
    pub fn proposal_id(&self) -> ProposalId {
        self.proposals.next_proposal_id()
    }

    pub fn proposal(&self, id: ProposalId) -> Result<ProposalRecord, GovernanceError> {
        self.proposals.get_proposal(id).map_err(|e| match e {
            StoreError::NotFound(_) => GovernanceError::UnknownProposal(id),
            other => other.into(),
        })
    }

    pub fn proposal_metadata(&self, id: ProposalId) -> Result<String, GovernanceError> {
        Ok(self.proposal(id)?.metadata_uri)
    }

    pub fn proposal_actions(&self, id: ProposalId) -> Result<Vec<Action>, GovernanceError> {
        Ok(self.proposal(id)?.actions)
    }

    pub fn execution_count(&self, id: ProposalId) -> Result<u64, GovernanceError> {
        Ok(self.proposal(id)?.executions)
    }

    fn ensure_exists(&self, id: ProposalId) -> Result<(), GovernanceError> {
        if self.proposals.contains_proposal(id) {
            Ok(())
        } else {
            Err(GovernanceError::UnknownProposal(id))
        }
    }

    // ── Voting ──────────────────────────────────────────────────────────

    /// Cast `voter`'s ballot with its current weight in `ledger`.
    ///
    /// The weight is whatever the ledger reports right now. A zero weight is
    /// accepted and still uses up the voter's one ballot on `id`.
    pub fn vote_proposal(
        &mut self,
        ledger: &impl VoteLedger,
        voter: &Address,
        id: ProposalId,
        choice: Choice,
    ) -> Result<(), GovernanceError> {
        self.ensure_exists(id)?;
        let weight = ledger.weight(voter);
        let tally = self.ballots.cast(id, voter, choice, weight)?;

        tracing::info!(
            proposal = %id,
            voter = %voter,
            choice = %choice,
            weight = %weight,
            tally = %tally,
            "vote cast"
        );
        self.events.emit(&GovernanceEvent::VoteCast {
            id,
            voter: *voter,
            choice,
            weight,
        });
        Ok(())
    }

    /// Accumulated weight for `choice` on `id`; zero for ids never created.
    pub fn get_votes(&self, id: ProposalId, choice: Choice) -> Result<Amount, GovernanceError> {
        self.ballots.votes(id, choice)
    }

    pub fn has_voted(&self, account: &Address, id: ProposalId) -> Result<bool, GovernanceError> {
        self.ballots.has_voted(account, id)
    }

    /// The choice and weight `account` recorded on `id`, if it voted.
    pub fn ballot(
        &self,
        account: &Address,
        id: ProposalId,
    ) -> Result<Option<BallotRecord>, GovernanceError> {
        self.ballots.ballot(account, id)
    }

    pub fn ballot_count(&self, id: ProposalId) -> Result<u64, GovernanceError> {
        self.ballots.ballot_count(id)
    }

    // ── Execution ───────────────────────────────────────────────────────

    /// Run proposal `id`'s bundle from the engine's address.
    ///
    /// The execution counter is bumped before any call goes out and put back
    /// if the batch fails, so a failed execution leaves no trace.
    pub fn execute_proposal<I: Invoker>(
        &mut self,
        world: &mut I,
        caller: &Address,
        id: ProposalId,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let record = self.proposal(id)?;
        self.policy.authorize(caller, &record)?;
        if self.mode == ExecutionMode::Once && record.executions > 0 {
            return Err(GovernanceError::AlreadyExecuted(id));
        }

        let executions = record
            .executions
            .checked_add(1)
            .ok_or(GovernanceError::Overflow)?;
        self.proposals.set_execution_count(id, executions)?;

        let receipt = match self.executor.execute_actions(world, &record.actions) {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(proposal = %id, caller = %caller, error = %e, "execution failed");
                self.proposals.set_execution_count(id, record.executions)?;
                return Err(e);
            }
        };

        tracing::info!(
            proposal = %id,
            caller = %caller,
            calls = receipt.calls(),
            executions,
            "proposal executed"
        );
        self.events.emit(&GovernanceEvent::ProposalExecuted {
            id,
            caller: *caller,
            calls: receipt.calls(),
            executions,
        });
        Ok(receipt)
    }
}
