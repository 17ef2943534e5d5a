//! Events emitted by the governance engine for subscribers.

use agora_types::{Address, Amount, Choice, ProposalId};
use serde::{Deserialize, Serialize};

/// Emitted after an operation has fully succeeded; failed operations emit
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    ProposalCreated {
        id: ProposalId,
        proposer: Address,
        metadata_uri: String,
        actions: usize,
    },
    VoteCast {
        id: ProposalId,
        voter: Address,
        choice: Choice,
        weight: Amount,
    },
    ProposalExecuted {
        id: ProposalId,
        caller: Address,
        calls: usize,
        executions: u64,
    },
}

type Listener = Box<dyn Fn(&GovernanceEvent) + Send + Sync>;

/// Synchronous fan-out to subscribed listeners, in subscription order.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &GovernanceEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
