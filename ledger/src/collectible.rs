//! Collectible registry: uniquely numbered items, each with one owner.

use std::collections::{BTreeMap, BTreeSet};

use agora_runtime::{codec, CallContext, CallError, Contract};
use agora_types::{Address, Amount};
use serde::{Deserialize, Serialize};

use crate::{CollectibleCall, LedgerError, ReceiverCall, RECEIVER_ACK};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleEvent {
    Transfer {
        from: Address,
        to: Address,
        id: u64,
    },
    Approval {
        owner: Address,
        approved: Address,
        id: u64,
    },
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
}

impl CollectibleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::ApprovalForAll { .. } => "ApprovalForAll",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectibleRegistry {
    owners: BTreeMap<u64, Address>,
    balances: BTreeMap<Address, u64>,
    approvals: BTreeMap<u64, Address>,
    operators: BTreeSet<(Address, Address)>,
}

impl CollectibleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with ids `1..=count` minted to `owner`.
    pub fn with_initial_supply(owner: Address, count: u64) -> Result<Self, LedgerError> {
        let mut registry = Self::new();
        for id in 1..=count {
            registry.mint(&owner, id)?;
        }
        Ok(registry)
    }

    pub fn mint(&mut self, to: &Address, id: u64) -> Result<CollectibleEvent, LedgerError> {
        if self.owners.contains_key(&id) {
            return Err(LedgerError::CollectibleExists(id));
        }
        let balance = self
            .balance_of(to)
            .checked_add(1)
            .ok_or(LedgerError::BalanceOverflow(*to))?;
        self.balances.insert(*to, balance);
        self.owners.insert(id, *to);
        Ok(CollectibleEvent::Transfer {
            from: Address::ZERO,
            to: *to,
            id,
        })
    }

    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    pub fn owner_of(&self, id: u64) -> Result<Address, LedgerError> {
        self.owners
            .get(&id)
            .copied()
            .ok_or(LedgerError::UnknownCollectible(id))
    }

    pub fn get_approved(&self, id: u64) -> Option<Address> {
        self.approvals.get(&id).copied()
    }

    pub fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operators.contains(&(*owner, *operator))
    }

    /// Let `spender` move item `id`. Only the owner or one of its operators
    /// may approve.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        id: u64,
    ) -> Result<CollectibleEvent, LedgerError> {
        let owner = self.owner_of(id)?;
        if *caller != owner && !self.is_approved_for_all(&owner, caller) {
            return Err(LedgerError::UnauthorizedApprover);
        }
        self.approvals.insert(id, *spender);
        Ok(CollectibleEvent::Approval {
            owner,
            approved: *spender,
            id,
        })
    }

    pub fn set_approval_for_all(
        &mut self,
        owner: &Address,
        operator: &Address,
        approved: bool,
    ) -> CollectibleEvent {
        if approved {
            self.operators.insert((*owner, *operator));
        } else {
            self.operators.remove(&(*owner, *operator));
        }
        CollectibleEvent::ApprovalForAll {
            owner: *owner,
            operator: *operator,
            approved,
        }
    }

    /// Move item `id` from `from` to `to`, clearing its approval.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        id: u64,
    ) -> Result<CollectibleEvent, LedgerError> {
        let owner = self.owner_of(id)?;
        let authorized = *caller == owner
            || self.get_approved(id) == Some(*caller)
            || self.is_approved_for_all(&owner, caller);
        if !authorized {
            return Err(LedgerError::UnauthorizedSender);
        }
        if *from != owner {
            return Err(LedgerError::NotOwner(id));
        }

        if from != to {
            let credited = self
                .balance_of(to)
                .checked_add(1)
                .ok_or(LedgerError::BalanceOverflow(*to))?;
            let debited = self.balance_of(from).saturating_sub(1);
            self.balances.insert(*from, debited);
            self.balances.insert(*to, credited);
            self.owners.insert(id, *to);
        }
        self.approvals.remove(&id);
        Ok(CollectibleEvent::Transfer {
            from: *from,
            to: *to,
            id,
        })
    }
}

impl Contract for CollectibleRegistry {
    fn call(&mut self, ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        ctx.reject_value()?;
        let sender = ctx.caller();
        let event = match codec::decode::<CollectibleCall>(payload)? {
            CollectibleCall::TransferFrom { from, to, id } => {
                self.transfer_from(&sender, &from, &to, id)?
            }
            CollectibleCall::SafeTransferFrom { from, to, id } => {
                let event = self.transfer_from(&sender, &from, &to, id)?;
                if ctx.is_contract(&to) {
                    let hook = ReceiverCall::OnCollectibleReceived {
                        operator: sender,
                        from,
                        id,
                    };
                    let reply = ctx.call(&to, Amount::ZERO, &hook.encode()?);
                    let accepted = matches!(&reply, Ok(bytes) if bytes.as_slice() == RECEIVER_ACK);
                    if !accepted {
                        return Err(LedgerError::UnsafeRecipient.into());
                    }
                }
                event
            }
            CollectibleCall::Approve { spender, id } => self.approve(&sender, &spender, id)?,
            CollectibleCall::SetApprovalForAll { operator, approved } => {
                self.set_approval_for_all(&sender, &operator, approved)
            }
            CollectibleCall::BalanceOf { owner } => return codec::encode(&self.balance_of(&owner)),
            CollectibleCall::OwnerOf { id } => return codec::encode(&self.owner_of(id)?),
            CollectibleCall::GetApproved { id } => return codec::encode(&self.get_approved(id)),
            CollectibleCall::IsApprovedForAll { owner, operator } => {
                return codec::encode(&self.is_approved_for_all(&owner, &operator))
            }
        };
        ctx.emit(event.name(), &event)?;
        codec::encode(&true)
    }
}
