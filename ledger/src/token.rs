//! Fungible token: balances, allowances, transfers.

use std::collections::BTreeMap;

use agora_runtime::{codec, CallContext, CallError, Contract};
use agora_types::{Address, Amount};
use serde::{Deserialize, Serialize};

use crate::{LedgerError, TokenCall};

/// Emitted by every successful state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
}

impl TokenEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
        }
    }
}

/// A fixed-name token with per-account balances and per-pair allowances.
///
/// Minted units appear as a transfer from [`Address::ZERO`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FungibleToken {
    name: String,
    symbol: String,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
}

impl FungibleToken {
    /// A token whose whole initial supply belongs to `holder`.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        holder: Address,
        initial_supply: Amount,
    ) -> Self {
        let mut balances = BTreeMap::new();
        if !initial_supply.is_zero() {
            balances.insert(holder, initial_supply);
        }
        Self {
            name: name.into(),
            symbol: symbol.into(),
            total_supply: initial_supply,
            balances,
            allowances: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn balance_of(&self, owner: &Address) -> Amount {
        self.balances.get(owner).copied().unwrap_or(Amount::ZERO)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    pub fn mint(&mut self, to: &Address, amount: Amount) -> Result<TokenEvent, LedgerError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow(*to))?;
        self.total_supply = supply;
        self.balances.insert(*to, balance);
        Ok(TokenEvent::Transfer {
            from: Address::ZERO,
            to: *to,
            amount,
        })
    }

    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<TokenEvent, LedgerError> {
        self.move_balance(from, to, amount, LedgerError::InsufficientBalance)?;
        Ok(TokenEvent::Transfer {
            from: *from,
            to: *to,
            amount,
        })
    }

    /// Set (not add to) the amount `spender` may move out of `owner`.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) -> TokenEvent {
        self.allowances.insert((*owner, *spender), amount);
        TokenEvent::Approval {
            owner: *owner,
            spender: *spender,
            amount,
        }
    }

    pub fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<TokenEvent, LedgerError> {
        let remaining = self
            .allowance(owner, spender)
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance)?;
        self.move_balance(owner, to, amount, LedgerError::OwnerInsufficientBalance)?;
        self.allowances.insert((*owner, *spender), remaining);
        Ok(TokenEvent::Transfer {
            from: *owner,
            to: *to,
            amount,
        })
    }

    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
        short: LedgerError,
    ) -> Result<(), LedgerError> {
        let remaining = self.balance_of(from).checked_sub(amount).ok_or(short)?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow(*to))?;
        self.balances.insert(*from, remaining);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

impl Contract for FungibleToken {
    fn call(&mut self, ctx: &mut CallContext<'_>, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        ctx.reject_value()?;
        let sender = ctx.caller();
        let event = match codec::decode::<TokenCall>(payload)? {
            TokenCall::Transfer { to, amount } => self.transfer(&sender, &to, amount)?,
            TokenCall::Approve { spender, amount } => self.approve(&sender, &spender, amount),
            TokenCall::TransferFrom { from, to, amount } => {
                self.transfer_from(&sender, &from, &to, amount)?
            }
            TokenCall::BalanceOf { owner } => return codec::encode(&self.balance_of(&owner)),
            TokenCall::Allowance { owner, spender } => {
                return codec::encode(&self.allowance(&owner, &spender))
            }
            TokenCall::TotalSupply => return codec::encode(&self.total_supply),
        };
        tracing::debug!(token = %ctx.this(), event = event.name(), "token state changed");
        ctx.emit(event.name(), &event)?;
        codec::encode(&true)
    }
}
