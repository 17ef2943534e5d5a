//! Vote weight sources.

use agora_runtime::World;
use agora_types::{Address, Amount};

use crate::FungibleToken;

/// Reports an account's voting weight.
///
/// Weight is read live when a ballot is cast. Nothing is snapshotted, so
/// tokens moved to another account after voting can be voted again there.
pub trait VoteLedger {
    fn weight(&self, account: &Address) -> Amount;
}

impl VoteLedger for FungibleToken {
    fn weight(&self, account: &Address) -> Amount {
        self.balance_of(account)
    }
}

impl<T: VoteLedger + ?Sized> VoteLedger for &T {
    fn weight(&self, account: &Address) -> Amount {
        (**self).weight(account)
    }
}

/// Read-only view of a [`FungibleToken`] deployed in a [`World`].
///
/// An address that does not host a token reports zero weight for everyone.
#[derive(Clone, Copy)]
pub struct DeployedToken<'w> {
    world: &'w World,
    token: Address,
}

impl<'w> DeployedToken<'w> {
    pub fn new(world: &'w World, token: Address) -> Self {
        Self { world, token }
    }

    pub fn address(&self) -> Address {
        self.token
    }

    pub fn token(&self) -> Option<&'w FungibleToken> {
        self.world.contract::<FungibleToken>(&self.token)
    }
}

impl VoteLedger for DeployedToken<'_> {
    fn weight(&self, account: &Address) -> Amount {
        self.token()
            .map(|token| token.balance_of(account))
            .unwrap_or(Amount::ZERO)
    }
}
