//! The auction state machine.

use agora_ledger::CollectibleRegistry;
use agora_runtime::Invoker;
use agora_types::{Address, Amount, Timestamp};
use agora_utils::format_duration;
use serde::{Deserialize, Serialize};

use crate::{AuctionConfig, AuctionError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionEvent {
    Bid { bidder: Address, amount: Amount },
    Refund { amount: Amount, to: Address },
    Mint { id: u64, to: Address },
}

/// One standing bid slot, a rolling deadline, and the collectibles minted so
/// far.
///
/// Bids are escrowed in the auction's own account; winning bids stay there
/// after settlement.
#[derive(Clone, Debug)]
pub struct DailyAuction {
    address: Address,
    fallback: Address,
    highest_bidder: Address,
    highest_bid: Amount,
    deadline: Timestamp,
    next_token_id: u64,
    collectibles: CollectibleRegistry,
    config: AuctionConfig,
}

impl DailyAuction {
    /// Open the first round at `now`.
    pub fn new(address: Address, fallback: Address, now: Timestamp, config: AuctionConfig) -> Self {
        Self {
            address,
            fallback,
            highest_bidder: fallback,
            highest_bid: Amount::ZERO,
            deadline: now.plus_secs(config.round_secs),
            next_token_id: 1,
            collectibles: CollectibleRegistry::new(),
            config,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn fallback(&self) -> Address {
        self.fallback
    }

    pub fn highest_bidder(&self) -> Address {
        self.highest_bidder
    }

    pub fn highest_bid(&self) -> Amount {
        self.highest_bid
    }

    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// The id the next settlement will mint.
    pub fn token_id(&self) -> u64 {
        self.next_token_id
    }

    pub fn collectibles(&self) -> &CollectibleRegistry {
        &self.collectibles
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        now < self.deadline
    }

    /// Place a bid of `value`, paid from `bidder`'s native balance.
    ///
    /// The previous highest bid is refunded in the same step. If either
    /// transfer fails, neither happens.
    pub fn bid<I: Invoker>(
        &mut self,
        world: &mut I,
        bidder: &Address,
        value: Amount,
        now: Timestamp,
    ) -> Result<Vec<AuctionEvent>, AuctionError> {
        if !self.is_open(now) {
            return Err(AuctionError::Expired);
        }
        if value <= self.highest_bid {
            return Err(AuctionError::BidTooLow);
        }

        let snapshot = world.snapshot();
        let events = match self.escrow(world, bidder, value) {
            Ok(events) => events,
            Err(e) => {
                world.restore(snapshot);
                return Err(e);
            }
        };

        self.highest_bidder = *bidder;
        self.highest_bid = value;
        tracing::info!(
            bidder = %bidder,
            amount = %value,
            remaining = %format_duration(self.deadline.remaining_from(now)),
            "bid accepted"
        );
        Ok(events)
    }

    fn escrow<I: Invoker>(
        &self,
        world: &mut I,
        bidder: &Address,
        value: Amount,
    ) -> Result<Vec<AuctionEvent>, AuctionError> {
        world.invoke(bidder, &self.address, value, &[])?;
        let mut events = vec![AuctionEvent::Bid {
            bidder: *bidder,
            amount: value,
        }];

        if !self.highest_bid.is_zero() {
            world.invoke(&self.address, &self.highest_bidder, self.highest_bid, &[])?;
            tracing::debug!(to = %self.highest_bidder, amount = %self.highest_bid, "outbid refund");
            events.push(AuctionEvent::Refund {
                amount: self.highest_bid,
                to: self.highest_bidder,
            });
        }
        Ok(events)
    }

    /// Close the expired round and open the next one at `now`.
    pub fn settle(&mut self, now: Timestamp) -> Result<AuctionEvent, AuctionError> {
        if self.is_open(now) {
            return Err(AuctionError::StillActive);
        }
        let id = self.next_token_id;
        let following = id.checked_add(1).ok_or(AuctionError::IdsExhausted)?;
        let winner = self.highest_bidder;
        self.collectibles.mint(&winner, id)?;

        tracing::info!(
            id,
            winner = %winner,
            price = %self.highest_bid,
            overdue = %format_duration(self.deadline.elapsed_since(now)),
            "auction settled"
        );
        self.next_token_id = following;
        self.highest_bidder = self.fallback;
        self.highest_bid = Amount::ZERO;
        self.deadline = now.plus_secs(self.config.round_secs);
        Ok(AuctionEvent::Mint { id, to: winner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_runtime::World;

    fn addr(label: &str) -> Address {
        Address::derive(label)
    }

    fn auction() -> DailyAuction {
        DailyAuction::new(
            addr("auction"),
            addr("fallback"),
            Timestamp::new(1_000),
            AuctionConfig::default(),
        )
    }

    #[test]
    fn starts_with_fallback_and_one_day_deadline() {
        let a = auction();
        assert_eq!(a.highest_bidder(), addr("fallback"));
        assert_eq!(a.highest_bid(), Amount::ZERO);
        assert_eq!(a.deadline(), Timestamp::new(87_400));
        assert_eq!(a.token_id(), 1);
    }

    #[test]
    fn zero_bid_is_too_low() {
        let mut a = auction();
        let mut world = World::new();
        assert!(matches!(
            a.bid(&mut world, &addr("b"), Amount::ZERO, Timestamp::new(1_000)),
            Err(AuctionError::BidTooLow)
        ));
    }

    #[test]
    fn unfunded_bid_changes_nothing() {
        let mut a = auction();
        let mut world = World::new();
        let err = a
            .bid(&mut world, &addr("b"), Amount::new(5), Timestamp::new(1_000))
            .unwrap_err();
        assert!(matches!(err, AuctionError::Call(_)));
        assert_eq!(a.highest_bidder(), addr("fallback"));
        assert_eq!(world.native_balance(&a.address()), Amount::ZERO);
    }

    #[test]
    fn settle_at_deadline_is_allowed() {
        let mut a = auction();
        assert!(matches!(
            a.settle(Timestamp::new(87_399)),
            Err(AuctionError::StillActive)
        ));
        a.settle(Timestamp::new(87_400)).unwrap();
        assert_eq!(a.deadline(), Timestamp::new(87_400 + 86_400));
    }
}
