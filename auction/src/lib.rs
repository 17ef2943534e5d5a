//! A daily English auction.
//!
//! There is always exactly one round open. Bids must beat the standing bid
//! strictly; the outbid bidder is refunded on the spot. Once the round's
//! deadline passes, anyone may settle it: the next collectible goes to the
//! highest bidder (or the fallback account if nobody bid) and a new round
//! opens immediately.

pub mod auction;
pub mod config;
pub mod error;

pub use auction::{AuctionEvent, DailyAuction};
pub use config::AuctionConfig;
pub use error::AuctionError;
