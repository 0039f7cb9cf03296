//! Auction ledger for the cricket league player auction.
//!
//! This crate provides:
//! - Bid placement with budget checks
//! - Team budget book
//! - Sold/unsold status transitions and player edits
//! - Session summary and team standings

pub mod budget;
pub mod ledger;
pub mod summary;

pub use budget::BudgetBook;
pub use ledger::{AuctionLedger, PlayerUpdate};
pub use summary::{team_standings, AuctionSummary, TeamStanding, TopSale};
