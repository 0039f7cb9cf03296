//! Data ingestion for the cricket league player auction.
//!
//! This crate handles:
//! - Building auction rosters from records extracted out of the auction deck
//! - Built-in demo fixtures
//! - Loading and saving players and team budgets as JSON

pub mod fixtures;
pub mod roster;

pub use fixtures::{
    demo_budgets, demo_players, load_budgets, load_extracted, load_players, save_players,
    TeamDeclaration,
};
pub use roster::{ExtractedPlayer, RosterBuilder};
