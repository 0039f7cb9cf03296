//! Core types and configuration for the cricket league player auction.
//!
//! This crate provides shared types used across all other crates:
//! - Auction players, team budgets and bid records
//! - Configuration structures
//! - Common error types
//! - Rupee formatting

pub mod config;
pub mod error;
pub mod money;
pub mod types;

pub use config::AuctionConfig;
pub use error::{Error, Result};
pub use money::format_inr;
pub use types::*;
