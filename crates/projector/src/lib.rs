//! Projector view for the cricket league player auction.
//!
//! One player at a time on the big screen, keyboard driven, sharing the
//! ledger with the list view.

pub mod bid_draft;
pub mod navigator;

pub use bid_draft::BidDraft;
pub use navigator::{Key, KeyInput, ProjectorEvent, ProjectorView, INVALID_BID_MESSAGE};
