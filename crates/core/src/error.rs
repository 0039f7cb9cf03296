//! Error types for the auction system.

use thiserror::Error;

use crate::types::{Amount, SaleStatus};

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the auction system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (invalid or inconsistent fixture data).
    #[error("Data error: {0}")]
    Data(String),

    /// No player with this id.
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    /// No team with this id.
    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    /// A bid was submitted without choosing a team.
    #[error("No team selected")]
    NoTeamSelected,

    /// Bid does not beat the current bid.
    #[error("Bid of {amount} does not exceed current bid of {current_bid}")]
    BidTooLow { amount: Amount, current_bid: Amount },

    /// Bid exceeds what the team has left.
    #[error("Bid of {amount} exceeds remaining budget of {remaining}")]
    InsufficientBudget { amount: Amount, remaining: Amount },

    /// Status change that would reverse or repeat a decision.
    #[error("Player {player} cannot go from {from} to {to}")]
    InvalidTransition {
        player: String,
        from: SaleStatus,
        to: SaleStatus,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an unknown player error.
    pub fn unknown_player(id: impl Into<String>) -> Self {
        Error::UnknownPlayer(id.into())
    }

    /// Create an unknown team error.
    pub fn unknown_team(id: impl Into<String>) -> Self {
        Error::UnknownTeam(id.into())
    }

    /// Create an invalid transition error.
    pub fn invalid_transition(
        player: impl Into<String>,
        from: SaleStatus,
        to: SaleStatus,
    ) -> Self {
        Error::InvalidTransition {
            player: player.into(),
            from,
            to,
        }
    }
}
