//! Core data types for the player auction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Whole rupees.
pub type Amount = u64;

/// Team identifier (e.g. "mr-titans").
pub type TeamId = String;

/// Player identifier (e.g. "player-007").
pub type PlayerId = String;

/// Playing role of an auctioned player.
///
/// Serialized as its label; deserialized with the same lenient rule as
/// [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl PlayerRole {
    /// Display label as used on the auction sheets.
    pub fn label(self) -> &'static str {
        match self {
            PlayerRole::Batsman => "Batsman",
            PlayerRole::Bowler => "Bowler",
            PlayerRole::AllRounder => "All-rounder",
            PlayerRole::WicketKeeper => "Wicket-keeper",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayerRole {
    type Err = Error;

    /// Accepts "All Rounder", "all-rounder", "ALLROUNDER" and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "batsman" | "batter" => Ok(PlayerRole::Batsman),
            "bowler" => Ok(PlayerRole::Bowler),
            "allrounder" => Ok(PlayerRole::AllRounder),
            "wicketkeeper" | "keeper" => Ok(PlayerRole::WicketKeeper),
            _ => Err(Error::data(format!("unknown player role '{}'", s))),
        }
    }
}

impl Serialize for PlayerRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PlayerRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sale status of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// Still under the hammer.
    Available,
    /// Bought by a team.
    Sold,
    /// Passed over, no team bought.
    Unsold,
}

impl SaleStatus {
    /// Only `Available -> Sold` and `Available -> Unsold` are legal.
    #[inline]
    pub fn can_transition_to(self, next: SaleStatus) -> bool {
        matches!(
            (self, next),
            (SaleStatus::Available, SaleStatus::Sold) | (SaleStatus::Available, SaleStatus::Unsold)
        )
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaleStatus::Available => "available",
            SaleStatus::Sold => "sold",
            SaleStatus::Unsold => "unsold",
        };
        f.write_str(s)
    }
}

/// Career numbers shown on the player card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
    pub catches: u32,
    pub strike_rate: f64,
    pub economy: f64,
    pub average: f64,
}

/// A player in the auction pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionPlayer {
    /// Unique player id.
    pub id: PlayerId,
    /// Full name.
    pub name: String,
    /// Playing role.
    pub role: PlayerRole,
    /// Age in years (0 when unknown).
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub batting_style: String,
    #[serde(default)]
    pub bowling_style: String,
    /// Opening price.
    pub base_price: Amount,
    /// Highest bid so far (0 = no bids).
    #[serde(default)]
    pub current_bid: Amount,
    /// Sale status.
    pub status: SaleStatus,
    /// Winning team, set once sold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_to: Option<TeamId>,
    /// Winning price, set once sold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<Amount>,
    /// Photo path.
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub stats: PlayerStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Marquee player flag from the auction deck.
    #[serde(default)]
    pub icon_player: bool,
}

impl AuctionPlayer {
    /// Create an available player with no bids.
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        role: PlayerRole,
        base_price: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            age: 0,
            nationality: String::new(),
            batting_style: String::new(),
            bowling_style: String::new(),
            base_price,
            current_bid: 0,
            status: SaleStatus::Available,
            sold_to: None,
            sold_price: None,
            photo: String::new(),
            stats: PlayerStats::default(),
            previous_team: None,
            mobile: None,
            icon_player: false,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == SaleStatus::Available
    }

    /// Whether any bid has been placed.
    #[inline]
    pub fn has_bids(&self) -> bool {
        self.current_bid > 0
    }
}

/// Per-team spending ledger.
///
/// `spent_amount + remaining_budget == total_budget` holds for every value
/// produced by this crate and by `auction-ledger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBudget {
    pub team_id: TeamId,
    pub team_name: String,
    /// Fixed cap.
    pub total_budget: Amount,
    /// Spent so far.
    pub spent_amount: Amount,
    /// Left to spend.
    pub remaining_budget: Amount,
    /// Players acquired.
    pub players_bought: u32,
}

impl TeamBudget {
    /// A fresh budget with nothing spent.
    pub fn new(
        team_id: impl Into<TeamId>,
        team_name: impl Into<String>,
        total_budget: Amount,
    ) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            total_budget,
            spent_amount: 0,
            remaining_budget: total_budget,
            players_bought: 0,
        }
    }

    /// A budget carried over from an earlier round of the auction.
    pub fn with_spend(
        team_id: impl Into<TeamId>,
        team_name: impl Into<String>,
        total_budget: Amount,
        spent_amount: Amount,
        players_bought: u32,
    ) -> Result<Self, Error> {
        let team_id = team_id.into();
        let remaining_budget = total_budget.checked_sub(spent_amount).ok_or_else(|| {
            Error::data(format!(
                "team {} spent {} of a {} budget",
                team_id, spent_amount, total_budget
            ))
        })?;
        Ok(Self {
            team_id,
            team_name: team_name.into(),
            total_budget,
            spent_amount,
            remaining_budget,
            players_bought,
        })
    }

    /// Fraction of the cap spent, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        if self.total_budget > 0 {
            self.spent_amount as f64 / self.total_budget as f64
        } else {
            0.0
        }
    }

    /// Check `spent + remaining == total` without overflow.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.spent_amount
            .checked_add(self.remaining_budget)
            .map(|sum| sum == self.total_budget)
            .unwrap_or(false)
    }
}

/// An accepted bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRecord {
    /// Position in the bid log, starting at 1.
    pub seq: u64,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
    pub is_winning: bool,
}

/// Overall state of an auction session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No player has left the pool yet.
    Upcoming,
    /// Some players decided, some still available.
    Live,
    /// Every player is sold or unsold.
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Upcoming => "upcoming",
            SessionStatus::Live => "live",
            SessionStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}
