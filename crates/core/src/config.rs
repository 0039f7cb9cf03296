//! Configuration structures for the auction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Amount, PlayerRole};

/// Main configuration for an auction session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionConfig {
    /// Bidding rules.
    pub bidding: BiddingConfig,
    /// Base price rules for new rosters.
    pub pricing: PricingConfig,
    /// Team budget defaults.
    pub budget: BudgetConfig,
}

impl AuctionConfig {
    /// Parse a JSON document; absent sections keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AuctionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject settings no auction can run with.
    pub fn validate(&self) -> Result<()> {
        if self.bidding.min_increment == 0 {
            return Err(Error::config("bidding.min_increment must be positive"));
        }
        if self.budget.default_team_budget == 0 {
            return Err(Error::config("budget.default_team_budget must be positive"));
        }
        Ok(())
    }
}

/// Bidding rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiddingConfig {
    /// Step used to suggest the next bid. Acceptance only needs to beat the
    /// current bid.
    pub min_increment: Amount,
}

impl Default for BiddingConfig {
    fn default() -> Self {
        Self {
            min_increment: 1_000,
        }
    }
}

/// Base prices assigned when building a roster from the auction deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Batsmen and anything without a specific rule.
    pub default_base_price: Amount,
    /// Icon players, regardless of role.
    pub icon_base_price: Amount,
    pub all_rounder_base_price: Amount,
    pub bowler_base_price: Amount,
    pub wicket_keeper_base_price: Amount,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_base_price: 50_000,
            icon_base_price: 100_000,
            all_rounder_base_price: 75_000,
            bowler_base_price: 60_000,
            wicket_keeper_base_price: 70_000,
        }
    }
}

impl PricingConfig {
    /// Base price for a player; icon status wins over role.
    pub fn base_price(&self, role: PlayerRole, icon_player: bool) -> Amount {
        if icon_player {
            return self.icon_base_price;
        }
        match role {
            PlayerRole::AllRounder => self.all_rounder_base_price,
            PlayerRole::Bowler => self.bowler_base_price,
            PlayerRole::WicketKeeper => self.wicket_keeper_base_price,
            PlayerRole::Batsman => self.default_base_price,
        }
    }
}

/// Team budget defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Cap for teams declared without an explicit total.
    pub default_team_budget: Amount,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            default_team_budget: 500_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuctionConfig::default();
        assert_eq!(config.bidding.min_increment, 1_000);
        assert_eq!(config.budget.default_team_budget, 500_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AuctionConfig::from_json_str(r#"{"bidding": {"min_increment": 5000}}"#).unwrap();
        assert_eq!(config.bidding.min_increment, 5_000);
        assert_eq!(config.pricing, PricingConfig::default());
    }

    #[test]
    fn test_from_json_file() {
        let path =
            std::env::temp_dir().join(format!("auction-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "budget": {"default_team_budget": 750000},
                "pricing": {"icon_base_price": 150000}
            }"#,
        )
        .unwrap();
        let config = AuctionConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.budget.default_team_budget, 750_000);
        assert_eq!(config.pricing.icon_base_price, 150_000);
        assert_eq!(config.pricing.bowler_base_price, 60_000);
        assert_eq!(config.bidding, BiddingConfig::default());

        let err = AuctionConfig::from_json_file("/no/such/auction.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zero_increment_rejected() {
        let err = AuctionConfig::from_json_str(r#"{"bidding": {"min_increment": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_base_price_rules() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.base_price(PlayerRole::Bowler, true), 100_000);
        assert_eq!(pricing.base_price(PlayerRole::AllRounder, false), 75_000);
        assert_eq!(pricing.base_price(PlayerRole::Bowler, false), 60_000);
        assert_eq!(pricing.base_price(PlayerRole::WicketKeeper, false), 70_000);
        assert_eq!(pricing.base_price(PlayerRole::Batsman, false), 50_000);
    }
}
