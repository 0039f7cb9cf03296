//! Roster building from records extracted out of the auction deck.
//!
//! Each slide of the deck describes one player. The extracted fields are all
//! strings; this module turns them into auction players with ids, base
//! prices and photo paths.

use auction_core::config::PricingConfig;
use auction_core::{AuctionPlayer, Error, PlayerRole, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Directory the player photos are published under.
pub const PHOTO_DIR: &str = "/src/assets/players";

/// One player record as extracted from the auction deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPlayer {
    pub slide_number: u32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_age")]
    pub age: String,
    #[serde(default = "default_mobile")]
    pub mobile: String,
    /// "Yes" or "No".
    #[serde(rename = "iconPlayer", default = "default_icon")]
    pub icon_player: String,
    #[serde(default)]
    pub source: String,
}

fn default_name() -> String {
    "Unknown Player".to_string()
}

fn default_category() -> String {
    "Batsman".to_string()
}

fn default_age() -> String {
    "25".to_string()
}

fn default_mobile() -> String {
    "0000000000".to_string()
}

fn default_icon() -> String {
    "No".to_string()
}

impl ExtractedPlayer {
    /// Whether the deck flags this player as an icon player.
    pub fn is_icon(&self) -> bool {
        self.icon_player.trim().eq_ignore_ascii_case("yes")
    }
}

/// Make a name safe for a file name: drop punctuation, collapse runs of
/// spaces and dashes into one dash, trim dashes at the ends.
pub fn clean_name_for_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.chars() {
        if c == '-' || c.is_whitespace() {
            in_separator = true;
        } else {
            if in_separator && !out.is_empty() {
                out.push('-');
            }
            in_separator = false;
            out.push(c);
        }
    }
    out
}

/// Builds auction players from extracted records.
pub struct RosterBuilder {
    pricing: PricingConfig,
}

impl RosterBuilder {
    /// Create a roster builder with the given base price rules.
    pub fn new(pricing: PricingConfig) -> Self {
        Self { pricing }
    }

    /// Build one player.
    ///
    /// The opening current bid equals the base price, so the first accepted
    /// bid has to go above it.
    pub fn build_player(&self, record: &ExtractedPlayer) -> Result<AuctionPlayer> {
        let role: PlayerRole = record.category.parse().map_err(|_| {
            Error::data(format!(
                "slide {}: unknown category '{}'",
                record.slide_number, record.category
            ))
        })?;

        let age = match record.age.trim().parse::<u32>() {
            Ok(age) => age,
            Err(_) => {
                warn!(
                    slide = record.slide_number,
                    age = %record.age,
                    "unparseable age, using 0"
                );
                0
            }
        };

        let icon = record.is_icon();
        let base_price = self.pricing.base_price(role, icon);
        let name = record.name.trim();
        let mobile = record.mobile.trim();

        let mut player = AuctionPlayer::new(
            format!("player-{:03}", record.slide_number),
            name,
            role,
            base_price,
        );
        player.age = age;
        player.current_bid = base_price;
        player.icon_player = icon;
        player.mobile = Some(mobile.to_string());
        player.photo = format!("{}/{}-{}.png", PHOTO_DIR, mobile, clean_name_for_filename(name));

        Ok(player)
    }

    /// Build the whole roster in slide order. Duplicate slide numbers are an
    /// error.
    pub fn build(&self, records: &[ExtractedPlayer]) -> Result<Vec<AuctionPlayer>> {
        let mut sorted: Vec<&ExtractedPlayer> = records.iter().collect();
        sorted.sort_by_key(|r| r.slide_number);

        let mut seen = HashSet::with_capacity(sorted.len());
        let mut players = Vec::with_capacity(sorted.len());
        for record in sorted {
            if !seen.insert(record.slide_number) {
                return Err(Error::data(format!(
                    "duplicate slide number {}",
                    record.slide_number
                )));
            }
            players.push(self.build_player(record)?);
        }

        debug!(players = players.len(), "roster built");
        Ok(players)
    }
}

impl Default for RosterBuilder {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}
