//! Built-in fixtures and JSON loading.
//!
//! The fixtures are the demo pool shown on the league site before a real
//! roster is loaded.

use auction_core::config::BudgetConfig;
use auction_core::{
    Amount, AuctionPlayer, Error, PlayerRole, PlayerStats, Result, SaleStatus, TeamBudget, TeamId,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

use crate::roster::ExtractedPlayer;

#[allow(clippy::too_many_arguments)]
fn demo_player(
    n: u32,
    name: &str,
    role: PlayerRole,
    age: u32,
    batting: &str,
    bowling: &str,
    base_price: Amount,
    current_bid: Amount,
    stats: PlayerStats,
    previous_team: &str,
) -> AuctionPlayer {
    let mut player = AuctionPlayer::new(format!("auction-player-{}", n), name, role, base_price);
    player.age = age;
    player.nationality = "Indian".to_string();
    player.batting_style = batting.to_string();
    player.bowling_style = bowling.to_string();
    player.current_bid = current_bid;
    player.photo = format!(
        "/images/auction/{}.jpg",
        name.to_lowercase().replace('.', "").split_whitespace().collect::<Vec<_>>().join("-")
    );
    player.stats = stats;
    player.previous_team = Some(previous_team.to_string());
    player
}

fn stats(
    matches: u32,
    runs: u32,
    wickets: u32,
    catches: u32,
    strike_rate: f64,
    economy: f64,
    average: f64,
) -> PlayerStats {
    PlayerStats {
        matches,
        runs,
        wickets,
        catches,
        strike_rate,
        economy,
        average,
    }
}

/// The demo player pool.
pub fn demo_players() -> Vec<AuctionPlayer> {
    let mut keeper = demo_player(
        4,
        "MS Dhoni Jr.",
        PlayerRole::WicketKeeper,
        28,
        "Right-handed",
        "N/A",
        60_000,
        90_000,
        stats(20, 520, 0, 25, 125.5, 0.0, 34.7),
        "Chennai Super Kings",
    );
    keeper.status = SaleStatus::Sold;
    keeper.sold_to = Some("mr-titans".to_string());
    keeper.sold_price = Some(90_000);

    vec![
        demo_player(
            1,
            "Sachin Kumar",
            PlayerRole::Batsman,
            24,
            "Right-handed",
            "Right-arm medium",
            50_000,
            75_000,
            stats(15, 450, 2, 8, 145.2, 7.5, 45.0),
            "Delhi Daredevils",
        ),
        demo_player(
            2,
            "Rohit Verma",
            PlayerRole::AllRounder,
            26,
            "Left-handed",
            "Left-arm spin",
            30_000,
            45_000,
            stats(12, 280, 15, 5, 135.8, 6.2, 23.3),
            "Mumbai Indians",
        ),
        demo_player(
            3,
            "Virat Singh",
            PlayerRole::Bowler,
            22,
            "Right-handed",
            "Right-arm fast",
            40_000,
            0,
            stats(8, 45, 18, 3, 85.2, 5.5, 2.5),
            "Royal Challengers Bangalore",
        ),
        keeper,
        demo_player(
            5,
            "Ravindra Jadeja Jr.",
            PlayerRole::AllRounder,
            25,
            "Left-handed",
            "Left-arm orthodox",
            70_000,
            0,
            stats(18, 380, 22, 12, 140.2, 6.8, 21.1),
            "Gujarat Titans",
        ),
    ]
}

/// A team as declared in a budgets file.
///
/// The total may be left out, in which case the configured default cap
/// applies. A declared remaining budget must agree with the total and spend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDeclaration {
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub total_budget: Option<Amount>,
    #[serde(default)]
    pub spent_amount: Amount,
    #[serde(default)]
    pub remaining_budget: Option<Amount>,
    #[serde(default)]
    pub players_bought: u32,
}

impl TeamDeclaration {
    /// A team with spend carried over and no explicit total.
    pub fn new(team_id: &str, team_name: &str, spent_amount: Amount, players_bought: u32) -> Self {
        Self {
            team_id: team_id.to_string(),
            team_name: team_name.to_string(),
            total_budget: None,
            spent_amount,
            remaining_budget: None,
            players_bought,
        }
    }

    /// Resolve into a balanced budget, filling a missing total from `config`.
    pub fn into_budget(self, config: &BudgetConfig) -> Result<TeamBudget> {
        let total = self.total_budget.unwrap_or(config.default_team_budget);
        let budget = TeamBudget::with_spend(
            self.team_id,
            self.team_name,
            total,
            self.spent_amount,
            self.players_bought,
        )?;
        if let Some(remaining) = self.remaining_budget {
            if remaining != budget.remaining_budget {
                return Err(Error::data(format!(
                    "team {} declares {} remaining but {} - {} leaves {}",
                    budget.team_id,
                    remaining,
                    total,
                    budget.spent_amount,
                    budget.remaining_budget
                )));
            }
        }
        Ok(budget)
    }
}

/// Budgets of the six league teams, carried over from the first round.
/// Every team gets the configured default cap.
pub fn demo_budgets(config: &BudgetConfig) -> Result<Vec<TeamBudget>> {
    [
        TeamDeclaration::new("mr-titans", "MR Titans", 180_000, 3),
        TeamDeclaration::new("bellandur-monsters", "Bellandur Monsters", 220_000, 4),
        TeamDeclaration::new("ykr-cricketers", "Y K R Cricketers", 150_000, 2),
        TeamDeclaration::new("bellandur-sharks", "Bellandur Sharks", 200_000, 3),
        TeamDeclaration::new("super-giants-bellandur", "Super Giants Bellandur", 120_000, 2),
        TeamDeclaration::new(
            "royal-changlesrs-bellandur",
            "Royal Changlesrs Bellandur",
            190_000,
            3,
        ),
    ]
    .into_iter()
    .map(|team| team.into_budget(config))
    .collect()
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .map_err(|e| Error::data(format!("cannot open {}: {}", path.display(), e)))?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Load an auction player array.
pub fn load_players(path: impl AsRef<Path>) -> Result<Vec<AuctionPlayer>> {
    let path = path.as_ref();
    let players: Vec<AuctionPlayer> = load_json(path)?;
    info!(path = %path.display(), players = players.len(), "players loaded");
    Ok(players)
}

/// Load a team budget array. Teams without a total get
/// `config.default_team_budget`.
pub fn load_budgets(path: impl AsRef<Path>, config: &BudgetConfig) -> Result<Vec<TeamBudget>> {
    let path = path.as_ref();
    let declared: Vec<TeamDeclaration> = load_json(path)?;
    let budgets = declared
        .into_iter()
        .map(|team| team.into_budget(config))
        .collect::<Result<Vec<_>>>()?;
    info!(path = %path.display(), teams = budgets.len(), "budgets loaded");
    Ok(budgets)
}

/// Load records extracted from the auction deck.
pub fn load_extracted(path: impl AsRef<Path>) -> Result<Vec<ExtractedPlayer>> {
    let path = path.as_ref();
    let records: Vec<ExtractedPlayer> = load_json(path)?;
    info!(path = %path.display(), records = records.len(), "extracted records loaded");
    Ok(records)
}

/// Write players as pretty-printed JSON.
pub fn save_players(path: impl AsRef<Path>, players: &[AuctionPlayer]) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, players)?;
    info!(path = %path.display(), players = players.len(), "players saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("auction-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_demo_budgets_balance() {
        let budgets = demo_budgets(&BudgetConfig::default()).unwrap();
        assert_eq!(budgets.len(), 6);
        assert!(budgets.iter().all(|b| b.is_balanced()));
        assert_eq!(budgets[0].total_budget, 500_000);
        assert_eq!(budgets[0].remaining_budget, 320_000);
    }

    #[test]
    fn test_demo_budgets_follow_config() {
        let config = BudgetConfig {
            default_team_budget: 1_000_000,
        };
        let budgets = demo_budgets(&config).unwrap();
        assert_eq!(budgets[0].total_budget, 1_000_000);
        assert_eq!(budgets[0].remaining_budget, 820_000);

        // Carried-over spend no longer fits
        let tight = BudgetConfig {
            default_team_budget: 200_000,
        };
        assert!(demo_budgets(&tight).is_err());
    }

    #[test]
    fn test_load_budgets_fills_missing_total() {
        let path = temp_path("budgets-default");
        std::fs::write(
            &path,
            r#"[
                {"teamId": "a", "teamName": "A"},
                {"teamId": "b", "teamName": "B", "totalBudget": 300000, "spentAmount": 50000,
                 "remainingBudget": 250000, "playersBought": 1}
            ]"#,
        )
        .unwrap();
        let config = BudgetConfig {
            default_team_budget: 400_000,
        };
        let budgets = load_budgets(&path, &config).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(budgets[0], TeamBudget::new("a", "A", 400_000));
        assert_eq!(budgets[1].total_budget, 300_000);
        assert_eq!(budgets[1].remaining_budget, 250_000);
        assert_eq!(budgets[1].players_bought, 1);
    }

    #[test]
    fn test_load_budgets_rejects_unbalanced_entry() {
        let path = temp_path("budgets-unbalanced");
        std::fs::write(
            &path,
            r#"[{"teamId": "a", "teamName": "A", "totalBudget": 100, "spentAmount": 40,
                 "remainingBudget": 70}]"#,
        )
        .unwrap();
        let err = load_budgets(&path, &BudgetConfig::default()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn test_load_extracted() {
        let path = temp_path("extracted");
        std::fs::write(
            &path,
            r#"[
                {"slide_number": 2, "name": "Manjunath.P", "category": "Bowler", "age": "31",
                 "mobile": "9876543210", "iconPlayer": "Yes", "source": "deck"},
                {"slide_number": 3, "name": "Vinay G", "category": "All Rounder"}
            ]"#,
        )
        .unwrap();
        let records = load_extracted(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Manjunath.P");
        assert!(records[0].is_icon());
        assert_eq!(records[1].slide_number, 3);
        assert!(!records[1].is_icon());
    }

    #[test]
    fn test_demo_players() {
        let players = demo_players();
        assert_eq!(players.len(), 5);
        assert_eq!(players[3].status, SaleStatus::Sold);
        assert_eq!(players[3].sold_to.as_deref(), Some("mr-titans"));
        assert_eq!(players[0].photo, "/images/auction/sachin-kumar.jpg");
        assert_eq!(players[3].photo, "/images/auction/ms-dhoni-jr.jpg");
        assert!(players.iter().filter(|p| p.id != "auction-player-4").all(|p| p.is_available()));
    }

    #[test]
    fn test_save_then_load_players() {
        let path = temp_path("players");
        save_players(&path, &demo_players()).unwrap();
        let loaded = load_players(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, demo_players());
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let err = load_budgets("/definitely/not/here.json", &BudgetConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }
}
