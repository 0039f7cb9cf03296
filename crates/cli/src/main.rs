//! auction CLI - drive the cricket league player auction from the terminal

mod script;

use anyhow::{Context, Result};
use auction_core::config::PricingConfig;
use auction_core::{format_inr, AuctionConfig, AuctionPlayer};
use auction_ingestion::{
    demo_budgets, demo_players, load_budgets, load_extracted, load_players, save_players,
    RosterBuilder,
};
use auction_ledger::{team_standings, AuctionLedger, AuctionSummary};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use script::{replay, Session};

#[derive(Parser)]
#[command(name = "auction")]
#[command(about = "Run the league player auction: rosters, bids and team budgets")]
#[command(version)]
struct Cli {
    /// JSON config file (defaults apply to anything it leaves out)
    #[arg(short, long, global = true, env = "AUCTION_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an auction roster from records extracted out of the auction deck
    Roster {
        /// Extracted player records (JSON array)
        #[arg(value_name = "EXTRACTED_JSON")]
        input: PathBuf,

        /// Where to write the roster (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay auction commands and print the resulting ledger
    Run {
        /// Auction players (JSON array); demo pool when omitted
        #[arg(long)]
        players: Option<PathBuf>,

        /// Team budgets (JSON array); league demo budgets when omitted
        #[arg(long)]
        budgets: Option<PathBuf>,

        /// Stop at the first rejected command
        #[arg(long)]
        strict: bool,

        /// Command script; stdin when omitted
        #[arg(value_name = "SCRIPT")]
        script: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AuctionConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AuctionConfig::default(),
    };

    match cli.command {
        Commands::Roster { input, output } => {
            let players = build_roster(&input, &config.pricing)?;
            match output {
                Some(path) => save_players(&path, &players)?,
                None => println!("{}", serde_json::to_string_pretty(&players)?),
            }
        }
        Commands::Run {
            players,
            budgets,
            strict,
            script,
        } => {
            let players = match players {
                Some(path) => load_players(path)?,
                None => demo_players(),
            };
            let budgets = match budgets {
                Some(path) => load_budgets(path, &config.budget)?,
                None => demo_budgets(&config.budget)?,
            };
            let ledger = AuctionLedger::new(players, budgets, config.bidding.clone())?;

            let text = match script {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading script {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let mut session = Session::new(ledger);
            let rejected = replay(&mut session, &text, strict)?;
            if rejected > 0 {
                info!(rejected, "some commands were rejected");
            }

            print_report(&session.ledger);
        }
    }

    Ok(())
}

/// Turn an extracted-records file into an auction roster.
fn build_roster(input: &Path, pricing: &PricingConfig) -> Result<Vec<AuctionPlayer>> {
    let records = load_extracted(input)
        .with_context(|| format!("loading extracted records {}", input.display()))?;
    let players = RosterBuilder::new(pricing.clone()).build(&records)?;
    info!(players = players.len(), "roster built from {}", input.display());
    Ok(players)
}

fn print_report(ledger: &AuctionLedger) {
    println!("Team Budgets");
    for row in team_standings(ledger) {
        println!(
            "  {:<28} {:>2} players  spent {:>12}  remaining {:>12}  ({:.0}%)",
            row.team_name,
            row.players_bought,
            format_inr(row.spent),
            format_inr(row.remaining),
            row.utilization * 100.0
        );
    }

    let summary = AuctionSummary::from_ledger(ledger);
    println!();
    println!(
        "Players: {}  Sold: {}  Unsold: {}  Available: {}  Total Amount: {}  Status: {}",
        summary.total_players,
        summary.sold_players,
        summary.unsold_players,
        summary.available_players,
        format_inr(summary.total_amount),
        summary.status
    );
    if let Some(top) = &summary.top_sale {
        let name = ledger
            .player(&top.player_id)
            .map(|p| p.name.as_str())
            .unwrap_or(top.player_id.as_str());
        println!(
            "Top sale: {} to {} for {}",
            name,
            ledger.team_name(&top.team_id),
            format_inr(top.amount)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::{PlayerRole, SaleStatus};

    #[test]
    fn test_build_roster_from_extracted_file() {
        let input =
            std::env::temp_dir().join(format!("auction-deck-{}.json", std::process::id()));
        std::fs::write(
            &input,
            r#"[
                {"slide_number": 3, "name": "Vinay G", "category": "All Rounder",
                 "age": "29", "mobile": "9988776655", "iconPlayer": "No"},
                {"slide_number": 1, "name": "Manjunath.P", "category": "Bowler",
                 "age": "31", "mobile": "9876543210", "iconPlayer": "Yes"}
            ]"#,
        )
        .unwrap();
        let players = build_roster(&input, &PricingConfig::default()).unwrap();
        std::fs::remove_file(&input).ok();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, "player-001");
        assert_eq!(players[0].base_price, 100_000);
        assert_eq!(players[0].current_bid, 100_000);
        assert_eq!(players[1].id, "player-003");
        assert_eq!(players[1].role, PlayerRole::AllRounder);
        assert_eq!(players[1].base_price, 75_000);
        assert!(players.iter().all(|p| p.status == SaleStatus::Available));

        // The written roster loads back as a player pool
        let output =
            std::env::temp_dir().join(format!("auction-roster-{}.json", std::process::id()));
        save_players(&output, &players).unwrap();
        let loaded = load_players(&output).unwrap();
        std::fs::remove_file(&output).ok();
        assert_eq!(loaded, players);
    }

    #[test]
    fn test_build_roster_missing_input() {
        let err = build_roster(Path::new("/no/such/deck.json"), &PricingConfig::default());
        assert!(err.is_err());
    }
}
