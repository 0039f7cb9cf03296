//! Session summary and team standings.

use auction_core::{Amount, PlayerId, SaleStatus, SessionStatus, TeamId};
use serde::Serialize;

use crate::ledger::AuctionLedger;

/// The most expensive sale so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSale {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub amount: Amount,
}

/// Headline numbers for the auction banner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionSummary {
    pub total_players: usize,
    pub sold_players: usize,
    pub unsold_players: usize,
    pub available_players: usize,
    /// Sum of sale prices.
    pub total_amount: Amount,
    pub top_sale: Option<TopSale>,
    pub status: SessionStatus,
}

impl AuctionSummary {
    /// Compute the summary from the current ledger state.
    pub fn from_ledger(ledger: &AuctionLedger) -> Self {
        let mut summary = Self {
            total_players: ledger.players().len(),
            sold_players: 0,
            unsold_players: 0,
            available_players: 0,
            total_amount: 0,
            top_sale: None,
            status: SessionStatus::Upcoming,
        };

        for player in ledger.players() {
            match player.status {
                SaleStatus::Available => summary.available_players += 1,
                SaleStatus::Unsold => summary.unsold_players += 1,
                SaleStatus::Sold => {
                    summary.sold_players += 1;
                    let price = player.sold_price.unwrap_or(0);
                    summary.total_amount += price;

                    let is_top = summary.top_sale.as_ref().map_or(true, |t| price > t.amount);
                    if is_top {
                        summary.top_sale = Some(TopSale {
                            player_id: player.id.clone(),
                            team_id: player.sold_to.clone().unwrap_or_default(),
                            amount: price,
                        });
                    }
                }
            }
        }

        // An empty roster has nothing decided yet.
        summary.status = if summary.available_players == summary.total_players {
            SessionStatus::Upcoming
        } else if summary.available_players == 0 {
            SessionStatus::Completed
        } else {
            SessionStatus::Live
        };

        summary
    }
}

/// One row of the team budgets panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub spent: Amount,
    pub remaining: Amount,
    pub players_bought: u32,
    /// Fraction of the cap spent.
    pub utilization: f64,
}

/// Team rows in display order.
pub fn team_standings(ledger: &AuctionLedger) -> Vec<TeamStanding> {
    ledger
        .budgets()
        .iter()
        .map(|b| TeamStanding {
            team_id: b.team_id.clone(),
            team_name: b.team_name.clone(),
            spent: b.spent_amount,
            remaining: b.remaining_budget,
            players_bought: b.players_bought,
            utilization: b.utilization(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use auction_core::config::BiddingConfig;
    use auction_core::{AuctionPlayer, PlayerRole, TeamBudget};

    fn make_ledger() -> AuctionLedger {
        let players = vec![
            AuctionPlayer::new("p1", "Sachin Kumar", PlayerRole::Batsman, 50_000),
            AuctionPlayer::new("p2", "Rohit Verma", PlayerRole::AllRounder, 30_000),
            AuctionPlayer::new("p3", "Virat Singh", PlayerRole::Bowler, 40_000),
        ];
        let budgets = vec![
            TeamBudget::new("mr-titans", "MR Titans", 500_000),
            TeamBudget::new("ykr-cricketers", "Y K R Cricketers", 400_000),
        ];
        AuctionLedger::new(players, budgets, BiddingConfig::default()).unwrap()
    }

    #[test]
    fn test_fresh_session_is_upcoming() {
        let summary = AuctionSummary::from_ledger(&make_ledger());
        assert_eq!(summary.status, SessionStatus::Upcoming);
        assert_eq!(summary.available_players, 3);
        assert_eq!(summary.total_amount, 0);
        assert!(summary.top_sale.is_none());
    }

    #[test]
    fn test_empty_roster_is_upcoming() {
        let ledger = AuctionLedger::new(
            Vec::new(),
            vec![TeamBudget::new("mr-titans", "MR Titans", 500_000)],
            BiddingConfig::default(),
        )
        .unwrap();
        let summary = AuctionSummary::from_ledger(&ledger);
        assert_eq!(summary.total_players, 0);
        assert_eq!(summary.status, SessionStatus::Upcoming);
    }

    #[test]
    fn test_summary_tracks_sales() {
        let mut ledger = make_ledger();
        ledger.place_bid("p1", Some("mr-titans"), 80_000).unwrap();
        ledger.place_bid("p2", Some("ykr-cricketers"), 120_000).unwrap();

        let summary = AuctionSummary::from_ledger(&ledger);
        assert_eq!(summary.status, SessionStatus::Live);
        assert_eq!(summary.sold_players, 2);
        assert_eq!(summary.total_amount, 200_000);
        let top = summary.top_sale.unwrap();
        assert_eq!(top.player_id, "p2");
        assert_eq!(top.team_id, "ykr-cricketers");

        ledger.mark_unsold("p3").unwrap();
        let summary = AuctionSummary::from_ledger(&ledger);
        assert_eq!(summary.status, SessionStatus::Completed);
        assert_eq!(summary.unsold_players, 1);
    }

    #[test]
    fn test_team_standings() {
        let mut ledger = make_ledger();
        ledger.place_bid("p1", Some("ykr-cricketers"), 100_000).unwrap();

        let rows = team_standings(&ledger);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].team_name, "Y K R Cricketers");
        assert_eq!(rows[1].remaining, 300_000);
        assert_relative_eq!(rows[1].utilization, 0.25);
        assert_relative_eq!(rows[0].utilization, 0.0);
    }
}
