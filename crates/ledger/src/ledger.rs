//! Auction ledger.
//!
//! Owns the player pool, the team budgets and the bid log, and applies the
//! only state changes the auction has: sales, passes, player edits and resets.

use auction_core::config::BiddingConfig;
use auction_core::{
    Amount, AuctionPlayer, BidRecord, Error, PlayerRole, Result, SaleStatus, TeamBudget,
};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::budget::BudgetBook;

/// Editable player details.
///
/// `None` leaves a field unchanged. Status, winner and sale price are not
/// editable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub role: Option<PlayerRole>,
    pub age: Option<u32>,
    pub mobile: Option<String>,
    pub base_price: Option<Amount>,
    pub current_bid: Option<Amount>,
    pub icon_player: Option<bool>,
}

impl PlayerUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// In-memory auction state.
#[derive(Debug, Clone)]
pub struct AuctionLedger {
    config: BiddingConfig,
    players: Vec<AuctionPlayer>,
    budgets: BudgetBook,
    bids: Vec<BidRecord>,
    /// Snapshot restored by [`AuctionLedger::reset`].
    initial_players: Vec<AuctionPlayer>,
    initial_budgets: BudgetBook,
}

impl AuctionLedger {
    /// Create a ledger from fixture data.
    pub fn new(
        players: Vec<AuctionPlayer>,
        budgets: Vec<TeamBudget>,
        config: BiddingConfig,
    ) -> Result<Self> {
        let budgets = BudgetBook::new(budgets)?;
        validate_players(&players, &budgets)?;

        info!(
            players = players.len(),
            teams = budgets.budgets().len(),
            "auction ledger loaded"
        );

        Ok(Self {
            config,
            initial_players: players.clone(),
            initial_budgets: budgets.clone(),
            players,
            budgets,
            bids: Vec::new(),
        })
    }

    /// Bidding rules in force.
    pub fn config(&self) -> &BiddingConfig {
        &self.config
    }

    /// Players in display order.
    pub fn players(&self) -> &[AuctionPlayer] {
        &self.players
    }

    /// Look up a player.
    pub fn player(&self, player_id: &str) -> Option<&AuctionPlayer> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Players with the given status, in display order.
    pub fn players_by_status(&self, status: SaleStatus) -> impl Iterator<Item = &AuctionPlayer> {
        self.players.iter().filter(move |p| p.status == status)
    }

    /// Team budgets in display order.
    pub fn budgets(&self) -> &[TeamBudget] {
        self.budgets.budgets()
    }

    /// Look up a team budget.
    pub fn budget(&self, team_id: &str) -> Option<&TeamBudget> {
        self.budgets.get(team_id)
    }

    /// Team display name, falling back to "Unknown Team".
    pub fn team_name(&self, team_id: &str) -> &str {
        self.budgets.team_name(team_id)
    }

    /// Accepted bids, oldest first.
    pub fn bids(&self) -> &[BidRecord] {
        &self.bids
    }

    /// Amount to prefill the bid box with: the base price before any bid,
    /// then the current bid plus one increment.
    pub fn suggested_bid(&self, player_id: &str) -> Result<Amount> {
        let player = self
            .player(player_id)
            .ok_or_else(|| Error::unknown_player(player_id))?;
        if player.has_bids() {
            Ok(player.current_bid.saturating_add(self.config.min_increment))
        } else {
            Ok(player.base_price)
        }
    }

    /// Place a winning bid and sell the player.
    ///
    /// `team_id` is `None` when the operator has not chosen a team. The bid
    /// must beat the current bid and fit the team's remaining budget. On
    /// success the player is sold to the team at `amount` and the team's
    /// budget is charged. A rejected bid leaves the ledger untouched.
    pub fn place_bid(
        &mut self,
        player_id: &str,
        team_id: Option<&str>,
        amount: Amount,
    ) -> Result<BidRecord> {
        let outcome = self.try_place_bid(player_id, team_id, amount);
        if let Err(e) = &outcome {
            warn!(player = player_id, team = ?team_id, amount, error = %e, "bid rejected");
        }
        outcome
    }

    fn try_place_bid(
        &mut self,
        player_id: &str,
        team_id: Option<&str>,
        amount: Amount,
    ) -> Result<BidRecord> {
        let team_id = team_id.filter(|t| !t.is_empty()).ok_or(Error::NoTeamSelected)?;

        let idx = self.player_index(player_id)?;
        if !self.budgets.contains(team_id) {
            return Err(Error::unknown_team(team_id));
        }

        let player = &self.players[idx];
        if !player.status.can_transition_to(SaleStatus::Sold) {
            return Err(Error::invalid_transition(player_id, player.status, SaleStatus::Sold));
        }
        if amount <= player.current_bid {
            return Err(Error::BidTooLow {
                amount,
                current_bid: player.current_bid,
            });
        }
        self.budgets.check_affordable(team_id, amount)?;

        // Nothing is written until the charge succeeds.
        let budget = self.budgets.record_purchase(team_id, amount)?;
        let remaining = budget.remaining_budget;

        let player = &mut self.players[idx];
        player.current_bid = amount;
        player.status = SaleStatus::Sold;
        player.sold_to = Some(team_id.to_string());
        player.sold_price = Some(amount);

        let record = BidRecord {
            seq: self.bids.len() as u64 + 1,
            player_id: player_id.to_string(),
            team_id: team_id.to_string(),
            amount,
            timestamp: Utc::now(),
            is_winning: true,
        };
        self.bids.push(record.clone());

        info!(
            player = player_id,
            team = team_id,
            amount,
            remaining,
            "player sold"
        );

        Ok(record)
    }

    /// Pass on a player: `Available -> Unsold`.
    pub fn mark_unsold(&mut self, player_id: &str) -> Result<()> {
        let idx = self.player_index(player_id)?;
        let player = &mut self.players[idx];
        if !player.status.can_transition_to(SaleStatus::Unsold) {
            return Err(Error::invalid_transition(player_id, player.status, SaleStatus::Unsold));
        }
        player.status = SaleStatus::Unsold;
        player.sold_to = None;
        player.sold_price = None;

        info!(player = player_id, "player unsold");
        Ok(())
    }

    /// Mark every available player unsold. Sold players keep their sale.
    /// Returns the number of players changed.
    pub fn mark_all_unsold(&mut self) -> usize {
        let mut changed = 0;
        for player in self.players.iter_mut().filter(|p| p.is_available()) {
            player.status = SaleStatus::Unsold;
            player.sold_to = None;
            player.sold_price = None;
            changed += 1;
        }
        info!(changed, "remaining players marked unsold");
        changed
    }

    /// Edit the details of a player still under the hammer.
    pub fn update_player(
        &mut self,
        player_id: &str,
        update: PlayerUpdate,
    ) -> Result<&AuctionPlayer> {
        let idx = self.player_index(player_id)?;
        let status = self.players[idx].status;
        if status != SaleStatus::Available {
            return Err(Error::data(format!(
                "player {} is {} and can no longer be edited",
                player_id, status
            )));
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(Error::data("player name cannot be empty"));
            }
        }

        if update.is_empty() {
            debug!(player = player_id, "empty player update");
            return Ok(&self.players[idx]);
        }

        let player = &mut self.players[idx];
        let PlayerUpdate {
            name,
            role,
            age,
            mobile,
            base_price,
            current_bid,
            icon_player,
        } = update;

        if let Some(name) = name {
            player.name = name.trim().to_string();
        }
        if let Some(role) = role {
            player.role = role;
        }
        if let Some(age) = age {
            player.age = age;
        }
        if let Some(mobile) = mobile {
            player.mobile = Some(mobile);
        }
        if let Some(base_price) = base_price {
            player.base_price = base_price;
        }
        if let Some(current_bid) = current_bid {
            player.current_bid = current_bid;
        }
        if let Some(icon_player) = icon_player {
            player.icon_player = icon_player;
        }

        info!(player = player_id, "player details updated");
        Ok(player)
    }

    /// Start over from the fixture data the ledger was created with.
    pub fn reset(&mut self) {
        self.players = self.initial_players.clone();
        self.budgets = self.initial_budgets.clone();
        self.bids.clear();
        info!("auction reset");
    }

    /// Verify every budget still balances.
    pub fn check_invariants(&self) -> Result<()> {
        self.budgets.check_invariants()
    }

    fn player_index(&self, player_id: &str) -> Result<usize> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| Error::unknown_player(player_id))
    }
}

/// Fixture checks: unique ids and consistent sale fields.
fn validate_players(players: &[AuctionPlayer], budgets: &BudgetBook) -> Result<()> {
    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        if !seen.insert(player.id.as_str()) {
            return Err(Error::data(format!("duplicate player id {}", player.id)));
        }
        match (player.status, &player.sold_to, player.sold_price) {
            (SaleStatus::Sold, Some(team), Some(_)) => {
                if !budgets.contains(team) {
                    return Err(Error::data(format!(
                        "player {} sold to unknown team {}",
                        player.id, team
                    )));
                }
            }
            (SaleStatus::Sold, _, _) => {
                return Err(Error::data(format!(
                    "player {} is sold without a team and price",
                    player.id
                )));
            }
            (_, None, None) => {}
            (status, _, _) => {
                return Err(Error::data(format!(
                    "player {} is {} but carries sale details",
                    player.id, status
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ledger() -> AuctionLedger {
        let mut bowler = AuctionPlayer::new("p2", "Virat Singh", PlayerRole::Bowler, 40_000);
        bowler.current_bid = 45_000;
        let players = vec![
            AuctionPlayer::new("p1", "Sachin Kumar", PlayerRole::Batsman, 50_000),
            bowler,
        ];
        let budgets = vec![
            TeamBudget::new("mr-titans", "MR Titans", 500_000),
            TeamBudget::with_spend("bellandur-sharks", "Bellandur Sharks", 500_000, 450_000, 5)
                .unwrap(),
        ];
        AuctionLedger::new(players, budgets, BiddingConfig::default()).unwrap()
    }

    #[test]
    fn test_accepted_bid_sells_player_and_charges_team() {
        let mut ledger = make_ledger();

        let record = ledger.place_bid("p1", Some("mr-titans"), 80_000).unwrap();
        assert_eq!(record.seq, 1);
        assert!(record.is_winning);

        let player = ledger.player("p1").unwrap();
        assert_eq!(player.status, SaleStatus::Sold);
        assert_eq!(player.sold_to.as_deref(), Some("mr-titans"));
        assert_eq!(player.sold_price, Some(80_000));
        assert_eq!(player.current_bid, 80_000);

        let budget = ledger.budget("mr-titans").unwrap();
        assert_eq!(budget.spent_amount, 80_000);
        assert_eq!(budget.remaining_budget, 420_000);
        assert_eq!(budget.players_bought, 1);
        assert!(ledger.check_invariants().is_ok());
        assert_eq!(ledger.bids().len(), 1);
    }

    #[test]
    fn test_bid_must_beat_current_bid() {
        let mut ledger = make_ledger();

        let err = ledger.place_bid("p2", Some("mr-titans"), 45_000).unwrap_err();
        assert!(matches!(err, Error::BidTooLow { current_bid: 45_000, .. }));
        let err = ledger.place_bid("p2", Some("mr-titans"), 1_000).unwrap_err();
        assert!(matches!(err, Error::BidTooLow { .. }));

        assert!(ledger.player("p2").unwrap().is_available());
        assert_eq!(ledger.budget("mr-titans").unwrap().spent_amount, 0);
        assert!(ledger.bids().is_empty());

        assert!(ledger.place_bid("p2", Some("mr-titans"), 45_001).is_ok());
    }

    #[test]
    fn test_team_must_be_selected() {
        let mut ledger = make_ledger();
        assert!(matches!(ledger.place_bid("p1", None, 60_000), Err(Error::NoTeamSelected)));
        assert!(matches!(ledger.place_bid("p1", Some(""), 60_000), Err(Error::NoTeamSelected)));
        assert!(matches!(
            ledger.place_bid("p1", Some("nobody"), 60_000),
            Err(Error::UnknownTeam(_))
        ));
        assert!(matches!(
            ledger.place_bid("p9", Some("mr-titans"), 60_000),
            Err(Error::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_bid_over_remaining_budget_rejected() {
        let mut ledger = make_ledger();
        let err = ledger.place_bid("p1", Some("bellandur-sharks"), 60_000).unwrap_err();
        assert!(matches!(err, Error::InsufficientBudget { remaining: 50_000, .. }));
        assert!(ledger.player("p1").unwrap().is_available());
    }

    #[test]
    fn test_sold_player_cannot_be_bid_again_or_unsold() {
        let mut ledger = make_ledger();
        ledger.place_bid("p1", Some("mr-titans"), 80_000).unwrap();

        let err = ledger.place_bid("p1", Some("bellandur-sharks"), 90_000).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { from: SaleStatus::Sold, .. }));
        assert!(ledger.mark_unsold("p1").is_err());
        assert_eq!(ledger.player("p1").unwrap().sold_to.as_deref(), Some("mr-titans"));
    }

    #[test]
    fn test_unsold_is_final() {
        let mut ledger = make_ledger();
        ledger.mark_unsold("p1").unwrap();
        assert_eq!(ledger.player("p1").unwrap().status, SaleStatus::Unsold);

        assert!(ledger.mark_unsold("p1").is_err());
        let err = ledger.place_bid("p1", Some("mr-titans"), 60_000).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { from: SaleStatus::Unsold, .. }));
    }

    #[test]
    fn test_mark_all_unsold_keeps_sales() {
        let mut ledger = make_ledger();
        ledger.place_bid("p1", Some("mr-titans"), 80_000).unwrap();

        assert_eq!(ledger.mark_all_unsold(), 1);
        assert_eq!(ledger.player("p1").unwrap().status, SaleStatus::Sold);
        assert_eq!(ledger.player("p2").unwrap().status, SaleStatus::Unsold);
        assert_eq!(ledger.mark_all_unsold(), 0);
    }

    #[test]
    fn test_players_by_status() {
        let mut ledger = make_ledger();
        let available: Vec<&str> = ledger
            .players_by_status(SaleStatus::Available)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(available, vec!["p1", "p2"]);

        ledger.place_bid("p2", Some("mr-titans"), 50_000).unwrap();
        let sold: Vec<&str> = ledger
            .players_by_status(SaleStatus::Sold)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(sold, vec!["p2"]);
        assert_eq!(ledger.players_by_status(SaleStatus::Available).count(), 1);
        assert_eq!(ledger.players_by_status(SaleStatus::Unsold).count(), 0);
    }

    #[test]
    fn test_place_bid_overflowing_player_count_changes_nothing() {
        let mut full = TeamBudget::new("t", "T", 1_000);
        full.players_bought = u32::MAX;
        let players = vec![AuctionPlayer::new("p", "P", PlayerRole::Batsman, 10)];
        let mut ledger =
            AuctionLedger::new(players, vec![full.clone()], BiddingConfig::default()).unwrap();

        assert!(ledger.place_bid("p", Some("t"), 100).is_err());
        assert!(ledger.player("p").unwrap().is_available());
        assert_eq!(ledger.budget("t").unwrap(), &full);
        assert!(ledger.bids().is_empty());
    }

    #[test]
    fn test_suggested_bid() {
        let ledger = make_ledger();
        assert_eq!(ledger.suggested_bid("p1").unwrap(), 50_000);
        assert_eq!(ledger.suggested_bid("p2").unwrap(), 46_000);
        assert!(ledger.suggested_bid("p9").is_err());
    }

    #[test]
    fn test_update_player() {
        let mut ledger = make_ledger();
        let update = PlayerUpdate {
            name: Some("  Sachin K ".to_string()),
            base_price: Some(55_000),
            icon_player: Some(true),
            ..Default::default()
        };
        let player = ledger.update_player("p1", update).unwrap();
        assert_eq!(player.name, "Sachin K");
        assert_eq!(player.base_price, 55_000);
        assert!(player.icon_player);
        assert_eq!(player.status, SaleStatus::Available);

        let blank = PlayerUpdate {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(ledger.update_player("p1", blank).is_err());

        ledger.place_bid("p1", Some("mr-titans"), 60_000).unwrap();
        assert!(ledger.update_player("p1", PlayerUpdate::default()).is_err());
    }

    #[test]
    fn test_reset_restores_fixtures() {
        let mut ledger = make_ledger();
        ledger.place_bid("p1", Some("mr-titans"), 80_000).unwrap();
        ledger.mark_unsold("p2").unwrap();

        ledger.reset();

        assert!(ledger.players().iter().all(|p| p.is_available()));
        assert_eq!(ledger.budget("mr-titans").unwrap().spent_amount, 0);
        assert!(ledger.bids().is_empty());
    }

    #[test]
    fn test_fixture_validation() {
        let budgets = vec![TeamBudget::new("mr-titans", "MR Titans", 500_000)];

        let dup = vec![
            AuctionPlayer::new("p1", "A", PlayerRole::Batsman, 1),
            AuctionPlayer::new("p1", "B", PlayerRole::Bowler, 1),
        ];
        assert!(AuctionLedger::new(dup, budgets.clone(), BiddingConfig::default()).is_err());

        let mut stray = AuctionPlayer::new("p1", "A", PlayerRole::Batsman, 1);
        stray.status = SaleStatus::Sold;
        stray.sold_to = Some("elsewhere".to_string());
        stray.sold_price = Some(10);
        assert!(AuctionLedger::new(vec![stray], budgets, BiddingConfig::default()).is_err());
    }
}
