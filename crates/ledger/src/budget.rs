//! Team budget book.
//!
//! Tracks every team's spend against its fixed cap.

use auction_core::{Amount, Error, Result, TeamBudget};
use std::collections::HashSet;

/// Name shown for a team id the book does not know.
pub const UNKNOWN_TEAM: &str = "Unknown Team";

/// All team budgets of one auction, in display order.
#[derive(Debug, Clone, Default)]
pub struct BudgetBook {
    budgets: Vec<TeamBudget>,
}

impl BudgetBook {
    /// Create a book, rejecting duplicate ids and unbalanced entries.
    pub fn new(budgets: Vec<TeamBudget>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(budgets.len());
        for budget in &budgets {
            if !seen.insert(budget.team_id.as_str()) {
                return Err(Error::data(format!("duplicate team id {}", budget.team_id)));
            }
            if !budget.is_balanced() {
                return Err(Error::data(format!(
                    "team {}: spent {} + remaining {} != total {}",
                    budget.team_id,
                    budget.spent_amount,
                    budget.remaining_budget,
                    budget.total_budget
                )));
            }
        }
        Ok(Self { budgets })
    }

    /// Budgets in display order.
    pub fn budgets(&self) -> &[TeamBudget] {
        &self.budgets
    }

    /// Look up a team.
    pub fn get(&self, team_id: &str) -> Option<&TeamBudget> {
        self.budgets.iter().find(|b| b.team_id == team_id)
    }

    /// Check whether a team is known.
    pub fn contains(&self, team_id: &str) -> bool {
        self.get(team_id).is_some()
    }

    /// Team display name, or [`UNKNOWN_TEAM`].
    pub fn team_name(&self, team_id: &str) -> &str {
        self.get(team_id).map(|b| b.team_name.as_str()).unwrap_or(UNKNOWN_TEAM)
    }

    /// Check that a team could pay `amount` without changing anything.
    pub fn check_affordable(&self, team_id: &str, amount: Amount) -> Result<()> {
        let budget = self.get(team_id).ok_or_else(|| Error::unknown_team(team_id))?;
        if amount > budget.remaining_budget {
            return Err(Error::InsufficientBudget {
                amount,
                remaining: budget.remaining_budget,
            });
        }
        Ok(())
    }

    /// Charge a purchase to a team.
    ///
    /// Spent grows and remaining shrinks by `amount`; the player count grows
    /// by one. Fails without touching the entry if the team cannot pay.
    pub fn record_purchase(&mut self, team_id: &str, amount: Amount) -> Result<&TeamBudget> {
        let budget = self
            .budgets
            .iter_mut()
            .find(|b| b.team_id == team_id)
            .ok_or_else(|| Error::unknown_team(team_id))?;

        let remaining = budget
            .remaining_budget
            .checked_sub(amount)
            .ok_or(Error::InsufficientBudget {
                amount,
                remaining: budget.remaining_budget,
            })?;
        let spent = budget
            .spent_amount
            .checked_add(amount)
            .ok_or_else(|| Error::data(format!("spend overflow for team {}", team_id)))?;
        let players_bought = budget
            .players_bought
            .checked_add(1)
            .ok_or_else(|| Error::data(format!("player count overflow for team {}", team_id)))?;

        budget.spent_amount = spent;
        budget.remaining_budget = remaining;
        budget.players_bought = players_bought;

        Ok(budget)
    }

    /// Total spent across all teams.
    pub fn total_spent(&self) -> Amount {
        self.budgets.iter().map(|b| b.spent_amount).sum()
    }

    /// Verify `spent + remaining == total` for every team.
    pub fn check_invariants(&self) -> Result<()> {
        match self.budgets.iter().find(|b| !b.is_balanced()) {
            Some(b) => Err(Error::data(format!("team {} budget out of balance", b.team_id))),
            None => Ok(()),
        }
    }
}
