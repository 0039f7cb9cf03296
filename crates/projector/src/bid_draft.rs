//! Bid entry form state.

use auction_core::{Amount, TeamId};
use serde::{Deserialize, Serialize};

/// What the operator has typed into the bid panel so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidDraft {
    /// Chosen team, if any.
    pub team: Option<TeamId>,
    /// Amount in the bid box.
    pub amount: Amount,
}

impl BidDraft {
    /// Fresh draft prefilled with an amount and no team.
    pub fn with_amount(amount: Amount) -> Self {
        Self { team: None, amount }
    }

    /// Choose a team; an empty id clears the choice.
    pub fn select_team(&mut self, team_id: impl Into<TeamId>) {
        let team_id = team_id.into();
        self.team = if team_id.is_empty() { None } else { Some(team_id) };
    }

    pub fn set_amount(&mut self, amount: Amount) {
        self.amount = amount;
    }

    /// Whether the submit control is enabled: a team is chosen and the amount
    /// beats the current bid.
    pub fn is_submittable(&self, current_bid: Amount) -> bool {
        self.team.is_some() && self.amount > current_bid
    }
}
