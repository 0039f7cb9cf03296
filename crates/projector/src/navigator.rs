//! Projector navigator.
//!
//! Shows one player at a time over the ledger's player list, with
//! next/previous traversal, keyboard shortcuts and the same bid operation as
//! the list view. The only state of its own is the cursor and the panel
//! modes.

use auction_core::{Amount, AuctionPlayer, BidRecord, Error, Result};
use auction_ledger::{AuctionLedger, PlayerUpdate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::bid_draft::BidDraft;

/// Message shown when a bid cannot be submitted.
pub const INVALID_BID_MESSAGE: &str = "Please select a team and enter a valid bid amount.";

/// A key the projector reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    F11,
    Char(char),
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }
}

impl FromStr for KeyInput {
    type Err = Error;

    /// Parses names like "ArrowLeft", "left", "esc", "F11", "ctrl+e".
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let (ctrl, name) = match lower.strip_prefix("ctrl+") {
            Some(rest) => (true, rest),
            None => (false, lower.as_str()),
        };

        let key = match name {
            "arrowleft" | "left" => Key::ArrowLeft,
            "arrowright" | "right" => Key::ArrowRight,
            "escape" | "esc" => Key::Escape,
            "f11" => Key::F11,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(Error::data(format!("unknown key '{}'", s))),
                }
            }
        };

        Ok(Self { key, ctrl })
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectorEvent {
    /// Cursor moved to this index.
    Moved(usize),
    /// Bidding and edit panels closed.
    Cancelled,
    /// Edit panel opened.
    EditStarted,
    /// Fullscreen switched; the payload is the new state.
    FullscreenToggled(bool),
    /// Nothing to do.
    Ignored,
}

impl fmt::Display for ProjectorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectorEvent::Moved(i) => write!(f, "moved to #{}", i + 1),
            ProjectorEvent::Cancelled => f.write_str("cancelled"),
            ProjectorEvent::EditStarted => f.write_str("editing"),
            ProjectorEvent::FullscreenToggled(on) => {
                write!(f, "fullscreen {}", if *on { "on" } else { "off" })
            }
            ProjectorEvent::Ignored => f.write_str("ignored"),
        }
    }
}

/// Projector state over an [`AuctionLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectorView {
    index: usize,
    bidding: bool,
    editing: bool,
    fullscreen: bool,
    draft: BidDraft,
}

impl ProjectorView {
    /// Start at the first player.
    pub fn new(ledger: &AuctionLedger) -> Self {
        let mut view = Self {
            index: 0,
            bidding: false,
            editing: false,
            fullscreen: false,
            draft: BidDraft::default(),
        };
        view.reset_panels(ledger);
        view
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_bidding(&self) -> bool {
        self.bidding
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn draft(&self) -> &BidDraft {
        &self.draft
    }

    /// Player under the cursor; `None` for an empty roster.
    pub fn current<'a>(&self, ledger: &'a AuctionLedger) -> Option<&'a AuctionPlayer> {
        ledger.players().get(self.index)
    }

    /// Whether there is a player after the current one.
    pub fn has_next(&self, ledger: &AuctionLedger) -> bool {
        self.index + 1 < ledger.players().len()
    }

    /// Whether there is a player before the current one.
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Move to the next player. Returns false at the end of the list.
    pub fn next(&mut self, ledger: &AuctionLedger) -> bool {
        if !self.has_next(ledger) {
            return false;
        }
        self.move_to(ledger, self.index + 1);
        true
    }

    /// Move to the previous player. Returns false at the start of the list.
    pub fn previous(&mut self, ledger: &AuctionLedger) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.move_to(ledger, self.index - 1);
        true
    }

    /// Jump straight to a position in the list.
    pub fn jump_to(&mut self, ledger: &AuctionLedger, index: usize) -> Result<()> {
        let len = ledger.players().len();
        if index >= len {
            return Err(Error::data(format!(
                "player position {} out of range for {} players",
                index, len
            )));
        }
        self.move_to(ledger, index);
        Ok(())
    }

    /// Open the bid panel.
    pub fn open_bidding(&mut self) {
        self.bidding = true;
    }

    /// Choose the bidding team.
    pub fn select_team(&mut self, team_id: impl Into<String>) {
        self.draft.select_team(team_id);
    }

    /// Type an amount into the bid box.
    pub fn set_amount(&mut self, amount: Amount) {
        self.draft.set_amount(amount);
    }

    /// Whether the submit control is enabled for the current player.
    pub fn can_submit(&self, ledger: &AuctionLedger) -> bool {
        self.current(ledger)
            .map(|p| p.is_available() && self.draft.is_submittable(p.current_bid))
            .unwrap_or(false)
    }

    /// Submit the draft through the ledger's bid operation.
    ///
    /// A draft without a team or with an amount not above the current bid is
    /// refused before the ledger is touched.
    pub fn place_bid(&mut self, ledger: &mut AuctionLedger) -> Result<BidRecord> {
        let player = self
            .current(ledger)
            .ok_or_else(|| Error::data("no players available"))?;
        let player_id = player.id.clone();

        if !self.draft.is_submittable(player.current_bid) {
            debug!(player = %player_id, "{}", INVALID_BID_MESSAGE);
            return match self.draft.team {
                None => Err(Error::NoTeamSelected),
                Some(_) => Err(Error::BidTooLow {
                    amount: self.draft.amount,
                    current_bid: player.current_bid,
                }),
            };
        }

        let record = ledger.place_bid(&player_id, self.draft.team.as_deref(), self.draft.amount)?;
        self.reset_panels(ledger);
        Ok(record)
    }

    /// Open the edit panel for the current player. Returns false when there
    /// is nothing to edit.
    pub fn start_edit(&mut self, ledger: &AuctionLedger) -> bool {
        if self.current(ledger).is_none() {
            return false;
        }
        self.editing = true;
        true
    }

    /// Save an edit of the current player and close the edit panel.
    pub fn save_edit(&mut self, ledger: &mut AuctionLedger, update: PlayerUpdate) -> Result<()> {
        if !self.editing {
            return Err(Error::data("edit mode is not active"));
        }
        let player_id = self
            .current(ledger)
            .map(|p| p.id.clone())
            .ok_or_else(|| Error::data("no players available"))?;
        ledger.update_player(&player_id, update)?;
        self.reset_panels(ledger);
        Ok(())
    }

    /// Close the edit panel without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    /// Toggle fullscreen and return the new state.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// Apply a keyboard shortcut.
    pub fn handle_key(&mut self, ledger: &AuctionLedger, input: KeyInput) -> ProjectorEvent {
        let event = match (input.key, input.ctrl) {
            (Key::ArrowLeft, _) => {
                if self.previous(ledger) {
                    ProjectorEvent::Moved(self.index)
                } else {
                    ProjectorEvent::Ignored
                }
            }
            (Key::ArrowRight, _) => {
                if self.next(ledger) {
                    ProjectorEvent::Moved(self.index)
                } else {
                    ProjectorEvent::Ignored
                }
            }
            (Key::Escape, _) => {
                self.bidding = false;
                self.editing = false;
                self.fullscreen = false;
                ProjectorEvent::Cancelled
            }
            (Key::Char(c), true) if c.eq_ignore_ascii_case(&'e') => {
                if self.start_edit(ledger) {
                    ProjectorEvent::EditStarted
                } else {
                    ProjectorEvent::Ignored
                }
            }
            (Key::F11, _) => ProjectorEvent::FullscreenToggled(self.toggle_fullscreen()),
            _ => ProjectorEvent::Ignored,
        };
        debug!(?input, %event, "projector key");
        event
    }

    fn move_to(&mut self, ledger: &AuctionLedger, index: usize) {
        self.index = index;
        self.reset_panels(ledger);
        debug!(index, "projector moved");
    }

    /// New player on screen: prefill the suggested bid, clear the team and
    /// close the panels.
    fn reset_panels(&mut self, ledger: &AuctionLedger) {
        let amount = self
            .current(ledger)
            .and_then(|p| ledger.suggested_bid(&p.id).ok())
            .unwrap_or(0);
        self.draft = BidDraft::with_amount(amount);
        self.bidding = false;
        self.editing = false;
    }
}
