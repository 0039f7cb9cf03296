//! Auction command scripts.
//!
//! One command per line; blank lines and `#` comments are skipped.

use anyhow::{bail, Context, Result};
use auction_core::{format_inr, Amount};
use auction_ledger::AuctionLedger;
use auction_projector::{KeyInput, ProjectorView};
use tracing::{info, warn};

/// A single auction command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `bid <player> <team> <amount>`
    Bid {
        player: String,
        team: String,
        amount: Amount,
    },
    /// `unsold <player>`
    Unsold { player: String },
    /// `unsold-all`
    UnsoldAll,
    /// `next`
    Next,
    /// `prev`
    Prev,
    /// `key <name>`, e.g. `key ctrl+e`
    Key(KeyInput),
    /// `draft <team> <amount>`: fill in the projector bid panel
    Draft { team: String, amount: Amount },
    /// `submit`: place the projector draft
    Submit,
    /// `reset`
    Reset,
    /// `show`: print the player under the projector cursor
    Show,
}

fn parse_amount(s: &str) -> Result<Amount> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '_' && *c != '₹').collect();
    cleaned
        .parse()
        .with_context(|| format!("invalid amount '{}'", s))
}

/// Parse one script line. Returns `None` for blanks and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let command = match parts.as_slice() {
        ["bid", player, team, amount] => Command::Bid {
            player: player.to_string(),
            team: team.to_string(),
            amount: parse_amount(amount)?,
        },
        ["unsold", player] => Command::Unsold {
            player: player.to_string(),
        },
        ["unsold-all"] => Command::UnsoldAll,
        ["next"] => Command::Next,
        ["prev"] => Command::Prev,
        ["key", name] => Command::Key(name.parse::<KeyInput>()?),
        ["draft", team, amount] => Command::Draft {
            team: team.to_string(),
            amount: parse_amount(amount)?,
        },
        ["submit"] => Command::Submit,
        ["reset"] => Command::Reset,
        ["show"] => Command::Show,
        _ => bail!("unrecognised command '{}'", line),
    };
    Ok(Some(command))
}

/// Ledger plus projector, driven by commands.
pub struct Session {
    pub ledger: AuctionLedger,
    pub view: ProjectorView,
}

impl Session {
    pub fn new(ledger: AuctionLedger) -> Self {
        let view = ProjectorView::new(&ledger);
        Self { ledger, view }
    }

    /// Run one command.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Bid {
                player,
                team,
                amount,
            } => {
                self.ledger.place_bid(player, Some(team.as_str()), *amount)?;
            }
            Command::Unsold { player } => self.ledger.mark_unsold(player)?,
            Command::UnsoldAll => {
                let changed = self.ledger.mark_all_unsold();
                info!(changed, "unsold-all");
            }
            Command::Next => {
                if !self.view.next(&self.ledger) {
                    warn!("already at the last player");
                }
            }
            Command::Prev => {
                if !self.view.previous(&self.ledger) {
                    warn!("already at the first player");
                }
            }
            Command::Key(input) => {
                let event = self.view.handle_key(&self.ledger, *input);
                info!(%event, "key");
            }
            Command::Draft { team, amount } => {
                self.view.open_bidding();
                self.view.select_team(team.as_str());
                self.view.set_amount(*amount);
            }
            Command::Submit => {
                self.view.place_bid(&mut self.ledger)?;
            }
            Command::Reset => {
                self.ledger.reset();
                self.view = ProjectorView::new(&self.ledger);
            }
            Command::Show => println!("{}", self.describe_current()),
        }
        Ok(())
    }

    /// One-line description of the player on the projector.
    pub fn describe_current(&self) -> String {
        match self.view.current(&self.ledger) {
            None => "No players available".to_string(),
            Some(p) => {
                let bid = if p.has_bids() {
                    format_inr(p.current_bid)
                } else {
                    "No Bids".to_string()
                };
                let mut line = format!(
                    "#{} {} ({}) base {} current {} [{}]",
                    self.view.index() + 1,
                    p.name,
                    p.role,
                    format_inr(p.base_price),
                    bid,
                    p.status.to_string().to_uppercase()
                );
                if let (Some(team), Some(price)) = (&p.sold_to, p.sold_price) {
                    line.push_str(&format!(
                        " sold to {} for {}",
                        self.ledger.team_name(team),
                        format_inr(price)
                    ));
                }
                line
            }
        }
    }
}

/// Replay a script. Rejected commands are logged and skipped unless
/// `strict` is set. Returns the number of rejected commands.
pub fn replay(session: &mut Session, script: &str, strict: bool) -> Result<usize> {
    let mut rejected = 0;
    for (lineno, line) in script.lines().enumerate() {
        let outcome = parse_line(line).and_then(|cmd| match cmd {
            Some(cmd) => session.apply(&cmd),
            None => Ok(()),
        });
        if let Err(e) = outcome {
            if strict {
                return Err(e.context(format!("line {}", lineno + 1)));
            }
            warn!(line = lineno + 1, error = %e, "command rejected");
            rejected += 1;
        }
    }
    Ok(rejected)
}
