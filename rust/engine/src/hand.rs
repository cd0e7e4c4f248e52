use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::Action;
use crate::player::{seat_label, HandPlayer, UNKNOWN_SEAT};

/// Represents a betting street in Texas Hold'em poker.
/// Streets are ordered; later streets compare greater.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "preflop" => Some(Street::Preflop),
            "flop" => Some(Street::Flop),
            "turn" => Some(Street::Turn),
            "river" => Some(Street::River),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one deal: the session date plus the table's running hand number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandId {
    pub date: NaiveDate,
    pub hand_number: u32,
}

impl HandId {
    pub fn new(date: NaiveDate, hand_number: u32) -> Self {
        Self { date, hand_number }
    }
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.date.format("%Y-%m-%d"), self.hand_number)
    }
}

/// Table facts copied through from the import step.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct HandInfo {
    pub game_type: String,
    pub is_bomb_pot: bool,
    pub dealer: String,
    pub player_num: u32,
    pub total_pot: u32,
}

/// The four action sequences of one hand, in recorded order.
pub type Streets = [Vec<Action>; 4];

/// One full, validated deal: roster in seat order plus the per-street action log.
///
/// Only [`crate::rules::normalize_hand`] builds a `Hand`, so every actor is a
/// roster member and no player acts after folding.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Hand {
    id: HandId,
    info: HandInfo,
    players: Vec<HandPlayer>,
    streets: Streets,
}

impl Hand {
    pub(crate) fn new(
        id: HandId,
        info: HandInfo,
        players: Vec<HandPlayer>,
        streets: Streets,
    ) -> Self {
        Self {
            id,
            info,
            players,
            streets,
        }
    }

    pub fn id(&self) -> HandId {
        self.id
    }

    pub fn info(&self) -> &HandInfo {
        &self.info
    }

    pub fn is_bomb_pot(&self) -> bool {
        self.info.is_bomb_pot
    }

    pub fn players(&self) -> &[HandPlayer] {
        &self.players
    }

    pub fn player(&self, nickname: &str) -> Option<&HandPlayer> {
        self.players.iter().find(|p| p.player_nickname == nickname)
    }

    pub fn actions(&self, street: Street) -> &[Action] {
        &self.streets[street.index()]
    }

    pub fn streets(&self) -> &Streets {
        &self.streets
    }

    /// True when `street` or any later street has recorded actions.
    pub fn has_actions_from(&self, street: Street) -> bool {
        self.streets[street.index()..].iter().any(|s| !s.is_empty())
    }

    pub fn action_count(&self) -> usize {
        self.streets.iter().map(Vec::len).sum()
    }

    /// Seat label for a player: the imported one when present, otherwise derived
    /// from the dealer and roster seat order.
    pub fn position_of(&self, nickname: &str) -> String {
        let Some(player) = self.player(nickname) else {
            return UNKNOWN_SEAT.to_string();
        };
        if !player.position.is_empty() {
            return player.position.clone();
        }
        let seats = self.players.len();
        let dealer = self
            .players
            .iter()
            .position(|p| p.player_nickname == self.info.dealer);
        let seat = self
            .players
            .iter()
            .position(|p| p.player_nickname == nickname);
        match (dealer, seat) {
            (Some(d), Some(s)) => seat_label((s + seats - d) % seats, seats),
            _ => UNKNOWN_SEAT.to_string(),
        }
    }
}
