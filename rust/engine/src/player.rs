use serde::{Deserialize, Serialize};

/// One player's participation in one hand.
/// Nicknames are unique within a hand and are what actions refer to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandPlayer {
    /// Display name used by the action log
    pub player_nickname: String,
    /// Stack before the hand was dealt
    #[serde(default)]
    pub starting_stack: u32,
    /// Stack after the pot was awarded
    #[serde(default)]
    pub ending_stack: u32,
    /// Net chips won or lost in this hand
    #[serde(default)]
    pub profit: i64,
    /// Seat label (BTN, SB, BB, UTG, ...); empty when the importer did not know it
    #[serde(default)]
    pub position: String,
    /// Whether this player collected (part of) the pot
    #[serde(default)]
    pub is_winner: bool,
}

impl HandPlayer {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            player_nickname: nickname.into(),
            starting_stack: 0,
            ending_stack: 0,
            profit: 0,
            position: String::new(),
            is_winner: false,
        }
    }

    pub fn at(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn nickname(&self) -> &str {
        &self.player_nickname
    }
}

/// Label for a seat given its clockwise distance from the button and the table size.
///
/// # Examples
///
/// ```
/// use homegame_engine::player::seat_label;
///
/// assert_eq!(seat_label(0, 6), "BTN");
/// assert_eq!(seat_label(3, 6), "UTG");
/// assert_eq!(seat_label(5, 6), "CO");
/// assert_eq!(seat_label(1, 2), "BB");
/// assert_eq!(seat_label(4, 9), "UTG+1");
/// ```
pub fn seat_label(distance: usize, seats: usize) -> String {
    if seats < 2 || distance >= seats {
        return UNKNOWN_SEAT.to_string();
    }
    let label = match (seats, distance) {
        (_, 0) => "BTN",
        (2, 1) => "BB",
        (_, 1) => "SB",
        (_, 2) => "BB",
        (4, 3) => "CO",
        (5, 3) => "UTG",
        (5, 4) => "CO",
        (6, 3) => "UTG",
        (6, 4) => "HJ",
        (6, 5) => "CO",
        (n, d) if d == n - 1 => "CO",
        (n, d) if d == n - 2 => "HJ",
        (n, d) if d == n - 3 => "LJ",
        (_, 3) => "UTG",
        (_, d) => return format!("UTG+{}", d - 3),
    };
    label.to_string()
}

pub const UNKNOWN_SEAT: &str = "Unknown";
