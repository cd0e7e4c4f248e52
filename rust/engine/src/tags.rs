use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::action::ActionKind;
use crate::hand::Street;

/// A boolean behavioural marker the evaluator derives per player per hand.
///
/// The set is closed; [`Tag::ALL`] lists every tag in report order and
/// [`Tag::name`] gives the stable snake_case name used on the wire.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Tag {
    Participated,
    PreflopSb,
    PreflopBb,
    PreflopCall,
    PreflopRaise,
    PreflopAllin,
    PreflopFold,
    VoluntarilyPutIn,
    PreflopOpenRaise,
    Preflop3Bet,
    Preflop4Bet,
    Preflop5Bet,
    PreflopLastRaiser,
    Preflop3BetOpp,
    Preflop4BetOpp,
    Preflop5BetOpp,
    Faced3Bet,
    Faced4Bet,
    Faced5Bet,
    FoldTo3Bet,
    FoldTo4Bet,
    FoldTo5Bet,
    SawFlop,
    FlopBet,
    FlopRaise,
    FlopCall,
    FlopFold,
    FlopCheck,
    FlopCbet,
    FlopDonk,
    FlopCbetOpp,
    FacedFlopCbet,
    FoldToFlopCbet,
    SawTurn,
    TurnBet,
    TurnRaise,
    TurnCall,
    TurnFold,
    TurnCheck,
    SawRiver,
    RiverBet,
    RiverRaise,
    RiverCall,
    RiverFold,
    RiverCheck,
    SawShowdown,
    WonAtShowdown,
    LostAtShowdown,
    WonHand,
}

impl Tag {
    pub const ALL: [Tag; 49] = [
        Tag::Participated,
        Tag::PreflopSb,
        Tag::PreflopBb,
        Tag::PreflopCall,
        Tag::PreflopRaise,
        Tag::PreflopAllin,
        Tag::PreflopFold,
        Tag::VoluntarilyPutIn,
        Tag::PreflopOpenRaise,
        Tag::Preflop3Bet,
        Tag::Preflop4Bet,
        Tag::Preflop5Bet,
        Tag::PreflopLastRaiser,
        Tag::Preflop3BetOpp,
        Tag::Preflop4BetOpp,
        Tag::Preflop5BetOpp,
        Tag::Faced3Bet,
        Tag::Faced4Bet,
        Tag::Faced5Bet,
        Tag::FoldTo3Bet,
        Tag::FoldTo4Bet,
        Tag::FoldTo5Bet,
        Tag::SawFlop,
        Tag::FlopBet,
        Tag::FlopRaise,
        Tag::FlopCall,
        Tag::FlopFold,
        Tag::FlopCheck,
        Tag::FlopCbet,
        Tag::FlopDonk,
        Tag::FlopCbetOpp,
        Tag::FacedFlopCbet,
        Tag::FoldToFlopCbet,
        Tag::SawTurn,
        Tag::TurnBet,
        Tag::TurnRaise,
        Tag::TurnCall,
        Tag::TurnFold,
        Tag::TurnCheck,
        Tag::SawRiver,
        Tag::RiverBet,
        Tag::RiverRaise,
        Tag::RiverCall,
        Tag::RiverFold,
        Tag::RiverCheck,
        Tag::SawShowdown,
        Tag::WonAtShowdown,
        Tag::LostAtShowdown,
        Tag::WonHand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tag::Participated => "participated",
            Tag::PreflopSb => "preflop_sb",
            Tag::PreflopBb => "preflop_bb",
            Tag::PreflopCall => "preflop_call",
            Tag::PreflopRaise => "preflop_raise",
            Tag::PreflopAllin => "preflop_allin",
            Tag::PreflopFold => "preflop_fold",
            Tag::VoluntarilyPutIn => "voluntarily_put_in",
            Tag::PreflopOpenRaise => "preflop_open_raise",
            Tag::Preflop3Bet => "preflop_3bet",
            Tag::Preflop4Bet => "preflop_4bet",
            Tag::Preflop5Bet => "preflop_5bet",
            Tag::PreflopLastRaiser => "preflop_last_raiser",
            Tag::Preflop3BetOpp => "preflop_3bet_opp",
            Tag::Preflop4BetOpp => "preflop_4bet_opp",
            Tag::Preflop5BetOpp => "preflop_5bet_opp",
            Tag::Faced3Bet => "faced_3bet",
            Tag::Faced4Bet => "faced_4bet",
            Tag::Faced5Bet => "faced_5bet",
            Tag::FoldTo3Bet => "fold_to_3bet",
            Tag::FoldTo4Bet => "fold_to_4bet",
            Tag::FoldTo5Bet => "fold_to_5bet",
            Tag::SawFlop => "saw_flop",
            Tag::FlopBet => "flop_bet",
            Tag::FlopRaise => "flop_raise",
            Tag::FlopCall => "flop_call",
            Tag::FlopFold => "flop_fold",
            Tag::FlopCheck => "flop_check",
            Tag::FlopCbet => "flop_cbet",
            Tag::FlopDonk => "flop_donk",
            Tag::FlopCbetOpp => "flop_cbet_opp",
            Tag::FacedFlopCbet => "faced_flop_cbet",
            Tag::FoldToFlopCbet => "fold_to_flop_cbet",
            Tag::SawTurn => "saw_turn",
            Tag::TurnBet => "turn_bet",
            Tag::TurnRaise => "turn_raise",
            Tag::TurnCall => "turn_call",
            Tag::TurnFold => "turn_fold",
            Tag::TurnCheck => "turn_check",
            Tag::SawRiver => "saw_river",
            Tag::RiverBet => "river_bet",
            Tag::RiverRaise => "river_raise",
            Tag::RiverCall => "river_call",
            Tag::RiverFold => "river_fold",
            Tag::RiverCheck => "river_check",
            Tag::SawShowdown => "saw_showdown",
            Tag::WonAtShowdown => "won_at_showdown",
            Tag::LostAtShowdown => "lost_at_showdown",
            Tag::WonHand => "won_hand",
        }
    }

    /// Street-scoped tag for an action kind, if one is defined.
    ///
    /// Preflop tracks call/raise/allin/fold; later streets track
    /// bet/raise/call/fold/check. Blinds are tagged by role elsewhere.
    pub fn for_action(street: Street, kind: &ActionKind) -> Option<Tag> {
        use ActionKind as K;
        let tag = match (street, kind) {
            (Street::Preflop, K::Call(_)) => Tag::PreflopCall,
            (Street::Preflop, K::Raise(_)) => Tag::PreflopRaise,
            (Street::Preflop, K::AllIn(_)) => Tag::PreflopAllin,
            (Street::Preflop, K::Fold) => Tag::PreflopFold,
            (Street::Flop, K::Bet(_)) => Tag::FlopBet,
            (Street::Flop, K::Raise(_)) => Tag::FlopRaise,
            (Street::Flop, K::Call(_)) => Tag::FlopCall,
            (Street::Flop, K::Fold) => Tag::FlopFold,
            (Street::Flop, K::Check) => Tag::FlopCheck,
            (Street::Turn, K::Bet(_)) => Tag::TurnBet,
            (Street::Turn, K::Raise(_)) => Tag::TurnRaise,
            (Street::Turn, K::Call(_)) => Tag::TurnCall,
            (Street::Turn, K::Fold) => Tag::TurnFold,
            (Street::Turn, K::Check) => Tag::TurnCheck,
            (Street::River, K::Bet(_)) => Tag::RiverBet,
            (Street::River, K::Raise(_)) => Tag::RiverRaise,
            (Street::River, K::Call(_)) => Tag::RiverCall,
            (Street::River, K::Fold) => Tag::RiverFold,
            (Street::River, K::Check) => Tag::RiverCheck,
            _ => return None,
        };
        Some(tag)
    }

    /// `saw_*` tag for reaching a postflop street.
    pub fn saw(street: Street) -> Option<Tag> {
        match street {
            Street::Preflop => None,
            Street::Flop => Some(Tag::SawFlop),
            Street::Turn => Some(Tag::SawTurn),
            Street::River => Some(Tag::SawRiver),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Tag presence for one hand: every tag in [`Tag::ALL`] against every roster
/// player, in roster order. Serializes as `{tag: {nickname: bool}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    players: Vec<String>,
    marks: BTreeMap<Tag, Vec<bool>>,
}

impl TagTable {
    /// A table with every tag absent for every player.
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<String> = players.into_iter().map(Into::into).collect();
        let marks = Tag::ALL
            .into_iter()
            .map(|t| (t, vec![false; players.len()]))
            .collect();
        Self { players, marks }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    fn seat(&self, player: &str) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    pub(crate) fn set_seat(&mut self, tag: Tag, seat: usize) {
        if let Some(row) = self.marks.get_mut(&tag) {
            if let Some(cell) = row.get_mut(seat) {
                *cell = true;
            }
        }
    }

    pub fn get(&self, tag: Tag, player: &str) -> bool {
        match (self.marks.get(&tag), self.seat(player)) {
            (Some(row), Some(i)) => row[i],
            _ => false,
        }
    }

    /// Players holding `tag`, in roster order.
    pub fn holders(&self, tag: Tag) -> Vec<&str> {
        let Some(row) = self.marks.get(&tag) else {
            return Vec::new();
        };
        self.players
            .iter()
            .zip(row)
            .filter(|(_, &on)| on)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    /// Tags present for `player`, in [`Tag::ALL`] order.
    pub fn tags_for(&self, player: &str) -> Vec<Tag> {
        let Some(i) = self.seat(player) else {
            return Vec::new();
        };
        self.marks
            .iter()
            .filter(|(_, row)| row[i])
            .map(|(&t, _)| t)
            .collect()
    }
}

impl Serialize for TagTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.marks.len()))?;
        for (tag, row) in &self.marks {
            let by_player: BTreeMap<&str, bool> = self
                .players
                .iter()
                .map(String::as_str)
                .zip(row.iter().copied())
                .collect();
            map.serialize_entry(tag, &by_player)?;
        }
        map.end()
    }
}
