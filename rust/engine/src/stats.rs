use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::batch::{BatchReport, HandTags};
use crate::tags::Tag;

const AGGRESSIVE: [Tag; 6] = [
    Tag::FlopBet,
    Tag::FlopRaise,
    Tag::TurnBet,
    Tag::TurnRaise,
    Tag::RiverBet,
    Tag::RiverRaise,
];
const PASSIVE: [Tag; 3] = [Tag::FlopCall, Tag::TurnCall, Tag::RiverCall];

/// Per-player tallies over many hands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub hands: u32,
    /// Hands in which each tag was present
    pub tags: BTreeMap<Tag, u32>,
    pub won_saw_flop: u32,
    pub won_saw_turn: u32,
    pub won_saw_river: u32,
}

impl Counters {
    pub fn count(&self, tag: Tag) -> u32 {
        self.tags.get(&tag).copied().unwrap_or(0)
    }

    fn count_all(&self, tags: &[Tag]) -> u32 {
        tags.iter().map(|&t| self.count(t)).sum()
    }

    fn absorb(&mut self, hand: &HandTags, player: &str) {
        self.hands += 1;
        for tag in hand.tags.tags_for(player) {
            *self.tags.entry(tag).or_insert(0) += 1;
        }
        let has = |t| hand.tags.get(t, player);
        if has(Tag::WonHand) {
            self.won_saw_flop += has(Tag::SawFlop) as u32;
            self.won_saw_turn += has(Tag::SawTurn) as u32;
            self.won_saw_river += has(Tag::SawRiver) as u32;
        }
    }

    pub fn ratios(&self) -> Ratios {
        let c = |t| self.count(t);
        let aggressive = self.count_all(&AGGRESSIVE);
        let calls = self.count_all(&PASSIVE);
        Ratios {
            vpip: pct(c(Tag::VoluntarilyPutIn), self.hands),
            pfr: pct(c(Tag::PreflopRaise), self.hands),
            three_bet: pct(c(Tag::Preflop3Bet), c(Tag::Preflop3BetOpp)),
            four_bet: pct(c(Tag::Preflop4Bet), c(Tag::Preflop4BetOpp)),
            five_bet: pct(c(Tag::Preflop5Bet), c(Tag::Preflop5BetOpp)),
            fold_to_3bet: pct(c(Tag::FoldTo3Bet), c(Tag::Faced3Bet)),
            fold_to_4bet: pct(c(Tag::FoldTo4Bet), c(Tag::Faced4Bet)),
            fold_to_5bet: pct(c(Tag::FoldTo5Bet), c(Tag::Faced5Bet)),
            cbet: pct(c(Tag::FlopCbet), c(Tag::FlopCbetOpp)),
            fold_to_cbet: pct(c(Tag::FoldToFlopCbet), c(Tag::FacedFlopCbet)),
            wtsd: pct(c(Tag::SawShowdown), c(Tag::SawFlop)),
            wtsd_turn: pct(c(Tag::SawShowdown), c(Tag::SawTurn)),
            wtsd_river: pct(c(Tag::SawShowdown), c(Tag::SawRiver)),
            wsd: pct(c(Tag::WonAtShowdown), c(Tag::SawShowdown)),
            wwsf: pct(self.won_saw_flop, c(Tag::SawFlop)),
            wwst: pct(self.won_saw_turn, c(Tag::SawTurn)),
            wwsr: pct(self.won_saw_river, c(Tag::SawRiver)),
            af: aggression_factor(aggressive, calls),
        }
    }
}

/// Percentages (one decimal) plus the aggression factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Ratios {
    pub vpip: f64,
    pub pfr: f64,
    pub three_bet: f64,
    pub four_bet: f64,
    pub five_bet: f64,
    pub fold_to_3bet: f64,
    pub fold_to_4bet: f64,
    pub fold_to_5bet: f64,
    pub cbet: f64,
    pub fold_to_cbet: f64,
    pub wtsd: f64,
    pub wtsd_turn: f64,
    pub wtsd_river: f64,
    /// W$SD
    pub wsd: f64,
    pub wwsf: f64,
    pub wwst: f64,
    pub wwsr: f64,
    pub af: f64,
}

/// `num / den` as a percentage rounded to one decimal; 0 when `den` is 0.
pub fn pct(num: u32, den: u32) -> f64 {
    if den == 0 {
        return 0.0;
    }
    (f64::from(num) / f64::from(den) * 1000.0).round() / 10.0
}

/// Postflop bets and raises per call, two decimals. With no calls the
/// aggressive count itself is reported.
pub fn aggression_factor(aggressive: u32, calls: u32) -> f64 {
    if calls == 0 {
        return f64::from(aggressive);
    }
    (f64::from(aggressive) / f64::from(calls) * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionSummary {
    pub hands: u32,
    pub ratios: Ratios,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    pub hands: u32,
    pub counters: Counters,
    pub ratios: Ratios,
    pub by_position: BTreeMap<String, PositionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Players with fewer hands are left out
    pub min_hands: u32,
    /// Restrict the output to one nickname
    pub player: Option<String>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            min_hands: 1,
            player: None,
        }
    }
}

#[derive(Default)]
struct Accumulator {
    total: Counters,
    by_position: BTreeMap<String, Counters>,
}

/// Reduce a batch's tag tables to per-player statistics.
///
/// Players are ordered by hands played (descending), then by name.
pub fn summarize(report: &BatchReport, options: &SummaryOptions) -> Vec<PlayerSummary> {
    let mut acc: HashMap<&str, Accumulator> = HashMap::new();
    for hand in &report.tables {
        for player in hand.tags.players() {
            if options.player.as_deref().is_some_and(|p| p != player.as_str()) {
                continue;
            }
            let entry = acc.entry(player.as_str()).or_default();
            entry.total.absorb(hand, player);
            let position = hand
                .position_of(player)
                .unwrap_or(crate::player::UNKNOWN_SEAT)
                .to_string();
            entry
                .by_position
                .entry(position)
                .or_default()
                .absorb(hand, player);
        }
    }

    let mut out: Vec<PlayerSummary> = acc
        .into_iter()
        .filter(|(_, a)| a.total.hands >= options.min_hands)
        .map(|(player, a)| PlayerSummary {
            player: player.to_string(),
            hands: a.total.hands,
            ratios: a.total.ratios(),
            by_position: a
                .by_position
                .into_iter()
                .map(|(pos, c)| {
                    let summary = PositionSummary {
                        hands: c.hands,
                        ratios: c.ratios(),
                    };
                    (pos, summary)
                })
                .collect(),
            counters: a.total,
        })
        .collect();
    out.sort_by(|a, b| b.hands.cmp(&a.hands).then_with(|| a.player.cmp(&b.player)));
    out
}
