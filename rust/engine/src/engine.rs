use std::collections::HashMap;

use crate::action::{Action, ActionKind, BlindRole};
use crate::errors::LogError;
use crate::hand::{Hand, Street};
use crate::record::HandRecord;
use crate::tags::{Tag, TagTable};

/// Per-player state carried from one street to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SeatState {
    /// Street on which the player folded, if any
    folded_on: Option<Street>,
    /// Any call/bet/raise/allin preflop
    voluntary: bool,
    /// Has at least one recorded action anywhere in the hand
    acted: bool,
}

impl SeatState {
    fn active_entering(&self, street: Street) -> bool {
        !matches!(self.folded_on, Some(f) if f < street)
    }

    fn live(&self) -> bool {
        self.acted && self.folded_on.is_none()
    }
}

/// First `bet`/`raise` seen on a street.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Aggression {
    seat: usize,
    kind: ActionKind,
    index: usize,
}

/// Accumulator threaded through the street-by-street pass over one hand.
#[derive(Debug, Clone)]
struct HandState {
    seats: Vec<SeatState>,
    /// Seat of each preflop raise, in raise order
    raisers: Vec<usize>,
    first_aggressor: [Option<Aggression>; 4],
    reached: [bool; 4],
}

impl HandState {
    fn start(hand: &Hand, seat_of: &HashMap<&str, usize>) -> Self {
        let mut seats = vec![SeatState::default(); hand.players().len()];
        for action in hand.streets().iter().flatten() {
            if let Some(&s) = seat_of.get(action.actor.as_str()) {
                seats[s].acted = true;
            }
        }
        Self {
            seats,
            raisers: Vec::new(),
            first_aggressor: [None; 4],
            reached: [false; 4],
        }
    }

    fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| s.live()).count()
    }

    fn last_raiser(&self) -> Option<usize> {
        self.raisers.last().copied()
    }

    /// Whether the deal got as far as `street`.
    fn reaches(&self, hand: &Hand, street: Street) -> bool {
        match street {
            Street::Preflop => true,
            _ => {
                let prev = street.index() - 1;
                self.reached[prev] && (hand.has_actions_from(street) || self.live_count() >= 2)
            }
        }
    }

    fn street(
        mut self,
        hand: &Hand,
        street: Street,
        seat_of: &HashMap<&str, usize>,
        table: &mut TagTable,
    ) -> Self {
        let reached = self.reaches(hand, street);
        self.reached[street.index()] = reached;
        if !reached {
            return self;
        }
        if let Some(saw) = Tag::saw(street) {
            for (seat, state) in self.seats.iter().enumerate() {
                if state.active_entering(street) {
                    table.set_seat(saw, seat);
                }
            }
        }

        let actions = hand.actions(street);
        for (index, action) in actions.iter().enumerate() {
            let Some(&seat) = seat_of.get(action.actor.as_str()) else {
                continue;
            };
            if let Some(tag) = Tag::for_action(street, &action.kind) {
                table.set_seat(tag, seat);
            }
            if street == Street::Preflop {
                self.preflop_action(seat, &action.kind, table);
            }
            if action.kind.is_aggressive() && self.first_aggressor[street.index()].is_none() {
                self.first_aggressor[street.index()] = Some(Aggression {
                    seat,
                    kind: action.kind,
                    index,
                });
            }
            if matches!(action.kind, ActionKind::Fold) {
                self.seats[seat].folded_on = Some(street);
            }
        }

        match street {
            Street::Preflop => self.close_preflop(actions, seat_of, table),
            Street::Flop => self.close_flop(actions, seat_of, table),
            Street::Turn | Street::River => {}
        }
        self
    }

    /// Ordinal bookkeeping for one preflop action, using the raise count
    /// in force before the action.
    fn preflop_action(&mut self, seat: usize, kind: &ActionKind, table: &mut TagTable) {
        if kind.blind_role().is_some() {
            return;
        }
        if kind.is_voluntary() {
            self.seats[seat].voluntary = true;
        }
        let facing = self.raisers.len();
        let not_latest = self.last_raiser() != Some(seat);
        match facing {
            0 => {}
            1 if not_latest => table.set_seat(Tag::Preflop3BetOpp, seat),
            2 if not_latest => {
                table.set_seat(Tag::Preflop4BetOpp, seat);
                table.set_seat(Tag::Faced3Bet, seat);
            }
            3 if not_latest => {
                table.set_seat(Tag::Preflop5BetOpp, seat);
                table.set_seat(Tag::Faced4Bet, seat);
            }
            n if n >= 4 && not_latest => table.set_seat(Tag::Faced5Bet, seat),
            _ => {}
        }
        if matches!(kind, ActionKind::Fold) {
            let tag = match facing {
                0 | 1 => None,
                2 => Some(Tag::FoldTo3Bet),
                3 => Some(Tag::FoldTo4Bet),
                _ => Some(Tag::FoldTo5Bet),
            };
            if let Some(tag) = tag {
                table.set_seat(tag, seat);
            }
        }
        if matches!(kind, ActionKind::Raise(_)) {
            self.raisers.push(seat);
        }
    }

    fn close_preflop(
        &self,
        actions: &[Action],
        seat_of: &HashMap<&str, usize>,
        table: &mut TagTable,
    ) {
        let blinds: Vec<(usize, BlindRole)> = actions
            .iter()
            .filter_map(|a| Some((*seat_of.get(a.actor.as_str())?, a.kind.blind_role()?)))
            .collect();
        // A lone posting is the big blind whatever role it was logged with.
        if let [(seat, _)] = blinds.as_slice() {
            table.set_seat(Tag::PreflopBb, *seat);
        } else {
            for (seat, role) in blinds {
                let tag = match role {
                    BlindRole::Small => Tag::PreflopSb,
                    BlindRole::Big => Tag::PreflopBb,
                };
                table.set_seat(tag, seat);
            }
        }

        for (seat, state) in self.seats.iter().enumerate() {
            if state.voluntary {
                table.set_seat(Tag::VoluntarilyPutIn, seat);
            }
        }

        for (ordinal, &seat) in self.raisers.iter().enumerate() {
            let tag = match ordinal {
                0 => Tag::PreflopOpenRaise,
                1 => Tag::Preflop3Bet,
                2 => Tag::Preflop4Bet,
                _ => Tag::Preflop5Bet,
            };
            table.set_seat(tag, seat);
        }
        if let Some(seat) = self.last_raiser() {
            table.set_seat(Tag::PreflopLastRaiser, seat);
        }
    }

    fn close_flop(&self, actions: &[Action], seat_of: &HashMap<&str, usize>, table: &mut TagTable) {
        let raiser = self.last_raiser();
        if let Some(raiser) = raiser {
            let raiser_saw_flop = self.seats[raiser].active_entering(Street::Flop);
            let raiser_acted = actions
                .iter()
                .any(|a| seat_of.get(a.actor.as_str()) == Some(&raiser));
            if raiser_saw_flop && raiser_acted {
                table.set_seat(Tag::FlopCbetOpp, raiser);
            }
        }

        let Some(first) = self.first_aggressor[Street::Flop.index()] else {
            return;
        };
        if raiser == Some(first.seat) {
            table.set_seat(Tag::FlopCbet, first.seat);
            for action in &actions[first.index + 1..] {
                let Some(&seat) = seat_of.get(action.actor.as_str()) else {
                    continue;
                };
                if seat == first.seat {
                    continue;
                }
                table.set_seat(Tag::FacedFlopCbet, seat);
                if matches!(action.kind, ActionKind::Fold) {
                    table.set_seat(Tag::FoldToFlopCbet, seat);
                }
            }
        } else if matches!(first.kind, ActionKind::Bet(_)) {
            // Also in limped pots, where there is no preflop raiser.
            table.set_seat(Tag::FlopDonk, first.seat);
        }
    }

    fn showdown(&self, hand: &Hand, table: &mut TagTable) {
        let showdown = self.reached[Street::River.index()] && self.live_count() >= 2;
        for (seat, (state, player)) in self.seats.iter().zip(hand.players()).enumerate() {
            table.set_seat(Tag::Participated, seat);
            if player.is_winner {
                table.set_seat(Tag::WonHand, seat);
            }
            let saw_river = self.reached[Street::River.index()]
                && state.active_entering(Street::River);
            if !(showdown && saw_river && state.folded_on.is_none()) {
                continue;
            }
            table.set_seat(Tag::SawShowdown, seat);
            let outcome = if player.is_winner {
                Tag::WonAtShowdown
            } else {
                Tag::LostAtShowdown
            };
            table.set_seat(outcome, seat);
        }
    }
}

/// Derive the full tag-presence table for one validated hand.
///
/// Streets are walked strictly in order; fold state, preflop raise ordinals and
/// each street's first aggressor are carried forward in an explicit per-hand
/// accumulator. The result covers every tag in [`Tag::ALL`] for every roster
/// player.
///
/// # Examples
///
/// ```
/// use homegame_engine::engine::evaluate;
/// use homegame_engine::record::HandRecord;
/// use homegame_engine::tags::Tag;
/// use serde_json::json;
///
/// let record: HandRecord = serde_json::from_value(json!({
///     "date": "2025-01-10",
///     "hand_number": 3,
///     "action_line": {
///         "preflop": [
///             {"player": "ann", "action": "blind", "blind_type": "small", "amount": 1},
///             {"player": "bob", "action": "blind", "blind_type": "big", "amount": 2},
///             {"player": "ann", "action": "raise", "amount": 6},
///             {"player": "bob", "action": "fold"}
///         ]
///     },
///     "players": [
///         {"player_nickname": "ann", "is_winner": true},
///         {"player_nickname": "bob"}
///     ]
/// }))
/// .unwrap();
///
/// let table = evaluate(&record.normalize().unwrap());
/// assert!(table.get(Tag::PreflopOpenRaise, "ann"));
/// assert!(table.get(Tag::PreflopFold, "bob"));
/// assert!(!table.get(Tag::SawFlop, "ann"));
/// ```
pub fn evaluate(hand: &Hand) -> TagTable {
    let seat_of: HashMap<&str, usize> = hand
        .players()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.nickname(), i))
        .collect();
    let mut table = TagTable::new(hand.players().iter().map(|p| p.nickname()));

    let state = Street::ALL
        .into_iter()
        .fold(HandState::start(hand, &seat_of), |state, street| {
            state.street(hand, street, &seat_of, &mut table)
        });
    state.showdown(hand, &mut table);
    table
}

/// Normalize a stored record and evaluate it.
pub fn tag_record(record: &HandRecord) -> Result<TagTable, LogError> {
    let hand = record.normalize()?;
    Ok(evaluate(&hand))
}
