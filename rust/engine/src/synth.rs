use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde_json::{json, Map, Value};

use crate::hand::Street;
use crate::player::{seat_label, HandPlayer};
use crate::record::HandRecord;

const SMALL_BLIND: u32 = 1;
const BIG_BLIND: u32 = 2;
const MAX_RAISES: usize = 5;
const DEFAULT_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default date"),
};

#[derive(Debug, Clone)]
struct Seat {
    name: String,
    stack: u32,
    invested: u32,
    street_in: u32,
    folded: bool,
}

impl Seat {
    fn all_in(&self) -> bool {
        self.stack == 0
    }

    fn can_act(&self) -> bool {
        !self.folded && !self.all_in()
    }

    fn put(&mut self, chips: u32) -> u32 {
        let chips = chips.min(self.stack);
        self.stack -= chips;
        self.invested += chips;
        self.street_in += chips;
        chips
    }
}

/// Deterministic generator of well-formed hand records.
///
/// The same seed always yields the same sequence of records. Every record
/// normalizes cleanly: actors come from the roster, amounts match their kinds
/// and nobody acts after folding.
///
/// # Examples
///
/// ```
/// use homegame_engine::synth::HandSynth;
///
/// let a = HandSynth::new(7).records(5);
/// let b = HandSynth::new(7).records(5);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|r| r.normalize().is_ok()));
/// ```
#[derive(Debug)]
pub struct HandSynth {
    rng: ChaCha20Rng,
    date: NaiveDate,
    next_hand: u32,
}

impl HandSynth {
    pub fn new(seed: u64) -> Self {
        Self::on(seed, DEFAULT_DATE)
    }

    /// Generator whose hands are dated `date`, numbered from 1.
    pub fn on(seed: u64, date: NaiveDate) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            date,
            next_hand: 1,
        }
    }

    pub fn records(&mut self, count: usize) -> Vec<HandRecord> {
        (0..count).map(|_| self.next_record()).collect()
    }

    pub fn next_record(&mut self) -> HandRecord {
        let n = self.rng.random_range(2..=9usize);
        let mut seats: Vec<Seat> = (1..=n)
            .map(|i| Seat {
                name: format!("p{}", i),
                stack: self.rng.random_range(40..=400),
                invested: 0,
                street_in: 0,
                folded: false,
            })
            .collect();
        // Seat 0 posts the small blind; heads-up it is also the button.
        let dealer = if n == 2 { 0 } else { n - 1 };

        let mut line = Map::new();
        let mut preflop = Vec::new();
        let sb = seats[0].put(SMALL_BLIND);
        preflop.push(json!({"player": seats[0].name, "action": "blind", "blind_type": "small", "amount": sb}));
        let bb = seats[1].put(BIG_BLIND);
        preflop.push(json!({"player": seats[1].name, "action": "blind", "blind_type": "big", "amount": bb}));

        let preflop_order: Vec<usize> = if n == 2 {
            vec![0, 1]
        } else {
            (2..n).chain(0..2).collect()
        };
        let postflop_order: Vec<usize> = if n == 2 { vec![1, 0] } else { (0..n).collect() };

        let current = seats[0].street_in.max(seats[1].street_in);
        self.betting_round(&mut seats, &preflop_order, current, &mut preflop);
        line.insert(Street::Preflop.name().to_string(), Value::Array(preflop));

        for street in [Street::Flop, Street::Turn, Street::River] {
            let in_hand = seats.iter().filter(|s| !s.folded).count();
            let can_act = seats.iter().filter(|s| s.can_act()).count();
            if in_hand < 2 {
                break;
            }
            if can_act < 2 {
                // All-in run-out: remaining streets are dealt without action.
                continue;
            }
            for s in seats.iter_mut() {
                s.street_in = 0;
            }
            let mut entries = Vec::new();
            self.betting_round(&mut seats, &postflop_order, 0, &mut entries);
            line.insert(street.name().to_string(), Value::Array(entries));
        }

        let contenders: Vec<usize> = (0..n).filter(|&i| !seats[i].folded).collect();
        let winner = contenders[self.rng.random_range(0..contenders.len())];
        let pot: u32 = seats.iter().map(|s| s.invested).sum();

        let players = seats
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let starting = s.stack + s.invested;
                let won = if i == winner { pot } else { 0 };
                let mut p = HandPlayer::new(s.name.clone())
                    .at(seat_label((i + n - dealer) % n, n));
                p.starting_stack = starting;
                p.ending_stack = s.stack + won;
                p.profit = i64::from(won) - i64::from(s.invested);
                p.is_winner = i == winner;
                p
            })
            .collect();

        let record = HandRecord {
            date: self.date,
            hand_number: self.next_hand,
            game_type: "NLH".to_string(),
            is_bomb_pot: false,
            dealer: seats[dealer].name.clone(),
            player_num: n as u32,
            total_pot: pot,
            action_line: Value::Object(line),
            players,
        };
        self.next_hand += 1;
        record
    }

    /// One street of betting. Ends when every player still able to act has
    /// acted since the last raise, or only one player remains.
    fn betting_round(
        &mut self,
        seats: &mut [Seat],
        order: &[usize],
        mut current: u32,
        out: &mut Vec<Value>,
    ) {
        let mut pending = order.iter().filter(|&&i| seats[i].can_act()).count();
        let mut raises = 0;
        let mut turn = 0;
        while pending > 0 && seats.iter().filter(|s| !s.folded).count() > 1 {
            let i = order[turn % order.len()];
            turn += 1;
            if !seats[i].can_act() {
                continue;
            }
            pending -= 1;
            let seat = &mut seats[i];
            let to_call = current.saturating_sub(seat.street_in);
            let roll: f64 = self.rng.random();
            let can_raise = raises < MAX_RAISES;

            let (kind, amount) = if to_call == 0 {
                if roll < 0.6 || !can_raise {
                    ("check", None)
                } else if roll < 0.95 {
                    let size = (current.max(BIG_BLIND) * 2).max(BIG_BLIND);
                    let kind = if current == 0 { "bet" } else { "raise" };
                    (kind, Some(size))
                } else {
                    ("allin", Some(seat.stack))
                }
            } else if roll < 0.3 {
                ("fold", None)
            } else if roll < 0.8 || !can_raise {
                ("call", Some(to_call))
            } else if roll < 0.97 {
                ("raise", Some(to_call + current.max(BIG_BLIND) * 2))
            } else {
                ("allin", Some(seat.stack))
            };

            let (kind, amount) = match (kind, amount) {
                ("fold", _) => {
                    seat.folded = true;
                    ("fold", None)
                }
                ("check", _) => ("check", None),
                (k, Some(a)) if a >= seat.stack => {
                    let put = seat.put(a);
                    (if k == "call" { "call" } else { "allin" }, Some(put))
                }
                (k, Some(a)) => (k, Some(seat.put(a))),
                (k, None) => (k, None),
            };

            if seat.street_in > current {
                current = seat.street_in;
                if kind != "call" {
                    raises += 1;
                }
                pending = order
                    .iter()
                    .filter(|&&j| j != i && seats[j].can_act())
                    .count();
            }

            let mut entry = json!({"player": seats[i].name, "action": kind});
            if let (Some(a), Value::Object(fields)) = (amount, &mut entry) {
                fields.insert("amount".to_string(), json!(a));
            }
            out.push(entry);
        }
    }
}
