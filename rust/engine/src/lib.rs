//! # homegame-engine: Hand Tag-Matching Engine
//!
//! Turns one recorded poker hand (its street-by-street action log plus the
//! player roster with results) into a table of boolean behavioural tags per
//! player, and reduces many such tables to the usual tracker statistics.
//! Pure and deterministic: no I/O, no state kept between hands.
//!
//! ## Core Modules
//!
//! - [`action`] - Closed action kinds (blind, fold, check, call, bet, raise, allin)
//! - [`hand`] - Streets, hand identity and the validated [`hand::Hand`]
//! - [`player`] - Roster entries and seat labels
//! - [`record`] - Stored hand records and JSONL writing
//! - [`rules`] - Action log normalization and well-formedness checks
//! - [`engine`] - The tag evaluator
//! - [`tags`] - Tag vocabulary and the per-hand tag table
//! - [`batch`] - Parallel evaluation over many hands with per-hand failures
//! - [`stats`] - VPIP/PFR/3-Bet/C-Bet/WTSD/W$SD/AF reduction
//! - [`synth`] - Seeded generator of well-formed hands
//! - [`errors`] - Normalization error classes
//!
//! ## Quick Start
//!
//! ```rust
//! use homegame_engine::engine::tag_record;
//! use homegame_engine::record::HandRecord;
//! use homegame_engine::tags::Tag;
//!
//! let record: HandRecord = serde_json::from_str(r#"{
//!     "date": "2025-01-10",
//!     "hand_number": 1,
//!     "action_line": {
//!         "preflop": [
//!             {"player": "ann", "action": "blind", "blind_type": "small", "amount": 1},
//!             {"player": "bob", "action": "blind", "blind_type": "big", "amount": 2},
//!             {"player": "ann", "action": "call", "amount": 1},
//!             {"player": "bob", "action": "check"}
//!         ],
//!         "flop": [
//!             {"player": "bob", "action": "bet", "amount": 4},
//!             {"player": "ann", "action": "fold"}
//!         ]
//!     },
//!     "players": [
//!         {"player_nickname": "ann"},
//!         {"player_nickname": "bob", "is_winner": true}
//!     ]
//! }"#).unwrap();
//!
//! let tags = tag_record(&record).unwrap();
//! assert!(tags.get(Tag::VoluntarilyPutIn, "ann"));
//! assert!(tags.get(Tag::FlopBet, "bob"));
//! assert!(!tags.get(Tag::SawShowdown, "bob"));
//! ```
//!
//! ## Batches
//!
//! Hands that fail normalization are reported next to the successful tables
//! rather than aborting the run:
//!
//! ```rust
//! use homegame_engine::batch::{evaluate_batch, BatchOptions};
//! use homegame_engine::stats::{summarize, SummaryOptions};
//! use homegame_engine::synth::HandSynth;
//!
//! let records = HandSynth::new(42).records(100);
//! let report = evaluate_batch(&records, &BatchOptions::default());
//! assert_eq!(report.evaluated(), 100);
//! assert!(report.failures.is_empty());
//!
//! let summary = summarize(&report, &SummaryOptions::default());
//! assert!(summary.iter().all(|p| p.ratios.vpip <= 100.0));
//! ```

pub mod action;
pub mod batch;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod player;
pub mod record;
pub mod rules;
pub mod stats;
pub mod synth;
pub mod tags;
