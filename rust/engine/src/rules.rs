use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::action::{Action, ActionKind, BlindRole};
use crate::errors::LogError;
use crate::hand::{Hand, HandId, HandInfo, Street, Streets};
use crate::player::HandPlayer;

/// Validates a raw `action_line` document against the hand's roster and
/// converts it into typed per-street action sequences.
///
/// The document maps street names to lists of entries shaped as
/// `{"player", "action", "blind_type"?, "amount"?}`. Entry order is kept
/// verbatim; nothing is reordered or deduplicated. A string holding the JSON
/// document is accepted too.
///
/// # Errors
///
/// - [`LogError::MalformedLog`] - bad street key, wrong entry shape, amount or
///   blind role present/absent against the kind, a blind after preflop, or a
///   player acting after folding
/// - [`LogError::UnknownAction`] - an `action` outside the fixed kind set
/// - [`LogError::UnknownPlayer`] - a `player` missing from the roster
///
/// # Examples
///
/// ```
/// use homegame_engine::hand::Street;
/// use homegame_engine::player::HandPlayer;
/// use homegame_engine::rules::normalize_action_line;
/// use serde_json::json;
///
/// let roster = vec![HandPlayer::new("ann"), HandPlayer::new("bob")];
/// let line = json!({
///     "preflop": [
///         {"player": "ann", "action": "blind", "blind_type": "small", "amount": 1},
///         {"player": "bob", "action": "blind", "blind_type": "big", "amount": 2},
///         {"player": "ann", "action": "fold"}
///     ]
/// });
/// let streets = normalize_action_line(&line, &roster).unwrap();
/// assert_eq!(streets[Street::Preflop.index()].len(), 3);
/// assert!(streets[Street::Flop.index()].is_empty());
/// ```
///
/// ```
/// use homegame_engine::errors::LogError;
/// use homegame_engine::player::HandPlayer;
/// use homegame_engine::rules::normalize_action_line;
/// use serde_json::json;
///
/// let roster = vec![HandPlayer::new("ann")];
/// let line = json!({"preflop": [{"player": "zed", "action": "fold"}]});
/// let err = normalize_action_line(&line, &roster).unwrap_err();
/// assert!(matches!(err, LogError::UnknownPlayer { .. }));
/// ```
pub fn normalize_action_line(
    action_line: &Value,
    roster: &[HandPlayer],
) -> Result<Streets, LogError> {
    let parsed;
    let document = match action_line {
        Value::String(text) => {
            parsed = serde_json::from_str::<Value>(text)
                .map_err(|e| LogError::malformed(format!("action_line is not JSON: {}", e)))?;
            &parsed
        }
        other => other,
    };
    let Value::Object(by_street) = document else {
        return Err(LogError::malformed("action_line must be an object"));
    };

    let known: HashSet<&str> = roster.iter().map(|p| p.nickname()).collect();
    let mut raw: [Option<&Vec<Value>>; 4] = [None; 4];
    for (key, entries) in by_street {
        let street = Street::from_name(key)
            .ok_or_else(|| LogError::malformed(format!("unknown street '{}'", key)))?;
        let Value::Array(entries) = entries else {
            return Err(LogError::malformed(format!("{} must be a list", street)));
        };
        raw[street.index()] = Some(entries);
    }

    let mut streets: Streets = Default::default();
    let mut folded: HashSet<String> = HashSet::new();
    for street in Street::ALL {
        let Some(entries) = raw[street.index()] else {
            continue;
        };
        for (pos, entry) in entries.iter().enumerate() {
            let action = parse_entry(street, pos, entry, &known)?;
            if folded.contains(&action.actor) {
                return Err(LogError::malformed(format!(
                    "{} acts on {} after folding",
                    action.actor, street
                )));
            }
            if matches!(action.kind, ActionKind::Fold) {
                folded.insert(action.actor.clone());
            }
            streets[street.index()].push(action);
        }
    }
    Ok(streets)
}

/// Full normalization: roster sanity plus [`normalize_action_line`].
pub fn normalize_hand(
    id: HandId,
    info: HandInfo,
    roster: &[HandPlayer],
    action_line: &Value,
) -> Result<Hand, LogError> {
    let mut seen = HashSet::new();
    for p in roster {
        if !seen.insert(p.nickname()) {
            return Err(LogError::malformed(format!(
                "roster lists '{}' twice",
                p.nickname()
            )));
        }
    }
    let streets = normalize_action_line(action_line, roster)?;
    Ok(Hand::new(id, info, roster.to_vec(), streets))
}

fn parse_entry(
    street: Street,
    pos: usize,
    entry: &Value,
    known: &HashSet<&str>,
) -> Result<Action, LogError> {
    let at = || format!("{} entry {}", street, pos + 1);
    let Value::Object(fields) = entry else {
        return Err(LogError::malformed(format!("{} is not an object", at())));
    };
    let player = str_field(fields, "player").ok_or_else(|| {
        LogError::malformed(format!("{} has no player name", at()))
    })?;
    let kind_name = str_field(fields, "action")
        .ok_or_else(|| LogError::malformed(format!("{} has no action", at())))?;
    if !crate::action::KIND_NAMES.contains(&kind_name) {
        return Err(LogError::UnknownAction {
            street,
            kind: kind_name.to_string(),
        });
    }
    if !known.contains(player) {
        return Err(LogError::UnknownPlayer {
            street,
            player: player.to_string(),
        });
    }

    let amount = match fields.get("amount") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    LogError::malformed(format!("{} has an invalid amount {}", at(), v))
                })?,
        ),
    };
    let requires_amount = ActionKind::name_requires_amount(kind_name);
    let amount = match (requires_amount, amount) {
        (true, Some(a)) => a,
        (false, None) => 0,
        (true, None) => {
            return Err(LogError::malformed(format!(
                "{} ({}) is missing its amount",
                at(),
                kind_name
            )))
        }
        (false, Some(_)) => {
            return Err(LogError::malformed(format!(
                "{} ({}) must not carry an amount",
                at(),
                kind_name
            )))
        }
    };

    let blind_type = match fields.get("blind_type") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_str().and_then(BlindRole::from_name).ok_or_else(|| {
            LogError::malformed(format!("{} has an invalid blind_type {}", at(), v))
        })?),
    };

    let kind = match (kind_name, blind_type) {
        ("blind", Some(role)) => {
            if street != Street::Preflop {
                return Err(LogError::malformed(format!(
                    "{} posts a blind after preflop",
                    at()
                )));
            }
            ActionKind::Blind { role, amount }
        }
        ("blind", None) => {
            return Err(LogError::malformed(format!(
                "{} is a blind without blind_type",
                at()
            )))
        }
        (_, Some(_)) => {
            return Err(LogError::malformed(format!(
                "{} ({}) must not carry a blind_type",
                at(),
                kind_name
            )))
        }
        ("fold", None) => ActionKind::Fold,
        ("check", None) => ActionKind::Check,
        ("call", None) => ActionKind::Call(amount),
        ("bet", None) => ActionKind::Bet(amount),
        ("raise", None) => ActionKind::Raise(amount),
        ("allin", None) => ActionKind::AllIn(amount),
        (other, None) => {
            return Err(LogError::UnknownAction {
                street,
                kind: other.to_string(),
            })
        }
    };
    Ok(Action::new(player, kind))
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}
