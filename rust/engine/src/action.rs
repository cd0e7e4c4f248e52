use serde::{Deserialize, Serialize};
use std::fmt;

/// Which forced bet a `blind` posting covers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlindRole {
    Small,
    Big,
}

impl BlindRole {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "small" => Some(BlindRole::Small),
            "big" => Some(BlindRole::Big),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlindRole::Small => "small",
            BlindRole::Big => "big",
        }
    }
}

/// What a player did. Amount-carrying kinds hold their chip amount directly,
/// so an amount can never be missing where one is required.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Forced posting before the cards are dealt
    Blind { role: BlindRole, amount: u32 },
    /// Give up the hand
    Fold,
    /// Pass without betting
    Check,
    /// Match the current bet
    Call(u32),
    /// Open the betting on a street
    Bet(u32),
    /// Raise to the given total
    Raise(u32),
    /// Commit the remaining stack
    AllIn(u32),
}

/// Kind names as they appear in the `action` field of a log entry.
pub const KIND_NAMES: [&str; 7] = ["blind", "fold", "check", "call", "bet", "raise", "allin"];

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Blind { .. } => "blind",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call(_) => "call",
            ActionKind::Bet(_) => "bet",
            ActionKind::Raise(_) => "raise",
            ActionKind::AllIn(_) => "allin",
        }
    }

    pub fn amount(&self) -> Option<u32> {
        match *self {
            ActionKind::Blind { amount, .. }
            | ActionKind::Call(amount)
            | ActionKind::Bet(amount)
            | ActionKind::Raise(amount)
            | ActionKind::AllIn(amount) => Some(amount),
            ActionKind::Fold | ActionKind::Check => None,
        }
    }

    pub fn blind_role(&self) -> Option<BlindRole> {
        match *self {
            ActionKind::Blind { role, .. } => Some(role),
            _ => None,
        }
    }

    /// `bet` or `raise`.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, ActionKind::Bet(_) | ActionKind::Raise(_))
    }

    /// Money put in by choice; blind postings do not count.
    pub fn is_voluntary(&self) -> bool {
        matches!(
            self,
            ActionKind::Call(_) | ActionKind::Bet(_) | ActionKind::Raise(_) | ActionKind::AllIn(_)
        )
    }

    /// Whether a log entry of this kind name must carry an `amount`.
    pub fn name_requires_amount(name: &str) -> bool {
        !matches!(name, "fold" | "check")
    }
}

/// One recorded event within a street.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub actor: String,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(actor: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            actor: actor.into(),
            kind,
        }
    }

    pub fn blind(actor: impl Into<String>, role: BlindRole, amount: u32) -> Self {
        Self::new(actor, ActionKind::Blind { role, amount })
    }

    pub fn fold(actor: impl Into<String>) -> Self {
        Self::new(actor, ActionKind::Fold)
    }

    pub fn check(actor: impl Into<String>) -> Self {
        Self::new(actor, ActionKind::Check)
    }

    pub fn call(actor: impl Into<String>, amount: u32) -> Self {
        Self::new(actor, ActionKind::Call(amount))
    }

    pub fn bet(actor: impl Into<String>, amount: u32) -> Self {
        Self::new(actor, ActionKind::Bet(amount))
    }

    pub fn raise(actor: impl Into<String>, amount: u32) -> Self {
        Self::new(actor, ActionKind::Raise(amount))
    }

    pub fn allin(actor: impl Into<String>, amount: u32) -> Self {
        Self::new(actor, ActionKind::AllIn(amount))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Blind { role, amount } => {
                write!(f, "{} posts {} blind {}", self.actor, role.name(), amount)
            }
            kind => match kind.amount() {
                Some(amount) => write!(f, "{} {} {}", self.actor, kind.name(), amount),
                None => write!(f, "{} {}", self.actor, kind.name()),
            },
        }
    }
}
