//! # Vote Aggregation
//!
//! Given a user's standing vote on a target and a new intent, decides what
//! happens to the vote row and how the target's counters move. Stores apply
//! the row change and the [`CounterDelta`] under one lock.

use serde::{Deserialize, Serialize};

use crate::models::VoteType;

/// What a vote intent does to the (user, target) vote row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteTransition {
    /// No standing vote: insert one.
    Cast(VoteType),
    /// Same type again: delete the row.
    Retract(VoteType),
    /// Opposite type: flip the row in place.
    Switch { from: VoteType, to: VoteType },
}

impl VoteTransition {
    pub fn resolve(existing: Option<VoteType>, intent: VoteType) -> Self {
        match existing {
            None => VoteTransition::Cast(intent),
            Some(current) if current == intent => VoteTransition::Retract(intent),
            Some(current) => VoteTransition::Switch {
                from: current,
                to: intent,
            },
        }
    }

    /// The vote row after the transition, `None` when it is removed.
    pub fn resulting_vote(&self) -> Option<VoteType> {
        match *self {
            VoteTransition::Cast(t) => Some(t),
            VoteTransition::Retract(_) => None,
            VoteTransition::Switch { to, .. } => Some(to),
        }
    }

    pub fn delta(&self) -> CounterDelta {
        match *self {
            VoteTransition::Cast(t) => CounterDelta::ZERO.with(t, 1),
            VoteTransition::Retract(t) => CounterDelta::ZERO.with(t, -1),
            VoteTransition::Switch { from, to } => CounterDelta::ZERO.with(from, -1).with(to, 1),
        }
    }
}

/// Change to an entity's (upvotes, downvotes) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDelta {
    pub up: i64,
    pub down: i64,
}

impl CounterDelta {
    pub const ZERO: CounterDelta = CounterDelta { up: 0, down: 0 };

    fn with(mut self, vote_type: VoteType, by: i64) -> Self {
        match vote_type {
            VoteType::Up => self.up += by,
            VoteType::Down => self.down += by,
        }
        self
    }

    /// Net change to the score (upvotes - downvotes).
    pub fn score(&self) -> i64 {
        self.up - self.down
    }

    pub fn apply(&self, upvotes: &mut i64, downvotes: &mut i64) {
        *upvotes += self.up;
        *downvotes += self.down;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_vote_is_cast() {
        let t = VoteTransition::resolve(None, VoteType::Down);
        assert_eq!(t, VoteTransition::Cast(VoteType::Down));
        assert_eq!(t.delta(), CounterDelta { up: 0, down: 1 });
        assert_eq!(t.resulting_vote(), Some(VoteType::Down));
    }

    #[test]
    fn repeating_a_vote_retracts_it() {
        let t = VoteTransition::resolve(Some(VoteType::Up), VoteType::Up);
        assert_eq!(t, VoteTransition::Retract(VoteType::Up));
        assert_eq!(t.delta(), CounterDelta { up: -1, down: 0 });
        assert_eq!(t.resulting_vote(), None);
    }

    #[test]
    fn switching_moves_both_counters() {
        let t = VoteTransition::resolve(Some(VoteType::Up), VoteType::Down);
        let d = t.delta();
        assert_eq!(d, CounterDelta { up: -1, down: 1 });
        assert_eq!(d.score(), -2);

        let (mut up, mut down) = (5, 2);
        d.apply(&mut up, &mut down);
        assert_eq!((up, down), (4, 3));
    }
}
