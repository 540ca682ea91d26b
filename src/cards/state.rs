//! Visual states of a card.
//!
//! A card is always in exactly one visual state:
//!
//! - `Static`: Nothing is animating
//! - `Moving`: A `MoveQueue` drives the card's transform
//! - `Updating`: A stat change was just applied to the label
//!
//! States are replaced wholesale through `Card::change_state`. The one
//! exception is a move request while `Moving`: it is appended to the
//! running queue, so a card never has two animations fighting over its
//! transform.

use smallvec::SmallVec;

use super::card::Card;
use crate::animation::{Move, MoveQueue};

/// Moves submitted together. Most requests carry one or two segments.
pub type MoveBatch = SmallVec<[Move<Card>; 2]>;

/// Tag of a visual state, for inspection without borrowing its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualStateKind {
    Static,
    Moving,
    Updating,
}

impl std::fmt::Display for VisualStateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VisualStateKind::Static => "static",
            VisualStateKind::Moving => "moving",
            VisualStateKind::Updating => "updating",
        })
    }
}

/// Payload applied by the `Updating` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatUpdate {
    pub ap: i32,
    pub hp: i32,
}

/// The active visual state of a card.
#[derive(Debug, Default)]
pub enum VisualState {
    #[default]
    Static,

    /// Playing queued moves. Stays `Moving` after the queue drains, until
    /// another state replaces it; ticks on a drained queue do nothing.
    Moving(MoveQueue<Card>),

    /// Transient state entered after a stat change.
    Updating(StatUpdate),
}

impl VisualState {
    #[must_use]
    pub fn kind(&self) -> VisualStateKind {
        match self {
            VisualState::Static => VisualStateKind::Static,
            VisualState::Moving(_) => VisualStateKind::Moving,
            VisualState::Updating(_) => VisualStateKind::Updating,
        }
    }

    /// The move queue, if moving.
    #[must_use]
    pub fn queue(&self) -> Option<&MoveQueue<Card>> {
        match self {
            VisualState::Moving(queue) => Some(queue),
            _ => None,
        }
    }

    /// Number of segments still to play. Zero outside `Moving`.
    #[must_use]
    pub fn pending_moves(&self) -> usize {
        self.queue().map_or(0, MoveQueue::len)
    }
}

/// A request to replace the active visual state.
///
/// Each variant carries the arguments of the new state's creation routine,
/// which `Card::change_state` runs right after installing it.
#[derive(Debug)]
pub enum StateChange {
    Static,

    /// Start a fresh queue seeded with `moves`; moves without their own
    /// duration take `duration`.
    Moving { moves: MoveBatch, duration: u32 },

    /// Set attack to `ap` and redraw the label with `ap` and `hp`.
    Updating(StatUpdate),
}

impl StateChange {
    #[must_use]
    pub fn kind(&self) -> VisualStateKind {
        match self {
            StateChange::Static => VisualStateKind::Static,
            StateChange::Moving { .. } => VisualStateKind::Moving,
            StateChange::Updating(_) => VisualStateKind::Updating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_kinds() {
        assert_eq!(VisualState::default().kind(), VisualStateKind::Static);
        assert_eq!(
            VisualState::Moving(MoveQueue::new()).kind(),
            VisualStateKind::Moving
        );
        assert_eq!(
            VisualState::Updating(StatUpdate { ap: 1, hp: 2 }).kind(),
            VisualStateKind::Updating
        );
    }

    #[test]
    fn test_pending_moves() {
        let mut queue = MoveQueue::new();
        queue.append([Move::to(1.0, 1.0), Move::to(2.0, 2.0)], 0);

        assert_eq!(VisualState::Moving(queue).pending_moves(), 2);
        assert_eq!(VisualState::Static.pending_moves(), 0);
    }

    #[test]
    fn test_state_change_kind() {
        let change = StateChange::Moving {
            moves: smallvec![Move::to(0.0, 0.0)],
            duration: 0,
        };
        assert_eq!(change.kind(), VisualStateKind::Moving);
        assert_eq!(VisualStateKind::Updating.to_string(), "updating");
    }
}
