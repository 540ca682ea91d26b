//! Ordered playback of queued moves.
//!
//! A `MoveQueue` is the single animation driver of one object. Requests
//! that arrive while it is playing are appended behind the segments
//! already queued; nothing is reordered or dropped, and at most one
//! `Tween` runs at a time.

use std::collections::VecDeque;

use super::tween::{Move, OnComplete, Transform, Tween};

/// Result of advancing a queue.
pub enum Step<T> {
    /// Nothing left to play.
    Idle,

    /// The head segment is still running; apply this transform.
    Playing(Transform),

    /// The head segment finished; apply its final transform, then run
    /// the callback if there is one.
    Completed {
        transform: Transform,
        callback: Option<OnComplete<T>>,
    },
}

impl<T> std::fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Idle => f.write_str("Idle"),
            Step::Playing(t) => f.debug_tuple("Playing").field(t).finish(),
            Step::Completed { transform, callback } => f
                .debug_struct("Completed")
                .field("transform", transform)
                .field("callback", &callback.is_some())
                .finish(),
        }
    }
}

/// FIFO of moves with one active tween.
pub struct MoveQueue<T> {
    /// Pending segments; the head is the one playing.
    segments: VecDeque<Move<T>>,

    /// Interpolation of the head segment, once it has started.
    active: Option<Tween>,

    /// Number of segments completed so far.
    played: usize,
}

impl<T> Default for MoveQueue<T> {
    fn default() -> Self {
        Self {
            segments: VecDeque::new(),
            active: None,
            played: 0,
        }
    }
}

impl<T> MoveQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append moves behind everything already queued.
    ///
    /// Moves without their own duration take `default_duration`.
    /// Returns the number of moves appended.
    pub fn append<I>(&mut self, moves: I, default_duration: u32) -> usize
    where
        I: IntoIterator<Item = Move<T>>,
    {
        let before = self.segments.len();
        self.segments.extend(moves.into_iter().map(|mut m| {
            m.duration.get_or_insert(default_duration);
            m
        }));
        self.segments.len() - before
    }

    /// Number of segments not yet completed, including the playing one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the head segment has started interpolating.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn played(&self) -> usize {
        self.played
    }

    /// Pending segments in playback order.
    pub fn segments(&self) -> impl Iterator<Item = &Move<T>> {
        self.segments.iter()
    }

    /// Advance the head segment using time from `budget`.
    ///
    /// Time consumed is subtracted from `budget`. A segment that finishes
    /// is removed and returned as `Step::Completed`; callers loop to spend
    /// the leftover budget on the next segment. Zero-duration segments
    /// complete even with an empty budget.
    pub fn advance(&mut self, current: Transform, budget: &mut u32) -> Step<T> {
        let Some(head) = self.segments.front() else {
            return Step::Idle;
        };

        let tween = self.active.get_or_insert_with(|| {
            Tween::new(current, head.target(current), head.duration.unwrap_or(0), head.ease)
        });
        *budget -= tween.advance(*budget);

        if !tween.is_finished() {
            return Step::Playing(tween.current());
        }

        let transform = tween.target();
        self.active = None;
        self.played += 1;
        let callback = self
            .segments
            .pop_front()
            .and_then(|mut done| done.take_callback());

        Step::Completed { transform, callback }
    }
}

impl<T> std::fmt::Debug for MoveQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveQueue")
            .field("segments", &self.segments)
            .field("active", &self.active)
            .field("played", &self.played)
            .finish()
    }
}
