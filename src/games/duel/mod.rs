//! Two-player duel that drives cards through the phase cycle.
//!
//! Each turn the active player draws, summons a battle card, compiles a
//! power card into +1 attack for their field, and attacks the opponent
//! with the field's total attack. First player to 0 life loses.
//!
//! The host calls `Duel::tick` once per frame; card animations advance
//! first, then the active phase gets its update.

mod board;
mod phases;

pub use board::{DuelBoard, DuelBuilder, DuelSettings, Side, PLAYERS};
pub use phases::duel_phase;

use crate::core::PhaseConfig;
use crate::phases::{PhaseError, PhaseKind, PhaseMachine, PhaseRequest};
use crate::render::RenderSurface;

/// A duel board bound to its phase machine.
pub struct Duel {
    machine: PhaseMachine<DuelBoard>,
}

impl Duel {
    pub fn new(board: DuelBoard, config: PhaseConfig) -> Self {
        Self {
            machine: PhaseMachine::new(board, duel_phase, config),
        }
    }

    /// Enter the first Start phase.
    pub fn start(&mut self) -> Result<(), PhaseError> {
        self.machine.start(PhaseRequest::Start)
    }

    /// Advance animations by `delta` milliseconds, then update the phase.
    pub fn tick(&mut self, delta: u32) -> Result<(), PhaseError> {
        self.machine.game_mut().tick(delta);
        self.machine.update()
    }

    /// Tick until a winner emerges or `max_ticks` run out.
    ///
    /// Returns the winner, if any.
    pub fn run(&mut self, delta: u32, max_ticks: usize) -> Result<Option<usize>, PhaseError> {
        for _ in 0..max_ticks {
            if let Some(winner) = self.board().winner() {
                return Ok(Some(winner));
            }
            self.tick(delta)?;
        }
        Ok(self.board().winner())
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        self.board().render(surface);
    }

    #[must_use]
    pub fn board(&self) -> &DuelBoard {
        self.machine.game()
    }

    #[must_use]
    pub fn phase(&self) -> Option<PhaseKind> {
        self.machine.active_kind()
    }

    #[must_use]
    pub fn machine(&self) -> &PhaseMachine<DuelBoard> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut PhaseMachine<DuelBoard> {
        &mut self.machine
    }
}
