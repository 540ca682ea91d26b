//! Errors raised by the phase machine.

use thiserror::Error;

use super::phase::PhaseKind;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("phase machine has not been started")]
    NotStarted,

    #[error("phase machine already started, active phase is {0}")]
    AlreadyStarted(PhaseKind),

    #[error("more than {limit} chained phase transitions, stopped in {stopped_in}")]
    TransitionLimit { limit: usize, stopped_in: PhaseKind },
}
