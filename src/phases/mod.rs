//! Turn phase state machine.
//!
//! A match cycles through Start, Draw, Load, Trigger, Summon, Compile,
//! Battle and Challenge. The machine here only dispatches: which phase
//! follows which, and what each phase does, is decided by the `Phase`
//! implementations a game installs through its `PhaseFactory`.
//!
//! ## Key Types
//!
//! - `Phase`: The contract every phase implements
//! - `PhaseTransitions`: The `change_to_*` operations
//! - `PhaseMachine`: Owns the match state and the single active phase
//! - `PhaseContext`: What a running hook sees

pub mod error;
pub mod machine;
pub mod phase;

pub use error::PhaseError;
pub use machine::{PhaseContext, PhaseMachine};
pub use phase::{Phase, PhaseFactory, PhaseKind, PhaseRequest, PhaseTransitions, TriggerOrigin};
