//! Phase state machine.
//!
//! `PhaseMachine` owns the match state and the single active phase. It is
//! the driver the host talks to: it installs the first phase, forwards
//! ticks, and performs every swap.
//!
//! ## Transition Protocol
//!
//! 1. The old phase's `destroy` runs
//! 2. The factory builds the new phase, which becomes active
//! 3. The new phase's `create` runs
//!
//! A request made inside a hook is held in the `PhaseContext` and applied
//! when the hook returns, so a phase is never replaced while one of its
//! own methods is still running. Requests made from `create` chain into
//! further transitions within the same call, up to the configured limit.

use tracing::{debug, warn};

use super::error::PhaseError;
use super::phase::{Phase, PhaseFactory, PhaseKind, PhaseRequest, PhaseTransitions, TriggerOrigin};
use crate::core::config::PhaseConfig;

/// View of the match handed to phase hooks.
pub struct PhaseContext<'a, C> {
    game: &'a mut C,
    entered_by: &'a PhaseRequest,
    pending: Option<PhaseRequest>,
}

impl<'a, C> PhaseContext<'a, C> {
    fn new(game: &'a mut C, entered_by: &'a PhaseRequest) -> Self {
        Self {
            game,
            entered_by,
            pending: None,
        }
    }

    #[must_use]
    pub fn game(&self) -> &C {
        self.game
    }

    pub fn game_mut(&mut self) -> &mut C {
        self.game
    }

    /// The phase whose hook is running.
    #[must_use]
    pub fn current(&self) -> PhaseKind {
        self.entered_by.kind()
    }

    /// The request that entered the current phase.
    #[must_use]
    pub fn entered_by(&self) -> &PhaseRequest {
        self.entered_by
    }

    /// Why Trigger was entered, when the current phase is Trigger.
    #[must_use]
    pub fn origin(&self) -> Option<&TriggerOrigin> {
        self.entered_by.origin()
    }

    /// The transition requested so far by this hook, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PhaseRequest> {
        self.pending.as_ref()
    }

    fn into_pending(self) -> Option<PhaseRequest> {
        self.pending
    }
}

impl<C> PhaseTransitions for PhaseContext<'_, C> {
    type Output = ();

    /// Record a transition to apply once the hook returns.
    ///
    /// Only one transition can be pending; a second request replaces the
    /// first.
    fn request_phase(&mut self, request: PhaseRequest) {
        if let Some(previous) = &self.pending {
            warn!(phase = %self.current(), %previous, replacement = %request, "phase requested more than one transition");
        }
        self.pending = Some(request);
    }
}

struct ActivePhase<C> {
    request: PhaseRequest,
    phase: Box<dyn Phase<C>>,
}

/// Drives a match through its phases.
///
/// ## Example
///
/// ```
/// use card_battle::core::PhaseConfig;
/// use card_battle::phases::{Phase, PhaseContext, PhaseKind, PhaseMachine, PhaseRequest, PhaseTransitions};
///
/// struct Start;
/// impl Phase<u32> for Start {
///     fn kind(&self) -> PhaseKind { PhaseKind::Start }
///     fn create(&mut self, ctx: &mut PhaseContext<'_, u32>) {
///         *ctx.game_mut() += 1;
///         ctx.change_to_draw_phase();
///     }
/// }
///
/// struct Draw;
/// impl Phase<u32> for Draw {
///     fn kind(&self) -> PhaseKind { PhaseKind::Draw }
///     fn create(&mut self, _ctx: &mut PhaseContext<'_, u32>) {}
/// }
///
/// let mut machine = PhaseMachine::new(
///     0u32,
///     |request: &PhaseRequest| -> Box<dyn Phase<u32>> {
///         match request {
///             PhaseRequest::Start => Box::new(Start),
///             _ => Box::new(Draw),
///         }
///     },
///     PhaseConfig::default(),
/// );
///
/// machine.start(PhaseRequest::Start).unwrap();
/// assert_eq!(machine.active_kind(), Some(PhaseKind::Draw));
/// assert_eq!(*machine.game(), 1);
/// ```
pub struct PhaseMachine<C> {
    game: C,
    factory: Box<dyn PhaseFactory<C>>,
    active: Option<ActivePhase<C>>,
    config: PhaseConfig,
    transitions: u64,
}

impl<C> PhaseMachine<C> {
    /// Create a machine with no active phase.
    pub fn new(game: C, factory: impl PhaseFactory<C> + 'static, config: PhaseConfig) -> Self {
        Self {
            game,
            factory: Box::new(factory),
            active: None,
            config,
            transitions: 0,
        }
    }

    /// Install the first phase.
    pub fn start(&mut self, initial: PhaseRequest) -> Result<(), PhaseError> {
        if let Some(kind) = self.active_kind() {
            return Err(PhaseError::AlreadyStarted(kind));
        }
        self.apply(initial)
    }

    /// Run the active phase's `update`, then any transition it requested.
    pub fn update(&mut self) -> Result<(), PhaseError> {
        let active = self.active.as_mut().ok_or(PhaseError::NotStarted)?;
        let mut ctx = PhaseContext::new(&mut self.game, &active.request);
        active.phase.update(&mut ctx);

        match ctx.into_pending() {
            Some(request) => self.apply(request),
            None => Ok(()),
        }
    }

    /// Replace the active phase on behalf of the host.
    pub fn change_to(&mut self, request: PhaseRequest) -> Result<(), PhaseError> {
        if self.active.is_none() {
            return Err(PhaseError::NotStarted);
        }
        self.apply(request)
    }

    /// Tear down the active phase, leaving the machine unstarted.
    ///
    /// Returns the kind of the phase that was destroyed.
    pub fn stop(&mut self) -> Option<PhaseKind> {
        let mut old = self.active.take()?;
        old.phase.destroy(&mut self.game);
        debug!(phase = %old.request, "phase machine stopped");
        Some(old.request.kind())
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<PhaseKind> {
        self.active.as_ref().map(|active| active.phase.kind())
    }

    /// The request that entered the active phase.
    #[must_use]
    pub fn active_request(&self) -> Option<&PhaseRequest> {
        self.active.as_ref().map(|active| &active.request)
    }

    /// Why the active Trigger phase was entered.
    #[must_use]
    pub fn active_origin(&self) -> Option<&TriggerOrigin> {
        self.active_request().and_then(PhaseRequest::origin)
    }

    /// Number of phases entered so far.
    #[must_use]
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    #[must_use]
    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    #[must_use]
    pub fn game(&self) -> &C {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut C {
        &mut self.game
    }

    #[must_use]
    pub fn into_game(self) -> C {
        self.game
    }

    /// Apply `first` and every transition chained from `create` hooks.
    fn apply(&mut self, first: PhaseRequest) -> Result<(), PhaseError> {
        // The first request is always entered.
        let limit = self.config.max_chained_transitions.max(1);
        let mut next = Some(first);
        let mut chained = 0;

        while let Some(request) = next.take() {
            if chained == limit {
                let stopped_in = self.active_kind().unwrap_or(request.kind());
                warn!(limit, %stopped_in, dropped = %request, "phase transition chain too long");
                return Err(PhaseError::TransitionLimit { limit, stopped_in });
            }
            chained += 1;
            next = self.enter(request);
        }
        Ok(())
    }

    /// Swap in the phase for `request`. Returns the transition requested
    /// by its `create`, if any.
    fn enter(&mut self, request: PhaseRequest) -> Option<PhaseRequest> {
        let from = self.active.take().map(|mut old| {
            old.phase.destroy(&mut self.game);
            old.request.kind()
        });

        let phase = self.factory.build(&request);
        if phase.kind() != request.kind() {
            warn!(requested = %request, built = %phase.kind(), "phase factory built a different phase");
        }
        self.transitions += 1;
        match from {
            Some(from) => debug!(%from, to = %request, "phase transition"),
            None => debug!(to = %request, "initial phase"),
        }

        let active = self.active.insert(ActivePhase { request, phase });
        let mut ctx = PhaseContext::new(&mut self.game, &active.request);
        active.phase.create(&mut ctx);
        ctx.into_pending()
    }
}

impl<C> PhaseTransitions for PhaseMachine<C> {
    type Output = Result<(), PhaseError>;

    fn request_phase(&mut self, request: PhaseRequest) -> Self::Output {
        self.change_to(request)
    }
}
