//! The phase contract.
//!
//! A match moves through eight named phases. Each phase is an object
//! implementing [`Phase`]; it runs its setup in `create`, may do per-tick
//! work in `update`, cleans up in `destroy`, and asks for its successor
//! through the [`PhaseTransitions`] methods. There is no implicit next
//! phase: every transition is requested explicitly.

use serde::{Deserialize, Serialize};

use super::machine::PhaseContext;

/// The closed set of turn phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Start,
    Draw,
    Load,
    Trigger,
    Summon,
    Compile,
    Battle,
    Challenge,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 8] = [
        PhaseKind::Start,
        PhaseKind::Draw,
        PhaseKind::Load,
        PhaseKind::Trigger,
        PhaseKind::Summon,
        PhaseKind::Compile,
        PhaseKind::Battle,
        PhaseKind::Challenge,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PhaseKind::Start => "start",
            PhaseKind::Draw => "draw",
            PhaseKind::Load => "load",
            PhaseKind::Trigger => "trigger",
            PhaseKind::Summon => "summon",
            PhaseKind::Compile => "compile",
            PhaseKind::Battle => "battle",
            PhaseKind::Challenge => "challenge",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why the Trigger phase was entered.
///
/// Trigger is the one phase entered from several places; the origin lets
/// its setup branch without the machine knowing the reason.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerOrigin(String);

impl TriggerOrigin {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TriggerOrigin {
    fn from(origin: &str) -> Self {
        Self::new(origin)
    }
}

impl From<String> for TriggerOrigin {
    fn from(origin: String) -> Self {
        Self(origin)
    }
}

/// Origin named after the phase that requested the trigger.
impl From<PhaseKind> for TriggerOrigin {
    fn from(kind: PhaseKind) -> Self {
        Self::new(kind.name())
    }
}

impl std::fmt::Display for TriggerOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request to enter a phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseRequest {
    Start,
    Draw,
    Load,
    Trigger(TriggerOrigin),
    Summon,
    Compile,
    Battle,
    Challenge,
}

impl PhaseRequest {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            PhaseRequest::Start => PhaseKind::Start,
            PhaseRequest::Draw => PhaseKind::Draw,
            PhaseRequest::Load => PhaseKind::Load,
            PhaseRequest::Trigger(_) => PhaseKind::Trigger,
            PhaseRequest::Summon => PhaseKind::Summon,
            PhaseRequest::Compile => PhaseKind::Compile,
            PhaseRequest::Battle => PhaseKind::Battle,
            PhaseRequest::Challenge => PhaseKind::Challenge,
        }
    }

    /// The trigger origin, for Trigger requests.
    #[must_use]
    pub fn origin(&self) -> Option<&TriggerOrigin> {
        match self {
            PhaseRequest::Trigger(origin) => Some(origin),
            _ => None,
        }
    }
}

impl std::fmt::Display for PhaseRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseRequest::Trigger(origin) => write!(f, "trigger({origin})"),
            other => f.write_str(other.kind().name()),
        }
    }
}

/// Requesting the next phase.
///
/// Implemented by [`PhaseContext`], where requests are applied once the
/// running hook returns, and by `PhaseMachine`, where they are applied
/// immediately and report errors through `Output`.
pub trait PhaseTransitions {
    /// What a request returns to the caller.
    type Output;

    /// Request a transition to the given phase.
    fn request_phase(&mut self, request: PhaseRequest) -> Self::Output;

    fn change_to_start_phase(&mut self) -> Self::Output {
        self.request_phase(PhaseRequest::Start)
    }

    fn change_to_draw_phase(&mut self) -> Self::Output {
        self.request_phase(PhaseRequest::Draw)
    }

    fn change_to_load_phase(&mut self) -> Self::Output {
        self.request_phase(PhaseRequest::Load)
    }

    /// Enter Trigger, recording why.
    fn change_to_trigger_phase(&mut self, origin: TriggerOrigin) -> Self::Output {
        self.request_phase(PhaseRequest::Trigger(origin))
    }

    fn change_to_summon_phase(&mut self) -> Self::Output {
        self.request_phase(PhaseRequest::Summon)
    }

    fn change_to_compile_phase(&mut self) -> Self::Output {
        self.request_phase(PhaseRequest::Compile)
    }

    fn change_to_battle_phase(&mut self) -> Self::Output {
        self.request_phase(PhaseRequest::Battle)
    }

    fn change_to_challenge_phase(&mut self) -> Self::Output {
        self.request_phase(PhaseRequest::Challenge)
    }
}

/// One stage of a match's turn structure.
///
/// `C` is the match state the phase works on. Hooks receive it through a
/// [`PhaseContext`], which also carries the transition methods.
pub trait Phase<C> {
    /// Which phase this is.
    fn kind(&self) -> PhaseKind;

    /// Entry setup. Runs once, right after the phase becomes active, and
    /// may already request the next phase.
    fn create(&mut self, ctx: &mut PhaseContext<'_, C>);

    /// Per-tick hook.
    fn update(&mut self, _ctx: &mut PhaseContext<'_, C>) {}

    /// Exit cleanup. Runs once, before the replacement's `create`.
    fn destroy(&mut self, _game: &mut C) {}
}

/// Builds phase objects for the machine.
///
/// This is how the host installs its phases: the machine never constructs
/// phases itself.
pub trait PhaseFactory<C> {
    fn build(&mut self, request: &PhaseRequest) -> Box<dyn Phase<C>>;
}

impl<C, F> PhaseFactory<C> for F
where
    F: FnMut(&PhaseRequest) -> Box<dyn Phase<C>>,
{
    fn build(&mut self, request: &PhaseRequest) -> Box<dyn Phase<C>> {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_and_origin() {
        let request = PhaseRequest::Trigger("load".into());
        assert_eq!(request.kind(), PhaseKind::Trigger);
        assert_eq!(request.origin().map(TriggerOrigin::as_str), Some("load"));
        assert_eq!(request.to_string(), "trigger(load)");

        assert_eq!(PhaseRequest::Battle.origin(), None);
        assert_eq!(PhaseRequest::Battle.to_string(), "battle");
    }

    #[test]
    fn test_origin_from_phase() {
        assert_eq!(TriggerOrigin::from(PhaseKind::Compile).as_str(), "compile");
    }

    #[test]
    fn test_all_kinds_distinct() {
        let mut names: Vec<_> = PhaseKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    struct Recorder(Vec<PhaseRequest>);

    impl PhaseTransitions for Recorder {
        type Output = ();

        fn request_phase(&mut self, request: PhaseRequest) {
            self.0.push(request);
        }
    }

    #[test]
    fn test_transition_methods_map_to_requests() {
        let mut recorder = Recorder(Vec::new());
        recorder.change_to_start_phase();
        recorder.change_to_draw_phase();
        recorder.change_to_load_phase();
        recorder.change_to_trigger_phase("event".into());
        recorder.change_to_summon_phase();
        recorder.change_to_compile_phase();
        recorder.change_to_battle_phase();
        recorder.change_to_challenge_phase();

        let kinds: Vec<_> = recorder.0.iter().map(PhaseRequest::kind).collect();
        assert_eq!(kinds, PhaseKind::ALL.to_vec());
        assert_eq!(recorder.0[3], PhaseRequest::Trigger(TriggerOrigin::new("event")));
    }
}
