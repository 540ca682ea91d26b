//! The eight duel phases.
//!
//! Phases that start card animations wait in `update` until the board has
//! settled before moving on; the others chain straight from `create`.

use tracing::debug;

use super::board::DuelBoard;
use crate::phases::{Phase, PhaseContext, PhaseKind, PhaseRequest, PhaseTransitions, TriggerOrigin};

/// Record the phase on the board's history.
fn enter(ctx: &mut PhaseContext<'_, DuelBoard>) {
    let request = ctx.entered_by().clone();
    ctx.game_mut().record(&request);
}

/// Build the phase for a request.
pub fn duel_phase(request: &PhaseRequest) -> Box<dyn Phase<DuelBoard>> {
    match request {
        PhaseRequest::Start => Box::new(StartPhase),
        PhaseRequest::Draw => Box::new(DrawPhase),
        PhaseRequest::Load => Box::new(LoadPhase),
        PhaseRequest::Trigger(origin) => Box::new(TriggerPhase { origin: origin.clone() }),
        PhaseRequest::Summon => Box::new(SummonPhase),
        PhaseRequest::Compile => Box::new(CompilePhase),
        PhaseRequest::Battle => Box::new(BattlePhase),
        PhaseRequest::Challenge => Box::new(ChallengePhase),
    }
}

/// Opens a turn. Deals the opening hands on the first one.
pub struct StartPhase;

impl Phase<DuelBoard> for StartPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Start
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        ctx.game_mut().begin_turn();
    }

    fn update(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        if ctx.game().is_settled() {
            ctx.change_to_draw_phase();
        }
    }
}

/// The active player draws.
pub struct DrawPhase;

impl Phase<DuelBoard> for DrawPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Draw
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        let board = ctx.game_mut();
        let player = board.active_player();
        let count = board.settings().draw_per_turn;
        board.draw(player, count);
    }

    fn update(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        if ctx.game().is_settled() {
            ctx.change_to_load_phase();
        }
    }
}

/// Fires the load trigger.
pub struct LoadPhase;

impl Phase<DuelBoard> for LoadPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Load
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        ctx.change_to_trigger_phase(PhaseKind::Load.into());
    }
}

/// Routes on why it was entered: after load comes summon, after compile
/// comes battle, anything else ends the turn.
pub struct TriggerPhase {
    origin: TriggerOrigin,
}

impl Phase<DuelBoard> for TriggerPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Trigger
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        debug!(origin = %self.origin, "trigger resolved");
        match self.origin.as_str() {
            "load" => ctx.change_to_summon_phase(),
            "compile" => ctx.change_to_battle_phase(),
            _ => ctx.change_to_challenge_phase(),
        }
    }
}

/// The active player puts a battle card on the field.
pub struct SummonPhase;

impl Phase<DuelBoard> for SummonPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Summon
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        let board = ctx.game_mut();
        let player = board.active_player();
        board.summon(player);
    }

    fn update(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        if ctx.game().is_settled() {
            ctx.change_to_compile_phase();
        }
    }
}

/// The active player spends a power card on the field.
pub struct CompilePhase;

impl Phase<DuelBoard> for CompilePhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Compile
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        let board = ctx.game_mut();
        let player = board.active_player();
        board.compile(player);
    }

    fn update(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        if ctx.game().is_settled() {
            ctx.change_to_trigger_phase(PhaseKind::Compile.into());
        }
    }
}

/// The active field attacks the opponent.
pub struct BattlePhase;

impl Phase<DuelBoard> for BattlePhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Battle
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        ctx.game_mut().battle();
        ctx.change_to_challenge_phase();
    }
}

/// Ends the turn. Stays put once the duel has a winner.
pub struct ChallengePhase;

impl Phase<DuelBoard> for ChallengePhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Challenge
    }

    fn create(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        enter(ctx);
        if ctx.game().winner().is_none() {
            ctx.game_mut().pass_turn();
        }
    }

    fn update(&mut self, ctx: &mut PhaseContext<'_, DuelBoard>) {
        if ctx.game().winner().is_none() && ctx.game().is_settled() {
            ctx.change_to_start_phase();
        }
    }
}
