//! Scan — стоим на позиции шума и осматриваемся scan_duration секунд
//!
//! Full detection во время сканирования → Chase (через сигнальную
//! проводку FSM-системы, не здесь).

use super::{random_look_direction, StateCtx, StateHandlers};
use crate::ai::components::{BehaviorKind, BehaviorState};
use crate::components::MovementCommand;

/// Период случайного поворота головы (секунды)
const TURN_INTERVAL: f32 = 0.8;

pub static HANDLERS: StateHandlers = StateHandlers {
    enter,
    update,
    exit,
};

fn enter(sctx: &mut StateCtx) -> BehaviorState {
    *sctx.command = MovementCommand::Stop;

    BehaviorState::Scan {
        remaining: sctx.config.scan_duration,
        turn_timer: TURN_INTERVAL,
    }
}

fn update(state: &mut BehaviorState, sctx: &mut StateCtx, dt: f32) -> Option<BehaviorKind> {
    let BehaviorState::Scan { remaining, turn_timer } = state else {
        return None;
    };

    *remaining -= dt;

    *turn_timer -= dt;
    if *turn_timer <= 0.0 {
        sctx.position.facing = random_look_direction(sctx.rng);
        *turn_timer = TURN_INTERVAL;
    }

    if *remaining <= 0.0 {
        return Some(BehaviorKind::Return);
    }
    None
}

fn exit(_sctx: &mut StateCtx) {}
