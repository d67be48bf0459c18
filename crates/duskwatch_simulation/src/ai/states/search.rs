//! Search — цель потеряна: стоим, крутим головой, забываем через forget_time
//!
//! Стационарный поиск — hook point: хост может заменить на обход
//! окрестностей, контракт состояния от этого не меняется.

use super::{random_look_direction, StateCtx, StateHandlers};
use crate::ai::components::{BehaviorKind, BehaviorState};
use crate::components::MovementCommand;

/// Период случайного поворота головы (секунды)
const TURN_INTERVAL: f32 = 1.0;

pub static HANDLERS: StateHandlers = StateHandlers {
    enter,
    update,
    exit,
};

fn enter(sctx: &mut StateCtx) -> BehaviorState {
    sctx.speed.speed = sctx.config.patrol_speed;
    *sctx.command = MovementCommand::Stop;

    BehaviorState::Search {
        elapsed: 0.0,
        turn_timer: TURN_INTERVAL,
    }
}

fn update(state: &mut BehaviorState, sctx: &mut StateCtx, dt: f32) -> Option<BehaviorKind> {
    let BehaviorState::Search { elapsed, turn_timer } = state else {
        return None;
    };

    *elapsed += dt;

    *turn_timer -= dt;
    if *turn_timer <= 0.0 {
        sctx.position.facing = random_look_direction(sctx.rng);
        *turn_timer = TURN_INTERVAL;
    }

    if *elapsed >= sctx.config.forget_time {
        return Some(BehaviorKind::Return);
    }
    None
}

fn exit(_sctx: &mut StateCtx) {}
