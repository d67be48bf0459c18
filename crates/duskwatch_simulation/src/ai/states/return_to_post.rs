//! Return — возвращение к точке прерванного патруля

use super::{StateCtx, StateHandlers};
use crate::ai::components::{BehaviorKind, BehaviorState};
use crate::components::MovementCommand;

pub static HANDLERS: StateHandlers = StateHandlers {
    enter,
    update,
    exit,
};

fn enter(sctx: &mut StateCtx) -> BehaviorState {
    sctx.speed.speed = sctx.config.return_speed;

    match sctx.ctx.last_patrol_position {
        Some(point) => {
            *sctx.command = MovementCommand::MoveToPosition { target: point };
        }
        None => {
            // Некуда возвращаться — update сразу уйдёт в Patrol
            *sctx.command = MovementCommand::Idle;
        }
    }

    BehaviorState::Return
}

fn update(_state: &mut BehaviorState, sctx: &mut StateCtx, _dt: f32) -> Option<BehaviorKind> {
    let arrived = match sctx.ctx.last_patrol_position {
        Some(_) => sctx.nav.is_target_reached,
        None => true,
    };

    if arrived {
        // Продолжаем маршрут со следующего waypoint'а
        sctx.ctx.advance_patrol_index();
        return Some(BehaviorKind::Patrol);
    }
    None
}

fn exit(sctx: &mut StateCtx) {
    sctx.ctx.last_patrol_position = None;
}
