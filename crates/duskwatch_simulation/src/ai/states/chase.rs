//! Chase — погоня: follow живой позиции цели, сдаёмся после
//! lose_target_time секунд без визуального контакта

use super::{StateCtx, StateHandlers};
use crate::ai::components::{BehaviorKind, BehaviorState};
use crate::components::MovementCommand;

pub static HANDLERS: StateHandlers = StateHandlers {
    enter,
    update,
    exit,
};

fn enter(sctx: &mut StateCtx) -> BehaviorState {
    sctx.speed.speed = sctx.config.chase_speed;
    sctx.ctx.seconds_since_seen = 0.0;

    match sctx.ctx.target {
        Some(target) => {
            // FollowEntity — навигатор перенацеливается на живую позицию каждый тик
            *sctx.command = MovementCommand::FollowEntity { target };
        }
        None => {
            // Цели нет — деградируем в стояние ("cannot move")
            *sctx.command = MovementCommand::Idle;
        }
    }

    BehaviorState::Chase
}

fn update(_state: &mut BehaviorState, sctx: &mut StateCtx, _dt: f32) -> Option<BehaviorKind> {
    // seconds_since_seen ведёт FSM-система (общая для всех состояний);
    // здесь только порог сдачи. Граница включительно: ровно
    // lose_target_time без контакта → Search, не раньше.
    if sctx.ctx.seconds_since_seen >= sctx.config.lose_target_time {
        return Some(BehaviorKind::Search);
    }
    None
}

fn exit(_sctx: &mut StateCtx) {}
