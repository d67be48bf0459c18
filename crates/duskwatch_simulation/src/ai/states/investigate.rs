//! Investigate — идём к позиции услышанного шума

use super::{StateCtx, StateHandlers};
use crate::ai::components::{BehaviorKind, BehaviorState};
use crate::components::MovementCommand;

pub static HANDLERS: StateHandlers = StateHandlers {
    enter,
    update,
    exit,
};

fn enter(sctx: &mut StateCtx) -> BehaviorState {
    sctx.speed.speed = sctx.config.investigate_speed;

    if let Some(noise) = sctx.ctx.noise_position {
        *sctx.command = MovementCommand::MoveToPosition { target: noise };
    }
    // Нет позиции шума — update вернёт Return первым же тиком

    BehaviorState::Investigate
}

fn update(_state: &mut BehaviorState, sctx: &mut StateCtx, _dt: f32) -> Option<BehaviorKind> {
    let Some(noise) = sctx.ctx.noise_position else {
        return Some(BehaviorKind::Return);
    };

    // Новый шум во время похода перезаписывает destination
    let desired = MovementCommand::MoveToPosition { target: noise };
    if *sctx.command != desired {
        *sctx.command = desired;
        return None; // навигатор пересчитает прибытие на следующем тике
    }

    if sctx.nav.is_target_reached {
        return Some(BehaviorKind::Scan);
    }
    None
}

fn exit(sctx: &mut StateCtx) {
    // noise_position валидна только пока Investigate активен
    sctx.ctx.noise_position = None;
}
