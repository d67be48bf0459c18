//! Patrol — обход циклического маршрута с паузой на каждом waypoint'е

use super::{StateCtx, StateHandlers};
use crate::ai::components::{BehaviorKind, BehaviorState};
use crate::components::MovementCommand;

pub static HANDLERS: StateHandlers = StateHandlers {
    enter,
    update,
    exit,
};

fn enter(sctx: &mut StateCtx) -> BehaviorState {
    sctx.speed.speed = sctx.config.patrol_speed;

    match sctx.ctx.current_waypoint() {
        Some(waypoint) => {
            *sctx.command = MovementCommand::MoveToPosition { target: waypoint };
        }
        None => {
            // Пустой маршрут — деградируем в стояние на месте, ругаемся один раз
            crate::logger::log_warning_once(
                &format!("empty-patrol-route-{:?}", sctx.entity),
                &format!("Agent {:?}: patrol route is empty, Patrol is a no-op", sctx.entity),
            );
            *sctx.command = MovementCommand::Idle;
        }
    }

    BehaviorState::Patrol { waiting: None }
}

fn update(state: &mut BehaviorState, sctx: &mut StateCtx, dt: f32) -> Option<BehaviorKind> {
    let BehaviorState::Patrol { waiting } = state else {
        return None;
    };

    if sctx.ctx.patrol_route.is_empty() {
        return None;
    }

    match waiting {
        Some(remaining) => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                // Пауза кончилась — следующий waypoint (wrap-around внутри)
                sctx.ctx.advance_patrol_index();
                if let Some(waypoint) = sctx.ctx.current_waypoint() {
                    *sctx.command = MovementCommand::MoveToPosition { target: waypoint };
                }
                *waiting = None;
            }
        }
        None => {
            // Дошли до waypoint'а → стоим waypoint_wait секунд
            if sctx.nav.is_target_reached
                && matches!(sctx.command, MovementCommand::MoveToPosition { .. })
            {
                *sctx.command = MovementCommand::Idle;
                *waiting = Some(sctx.config.waypoint_wait);
            }
        }
    }

    // Выходы из Patrol событийные (детекция/шум) — их решает FSM-система
    None
}

fn exit(sctx: &mut StateCtx) {
    // Запоминаем где прервали маршрут: Return придёт именно сюда
    sctx.ctx.last_patrol_position = Some(sctx.position.position);
}
