//! Alert — частичное подозрение: замереть, смотреть на стимул, потом
//! сходить к последней известной позиции и оглядеться

use super::{random_look_direction, StateCtx, StateHandlers};
use crate::ai::components::{AlertPhase, BehaviorKind, BehaviorState};
use crate::components::MovementCommand;

pub static HANDLERS: StateHandlers = StateHandlers {
    enter,
    update,
    exit,
};

fn enter(sctx: &mut StateCtx) -> BehaviorState {
    *sctx.command = MovementCommand::Stop;

    // Лицом к стимулу: последняя известная позиция цели, иначе шум
    if let Some(point) = sctx
        .ctx
        .last_known_target_position
        .or(sctx.ctx.noise_position)
    {
        sctx.position.face_towards(point);
    }

    BehaviorState::Alert {
        timer: sctx.config.alert_duration,
        phase: AlertPhase::Holding,
    }
}

fn update(state: &mut BehaviorState, sctx: &mut StateCtx, dt: f32) -> Option<BehaviorKind> {
    let BehaviorState::Alert { timer, phase } = state else {
        return None;
    };

    // Full detection → Chase обрабатывает FSM-система до update

    match phase {
        AlertPhase::Holding => {
            *timer -= dt;
            if *timer <= 0.0 {
                match sctx
                    .ctx
                    .last_known_target_position
                    .or(sctx.ctx.noise_position)
                {
                    Some(point) => {
                        sctx.speed.speed = sctx.config.patrol_speed;
                        *sctx.command = MovementCommand::MoveToPosition { target: point };
                        *phase = AlertPhase::MovingToLastKnown;
                    }
                    None => {
                        // Некуда идти — сразу оглядываемся на месте
                        *phase = AlertPhase::LookingAround {
                            remaining: sctx.config.look_around_duration,
                        };
                    }
                }
            }
        }
        AlertPhase::MovingToLastKnown => {
            if sctx.nav.is_target_reached {
                *sctx.command = MovementCommand::Stop;
                *phase = AlertPhase::LookingAround {
                    remaining: sctx.config.look_around_duration,
                };
            }
        }
        AlertPhase::LookingAround { remaining } => {
            *remaining -= dt;
            sctx.position.facing = random_look_direction(sctx.rng);
            if *remaining <= 0.0 {
                return Some(BehaviorKind::Return);
            }
        }
    }

    None
}

fn exit(_sctx: &mut StateCtx) {}
