//! FSM AI system — сигнальная проводка + тик активного состояния
//!
//! Приоритет сигналов за тик:
//! 1. crossed_full → Chase из любого состояния (+ PlayerDetected)
//! 2. heard_noise → Investigate (в Chase шум игнорируем — уже видим цель)
//! 3. crossed_alert → Alert (только из спокойных состояний Patrol/Return)
//! 4. update активного состояния через таблицу handlers
//!
//! Свежевошедшее состояние обновляется со следующего тика — иначе оно
//! прочитает устаревший NavigationState.is_target_reached и мгновенно
//! "прибудет" на destination, который навигатор ещё не видел.

use bevy::prelude::*;

use crate::ai::components::{AgentConfig, BehaviorKind, BehaviorState, StateContext};
use crate::ai::events::GameFlowEvent;
use crate::ai::states::{change_state, handlers, StateCtx};
use crate::components::{
    Agent, MovementCommand, MovementSpeed, NavigationState, PursuitTarget, WorldPosition,
};
use crate::perception::Perception;
use crate::DeterministicRng;

/// Система: AI FSM transitions + state update (event-driven)
pub fn behavior_transitions(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut agents: Query<
        (
            Entity,
            &mut BehaviorState,
            &mut StateContext,
            &AgentConfig,
            &Perception,
            &mut WorldPosition,
            &mut MovementCommand,
            &mut MovementSpeed,
            &NavigationState,
        ),
        With<Agent>,
    >,
    targets: Query<&WorldPosition, (With<PursuitTarget>, Without<Agent>)>,
    mut flow: EventWriter<GameFlowEvent>,
) {
    let dt = time.delta_secs();

    for (
        entity,
        mut state,
        mut ctx,
        config,
        perception,
        mut position,
        mut command,
        mut speed,
        nav,
    ) in agents.iter_mut()
    {
        let target_position = ctx
            .target
            .and_then(|t| targets.get(t).ok())
            .map(|p| p.position);

        // Общий для всех состояний учёт визуального контакта
        if perception.can_see_target {
            ctx.seconds_since_seen = 0.0;
            ctx.last_known_target_position = perception.target_position;
        } else {
            ctx.seconds_since_seen += dt;
        }

        let perception = perception.clone();
        let mut sctx = StateCtx {
            entity,
            ctx: &mut *ctx,
            config,
            position: &mut *position,
            command: &mut *command,
            speed: &mut *speed,
            nav,
            perception: &perception,
            target_position,
            rng: &mut rng.rng,
        };

        // Initial enter: агент заспавнился с default-состоянием,
        // entry-действия ещё не выполнялись
        if !sctx.ctx.bootstrapped {
            sctx.ctx.bootstrapped = true;
            let kind = state.kind();
            *state = (handlers(kind).enter)(&mut sctx);
        }

        let kind = state.kind();
        let mut transition: Option<(BehaviorKind, BehaviorKind)> = None;

        if perception.crossed_full {
            flow.write(GameFlowEvent::PlayerDetected { agent: entity });
            crate::logger::log(&format!("👁️ {:?} fully detected target → Chase", entity));
            transition = change_state(&mut *state, &mut sctx, BehaviorKind::Chase);
        } else if let Some(noise) = perception.heard_noise {
            if kind != BehaviorKind::Chase {
                // Записываем позицию шума и форсируем Investigate;
                // если уже Investigate — change_state no-op, а новую
                // позицию подхватит его update
                sctx.ctx.noise_position = Some(noise);
                transition = change_state(&mut *state, &mut sctx, BehaviorKind::Investigate);
            }
            // В Chase шум не отвлекает: цель и так на прицеле
        } else if perception.crossed_alert
            && matches!(kind, BehaviorKind::Patrol | BehaviorKind::Return)
        {
            // Частичное подозрение поднимает только спокойные состояния
            sctx.ctx.last_known_target_position = perception
                .target_position
                .or(sctx.ctx.last_known_target_position);
            transition = change_state(&mut *state, &mut sctx, BehaviorKind::Alert);
        }

        // Сигнал не переключил состояние → обычный тик поведения
        if transition.is_none() {
            if let Some(next) = (handlers(kind).update)(&mut *state, &mut sctx, dt) {
                if kind == BehaviorKind::Chase && next == BehaviorKind::Search {
                    // Погоня сдалась — game-flow слою нужен PlayerLost
                    flow.write(GameFlowEvent::PlayerLost { agent: entity });
                    crate::logger::log(&format!("👻 {:?} lost target → Search", entity));
                }
                transition = change_state(&mut *state, &mut sctx, next);
            }
        }

        if let Some((from, to)) = transition {
            flow.write(GameFlowEvent::StateChanged {
                agent: entity,
                from,
                to,
            });
        }
    }
}
