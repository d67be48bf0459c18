//! Catch monitor — one-shot "поймал" по живой дистанции до цели

use bevy::prelude::*;

use crate::ai::components::{AgentConfig, StateContext};
use crate::ai::events::GameFlowEvent;
use crate::components::{Agent, PursuitTarget, WorldPosition};

/// Система: проверка дистанции поимки
///
/// Латч в StateContext гарантирует максимум один PlayerCaught за жизнь
/// агента — game-flow слой не обязан дедуплицировать.
pub fn monitor_catch(
    mut agents: Query<(Entity, &WorldPosition, &mut StateContext, &AgentConfig), With<Agent>>,
    targets: Query<&WorldPosition, (With<PursuitTarget>, Without<Agent>)>,
    mut flow: EventWriter<GameFlowEvent>,
) {
    for (entity, position, mut ctx, config) in agents.iter_mut() {
        if ctx.caught_latched {
            continue;
        }
        let Some(target) = ctx.target else {
            continue;
        };
        let Ok(target_position) = targets.get(target) else {
            continue;
        };

        let distance = position.position.distance(target_position.position);
        if distance <= config.catch_radius {
            ctx.caught_latched = true;
            flow.write(GameFlowEvent::PlayerCaught { agent: entity });
            crate::logger::log_info(&format!(
                "🚨 {:?} caught target at distance {:.2}m",
                entity, distance
            ));
        }
    }
}
