//! AI decision-making module
//!
//! Event-driven FSM: семь состояний (Patrol/Alert/Chase/Search/
//! Investigate/Scan/Return), таблица enter/update/exit по тегу,
//! transition только через change_state протокол.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod states;
pub mod systems;

// Re-export основных типов
pub use components::{AgentConfig, AlertPhase, BehaviorKind, BehaviorState, StateContext};
pub use events::{GameFlowEvent, NoiseEvent};
pub use states::{change_state, handlers, StateCtx, StateHandlers};

/// AI Plugin
///
/// Регистрирует behavior системы в FixedUpdate для детерминизма.
/// Порядок выполнения (после SimulationSet::Perception):
/// 1. behavior_transitions — сигналы + FSM тик (SimulationSet::Behavior)
/// 2. apply_movement_commands — навигатор (SimulationSet::Movement)
/// 3. monitor_catch — one-shot проверка поимки
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GameFlowEvent>()
            .add_systems(
                FixedUpdate,
                systems::behavior_transitions.in_set(crate::SimulationSet::Behavior),
            )
            .add_systems(
                FixedUpdate,
                (systems::apply_movement_commands, systems::monitor_catch)
                    .chain()
                    .in_set(crate::SimulationSet::Movement),
            );
    }
}
