//! Базовые компоненты: Agent (противник), PursuitTarget (преследуемая цель)

use bevy::prelude::*;

/// Противник-агент (guard) — носитель перцепции и поведения.
///
/// Через Required Components автоматически добавляет весь adversary-набор:
/// позицию, навигацию, сенсор зрения, аккумулятор детекции, FSM и контекст.
/// Каждый агент владеет своим собственным экземпляром каждого компонента —
/// никакого shared mutable state между агентами.
#[derive(Component, Debug, Clone, Default)]
#[require(
    crate::components::WorldPosition,
    crate::components::MovementCommand,
    crate::components::MovementSpeed,
    crate::components::NavigationState,
    crate::perception::VisionSensor,
    crate::perception::DetectionConfig,
    crate::perception::DetectionState,
    crate::perception::Perception,
    crate::ai::BehaviorState,
    crate::ai::StateContext,
    crate::ai::AgentConfig
)]
pub struct Agent {
    /// Stable ID фракции (для будущих alliances/diplomacy)
    pub faction_id: u64,
}

/// Маркер преследуемой цели (игрок).
///
/// Ядро про цель знает только позицию/ориентацию; цель может
/// отсутствовать вовсе — сенсор тогда деградирует в "не вижу".
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(crate::components::WorldPosition)]
pub struct PursuitTarget;
