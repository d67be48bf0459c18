//! ECS Components для сущностей симуляции
//!
//! Организация по доменам:
//! - agent: базовый компонент противника (Agent, PursuitTarget)
//! - movement: навигация и перемещение (MovementCommand, NavigationState, MovementSpeed)
//! - world: позиционирование в мире (WorldPosition)
//!
//! Perception-компоненты (VisionSensor, DetectionState) живут в perception/,
//! FSM-компоненты (BehaviorState, StateContext) — в ai/components/.

pub mod agent;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use agent::*;
pub use movement::*;
pub use world::*;
