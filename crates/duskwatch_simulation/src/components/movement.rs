//! Movement компоненты: команды перемещения, скорость, состояние навигации
//!
//! Это seam к внешнему Navigator-сервису:
//! - состояния FSM пишут MovementCommand + MovementSpeed (high-level intent)
//! - система навигации (ai/systems/movement.rs) исполняет команду и
//!   поддерживает NavigationState.is_target_reached
//! - в продакшене ту же пару компонентов читает engine layer (path agent)

use bevy::prelude::*;

/// Команда движения для агента (исполняется навигатором)
#[derive(Component, Debug, Clone, PartialEq)]
pub enum MovementCommand {
    /// Стоять на месте (не трогать текущий destination)
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
    /// Следовать за entity (destination обновляется каждый тик)
    FollowEntity { target: Entity },
    /// Остановиться немедленно
    Stop,
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

/// Состояние навигации агента
///
/// `is_target_reached` == true когда путь к текущему destination разрешён
/// и остаточная дистанция меньше `arrival_threshold`. Пересчитывается
/// каждый тик пока команда MoveToPosition/FollowEntity активна; для
/// Idle/Stop флаг не трогаем (история последнего перемещения).
#[derive(Component, Clone, Debug)]
pub struct NavigationState {
    pub is_target_reached: bool,
    /// Дистанция прибытия (метры)
    pub arrival_threshold: f32,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            is_target_reached: false,
            arrival_threshold: 0.25,
        }
    }
}

/// Скорость движения агента (метры/сек)
///
/// Состояния FSM переключают её на per-mode значения из AgentConfig
/// (patrol/chase/investigate/return).
#[derive(Component, Clone, Copy, Debug)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 1.6 } // базовая скорость патруля
    }
}
