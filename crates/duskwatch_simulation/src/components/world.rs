//! World positioning компоненты: WorldPosition

use bevy::prelude::*;

/// Позиция и ориентация сущности в мире (ECS authoritative).
///
/// `facing` — направление взгляда (не обязательно нормализованное).
/// Обновляется системой движения из направления перемещения; состояния
/// Alert/Scan выставляют его явно в сторону стимула.
///
/// Нулевой `facing` допустим (агент только что заспавнился и ещё не
/// двигался) — сенсор зрения в этом случае обязан fail closed.
#[derive(Component, Debug, Clone, Copy)]
pub struct WorldPosition {
    pub position: Vec3,
    pub facing: Vec3,
}

impl Default for WorldPosition {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            facing: Vec3::ZERO,
        }
    }
}

impl WorldPosition {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            facing: Vec3::ZERO,
        }
    }

    pub fn looking_along(position: Vec3, facing: Vec3) -> Self {
        Self { position, facing }
    }

    /// Повернуться в сторону точки (горизонтально, Y игнорируем)
    pub fn face_towards(&mut self, point: Vec3) {
        let dir = Vec3::new(point.x - self.position.x, 0.0, point.z - self.position.z);
        if dir.length_squared() > 1e-6 {
            self.facing = dir.normalize();
        }
    }
}
