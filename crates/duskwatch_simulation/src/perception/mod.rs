//! Perception модуль — сенсор зрения + аккумулятор детекции
//!
//! ECS ответственность:
//! - VisionSensor: радиус/конус/occlusion тест (CanSeeTarget)
//! - DetectionState: leaky integrator подозрительности + гистерезис
//! - Noise events: floor-подъём уровня по слуху
//!
//! Хост ответственность (trait seams):
//! - OcclusionQuery: raycast по геометрии уровня
//! - ShadowQuery: затенённость цели (lighting system)

use bevy::prelude::*;

pub mod detection;
pub mod occlusion;
pub mod shadow;
pub mod systems;
pub mod vision;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod detection_tests;

// Re-export основных типов
pub use detection::{DetectionConfig, DetectionState, DetectionTick, RiseCurve};
pub use occlusion::{BoxWorld, OcclusionQuery, OcclusionService, OpenWorld, RayHit};
pub use shadow::{NoShadows, ShadowQuery, ShadowService, ShadowSet};
pub use systems::{drain_noise_events, evaluate_vision_sensors, tick_detection, Perception};
pub use vision::{evaluate_vision, VisionSensor};

/// Perception Plugin
///
/// Регистрирует perception системы в FixedUpdate (SimulationSet::Perception).
/// Порядок выполнения:
/// 1. evaluate_vision_sensors — CanSeeTarget + дистанция
/// 2. tick_detection — интегратор уровня + threshold сигналы
/// 3. drain_noise_events — слив шумовой очереди (floor-подъём)
pub struct PerceptionPlugin;

impl Plugin for PerceptionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<crate::ai::NoiseEvent>()
            .init_resource::<OcclusionService>()
            .init_resource::<ShadowService>()
            .add_systems(
                FixedUpdate,
                (evaluate_vision_sensors, tick_detection, drain_noise_events)
                    .chain()
                    .in_set(crate::SimulationSet::Perception),
            );
    }
}
