//! Perception системы: зрение → аккумулятор → шум
//!
//! Выполняются строго до behavior-систем в том же тике (SimulationSet::
//! Perception). Результат тика складывается в Perception snapshot —
//! FSM читает его, не трогая сенсор и аккумулятор напрямую.

use bevy::prelude::*;

use crate::ai::{NoiseEvent, StateContext};
use crate::components::{Agent, PursuitTarget, WorldPosition};
use super::detection::{DetectionConfig, DetectionState};
use super::occlusion::OcclusionService;
use super::shadow::ShadowService;
use super::vision::{evaluate_vision, VisionSensor};

/// Snapshot перцепции за текущий тик (пишут perception-системы, читает FSM)
#[derive(Component, Debug, Clone, Default)]
pub struct Perception {
    /// Видит ли агент цель в этом тике
    pub can_see_target: bool,
    /// Дистанция до цели / view_radius (валидна при can_see_target)
    pub normalized_distance: f32,
    /// Позиция цели в этом тике (если цель назначена и существует)
    pub target_position: Option<Vec3>,
    /// Аккумулятор пересёк alert-порог в этом тике
    pub crossed_alert: bool,
    /// Аккумулятор дошёл до максимума в этом тике
    pub crossed_full: bool,
    /// Edge "видел → потерял" в этом тике
    pub lost_target: bool,
    /// Слышанный в этом тике шум (последний по порядку прибытия)
    pub heard_noise: Option<Vec3>,
}

/// Система: зрение — CanSeeTarget для каждого агента
///
/// Сбрасывает snapshot прошлого тика и заполняет can_see/дистанцию.
/// Цель не назначена или entity исчез → деградируем в "не вижу".
pub fn evaluate_vision_sensors(
    occlusion: Res<OcclusionService>,
    mut agents: Query<(&VisionSensor, &WorldPosition, &StateContext, &mut Perception), With<Agent>>,
    targets: Query<&WorldPosition, With<PursuitTarget>>,
) {
    for (sensor, position, ctx, mut perception) in agents.iter_mut() {
        *perception = Perception::default();

        let Some(target_entity) = ctx.target else {
            continue;
        };
        let Ok(target_position) = targets.get(target_entity) else {
            continue;
        };

        perception.target_position = Some(target_position.position);

        let can_see = evaluate_vision(
            sensor,
            position.position,
            position.facing,
            target_position.position,
            occlusion.0.as_ref(),
        );
        perception.can_see_target = can_see;

        if can_see {
            let eye = sensor.eye_position(position.position);
            let distance = (target_position.position - eye).length();
            perception.normalized_distance =
                (distance / sensor.view_radius.max(f32::EPSILON)).clamp(0.0, 1.0);
        }
    }
}

/// Система: тик аккумулятора детекции
///
/// in_shadow читаем у внешнего lighting-сервиса по entity цели.
pub fn tick_detection(
    time: Res<Time<Fixed>>,
    shadow: Res<ShadowService>,
    mut agents: Query<
        (&DetectionConfig, &mut DetectionState, &StateContext, &mut Perception),
        With<Agent>,
    >,
) {
    let dt = time.delta_secs();

    for (config, mut detection, ctx, mut perception) in agents.iter_mut() {
        let in_shadow = ctx
            .target
            .map(|t| shadow.0.is_in_shadow(t))
            .unwrap_or(false);

        let result = detection.tick(
            config,
            dt,
            perception.can_see_target,
            perception.normalized_distance,
            in_shadow,
        );

        perception.crossed_alert |= result.crossed_alert;
        perception.crossed_full |= result.crossed_full;
        perception.lost_target |= result.lost_target;
    }
}

/// Система: слив очереди noise events (раз в тик, в порядке прибытия)
///
/// Каждый агент в радиусе слуха получает floor-подъём уровня детекции;
/// позиция шума попадает в snapshot — FSM решит, бежать ли Investigate.
/// Громкость (intensity) масштабирует эффективный радиус слышимости.
pub fn drain_noise_events(
    mut events: EventReader<NoiseEvent>,
    mut agents: Query<
        (
            Entity,
            &VisionSensor,
            &WorldPosition,
            &DetectionConfig,
            &mut DetectionState,
            &mut Perception,
        ),
        With<Agent>,
    >,
) {
    for event in events.read() {
        for (entity, sensor, position, config, mut detection, mut perception) in agents.iter_mut() {
            let audible_range = sensor.hearing_radius * event.intensity.max(0.0);
            let distance = position.position.distance(event.position);
            if distance > audible_range {
                continue;
            }

            let raised_alert = detection.on_noise(config);
            perception.crossed_alert |= raised_alert;
            perception.heard_noise = Some(event.position);

            crate::logger::log(&format!(
                "🔊 {:?} heard noise at {:?} (distance {:.1}m, range {:.1}m)",
                entity, event.position, distance, audible_range
            ));
        }
    }
}
