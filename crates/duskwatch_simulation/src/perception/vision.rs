//! Visibility sensor — угловой + радиальный тест видимости цели
//!
//! Контракт: evaluate_vision(sensor, позиция, facing, цель, occlusion) → bool.
//! Порядок проверок: радиус → горизонтальный конус → вертикальный конус →
//! один occlusion-луч от глаз к цели. Визуализационный веер лучей
//! (ray_count_horizontal) ядру не нужен — его строит рендер-слой хоста.
//!
//! Все вырожденные случаи (нулевой facing, цель строго над головой)
//! fail closed: "не вижу".

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::occlusion::OcclusionQuery;

/// Допуск на попадание луча в коллайдер самой цели: hit на дистанции
/// цели (или чуть ближе) не считается препятствием.
const TARGET_SKIN: f32 = 0.05;

/// Цель вплотную к глазам — видна без угловых тестов
const POINT_BLANK: f32 = 0.1;

/// Конфигурация сенсора зрения/слуха агента
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VisionSensor {
    /// Дальность зрения (метры)
    pub view_radius: f32,
    /// Горизонтальный FOV, полный угол (радианы)
    pub horizontal_fov: f32,
    /// Вертикальный FOV, полный угол (радианы)
    pub vertical_fov: f32,
    /// Дальность слуха — noise events дальше не слышны (метры)
    pub hearing_radius: f32,
    /// Высота глаз над позицией (метры)
    pub eye_height: f32,
    /// Количество лучей для FOV-меша (только визуализация, на CanSeeTarget не влияет)
    pub ray_count_horizontal: u32,
}

impl Default for VisionSensor {
    fn default() -> Self {
        Self {
            view_radius: 6.0,
            horizontal_fov: 1.57, // ~90°
            vertical_fov: 1.0,    // ~57°
            hearing_radius: 12.0,
            eye_height: 1.6,
            ray_count_horizontal: 24,
        }
    }
}

impl VisionSensor {
    /// Позиция глаз для данной позиции агента
    pub fn eye_position(&self, position: Vec3) -> Vec3 {
        position + Vec3::Y * self.eye_height
    }
}

/// Может ли сенсор видеть точку `target` из `position` глядя вдоль `facing`.
///
/// Чистая функция — вся side-effect-free геометрия здесь, системы только
/// подставляют компоненты. Отсутствие цели обрабатывает caller (None → false).
pub fn evaluate_vision(
    sensor: &VisionSensor,
    position: Vec3,
    facing: Vec3,
    target: Vec3,
    occlusion: &dyn OcclusionQuery,
) -> bool {
    let eye = sensor.eye_position(position);
    let to_target = target - eye;
    let distance = to_target.length();

    if distance > sensor.view_radius {
        return false;
    }
    if distance < POINT_BLANK {
        return true;
    }

    // Горизонтальный тест: оба вектора проецируем на XZ
    let forward_flat = Vec3::new(facing.x, 0.0, facing.z);
    let to_target_flat = Vec3::new(to_target.x, 0.0, to_target.z);

    // Вырожденный forward (агент ещё не двигался) или цель строго
    // над/под глазами — fail closed
    if forward_flat.length_squared() < 1e-6 || to_target_flat.length_squared() < 1e-6 {
        return false;
    }

    let horizontal_angle = forward_flat
        .normalize()
        .dot(to_target_flat.normalize())
        .clamp(-1.0, 1.0)
        .acos();
    if horizontal_angle > sensor.horizontal_fov * 0.5 {
        return false;
    }

    // Вертикальный тест: угол возвышения относительно горизонта
    let elevation = to_target.y.atan2(to_target_flat.length());
    if elevation.abs() > sensor.vertical_fov * 0.5 {
        return false;
    }

    // Occlusion: один прямой луч от глаз к цели. Попадание на дистанции
    // самой цели (± skin) — это её коллайдер, видимость не блокирует.
    match occlusion.raycast(eye, to_target / distance, distance) {
        None => true,
        Some(hit) => hit.distance >= distance - TARGET_SKIN,
    }
}
