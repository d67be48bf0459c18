//! Occlusion query seam — raycast-сервис внешнего физического мира
//!
//! Ядро не владеет геометрией уровня. Всё что ему нужно — ответ на вопрос
//! "есть ли препятствие между A и B в пределах дистанции D". В продакшене
//! за trait'ом стоит physics layer хоста; headless-симуляция и тесты
//! используют BoxWorld (набор AABB препятствий).

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;

/// Результат попадания луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Синхронный, реентерабельный raycast-сервис (вызывается раз в тик на агента).
///
/// Возвращает ближайшее пересечение с препятствием или None если путь чист.
/// Сама цель в геометрию не входит — сервис отвечает только за статические
/// и динамические препятствия уровня.
pub trait OcclusionQuery: Send + Sync {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Resource-обёртка над trait object (хост подменяет своей реализацией)
#[derive(Resource)]
pub struct OcclusionService(pub Box<dyn OcclusionQuery>);

impl Default for OcclusionService {
    fn default() -> Self {
        // Degraded default: мир без препятствий. Хост обязан заменить,
        // иначе стены не будут блокировать зрение.
        Self(Box::new(OpenWorld))
    }
}

impl OcclusionService {
    pub fn new(query: impl OcclusionQuery + 'static) -> Self {
        Self(Box::new(query))
    }
}

/// Пустой мир — луч никогда ничего не задевает
pub struct OpenWorld;

impl OcclusionQuery for OpenWorld {
    fn raycast(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }
}

/// Мир из AABB-препятствий (headless симуляция, тесты)
#[derive(Default)]
pub struct BoxWorld {
    obstacles: Vec<Aabb3d>,
}

impl BoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить препятствие: центр + полуразмеры
    pub fn with_box(mut self, center: Vec3, half_size: Vec3) -> Self {
        self.obstacles.push(Aabb3d::new(center, half_size));
        self
    }
}

impl OcclusionQuery for BoxWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        // Вырожденное направление — считаем что луч ни во что не попал
        let Ok(dir) = Dir3::new(direction) else {
            return None;
        };

        let ray = RayCast3d::new(origin, dir, max_distance);
        let mut nearest: Option<f32> = None;

        for aabb in &self.obstacles {
            if let Some(dist) = ray.aabb_intersection_at(aabb) {
                nearest = Some(match nearest {
                    Some(best) => best.min(dist),
                    None => dist,
                });
            }
        }

        nearest.map(|distance| RayHit {
            point: origin + dir.as_vec3() * distance,
            distance,
        })
    }
}
