//! Shadow query seam — "находится ли цель в тени"
//!
//! Вместо глобального реестра затенённых сущностей ядро читает внешний
//! сервис освещения через trait. Аккумулятор детекции использует ответ
//! только как множитель скорости роста — владеет данными environment
//! layer хоста.

use bevy::prelude::*;

pub trait ShadowQuery: Send + Sync {
    fn is_in_shadow(&self, entity: Entity) -> bool;
}

/// Resource-обёртка над trait object
#[derive(Resource)]
pub struct ShadowService(pub Box<dyn ShadowQuery>);

impl Default for ShadowService {
    fn default() -> Self {
        Self(Box::new(NoShadows))
    }
}

impl ShadowService {
    pub fn new(query: impl ShadowQuery + 'static) -> Self {
        Self(Box::new(query))
    }
}

/// Мир без теней — все цели всегда на свету
pub struct NoShadows;

impl ShadowQuery for NoShadows {
    fn is_in_shadow(&self, _entity: Entity) -> bool {
        false
    }
}

/// Фиксированный список затенённых entity (тесты, headless демо)
#[derive(Default)]
pub struct ShadowSet {
    entities: Vec<Entity>,
}

impl ShadowSet {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }
}

impl ShadowQuery for ShadowSet {
    fn is_in_shadow(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }
}
