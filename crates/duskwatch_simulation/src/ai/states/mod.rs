//! Per-state behaviors — таблица enter/update/exit по тегу состояния
//!
//! Вместо виртуальных override'ов на состояние: closed enum BehaviorKind +
//! статическая таблица наборов функций. Exhaustive match в handlers()
//! гарантирует на компиляции, что ни одно состояние не осталось без
//! поведения.
//!
//! Протокол: transition всегда через change_state (exit старого → enter
//! нового); enter конструирует свежий вариант BehaviorState, так что
//! таймеры прошлой жизни состояния не переживают переход.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::components::{AgentConfig, BehaviorKind, BehaviorState, StateContext};
use crate::components::{MovementCommand, MovementSpeed, NavigationState, WorldPosition};
use crate::perception::Perception;

pub mod alert;
pub mod chase;
pub mod investigate;
pub mod patrol;
pub mod return_to_post;
pub mod scan;
pub mod search;

/// Всё что видит активное состояние за один тик.
///
/// Собирается FSM-системой из компонентов агента; владение полями
/// контекста "по смыслу" переходит вместе с активным состоянием.
pub struct StateCtx<'a> {
    pub entity: Entity,
    pub ctx: &'a mut StateContext,
    pub config: &'a AgentConfig,
    pub position: &'a mut WorldPosition,
    pub command: &'a mut MovementCommand,
    pub speed: &'a mut MovementSpeed,
    pub nav: &'a NavigationState,
    pub perception: &'a Perception,
    /// Живая позиция цели в этом тике (None — цель недоступна)
    pub target_position: Option<Vec3>,
    pub rng: &'a mut ChaCha8Rng,
}

/// Набор функций одного состояния
pub struct StateHandlers {
    /// Конструирует свежий вариант состояния + entry-действия (скорость, destination)
    pub enter: fn(&mut StateCtx) -> BehaviorState,
    /// Один тик; Some(next) — запрос перехода
    pub update: fn(&mut BehaviorState, &mut StateCtx, f32) -> Option<BehaviorKind>,
    /// Завершающие действия (контекст чистится здесь; таймеры умирают с вариантом)
    pub exit: fn(&mut StateCtx),
}

/// Таблица поведений, индексированная тегом
pub fn handlers(kind: BehaviorKind) -> &'static StateHandlers {
    match kind {
        BehaviorKind::Patrol => &patrol::HANDLERS,
        BehaviorKind::Alert => &alert::HANDLERS,
        BehaviorKind::Chase => &chase::HANDLERS,
        BehaviorKind::Search => &search::HANDLERS,
        BehaviorKind::Investigate => &investigate::HANDLERS,
        BehaviorKind::Scan => &scan::HANDLERS,
        BehaviorKind::Return => &return_to_post::HANDLERS,
    }
}

/// Exit старого → swap → enter нового. No-op если next == текущий тег.
///
/// Возвращает (old, new) для StateChanged уведомления.
pub fn change_state(
    state: &mut BehaviorState,
    sctx: &mut StateCtx,
    next: BehaviorKind,
) -> Option<(BehaviorKind, BehaviorKind)> {
    let current = state.kind();
    if current == next {
        return None;
    }

    (handlers(current).exit)(sctx);
    *state = (handlers(next).enter)(sctx);

    crate::logger::log(&format!(
        "AI: {:?} {:?} → {:?}",
        sctx.entity, current, next
    ));

    Some((current, next))
}

/// Случайный горизонтальный поворот головы (Search/Scan look-around)
pub(crate) fn random_look_direction(rng: &mut ChaCha8Rng) -> Vec3 {
    use rand::Rng;
    let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
    Vec3::new(yaw.cos(), 0.0, yaw.sin())
}
