//! AI Events — входящий шум и исходящие game-flow уведомления
//!
//! Типизированные события вместо stringly-typed event bus: опечатка в
//! имени ловится компилятором, а не тишиной в рантайме.

use bevy::prelude::*;

use super::components::BehaviorKind;

/// Внешний шумовой стимул (бросок предмета, выстрел, шаги)
///
/// Transient value object: очередь сливается раз в тик в порядке
/// прибытия, событие нигде не хранится.
#[derive(Event, Debug, Clone, Copy)]
pub struct NoiseEvent {
    /// Мировая позиция источника
    pub position: Vec3,
    /// Громкость: 1.0 — номинал, масштабирует радиус слышимости
    pub intensity: f32,
}

impl NoiseEvent {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            intensity: 1.0,
        }
    }
}

/// Исходящие уведомления для game-flow слоя (UI/аналитика/аудио)
///
/// Ядро пишет и никогда не ждёт обработки; one-shot семантику
/// (PlayerCaught) гарантирует латч на стороне агента.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum GameFlowEvent {
    /// Агент полностью обнаружил цель (crossed_full)
    PlayerDetected { agent: Entity },
    /// Агент сдался в погоне (Chase → Search)
    PlayerLost { agent: Entity },
    /// Агент догнал цель (дистанция < catch_radius); максимум раз за жизнь агента
    PlayerCaught { agent: Entity },
    /// Смена состояния FSM (для analytics/debug overlay)
    StateChanged {
        agent: Entity,
        from: BehaviorKind,
        to: BehaviorKind,
    },
}
