//! FSM AI components (behavior state, shared context, config)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тег состояния поведения (closed variant — ровно одно активно на агента)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Patrol,
    Alert,
    Chase,
    Search,
    Investigate,
    Scan,
    Return,
}

/// Фаза Alert-состояния
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertPhase {
    /// Стоим, смотрим в сторону стимула, ждём alert-таймер
    Holding,
    /// Идём к последней известной позиции цели/шума
    MovingToLastKnown,
    /// Оглядываемся на месте (остаток секунд)
    LookingAround { remaining: f32 },
}

/// AI FSM состояния (event-driven, tick-advanced)
///
/// Таймеры живут внутри варианта: при смене состояния вариант
/// уничтожается вместе с ними — неактивное состояние физически не может
/// держать живой таймер, задача никогда не переживает transition.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum BehaviorState {
    /// Patrol — обход waypoint'ов маршрута по кругу
    Patrol {
        /// Some(остаток) — стоим на waypoint'е и ждём
        waiting: Option<f32>,
    },

    /// Alert — частичное подозрение: замерли, смотрим на стимул
    Alert {
        /// Остаток alert-таймера (3с по умолчанию)
        timer: f32,
        phase: AlertPhase,
    },

    /// Chase — активная погоня за целью
    Chase,

    /// Search — потеряли цель, осматриваемся на месте
    Search {
        /// Секунды с начала поиска
        elapsed: f32,
        /// Таймер до следующего случайного поворота головы
        turn_timer: f32,
    },

    /// Investigate — идём к позиции шума
    Investigate,

    /// Scan — стоим на позиции шума и осматриваемся
    Scan {
        /// Остаток времени сканирования
        remaining: f32,
        /// Таймер до следующего случайного поворота головы
        turn_timer: f32,
    },

    /// Return — возвращаемся к точке маршрута где прервали патруль
    Return,
}

impl Default for BehaviorState {
    fn default() -> Self {
        Self::Patrol { waiting: None }
    }
}

impl BehaviorState {
    /// Тег активного состояния
    pub fn kind(&self) -> BehaviorKind {
        match self {
            BehaviorState::Patrol { .. } => BehaviorKind::Patrol,
            BehaviorState::Alert { .. } => BehaviorKind::Alert,
            BehaviorState::Chase => BehaviorKind::Chase,
            BehaviorState::Search { .. } => BehaviorKind::Search,
            BehaviorState::Investigate => BehaviorKind::Investigate,
            BehaviorState::Scan { .. } => BehaviorKind::Scan,
            BehaviorState::Return => BehaviorKind::Return,
        }
    }
}

/// Shared state context — единственная mutable запись, которую видят все
/// состояния агента.
///
/// Поля с Option — flag+value пары: None означает "значение не имеет
/// смысла", читатель обязан проверить. noise_position валидна только пока
/// Investigate вошёл по шумовому триггеру (Investigate::exit её чистит).
#[derive(Component, Debug, Clone, Default)]
pub struct StateContext {
    /// Преследуемая цель; None → сенсор деградирует в "не вижу"
    pub target: Option<Entity>,
    /// Маршрут патруля (упорядоченный, циклический)
    pub patrol_route: Vec<Vec3>,
    /// Текущий waypoint; инвариант 0 <= index < route.len() при непустом маршруте
    pub patrol_index: usize,
    /// Позиция последнего услышанного шума
    pub noise_position: Option<Vec3>,
    /// Где прервали патруль (Return идёт сюда)
    pub last_patrol_position: Option<Vec3>,
    /// Последняя известная позиция цели (обновляется пока видим)
    pub last_known_target_position: Option<Vec3>,
    /// Секунды с последнего визуального контакта
    pub seconds_since_seen: f32,
    /// PlayerCaught уже выдан (one-shot на жизнь агента)
    pub caught_latched: bool,
    /// Initial enter текущего состояния уже выполнен
    pub bootstrapped: bool,
}

impl StateContext {
    /// Текущий waypoint маршрута (None — маршрут пуст)
    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.patrol_route.get(self.patrol_index).copied()
    }

    /// Сдвинуть индекс патруля с wrap-around.
    ///
    /// На пустом маршруте — no-op, индекс остаётся 0.
    pub fn advance_patrol_index(&mut self) {
        if self.patrol_route.is_empty() {
            self.patrol_index = 0;
            return;
        }
        self.patrol_index = (self.patrol_index + 1) % self.patrol_route.len();
    }
}

/// Параметры поведения агента
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Скорость патруля (м/с)
    pub patrol_speed: f32,
    /// Скорость погони (м/с)
    pub chase_speed: f32,
    /// Скорость похода на шум (м/с)
    pub investigate_speed: f32,
    /// Скорость возврата на маршрут (м/с)
    pub return_speed: f32,
    /// Пауза на waypoint'е (секунды)
    pub waypoint_wait: f32,
    /// Alert: сколько стоим прежде чем идти к last known (секунды)
    pub alert_duration: f32,
    /// Alert: сколько оглядываемся дойдя до last known (секунды)
    pub look_around_duration: f32,
    /// Scan: сколько осматриваемся на позиции шума (секунды)
    pub scan_duration: f32,
    /// Chase: сколько секунд без визуального контакта до Search
    pub lose_target_time: f32,
    /// Search: сколько секунд ищем прежде чем забыть цель
    pub forget_time: f32,
    /// Дистанция "поймал" (метры)
    pub catch_radius: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            patrol_speed: 1.6,
            chase_speed: 4.0,
            investigate_speed: 2.2,
            return_speed: 1.8,
            waypoint_wait: 2.0,
            alert_duration: 3.0,
            look_around_duration: 3.0,
            scan_duration: 4.0,
            lose_target_time: 3.0,
            forget_time: 5.0,
            catch_radius: 0.8,
        }
    }
}
