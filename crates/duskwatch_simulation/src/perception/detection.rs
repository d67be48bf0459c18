//! Detection accumulator — leaky integrator подозрительности с гистерезисом
//!
//! Уровень растёт пока цель видна (скорость зависит от дистанции и
//! света/тени), падает с фиксированной скоростью пока не видна, всегда
//! зажат в [0, max_level]. Threshold-пересечения выдаются один раз на
//! эпизод через латчи; латчи сбрасываются только когда уровень дошёл
//! ровно до нуля.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Кривая скорости роста по нормализованной дистанции [0..1] → множитель.
///
/// Контрольные точки интерполируются линейно. Кривая обязана быть
/// монотонно невозрастающей (ближе — быстрее замечают); это
/// конфигурационные данные, ядро форму не навязывает.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiseCurve {
    points: Vec<(f32, f32)>,
}

impl Default for RiseCurve {
    fn default() -> Self {
        // Вплотную и до трети радиуса — полная скорость, на краю — четверть
        Self {
            points: vec![(0.0, 1.0), (0.35, 1.0), (1.0, 0.25)],
        }
    }
}

impl RiseCurve {
    pub fn new(points: Vec<(f32, f32)>) -> Self {
        Self { points }
    }

    /// Множитель для нормализованной дистанции (clamped в [0..1])
    pub fn sample(&self, normalized_distance: f32) -> f32 {
        let d = normalized_distance.clamp(0.0, 1.0);

        let Some(first) = self.points.first() else {
            return 1.0; // пустая кривая — нейтральный множитель
        };
        if d <= first.0 {
            return first.1;
        }

        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if d <= x1 {
                if (x1 - x0).abs() < f32::EPSILON {
                    return y1;
                }
                let t = (d - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }

        self.points.last().map(|p| p.1).unwrap_or(1.0)
    }
}

/// Per-agent конфигурация аккумулятора (fixed на время жизни агента)
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Потолок уровня детекции
    pub max_level: f32,
    /// Доля max_level на которой агент становится "alerted" (0..1)
    pub alert_threshold: f32,
    /// Секунды от нуля до max_level вплотную при полном свете
    pub max_detection_time: f32,
    /// Скорость спада, уровень/сек (цель не видна)
    pub decay_rate: f32,
    /// Множитель роста когда цель на свету
    pub light_multiplier: f32,
    /// Множитель роста когда цель в тени
    pub shadow_multiplier: f32,
    /// Дистанционная кривая роста
    pub rise_curve: RiseCurve,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_level: 100.0,
            alert_threshold: 0.5,
            max_detection_time: 2.0,
            decay_rate: 25.0,
            light_multiplier: 1.0,
            shadow_multiplier: 0.4,
            rise_curve: RiseCurve::default(),
        }
    }
}

impl DetectionConfig {
    /// Базовая скорость роста вплотную (уровень/сек)
    pub fn base_rise_rate(&self) -> f32 {
        self.max_level / self.max_detection_time.max(f32::EPSILON)
    }

    /// Абсолютный уровень alert-порога
    pub fn alert_level(&self) -> f32 {
        self.max_level * self.alert_threshold
    }
}

/// Состояние аккумулятора детекции одного агента
///
/// Инвариант: 0 ≤ level ≤ max_level после каждого tick.
/// Латчи was_alerted/was_fully_detected гарантируют one-shot сигналы
/// на эпизод; сбрасываются только при level == 0.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DetectionState {
    pub level: f32,
    pub was_visible: bool,
    pub was_alerted: bool,
    pub was_fully_detected: bool,
}

/// Результат одного тика аккумулятора
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetectionTick {
    pub level: f32,
    pub crossed_alert: bool,
    pub crossed_full: bool,
    pub lost_target: bool,
}

impl DetectionState {
    /// Один тик интегратора.
    ///
    /// `normalized_distance` — дистанция до цели / view_radius (имеет смысл
    /// только при can_see == true).
    pub fn tick(
        &mut self,
        cfg: &DetectionConfig,
        dt: f32,
        can_see: bool,
        normalized_distance: f32,
        in_shadow: bool,
    ) -> DetectionTick {
        let mut out = DetectionTick::default();

        if can_see {
            let light = if in_shadow {
                cfg.shadow_multiplier
            } else {
                cfg.light_multiplier
            };
            let rate = cfg.base_rise_rate() * cfg.rise_curve.sample(normalized_distance) * light;
            self.level = (self.level + rate * dt).min(cfg.max_level);
        } else {
            self.level = (self.level - cfg.decay_rate * dt).max(0.0);
        }

        // Full detection проверяем первым: alert им поглощается
        if self.level >= cfg.max_level && !self.was_fully_detected {
            self.was_fully_detected = true;
            self.was_alerted = true;
            out.crossed_full = true;
        } else if self.level >= cfg.alert_level() && !self.was_alerted && !self.was_fully_detected {
            self.was_alerted = true;
            out.crossed_alert = true;
        }

        // Edge видимости: был виден → перестал
        if self.was_visible && !can_see {
            out.lost_target = true;
        }
        self.was_visible = can_see;

        // Эпизод закончился только при полном спаде до нуля
        if self.level == 0.0 {
            self.was_alerted = false;
            self.was_fully_detected = false;
        }

        out.level = self.level;
        out
    }

    /// Noise injection: поднимает уровень до alert-порога (никогда не
    /// опускает) и возвращает true если alert-латч взведён этим вызовом.
    ///
    /// Повторный шум при уже взведённом латче alert не перевыдаёт —
    /// даже если уровень выше порога, но ниже максимума.
    pub fn on_noise(&mut self, cfg: &DetectionConfig) -> bool {
        let floor = cfg.alert_level();
        if self.level < floor {
            self.level = floor;
        }
        if !self.was_alerted {
            self.was_alerted = true;
            return true;
        }
        false
    }

    /// Форсированная полная детекция (скриптовые триггеры хоста)
    pub fn instant_detect(&mut self, cfg: &DetectionConfig) -> bool {
        self.level = cfg.max_level;
        if !self.was_fully_detected {
            self.was_fully_detected = true;
            self.was_alerted = true;
            return true;
        }
        false
    }

    /// Полный сброс: уровень и все латчи в ноль
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
