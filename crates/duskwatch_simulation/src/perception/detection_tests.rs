//! Tests for the detection accumulator.

#[cfg(test)]
mod tests {
    use super::super::detection::{DetectionConfig, DetectionState, RiseCurve};

    const DT: f32 = 1.0 / 60.0;

    fn tick_visible(state: &mut DetectionState, cfg: &DetectionConfig, seconds: f32) {
        let ticks = (seconds / DT).round() as u32;
        for _ in 0..ticks {
            state.tick(cfg, DT, true, 0.0, false);
        }
    }

    fn tick_invisible(state: &mut DetectionState, cfg: &DetectionConfig, seconds: f32) {
        let ticks = (seconds / DT).round() as u32;
        for _ in 0..ticks {
            state.tick(cfg, DT, false, 0.0, false);
        }
    }

    #[test]
    fn test_level_clamped_to_bounds() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        // Рост сильно дольше max_detection_time — потолок держится
        tick_visible(&mut state, &cfg, 10.0);
        assert_eq!(state.level, cfg.max_level);

        // Спад сильно дольше необходимого — пол держится
        tick_invisible(&mut state, &cfg, 30.0);
        assert_eq!(state.level, 0.0);
    }

    #[test]
    fn test_full_detection_in_max_detection_time_at_point_blank() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        // 2 секунды * 60 Гц = 120 тиков вплотную при полном свете
        let mut crossed_full = false;
        for _ in 0..120 {
            let out = state.tick(&cfg, DT, true, 0.0, false);
            crossed_full |= out.crossed_full;
        }
        assert!(crossed_full, "full detection must fire within 120 ticks");
        assert_eq!(state.level, cfg.max_level);
    }

    #[test]
    fn test_rise_slower_at_range_and_in_shadow() {
        let cfg = DetectionConfig::default();

        let mut near = DetectionState::default();
        let mut far = DetectionState::default();
        let mut shadowed = DetectionState::default();

        for _ in 0..30 {
            near.tick(&cfg, DT, true, 0.0, false);
            far.tick(&cfg, DT, true, 1.0, false);
            shadowed.tick(&cfg, DT, true, 0.0, true);
        }

        assert!(far.level < near.level);
        assert!(shadowed.level < near.level);
    }

    #[test]
    fn test_alert_fires_once_per_episode() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        let mut alert_count = 0;
        for _ in 0..70 {
            // чуть дальше alert-порога (1с)
            if state.tick(&cfg, DT, true, 0.0, false).crossed_alert {
                alert_count += 1;
            }
        }
        assert_eq!(alert_count, 1);

        // Спад ниже порога но не до нуля, затем снова рост — латч держится
        tick_invisible(&mut state, &cfg, 1.0);
        assert!(state.level > 0.0);
        assert!(state.level < cfg.alert_level());

        for _ in 0..40 {
            assert!(!state.tick(&cfg, DT, true, 0.0, false).crossed_alert);
        }
    }

    #[test]
    fn test_full_subsumes_alert() {
        let cfg = DetectionConfig {
            max_detection_time: 0.01, // один тик перепрыгивает оба порога
            ..Default::default()
        };
        let mut state = DetectionState::default();

        let out = state.tick(&cfg, DT, true, 0.0, false);
        assert!(out.crossed_full);
        assert!(!out.crossed_alert, "full must subsume alert on the same tick");
        assert!(state.was_alerted);
        assert!(state.was_fully_detected);
    }

    #[test]
    fn test_latches_reset_only_at_zero() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        tick_visible(&mut state, &cfg, 2.5);
        assert!(state.was_fully_detected);

        // Почти до нуля — латчи ещё взведены
        tick_invisible(&mut state, &cfg, 3.9);
        assert!(state.level > 0.0);
        assert!(state.was_alerted);
        assert!(state.was_fully_detected);

        // До нуля — новый эпизод
        tick_invisible(&mut state, &cfg, 1.0);
        assert_eq!(state.level, 0.0);
        assert!(!state.was_alerted);
        assert!(!state.was_fully_detected);

        // И пороги стреляют заново
        let mut crossed_full = false;
        for _ in 0..130 {
            crossed_full |= state.tick(&cfg, DT, true, 0.0, false).crossed_full;
        }
        assert!(crossed_full);
    }

    #[test]
    fn test_lost_target_on_visibility_edge() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        state.tick(&cfg, DT, true, 0.5, false);
        let out = state.tick(&cfg, DT, false, 0.5, false);
        assert!(out.lost_target);

        // Повторный невидимый тик — edge уже прошёл
        let out = state.tick(&cfg, DT, false, 0.5, false);
        assert!(!out.lost_target);
    }

    #[test]
    fn test_noise_raises_floor_and_latches_alert() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        assert!(state.on_noise(&cfg));
        assert_eq!(state.level, cfg.alert_level());

        // Повторный шум alert не перевыдаёт и уровень не опускает
        tick_visible(&mut state, &cfg, 0.5);
        let raised = state.level;
        assert!(raised > cfg.alert_level());
        assert!(!state.on_noise(&cfg));
        assert_eq!(state.level, raised);
    }

    #[test]
    fn test_instant_detect() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        assert!(state.instant_detect(&cfg));
        assert_eq!(state.level, cfg.max_level);
        assert!(!state.instant_detect(&cfg)); // латч уже взведён
    }

    #[test]
    fn test_reset_clears_everything() {
        let cfg = DetectionConfig::default();
        let mut state = DetectionState::default();

        tick_visible(&mut state, &cfg, 2.5);
        state.reset();

        assert_eq!(state.level, 0.0);
        assert!(!state.was_visible);
        assert!(!state.was_alerted);
        assert!(!state.was_fully_detected);
    }

    #[test]
    fn test_rise_curve_interpolation() {
        let curve = RiseCurve::default();

        // Плато до 0.35
        assert_eq!(curve.sample(0.0), 1.0);
        assert_eq!(curve.sample(0.35), 1.0);
        // Край радиуса
        assert!((curve.sample(1.0) - 0.25).abs() < 1e-6);
        // Середина спуска между (0.35, 1.0) и (1.0, 0.25)
        let mid = curve.sample(0.675);
        assert!((mid - 0.625).abs() < 1e-3);
        // Clamp за пределами [0..1]
        assert_eq!(curve.sample(-1.0), 1.0);
        assert!((curve.sample(2.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_rise_curve_empty_is_neutral() {
        let curve = RiseCurve::new(vec![]);
        assert_eq!(curve.sample(0.5), 1.0);
    }
}
