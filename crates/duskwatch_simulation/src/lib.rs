//! DUSKWATCH Simulation Core
//!
//! ECS-ядро adversary AI для stealth-игры на Bevy 0.16 (strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (perception, detection, behavior FSM)
//! - Хост = tactical layer (physics, rendering, pathfinding, shadow volumes)
//!
//! Хост общается с ядром через компоненты-сим (MovementCommand,
//! NavigationState) и resource-сими (OcclusionService, ShadowService);
//! обратно получает GameFlowEvent.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod logger;
pub mod perception;

// Re-export базовых типов для удобства
pub use ai::{
    AIPlugin, AgentConfig, BehaviorKind, BehaviorState, GameFlowEvent, NoiseEvent, StateContext,
};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use perception::{
    DetectionConfig, DetectionState, OcclusionService, Perception, PerceptionPlugin, RiseCurve,
    ShadowService, VisionSensor,
};

/// Порядок подсистем внутри FixedUpdate тика.
///
/// Perception → Behavior → Movement: решения принимаются на свежих
/// снапшотах восприятия, движение исполняет уже принятые решения.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Perception,
    Behavior,
    Movement,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Perception,
                    SimulationSet::Behavior,
                    SimulationSet::Movement,
                )
                    .chain(),
            )
            // Подсистемы (ECS strategic layer)
            .add_plugins((PerceptionPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Прогоняет ровно `ticks` FixedUpdate-тиков (без wall-clock)
///
/// Тесты и headless-прогоны двигают время руками: продвигаем Time<Fixed>
/// на timestep и запускаем schedule напрямую.
pub fn run_fixed_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        let timestep = app.world().resource::<Time<Fixed>>().timestep();
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(timestep);
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot мира для сравнения детерминизма
/// (Debug-сериализация, отсортировано по Entity ID)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
