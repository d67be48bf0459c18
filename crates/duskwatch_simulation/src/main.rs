//! Headless симуляция DUSKWATCH
//!
//! Запускает Bevy App без рендера: один агент на квадратном маршруте,
//! неподвижная цель в его секторе. Ожидаемая трасса game-flow событий:
//! StateChanged → PlayerDetected → Chase → PlayerCaught.

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use duskwatch_simulation::{
    create_headless_app, run_fixed_ticks, Agent, GameFlowEvent, PursuitTarget, StateContext,
    WorldPosition,
};

fn main() {
    let seed = 42;
    println!("Starting DUSKWATCH headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    // Цель стоит внутри патрульного коридора
    let target = app
        .world_mut()
        .spawn((
            PursuitTarget,
            WorldPosition {
                position: Vec3::new(2.0, 0.0, 5.0),
                facing: Vec3::Z,
            },
        ))
        .id();

    // Агент с квадратным маршрутом 8x8 вокруг цели
    app.world_mut().spawn((
        Agent { faction_id: 1 },
        WorldPosition {
            position: Vec3::new(-4.0, 0.0, -4.0),
            facing: Vec3::Z,
        },
        StateContext {
            target: Some(target),
            patrol_route: vec![
                Vec3::new(-4.0, 0.0, -4.0),
                Vec3::new(-4.0, 0.0, 4.0),
                Vec3::new(4.0, 0.0, 4.0),
                Vec3::new(4.0, 0.0, -4.0),
            ],
            ..Default::default()
        },
    ));

    // Без app.update() события не очищаются — читаем одним курсором
    let mut cursor = EventCursor::<GameFlowEvent>::default();

    // 30 секунд симуляции
    for second in 0..30 {
        run_fixed_ticks(&mut app, 60);

        let events = app.world().resource::<Events<GameFlowEvent>>();
        for event in cursor.read(events) {
            println!("t={:>2}s  {:?}", second + 1, event);
        }

        if second % 5 == 4 {
            let entity_count = app.world().entities().len();
            println!("t={:>2}s  {} entities alive", second + 1, entity_count);
        }
    }

    println!("Simulation complete!");
}
