//! Навигатор — исполнение MovementCommand
//!
//! Встроенный straight-line path agent: ведёт WorldPosition к destination
//! со скоростью MovementSpeed и поддерживает NavigationState.
//! is_target_reached (остаток пути < arrival_threshold). В продакшене
//! вместо него те же компоненты читает pathfinding хоста — контракт
//! SetSpeed/SetDestination/IsArrived/Stop от этого не меняется.

use bevy::prelude::*;

use crate::components::{
    Agent, MovementCommand, MovementSpeed, NavigationState, PursuitTarget, WorldPosition,
};

/// Система: исполнение команд движения
///
/// FollowEntity перенацеливается на живую позицию цели каждый тик;
/// исчезнувшая цель → деградируем в стояние (без паники, без ошибки).
pub fn apply_movement_commands(
    time: Res<Time<Fixed>>,
    mut agents: Query<
        (
            &MovementCommand,
            &MovementSpeed,
            &mut NavigationState,
            &mut WorldPosition,
        ),
        With<Agent>,
    >,
    targets: Query<&WorldPosition, (With<PursuitTarget>, Without<Agent>)>,
) {
    let dt = time.delta_secs();

    for (command, speed, mut nav, mut position) in agents.iter_mut() {
        let destination = match command {
            MovementCommand::Idle | MovementCommand::Stop => {
                // Флаг прибытия не трогаем: история последнего перемещения
                continue;
            }
            MovementCommand::MoveToPosition { target } => *target,
            MovementCommand::FollowEntity { target } => {
                let Ok(target_position) = targets.get(*target) else {
                    continue; // цель исчезла — стоим
                };
                target_position.position
            }
        };

        let to_destination = destination - position.position;
        let distance = to_destination.length();

        if distance <= nav.arrival_threshold {
            nav.is_target_reached = true;
            continue;
        }
        nav.is_target_reached = false;

        let step = (speed.speed * dt).min(distance);
        let direction = to_destination / distance;
        position.position += direction * step;

        // Смотрим туда куда идём (горизонтально)
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() > 1e-6 {
            position.facing = flat.normalize();
        }
    }
}
