//! Per-tick entity motion: player steering, enemy pursuit, and bullet travel.

use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Commands, Query, Res, Single};
use glam::Vec2;

use crate::constants::{combat, mechanics, playfield};
use crate::systems::components::{
    Bullet, Collider, DeltaTime, EnemyCollider, MoveIntent, PlayerControlled, Position, Velocity,
};

/// Scales a per-tick speed by the elapsed time, relative to the 60 Hz
/// reference rate the balance constants were tuned at.
fn frame_distance(speed: f32, delta_time: &DeltaTime) -> f32 {
    speed * 60.0 * delta_time.seconds
}

/// Moves the player by the current intent vector, clamped to the playfield
/// with asymmetric margins (the top margin leaves room for the HUD).
pub fn player_movement_system(
    delta_time: Res<DeltaTime>,
    intent: Res<MoveIntent>,
    player: Single<(&mut Position, &Velocity, &Collider), With<PlayerControlled>>,
) {
    let (mut position, velocity, collider) = player.into_inner();

    let direction = if intent.0.length_squared() > 1.0 {
        intent.0.normalize()
    } else {
        intent.0
    };

    let next = position.0 + direction * frame_distance(velocity.speed, &delta_time);
    position.0 = next.clamp(
        Vec2::new(
            collider.radius + mechanics::MARGIN_X,
            collider.radius + mechanics::MARGIN_TOP,
        ),
        Vec2::new(
            playfield::WIDTH - collider.radius - mechanics::MARGIN_X,
            playfield::HEIGHT - collider.radius - mechanics::MARGIN_BOTTOM,
        ),
    );
}

/// Steers every enemy straight at the player, and culls enemies that have
/// drifted far outside the playfield (a guard against bad spawn positions).
pub fn enemy_pursuit_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    player: Single<&Position, With<PlayerControlled>>,
    mut enemies: Query<(Entity, &mut Position, &Velocity), (With<EnemyCollider>, Without<PlayerControlled>)>,
) {
    let target = player.0;

    for (entity, mut position, velocity) in enemies.iter_mut() {
        let offset = target - position.0;
        if offset.length_squared() > 0.0 {
            position.0 += offset.normalize() * frame_distance(velocity.speed, &delta_time);
        }

        if outside_bounds(position.0, combat::ENEMY_CULL_MARGIN) {
            tracing::debug!(enemy = ?entity, position = ?position.0, "Culling enemy far outside playfield");
            commands.entity(entity).despawn();
        }
    }
}

/// Advances every bullet along its heading and culls those that left the
/// playfield.
pub fn bullet_movement_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    mut bullets: Query<(Entity, &mut Position, &Bullet)>,
) {
    for (entity, mut position, bullet) in bullets.iter_mut() {
        let heading = Vec2::from_angle(bullet.heading);
        position.0 += heading * frame_distance(bullet.speed, &delta_time);

        if outside_bounds(position.0, combat::BULLET_CULL_MARGIN) {
            commands.entity(entity).despawn();
        }
    }
}

/// Whether a point lies more than `margin` units outside the playfield.
pub fn outside_bounds(point: Vec2, margin: f32) -> bool {
    point.x < -margin || point.x > playfield::WIDTH + margin || point.y < -margin || point.y > playfield::HEIGHT + margin
}
