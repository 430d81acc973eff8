//! The spawn director: decides when and where new enemies appear, and how
//! their stats scale with the wave number.

use bevy_ecs::query::With;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use glam::Vec2;
use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::debug;

use crate::constants::{playfield, spawning};
use crate::systems::components::{
    Collider, DeltaTime, EnemyBundle, EnemyCollider, EnemyKind, GameRng, Health, Position, SpawnTimer, Tuning, Velocity,
    WaveState,
};
use strum::IntoEnumIterator;

/// Enemy health for a kind on the given wave.
pub fn scaled_health(kind: EnemyKind, wave: u32) -> i32 {
    (kind.base_health() as f32 * (1.0 + 0.3 * (wave - 1) as f32)).floor() as i32
}

/// Enemy speed for a kind on the given wave, before the platform multiplier.
pub fn scaled_speed(kind: EnemyKind, wave: u32) -> f32 {
    kind.base_speed() + 0.1 * (wave - 1) as f32
}

/// A spawn position on a uniformly chosen playfield edge, offset outside the
/// visible bounds.
pub fn edge_position(rng: &mut impl Rng) -> Vec2 {
    match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.0..playfield::WIDTH), -spawning::EDGE_OFFSET),
        1 => Vec2::new(
            playfield::WIDTH + spawning::EDGE_OFFSET,
            rng.random_range(0.0..playfield::HEIGHT),
        ),
        2 => Vec2::new(
            rng.random_range(0.0..playfield::WIDTH),
            playfield::HEIGHT + spawning::EDGE_OFFSET,
        ),
        _ => Vec2::new(-spawning::EDGE_OFFSET, rng.random_range(0.0..playfield::HEIGHT)),
    }
}

/// Drives enemy creation from two independent rules, both bounded by the
/// wave's spawn quota:
///
/// 1. A pressure floor that tops the live count up to `min(6, 2 + wave)`
///    one enemy per tick, keeping pressure constant regardless of the timer.
/// 2. An accumulating timer whose interval shrinks with the wave number and
///    which releases bursts of up to two enemies.
pub fn spawn_director_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    tuning: Res<Tuning>,
    mut wave: ResMut<WaveState>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<GameRng>,
    enemies: Query<(), With<EnemyCollider>>,
) {
    let live = enemies.iter().count() as u32;

    if live < spawning::pressure_floor(wave.wave) && !wave.quota_spawned() {
        spawn_enemy(&mut commands, &tuning, &mut wave, &mut rng);
    }

    timer.0 += delta_time.seconds;
    if timer.0 <= spawning::interval(wave.wave) {
        return;
    }
    timer.0 = 0.0;

    for _ in 0..spawning::burst(wave.wave) {
        if wave.quota_spawned() {
            break;
        }
        spawn_enemy(&mut commands, &tuning, &mut wave, &mut rng);
    }
}

fn spawn_enemy(commands: &mut Commands, tuning: &Tuning, wave: &mut WaveState, rng: &mut GameRng) {
    let kind = EnemyKind::iter()
        .choose(&mut rng.0)
        .expect("enemy kind catalog is never empty");
    let health = scaled_health(kind, wave.wave);
    let position = edge_position(&mut rng.0);

    commands.spawn(EnemyBundle {
        kind,
        position: Position(position),
        velocity: Velocity {
            speed: scaled_speed(kind, wave.wave) * tuning.enemy_speed_scale,
        },
        health: Health::new(health),
        collider: Collider {
            radius: tuning.enemy_radius,
        },
        enemy_collider: EnemyCollider,
    });

    wave.spawned += 1;
    debug!(
        kind = ?kind,
        health,
        spawned = wave.spawned,
        quota = wave.quota,
        wave = wave.wave,
        "Spawned enemy"
    );
}
