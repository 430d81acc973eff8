//! Auto-fire: an accumulating timer that launches aimed bullet fans.

use std::f32::consts::FRAC_PI_2;

use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Commands, Query, Res, ResMut, Single};
use smallvec::SmallVec;

use crate::constants::cards::SPREAD_ANGLE;
use crate::systems::components::{
    Abilities, Bullet, BulletBundle, BulletCollider, Collider, DeltaTime, EnemyCollider, FireTimer, PlayerControlled,
    Position, Tuning,
};

/// Accumulates elapsed time and fires a volley whenever the interval implied
/// by the fire-rate ability is crossed. Bullets aim at the nearest enemy;
/// with no enemy alive, the volley goes straight up.
pub fn auto_fire_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    tuning: Res<Tuning>,
    abilities: Res<Abilities>,
    mut timer: ResMut<FireTimer>,
    player: Single<&Position, With<PlayerControlled>>,
    enemies: Query<&Position, (With<EnemyCollider>, Without<PlayerControlled>)>,
) {
    timer.0 += delta_time.seconds;

    let interval = tuning.fire_interval / abilities.fire_rate;
    if timer.0 < interval {
        return;
    }
    timer.0 = 0.0;

    let origin = player.0;
    let target_heading = enemies
        .iter()
        .min_by(|a, b| {
            let da = a.0.distance_squared(origin);
            let db = b.0.distance_squared(origin);
            da.total_cmp(&db)
        })
        .map(|nearest| {
            let offset = nearest.0 - origin;
            offset.y.atan2(offset.x)
        })
        .unwrap_or(-FRAC_PI_2);

    for heading in volley_headings(target_heading, abilities.multi_shot) {
        commands.spawn(BulletBundle {
            bullet: Bullet {
                heading,
                speed: tuning.bullet_speed * abilities.bullet_speed,
                damage: abilities.damage,
                flags: abilities.bullet_flags(),
            },
            position: Position(origin),
            collider: Collider {
                radius: tuning.bullet_radius,
            },
            bullet_collider: BulletCollider,
        });
    }
}

/// Headings for a volley of `count` bullets centered on `target`.
///
/// A single bullet flies straight at the target; larger volleys spread over
/// a fixed 60-degree fan.
pub fn volley_headings(target: f32, count: u32) -> SmallVec<[f32; 5]> {
    let mut headings = SmallVec::new();
    if count <= 1 {
        headings.push(target);
        return headings;
    }

    let step = SPREAD_ANGLE / (count - 1) as f32;
    for i in 0..count {
        headings.push(target - SPREAD_ANGLE / 2.0 + i as f32 * step);
    }
    headings
}
