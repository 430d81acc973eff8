//! Combat resolution: collision detection between bullets, enemies, and the
//! player, followed by damage application, splash, and kill accounting.

use std::collections::HashSet;

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Commands, Query, ResMut, Single};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::combat;
use crate::events::{ContactEvent, SpawnEffect};
use crate::systems::components::{
    Bullet, BulletCollider, BulletFlags, Collider, EffectColor, EnemyCollider, Health, KillCount, PlayerControlled,
    Position, ScoreResource, WaveState,
};

type EnemyQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static Position, &'static mut Health), (With<EnemyCollider>, Without<PlayerControlled>)>;

/// Helper function to check collision between two entities with colliders.
pub fn check_collision(pos1: &Position, collider1: &Collider, pos2: &Position, collider2: &Collider) -> bool {
    let distance = pos1.0.distance(pos2.0);
    collider1.collides_with(collider2.radius, distance)
}

/// Detects overlapping entities and emits [`ContactEvent`]s for the combat
/// resolution system.
///
/// Bullet-enemy overlaps are written before enemy-player overlaps so that a
/// bullet killing an enemy on the same tick the enemy reaches the player
/// counts as a kill rather than as contact damage.
pub fn collision_system(
    bullets: Query<(Entity, &Position, &Collider), With<BulletCollider>>,
    enemies: Query<(Entity, &Position, &Collider), With<EnemyCollider>>,
    player: Single<(&Position, &Collider), (With<PlayerControlled>, Without<EnemyCollider>)>,
    mut contacts: EventWriter<ContactEvent>,
) {
    for (bullet, bullet_pos, bullet_collider) in bullets.iter() {
        for (enemy, enemy_pos, enemy_collider) in enemies.iter() {
            if check_collision(bullet_pos, bullet_collider, enemy_pos, enemy_collider) {
                contacts.write(ContactEvent::BulletEnemy { bullet, enemy });
            }
        }
    }

    let (player_pos, player_collider) = *player;
    for (enemy, enemy_pos, enemy_collider) in enemies.iter() {
        if check_collision(enemy_pos, enemy_collider, player_pos, player_collider) {
            contacts.write(ContactEvent::EnemyPlayer { enemy });
        }
    }
}

/// Applies the damage implied by this tick's contacts.
///
/// Non-piercing bullets are consumed by their first hit; further overlap
/// events for a consumed bullet are skipped, while piercing bullets resolve
/// every overlap. Explosive hits splash half damage (floored) onto every
/// other enemy within the splash radius. Any enemy whose health is depleted,
/// whether directly or by splash, is removed and scored.
#[allow(clippy::too_many_arguments)]
pub fn combat_resolution_system(
    mut commands: Commands,
    mut contacts: EventReader<ContactEvent>,
    mut score: ResMut<ScoreResource>,
    mut kills: ResMut<KillCount>,
    mut wave: ResMut<WaveState>,
    bullets: Query<&Bullet>,
    mut enemies: EnemyQuery,
    player: Single<(&Position, &mut Health), (With<PlayerControlled>, Without<EnemyCollider>)>,
) {
    let mut consumed: HashSet<Entity> = HashSet::new();
    let mut dead: HashSet<Entity> = HashSet::new();
    let (player_pos, mut player_health) = player.into_inner();
    let player_pos = player_pos.0;

    for contact in contacts.read() {
        match *contact {
            ContactEvent::BulletEnemy { bullet, enemy } => {
                if consumed.contains(&bullet) || dead.contains(&enemy) {
                    continue;
                }
                let Ok(&stats) = bullets.get(bullet) else {
                    continue;
                };

                // Direct hit
                let impact = {
                    let Ok((_, position, mut health)) = enemies.get_mut(enemy) else {
                        continue;
                    };
                    health.current -= stats.damage;
                    trace!(?bullet, ?enemy, damage = stats.damage, remaining = health.current, "Bullet hit");
                    position.0
                };
                commands.trigger(SpawnEffect::new(
                    impact,
                    format!("-{} HP", stats.damage),
                    EffectColor::Damage,
                ));

                // The struck enemy plus every splash victim; checked for
                // depletion afterwards so splash kills are scored too.
                let mut affected: SmallVec<[Entity; 8]> = SmallVec::new();
                affected.push(enemy);

                if stats.flags.contains(BulletFlags::EXPLOSIVE) {
                    let splash = stats.damage / 2;
                    for (other, position, mut health) in enemies.iter_mut() {
                        if other == enemy || dead.contains(&other) {
                            continue;
                        }
                        if position.0.distance(impact) < combat::SPLASH_RADIUS {
                            health.current -= splash;
                            affected.push(other);
                            commands.trigger(SpawnEffect::new(position.0, format!("-{splash}"), EffectColor::Splash));
                        }
                    }
                    commands.trigger(SpawnEffect::new(impact, "BOOM!", EffectColor::Blast));
                }

                for entity in affected {
                    let Ok((_, position, health)) = enemies.get_mut(entity) else {
                        continue;
                    };
                    if !health.depleted() {
                        continue;
                    }
                    let position = position.0;

                    dead.insert(entity);
                    commands.entity(entity).despawn();

                    let points = (combat::KILL_SCORE as f32 * wave.multiplier) as u32;
                    score.0 += points;
                    kills.0 += 1;
                    wave.killed += 1;
                    commands.trigger(SpawnEffect::new(position, format!("+{points}"), EffectColor::Score));
                    debug!(
                        enemy = ?entity,
                        points,
                        killed = wave.killed,
                        spawned = wave.spawned,
                        "Enemy destroyed"
                    );
                }

                if !stats.flags.contains(BulletFlags::PIERCING) {
                    consumed.insert(bullet);
                    commands.entity(bullet).despawn();
                }
            }
            ContactEvent::EnemyPlayer { enemy } => {
                if dead.contains(&enemy) || enemies.get_mut(enemy).is_err() {
                    continue;
                }

                let damage = combat::contact_damage(wave.wave);
                player_health.damage(damage);
                commands.trigger(SpawnEffect::new(player_pos, format!("-{damage} HP"), EffectColor::PlayerHurt));
                debug!(?enemy, damage, health = player_health.current, "Enemy reached player");

                // Single-use contact damage: the enemy self-destructs and
                // does not count as a kill.
                dead.insert(enemy);
                commands.entity(enemy).despawn();
            }
        }
    }
}
