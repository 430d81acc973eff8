#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;
use glam::Vec2;

use outbreak::events::GameCommand;
use outbreak::game::Game;
use outbreak::systems::{
    Abilities, Bullet, BulletBundle, BulletCollider, BulletFlags, Collider, DeltaTime, EnemyBundle, EnemyCollider,
    EnemyKind, GameStage, Health, PlayerControlled, Position, Tuning, Velocity, WaveState,
};

pub const DT: f32 = 1.0 / 60.0;

/// A deterministic game with the default touch tuning profile.
pub fn create_game() -> Game {
    Game::seeded(Tuning::TOUCH, 0xBAD5EED)
}

/// Marks the wave quota as fully spawned so the director stays idle.
///
/// Note that a fully-spawned quota with no live enemies reads as a cleared
/// wave; tests ticking the full schedule afterwards should either keep an
/// enemy alive or expect the risk overlay.
pub fn silence_spawning(game: &mut Game) {
    let mut wave = *game.world.resource::<WaveState>();
    wave.spawned = wave.quota;
    game.world.insert_resource(wave);
}

/// Slows auto-fire to one shot per epoch.
pub fn silence_firing(game: &mut Game) {
    let mut abilities = *game.world.resource::<Abilities>();
    abilities.fire_rate = 1.0e-6;
    game.world.insert_resource(abilities);
}

/// Inserts a one-tick delta so individual systems can be run in isolation.
pub fn set_delta(world: &mut World, seconds: f32) {
    world.insert_resource(DeltaTime { seconds, ticks: 1 });
}

pub fn send_command(game: &mut Game, command: GameCommand) {
    game.queue(command);
}

pub fn set_stage(game: &mut Game, stage: GameStage) {
    game.world.insert_resource(stage);
}

pub fn spawn_enemy_at(world: &mut World, position: Vec2, health: i32, speed: f32) -> Entity {
    world
        .spawn(EnemyBundle {
            kind: EnemyKind::Microbe,
            position: Position(position),
            velocity: Velocity { speed },
            health: Health::new(health),
            collider: Collider {
                radius: Tuning::TOUCH.enemy_radius,
            },
            enemy_collider: EnemyCollider,
        })
        .id()
}

pub fn spawn_bullet_at(world: &mut World, position: Vec2, heading: f32, damage: i32, flags: BulletFlags) -> Entity {
    world
        .spawn(BulletBundle {
            bullet: Bullet {
                heading,
                speed: Tuning::TOUCH.bullet_speed,
                damage,
                flags,
            },
            position: Position(position),
            collider: Collider {
                radius: Tuning::TOUCH.bullet_radius,
            },
            bullet_collider: BulletCollider,
        })
        .id()
}

pub fn player_entity(world: &mut World) -> Entity {
    let mut query = world.query_filtered::<Entity, With<PlayerControlled>>();
    query.single(world).expect("player should exist")
}

pub fn player_position(world: &mut World) -> Vec2 {
    let mut query = world.query_filtered::<&Position, With<PlayerControlled>>();
    query.single(world).expect("player should exist").0
}

pub fn player_health(world: &mut World) -> i32 {
    let mut query = world.query_filtered::<&Health, With<PlayerControlled>>();
    query.single(world).expect("player should exist").current
}

pub fn set_player_health(world: &mut World, current: i32) {
    let mut query = world.query_filtered::<&mut Health, With<PlayerControlled>>();
    query.single_mut(world).expect("player should exist").current = current;
}

pub fn set_player_position(world: &mut World, position: Vec2) {
    let mut query = world.query_filtered::<&mut Position, With<PlayerControlled>>();
    query.single_mut(world).expect("player should exist").0 = position;
}

pub fn enemy_health(world: &mut World, entity: Entity) -> Option<i32> {
    world.get::<Health>(entity).map(|health| health.current)
}

pub fn live_enemies(world: &mut World) -> usize {
    let mut query = world.query_filtered::<(), With<EnemyCollider>>();
    query.iter(world).count()
}

pub fn live_bullets(world: &mut World) -> usize {
    let mut query = world.query_filtered::<(), With<BulletCollider>>();
    query.iter(world).count()
}

/// Text of every live floating-text effect.
pub fn effect_texts(world: &mut World) -> Vec<String> {
    let mut query = world.query::<&outbreak::systems::Effect>();
    query.iter(world).map(|effect| effect.text.clone()).collect()
}
