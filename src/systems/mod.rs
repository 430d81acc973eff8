//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components,
//! systems, and resources.

pub mod abilities;
pub mod combat;
pub mod components;
pub mod firing;
pub mod input;
pub mod lifetime;
pub mod movement;
pub mod profiling;
pub mod spawn;
pub mod stage;

pub use abilities::{apply, draw_offer, Card, CardEffect};
pub use combat::{check_collision, collision_system, combat_resolution_system};
pub use components::{
    Abilities, Bullet, BulletBundle, BulletCollider, BulletFlags, Collider, DeltaTime, Effect, EffectColor, EnemyBundle,
    EnemyCollider, EnemyKind, FireTimer, GameRng, GlobalState, Health, KillCount, MoveIntent, PlayerBundle,
    PlayerCollider, PlayerControlled, PlayerLevel, Position, ScoreResource, SpawnTimer, Tuning, Velocity, WaveState,
};
pub use firing::{auto_fire_system, volley_headings};
pub use input::{drain_commands_system, drain_errors_system, restart_system};
pub use lifetime::{effect_lifetime_system, spawn_effect_observer, TimeToLive};
pub use movement::{bullet_movement_system, enemy_pursuit_system, outside_bounds, player_movement_system};
pub use profiling::{profile, SystemId, SystemTimings};
pub use spawn::{edge_position, scaled_health, scaled_speed, spawn_director_system};
pub use stage::{stage_system, GameStage};
