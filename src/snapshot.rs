//! The read-only per-frame state snapshot consumed by an external renderer.
//!
//! All positions are in the fixed 320x568 logical space; scaling to physical
//! pixels is the renderer's responsibility.

use bevy_ecs::query::With;
use bevy_ecs::world::World;
use glam::Vec2;

use crate::constants::waves;
use crate::systems::components::{
    Bullet, BulletCollider, Collider, Effect, EnemyCollider, Health, KillCount, PlayerControlled, Position,
    ScoreResource, WaveState,
};
use crate::systems::lifetime::TimeToLive;
use crate::systems::stage::GameStage;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub effects: Vec<EffectView>,
    pub hud: Hud,
    pub overlay: Overlay,
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyView {
    pub position: Vec2,
    pub radius: f32,
    /// Remaining health as a fraction of maximum, for health bars.
    pub health_ratio: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct BulletView {
    pub position: Vec2,
    /// Heading angle in radians.
    pub heading: f32,
}

#[derive(Debug, Clone)]
pub struct EffectView {
    pub position: Vec2,
    pub text: String,
    pub color: (u8, u8, u8),
    /// Remaining lifetime as a fraction, for fade-out.
    pub life_ratio: f32,
}

/// HUD scalars drawn every frame.
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
    pub wave: u32,
    pub killed: u32,
    pub spawned: u32,
    pub quota: u32,
    pub multiplier: f32,
    pub total_kills: u32,
}

/// A summary of the offered card for the level-up overlay.
#[derive(Debug, Clone, Copy)]
pub struct CardView {
    pub name: &'static str,
    pub description: &'static str,
}

/// The active full-screen overlay, with the data needed to render it.
#[derive(Debug, Clone)]
pub enum Overlay {
    None,
    LevelUp { cards: Vec<CardView> },
    RiskChoice {
        wave: u32,
        score: u32,
        /// Multiplier preview for the next wave; `None` after the final wave.
        next_multiplier: Option<f32>,
    },
    GameOver { score: u32, kills: u32 },
    Victory { score: u32, kills: u32 },
}

/// Builds a snapshot of the current world state.
pub(crate) fn capture(world: &mut World) -> Snapshot {
    let (player_position, player_radius) = {
        let mut query = world.query_filtered::<(&Position, &Collider), With<PlayerControlled>>();
        let (position, collider) = query.single(world).expect("player entity always exists");
        (position.0, collider.radius)
    };

    let player_health = {
        let mut query = world.query_filtered::<&Health, With<PlayerControlled>>();
        *query.single(world).expect("player entity always exists")
    };

    let enemies = {
        let mut query = world.query_filtered::<(&Position, &Collider, &Health), With<EnemyCollider>>();
        query
            .iter(world)
            .map(|(position, collider, health)| EnemyView {
                position: position.0,
                radius: collider.radius,
                health_ratio: health.ratio(),
            })
            .collect()
    };

    let bullets = {
        let mut query = world.query_filtered::<(&Position, &Bullet), With<BulletCollider>>();
        query
            .iter(world)
            .map(|(position, bullet)| BulletView {
                position: position.0,
                heading: bullet.heading,
            })
            .collect()
    };

    let effects = {
        let mut query = world.query::<(&Position, &Effect, &TimeToLive)>();
        query
            .iter(world)
            .map(|(position, effect, ttl)| EffectView {
                position: position.0,
                text: effect.text.clone(),
                color: effect.color.rgb(),
                life_ratio: ttl.ratio(),
            })
            .collect()
    };

    let wave = *world.resource::<WaveState>();
    let score = world.resource::<ScoreResource>().0;
    let total_kills = world.resource::<KillCount>().0;

    let hud = Hud {
        health: player_health.current,
        max_health: player_health.max,
        score,
        wave: wave.wave,
        killed: wave.killed,
        spawned: wave.spawned,
        quota: wave.quota,
        multiplier: wave.multiplier,
        total_kills,
    };

    let overlay = match *world.resource::<GameStage>() {
        GameStage::Playing => Overlay::None,
        GameStage::LevelUp { cards } => Overlay::LevelUp {
            cards: cards
                .iter()
                .map(|card| CardView {
                    name: card.name(),
                    description: card.description(),
                })
                .collect(),
        },
        GameStage::RiskChoice => Overlay::RiskChoice {
            wave: wave.wave,
            score,
            next_multiplier: (wave.wave < waves::MAX_WAVE).then(|| waves::multiplier(wave.wave + 1)),
        },
        GameStage::GameOver => Overlay::GameOver {
            score,
            kills: total_kills,
        },
        GameStage::Victory => Overlay::Victory {
            score,
            kills: total_kills,
        },
    };

    Snapshot {
        player: PlayerView {
            position: player_position,
            radius: player_radius,
        },
        enemies,
        bullets,
        effects,
        hud,
        overlay,
    }
}
