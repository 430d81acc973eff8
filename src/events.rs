//! Command and event types exchanged between the input layer and the simulation.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::systems::EffectColor;

/// The post-wave risk decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskDecision {
    /// Escalate into the next wave for a higher multiplier.
    Continue,
    /// Lock in the current score and end the run.
    Retreat,
}

/// A discrete command produced by the external input layer.
///
/// Commands are queued with [`crate::game::Game::queue`] and drained once per
/// tick, so the simulation state only ever has a single writer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    /// Continuous movement intent. The latest vector wins; it is read once
    /// per tick by the movement system.
    Move(Vec2),
    /// Pick one of the offered upgrade cards (0..2). Ignored unless the
    /// level-up overlay is active.
    ChooseCard(usize),
    /// Answer the retreat-or-continue prompt. Ignored unless the risk
    /// overlay is active.
    ChooseRisk(RiskDecision),
    /// Re-initialize the run from scratch. Ignored unless the run has ended.
    Restart,
    /// Request simulation shutdown.
    Exit,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// A collision detected this tick, emitted by the collision system and
/// resolved by the combat system.
#[derive(Event, Clone, Copy, Debug)]
pub enum ContactEvent {
    /// A bullet overlapped an enemy.
    BulletEnemy { bullet: Entity, enemy: Entity },
    /// An enemy reached the player.
    EnemyPlayer { enemy: Entity },
}

/// Observer trigger that spawns a floating-text effect.
#[derive(Event, Clone, Debug)]
pub struct SpawnEffect {
    pub position: Vec2,
    pub text: String,
    pub color: EffectColor,
}

impl SpawnEffect {
    pub fn new(position: Vec2, text: impl Into<String>, color: EffectColor) -> Self {
        Self {
            position,
            text: text.into(),
            color,
        }
    }
}
