//! The wave/risk progression state machine.

use bevy_ecs::query::With;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Commands, Query, Res, ResMut, Single};
use tracing::{debug, info};

use crate::constants::{playfield, waves};
use crate::events::SpawnEffect;
use crate::systems::abilities::{self, Card};
use crate::systems::components::{
    EffectColor, EnemyCollider, GameRng, Health, PlayerControlled, PlayerLevel, ScoreResource, WaveState,
};

/// A resource that tracks the overall stage of the simulation from a
/// high-level perspective.
///
/// `Playing` is the only stage in which entity updates and timers run;
/// every other stage is a simulation-wide gate awaiting an external choice
/// event (or, for the terminal stages, a restart).
#[derive(Resource, Debug, PartialEq, Clone, Copy)]
pub enum GameStage {
    /// The main combat loop is active.
    Playing,
    /// Paused on the level-up overlay, awaiting a card choice.
    LevelUp { cards: [Card; 3] },
    /// Paused on the retreat-or-continue overlay after clearing a wave.
    RiskChoice,
    /// Terminal: the run ended by death or retreat. Score is final.
    GameOver,
    /// Terminal: wave 10 was cleared and the player continued out.
    Victory,
}

impl GameStage {
    /// Whether the simulation gate is closed (entity updates skipped).
    pub fn paused(&self) -> bool {
        !matches!(self, GameStage::Playing)
    }

    /// Whether the run has ended and only a restart can follow.
    pub fn terminal(&self) -> bool {
        matches!(self, GameStage::GameOver | GameStage::Victory)
    }
}

impl Default for GameStage {
    fn default() -> Self {
        Self::Playing
    }
}

/// Evaluates progression at the end of each active tick: player death, wave
/// completion, and level-up thresholds, in that priority order.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut commands: Commands,
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    mut level: ResMut<PlayerLevel>,
    mut rng: ResMut<GameRng>,
    wave: Res<WaveState>,
    enemies: Query<(), With<EnemyCollider>>,
    player: Single<&Health, With<PlayerControlled>>,
) {
    if stage.paused() {
        return;
    }

    // Death ends the run immediately, with a score penalty for falling
    // mid-run rather than on the first wave.
    if player.depleted() {
        if wave.wave > 1 {
            let penalty = score.0 / 2;
            score.0 -= penalty;
            commands.trigger(SpawnEffect::new(
                playfield::CENTER,
                format!("-{penalty}"),
                EffectColor::PlayerHurt,
            ));
            info!(penalty, final_score = score.0, wave = wave.wave, "Player fell mid-run");
        } else {
            info!(final_score = score.0, "Player fell on the first wave");
        }
        *stage = GameStage::GameOver;
        return;
    }

    // A wave is complete once its full quota has spawned and no enemy
    // remains alive, regardless of how the last one was removed.
    if wave.quota_spawned() && enemies.is_empty() {
        info!(wave = wave.wave, killed = wave.killed, "Wave cleared, awaiting risk decision");
        commands.trigger(SpawnEffect::new(
            playfield::CENTER,
            format!("Wave {} cleared!", wave.wave),
            EffectColor::Banner,
        ));
        *stage = GameStage::RiskChoice;
        return;
    }

    // Level-ups fire whenever the wave-derived level overtakes the stored
    // one, interrupting the active wave with a card offer.
    let derived = waves::level(wave.wave);
    if derived > level.0 {
        level.0 = derived;
        let cards = abilities::draw_offer(&mut rng.0);
        debug!(level = level.0, offer = ?cards, "Level up, offering cards");
        commands.trigger(SpawnEffect::new(playfield::CENTER, "LEVEL UP!", EffectColor::Banner));
        *stage = GameStage::LevelUp { cards };
    }
}
