//! Drains the external command queue once per tick, preserving single-writer
//! discipline over the simulation state.
//!
//! Choice commands are validated against the active overlay: a card or risk
//! choice arriving while the matching overlay is not shown is reported as a
//! [`GameError`] and otherwise ignored.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::With;
use bevy_ecs::system::{Commands, Query, Res, ResMut, Single};
use tracing::{info, warn};

use crate::constants::{mechanics, playfield, waves};
use crate::error::{CommandError, GameError};
use crate::events::{GameCommand, GameEvent, RiskDecision, SpawnEffect};
use crate::systems::abilities;
use crate::systems::components::{
    Abilities, EffectColor, FireTimer, GlobalState, Health, KillCount, MoveIntent, PlayerControlled, PlayerLevel,
    Position, ScoreResource, SpawnTimer, Tuning, WaveState,
};
use crate::systems::stage::GameStage;

/// Applies queued movement, choice, and exit commands to the simulation.
#[allow(clippy::too_many_arguments)]
pub fn drain_commands_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut intent: ResMut<MoveIntent>,
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    mut wave: ResMut<WaveState>,
    mut abilities_state: ResMut<Abilities>,
    mut global: ResMut<GlobalState>,
    mut errors: EventWriter<GameError>,
    player: Single<&mut Health, With<PlayerControlled>>,
) {
    let mut player_health = player.into_inner();

    for event in events.read() {
        let GameEvent::Command(command) = *event;
        match command {
            GameCommand::Move(vector) => {
                intent.0 = vector;
            }
            GameCommand::ChooseCard(index) => match *stage {
                GameStage::LevelUp { cards: offer } => {
                    let Some(&card) = offer.get(index) else {
                        errors.write(CommandError::ChoiceOutOfRange(index).into());
                        continue;
                    };
                    abilities::apply(card, &mut abilities_state, &mut player_health);
                    commands.trigger(SpawnEffect::new(playfield::CENTER, card.name(), EffectColor::Banner));
                    *stage = GameStage::Playing;
                }
                _ => {
                    errors.write(CommandError::NotChoosing("card").into());
                }
            },
            GameCommand::ChooseRisk(decision) => {
                if *stage != GameStage::RiskChoice {
                    errors.write(CommandError::NotChoosing("risk").into());
                    continue;
                }
                match decision {
                    RiskDecision::Retreat => {
                        info!(score = score.0, wave = wave.wave, "Retreated, score locked in");
                        commands.trigger(SpawnEffect::new(playfield::CENTER, "Retreated safely!", EffectColor::Safe));
                        *stage = GameStage::GameOver;
                    }
                    RiskDecision::Continue => {
                        let next = wave.wave + 1;
                        if next > waves::MAX_WAVE {
                            score.0 += waves::VICTORY_BONUS;
                            info!(score = score.0, "All waves cleared, victory");
                            commands.trigger(SpawnEffect::new(playfield::CENTER, "VICTORY!", EffectColor::Banner));
                            *stage = GameStage::Victory;
                        } else {
                            *wave = WaveState::for_wave(next);
                            player_health.heal(mechanics::CONTINUE_HEAL);
                            info!(
                                wave = wave.wave,
                                quota = wave.quota,
                                multiplier = wave.multiplier,
                                "Continuing into the next wave"
                            );
                            commands.trigger(SpawnEffect::new(
                                playfield::CENTER,
                                format!("Wave {next} incoming!"),
                                EffectColor::Alert,
                            ));
                            *stage = GameStage::Playing;
                        }
                    }
                }
            }
            GameCommand::Exit => {
                global.exit = true;
            }
            // Handled by the restart system, which owns entity teardown.
            GameCommand::Restart => {}
        }
    }
}

/// Rebuilds the run from scratch when a restart is requested in a terminal
/// stage: every entity is despawned, every resource reset, and a fresh
/// player spawned at the playfield center.
#[allow(clippy::too_many_arguments)]
pub fn restart_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    entities: Query<Entity, With<Position>>,
    tuning: Res<Tuning>,
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    mut kills: ResMut<KillCount>,
    mut level: ResMut<PlayerLevel>,
    mut wave: ResMut<WaveState>,
    mut abilities_state: ResMut<Abilities>,
    mut fire_timer: ResMut<FireTimer>,
    mut spawn_timer: ResMut<SpawnTimer>,
    mut intent: ResMut<MoveIntent>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Command(GameCommand::Restart) = *event else {
            continue;
        };
        if !stage.terminal() {
            errors.write(CommandError::RunStillActive.into());
            continue;
        }

        for entity in entities.iter() {
            commands.entity(entity).despawn();
        }
        commands.spawn(tuning.player_bundle());

        *score = ScoreResource::default();
        *kills = KillCount::default();
        *level = PlayerLevel::default();
        *wave = WaveState::default();
        *abilities_state = Abilities::default();
        *fire_timer = FireTimer::default();
        *spawn_timer = SpawnTimer::default();
        *intent = MoveIntent::default();
        *stage = GameStage::Playing;

        info!("Run restarted from scratch");
    }
}

/// Logs errors reported by other systems. Guard failures are expected
/// occasionally (stray clicks); nothing here is fatal.
pub fn drain_errors_system(mut errors: EventReader<GameError>) {
    for error in errors.read() {
        warn!(%error, "Ignoring invalid command");
    }
}
