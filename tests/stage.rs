use glam::Vec2;
use speculoos::prelude::*;

use outbreak::constants::waves;
use outbreak::events::{GameCommand, RiskDecision};
use outbreak::snapshot::Overlay;
use outbreak::systems::{
    Abilities, Card, GameStage, KillCount, PlayerLevel, ScoreResource, WaveState,
};

mod common;

fn set_score(game: &mut outbreak::game::Game, score: u32) {
    game.world.insert_resource(ScoreResource(score));
}

fn score(game: &outbreak::game::Game) -> u32 {
    game.world.resource::<ScoreResource>().0
}

fn stage(game: &outbreak::game::Game) -> GameStage {
    *game.world.resource::<GameStage>()
}

#[test]
fn test_scenario_wave_clear_shows_risk_overlay() {
    let mut game = common::create_game();
    common::silence_firing(&mut game);

    // Wave 1 fully spawned and fully killed, nothing left alive
    game.world.insert_resource(WaveState {
        wave: 1,
        spawned: 5,
        killed: 5,
        quota: 5,
        multiplier: 1.0,
    });

    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::RiskChoice);
    let snapshot = game.snapshot();
    assert_that(&snapshot.hud.killed).is_equal_to(5);
    assert_that(&snapshot.hud.spawned).is_equal_to(5);
    match snapshot.overlay {
        Overlay::RiskChoice {
            wave,
            next_multiplier,
            ..
        } => {
            assert_that(&wave).is_equal_to(1);
            assert_that(&next_multiplier).is_equal_to(Some(1.5));
        }
        other => panic!("expected risk overlay, got {other:?}"),
    }
}

#[test]
fn test_wave_completes_even_when_last_enemy_self_destructs() {
    let mut game = common::create_game();
    common::silence_firing(&mut game);
    common::silence_spawning(&mut game);

    // The last remaining enemy reaches the player instead of dying to a
    // bullet; the wave still reads as complete afterwards.
    let player_pos = common::player_position(&mut game.world);
    common::spawn_enemy_at(&mut game.world, player_pos, 50, 0.0);

    game.tick(common::DT);

    assert_that(&common::live_enemies(&mut game.world)).is_equal_to(0);
    assert_that(&common::player_health(&mut game.world)).is_equal_to(90);
    assert_that(&stage(&game)).is_equal_to(GameStage::RiskChoice);
}

#[test]
fn test_scenario_death_penalty_halves_score() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState::for_wave(3));
    game.world.insert_resource(PlayerLevel(2));
    set_score(&mut game, 1000);
    common::set_player_health(&mut game.world, 0);

    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::GameOver);
    assert_that(&score(&game)).is_equal_to(500);
    match game.snapshot().overlay {
        Overlay::GameOver { score, .. } => assert_that(&score).is_equal_to(500),
        other => panic!("expected game-over overlay, got {other:?}"),
    }
}

#[test]
fn test_no_death_penalty_on_first_wave() {
    let mut game = common::create_game();
    set_score(&mut game, 300);
    common::set_player_health(&mut game.world, 0);

    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::GameOver);
    assert_that(&score(&game)).is_equal_to(300);
}

#[test]
fn test_scenario_victory_on_continue_past_final_wave() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState::for_wave(10));
    game.world.insert_resource(PlayerLevel(4));
    common::set_stage(&mut game, GameStage::RiskChoice);
    set_score(&mut game, 5000);

    common::send_command(&mut game, GameCommand::ChooseRisk(RiskDecision::Continue));
    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::Victory);
    assert_that(&score(&game)).is_equal_to(5000 + waves::VICTORY_BONUS);

    // Terminal: no further enemies spawn, score stays locked
    for _ in 0..30 {
        game.tick(common::DT);
    }
    assert_that(&common::live_enemies(&mut game.world)).is_equal_to(0);
    assert_that(&score(&game)).is_equal_to(5000 + waves::VICTORY_BONUS);
    match game.snapshot().overlay {
        Overlay::Victory { score, .. } => assert_that(&score).is_equal_to(15_000),
        other => panic!("expected victory overlay, got {other:?}"),
    }
}

#[test]
fn test_continue_advances_wave_with_fresh_quota_and_heal() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState {
        wave: 1,
        spawned: 5,
        killed: 5,
        quota: 5,
        multiplier: 1.0,
    });
    common::set_stage(&mut game, GameStage::RiskChoice);
    common::set_player_health(&mut game.world, 50);

    common::send_command(&mut game, GameCommand::ChooseRisk(RiskDecision::Continue));
    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::Playing);
    let wave = *game.world.resource::<WaveState>();
    assert_that(&wave.wave).is_equal_to(2);
    assert_that(&wave.quota).is_equal_to(11);
    assert_that(&wave.killed).is_equal_to(0);
    assert_that(&wave.multiplier).is_close_to(1.5, 0.001);
    assert_that(&common::player_health(&mut game.world)).is_equal_to(65);
}

#[test]
fn test_continue_heal_caps_at_full_health() {
    let mut game = common::create_game();
    common::set_stage(&mut game, GameStage::RiskChoice);
    common::set_player_health(&mut game.world, 95);

    common::send_command(&mut game, GameCommand::ChooseRisk(RiskDecision::Continue));
    game.tick(common::DT);

    assert_that(&common::player_health(&mut game.world)).is_equal_to(100);
}

#[test]
fn test_level_up_interrupts_on_wave_three() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState {
        wave: 2,
        spawned: 11,
        killed: 11,
        quota: 11,
        multiplier: 1.5,
    });
    common::set_stage(&mut game, GameStage::RiskChoice);

    common::send_command(&mut game, GameCommand::ChooseRisk(RiskDecision::Continue));
    game.tick(common::DT);

    // Entering wave 3 crosses the level threshold on the first active tick
    assert_that(&game.world.resource::<PlayerLevel>().0).is_equal_to(2);
    match stage(&game) {
        GameStage::LevelUp { cards } => {
            assert_that(&(cards[0] != cards[1] && cards[1] != cards[2] && cards[0] != cards[2])).is_true();
        }
        other => panic!("expected level-up stage, got {other:?}"),
    }
    match game.snapshot().overlay {
        Overlay::LevelUp { cards } => assert_that(&cards.len()).is_equal_to(3),
        other => panic!("expected level-up overlay, got {other:?}"),
    }
}

#[test]
fn test_choose_card_applies_and_resumes() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState::for_wave(3));
    game.world.insert_resource(PlayerLevel(2));
    common::set_stage(
        &mut game,
        GameStage::LevelUp {
            cards: [Card::Heal, Card::RapidFire, Card::MultiShot],
        },
    );
    common::set_player_health(&mut game.world, 50);

    common::send_command(&mut game, GameCommand::ChooseCard(0));
    game.tick(common::DT);

    assert_that(&common::player_health(&mut game.world)).is_equal_to(75);
    assert_that(&stage(&game)).is_equal_to(GameStage::Playing);
}

#[test]
fn test_same_card_composes_across_level_ups() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState::for_wave(3));
    game.world.insert_resource(PlayerLevel(2));

    for expected in [3u32, 5, 5] {
        common::set_stage(
            &mut game,
            GameStage::LevelUp {
                cards: [Card::MultiShot, Card::Heal, Card::RapidFire],
            },
        );
        common::send_command(&mut game, GameCommand::ChooseCard(0));
        game.tick(common::DT);
        assert_that(&game.world.resource::<Abilities>().multi_shot).is_equal_to(expected);
    }
}

#[test]
fn test_card_choice_out_of_range_is_ignored() {
    let mut game = common::create_game();
    let offer = [Card::Heal, Card::RapidFire, Card::MultiShot];
    common::set_stage(&mut game, GameStage::LevelUp { cards: offer });
    let before = *game.world.resource::<Abilities>();

    common::send_command(&mut game, GameCommand::ChooseCard(7));
    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::LevelUp { cards: offer });
    assert_that(game.world.resource::<Abilities>()).is_equal_to(&before);
}

#[test]
fn test_choices_while_playing_are_ignored() {
    let mut game = common::create_game();
    common::silence_firing(&mut game);
    set_score(&mut game, 42);
    let before = *game.world.resource::<Abilities>();

    common::send_command(&mut game, GameCommand::ChooseCard(0));
    common::send_command(&mut game, GameCommand::ChooseRisk(RiskDecision::Continue));
    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::Playing);
    assert_that(&score(&game)).is_equal_to(42);
    assert_that(&game.world.resource::<WaveState>().wave).is_equal_to(1);
    assert_that(game.world.resource::<Abilities>()).is_equal_to(&before);
}

#[test]
fn test_scenario_retreat_locks_score() {
    let mut game = common::create_game();
    common::set_stage(&mut game, GameStage::RiskChoice);
    set_score(&mut game, 777);

    common::send_command(&mut game, GameCommand::ChooseRisk(RiskDecision::Retreat));
    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::GameOver);
    assert_that(&score(&game)).is_equal_to(777);

    // No simulation tick may mutate the locked score afterwards
    for _ in 0..30 {
        game.tick(common::DT);
    }
    assert_that(&score(&game)).is_equal_to(777);
}

#[test]
fn test_restart_reinitializes_everything() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState::for_wave(5));
    game.world.insert_resource(PlayerLevel(2));
    game.world.insert_resource(KillCount(37));
    set_score(&mut game, 999);
    let mut abilities = Abilities::default();
    abilities.multi_shot = 5;
    abilities.piercing = true;
    game.world.insert_resource(abilities);
    common::spawn_enemy_at(&mut game.world, Vec2::new(50.0, 50.0), 10, 1.0);
    common::set_player_health(&mut game.world, 20);
    common::set_stage(&mut game, GameStage::GameOver);

    common::send_command(&mut game, GameCommand::Restart);
    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::Playing);
    assert_that(&score(&game)).is_equal_to(0);
    assert_that(&game.world.resource::<KillCount>().0).is_equal_to(0);
    assert_that(&game.world.resource::<PlayerLevel>().0).is_equal_to(1);
    assert_that(game.world.resource::<Abilities>()).is_equal_to(&Abilities::default());

    let wave = *game.world.resource::<WaveState>();
    assert_that(&wave.wave).is_equal_to(1);
    assert_that(&wave.quota).is_equal_to(5);

    assert_that(&common::player_health(&mut game.world)).is_equal_to(100);
    // Only the director's first top-up enemy may exist on the fresh run
    assert_that(&common::live_enemies(&mut game.world)).is_less_than_or_equal_to(1);
}

#[test]
fn test_restart_midrun_is_ignored() {
    let mut game = common::create_game();
    common::silence_firing(&mut game);
    set_score(&mut game, 50);
    game.world.insert_resource(WaveState::for_wave(2));

    common::send_command(&mut game, GameCommand::Restart);
    game.tick(common::DT);

    assert_that(&stage(&game)).is_equal_to(GameStage::Playing);
    assert_that(&score(&game)).is_equal_to(50);
    assert_that(&game.world.resource::<WaveState>().wave).is_equal_to(2);
}

#[test]
fn test_exit_command_requests_shutdown() {
    let mut game = common::create_game();

    assert_that(&game.tick(common::DT)).is_false();

    common::send_command(&mut game, GameCommand::Exit);
    assert_that(&game.tick(common::DT)).is_true();
}

#[test]
fn test_health_and_score_invariants_hold_over_a_long_run() {
    let mut game = common::create_game();

    for i in 0..2000u32 {
        // Sweep the movement intent so the player wanders the playfield
        let angle = i as f32 * 0.013;
        common::send_command(&mut game, GameCommand::Move(Vec2::from_angle(angle)));
        game.tick(common::DT);

        let snapshot = game.snapshot();
        assert_that(&snapshot.hud.health).is_greater_than_or_equal_to(0);
        assert_that(&snapshot.hud.health).is_less_than_or_equal_to(100);
        assert_that(&snapshot.hud.killed).is_less_than_or_equal_to(snapshot.hud.spawned);
        assert_that(&snapshot.hud.spawned).is_less_than_or_equal_to(snapshot.hud.quota);
    }
}
