use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use speculoos::prelude::*;

use outbreak::constants::playfield;
use outbreak::events::SpawnEffect;
use outbreak::snapshot::Overlay;
use outbreak::systems::{BulletFlags, Card, EffectColor, GameStage, Health, Tuning, WaveState};

mod common;

#[test]
fn test_initial_snapshot() {
    let mut game = common::create_game();
    let snapshot = game.snapshot();

    assert_that(&snapshot.player.position).is_equal_to(playfield::CENTER);
    assert_that(&snapshot.player.radius).is_close_to(Tuning::TOUCH.player_radius, 0.001);

    assert_that(&snapshot.hud.health).is_equal_to(100);
    assert_that(&snapshot.hud.max_health).is_equal_to(100);
    assert_that(&snapshot.hud.score).is_equal_to(0);
    assert_that(&snapshot.hud.wave).is_equal_to(1);
    assert_that(&snapshot.hud.quota).is_equal_to(5);
    assert_that(&snapshot.hud.multiplier).is_close_to(1.0, 0.001);

    assert_that(&snapshot.enemies.is_empty()).is_true();
    assert_that(&snapshot.bullets.is_empty()).is_true();
    assert_that(&snapshot.effects.is_empty()).is_true();
    assert_that(&matches!(snapshot.overlay, Overlay::None)).is_true();
}

#[test]
fn test_enemy_view_reports_health_ratio() {
    let mut game = common::create_game();
    let enemy = common::spawn_enemy_at(&mut game.world, Vec2::new(100.0, 100.0), 20, 1.0);
    game.world.get_mut::<Health>(enemy).unwrap().current = 10;

    let snapshot = game.snapshot();
    assert_that(&snapshot.enemies.len()).is_equal_to(1);
    assert_that(&snapshot.enemies[0].health_ratio).is_close_to(0.5, 0.001);
    assert_that(&snapshot.enemies[0].position).is_equal_to(Vec2::new(100.0, 100.0));
}

#[test]
fn test_bullet_view_reports_heading() {
    let mut game = common::create_game();
    common::spawn_bullet_at(&mut game.world, Vec2::new(50.0, 60.0), FRAC_PI_4, 8, BulletFlags::empty());

    let snapshot = game.snapshot();
    assert_that(&snapshot.bullets.len()).is_equal_to(1);
    assert_that(&snapshot.bullets[0].heading).is_close_to(FRAC_PI_4, 0.001);
}

#[test]
fn test_effect_view_reports_color_and_life() {
    let mut game = common::create_game();
    game.world
        .trigger(SpawnEffect::new(Vec2::new(10.0, 20.0), "+100", EffectColor::Score));

    let snapshot = game.snapshot();
    assert_that(&snapshot.effects.len()).is_equal_to(1);
    let effect = &snapshot.effects[0];
    assert_that(&effect.text).is_equal_to("+100".to_string());
    assert_that(&effect.color).is_equal_to(EffectColor::Score.rgb());
    assert_that(&effect.life_ratio).is_close_to(1.0, 0.001);
}

#[test]
fn test_effects_drift_and_fade_over_ticks() {
    let mut game = common::create_game();
    common::silence_firing(&mut game);
    game.world
        .trigger(SpawnEffect::new(Vec2::new(10.0, 200.0), "-8 HP", EffectColor::Damage));

    for _ in 0..30 {
        game.tick(common::DT);
    }

    let snapshot = game.snapshot();
    assert_that(&snapshot.effects.len()).is_equal_to(1);
    let effect = &snapshot.effects[0];
    assert_that(&effect.life_ratio).is_close_to(0.5, 0.001);
    // Touch profile drifts one unit per tick upward
    assert_that(&effect.position.y).is_close_to(170.0, 0.001);

    for _ in 0..30 {
        game.tick(common::DT);
    }
    assert_that(&game.snapshot().effects.is_empty()).is_true();
}

#[test]
fn test_level_up_overlay_lists_offered_cards() {
    let mut game = common::create_game();
    common::set_stage(
        &mut game,
        GameStage::LevelUp {
            cards: [Card::Heal, Card::RapidFire, Card::MultiShot],
        },
    );

    match game.snapshot().overlay {
        Overlay::LevelUp { cards } => {
            assert_that(&cards.len()).is_equal_to(3);
            assert_that(&cards[0].name).is_equal_to(Card::Heal.name());
            assert_that(&cards[1].description).is_equal_to(Card::RapidFire.description());
        }
        other => panic!("expected level-up overlay, got {other:?}"),
    }
}

#[test]
fn test_risk_overlay_previews_next_multiplier() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState::for_wave(2));
    common::set_stage(&mut game, GameStage::RiskChoice);

    match game.snapshot().overlay {
        Overlay::RiskChoice { next_multiplier, .. } => {
            assert_that(&next_multiplier).is_equal_to(Some(2.0));
        }
        other => panic!("expected risk overlay, got {other:?}"),
    }
}

#[test]
fn test_risk_overlay_after_final_wave_has_no_preview() {
    let mut game = common::create_game();
    game.world.insert_resource(WaveState::for_wave(10));
    common::set_stage(&mut game, GameStage::RiskChoice);

    match game.snapshot().overlay {
        Overlay::RiskChoice { next_multiplier, wave, .. } => {
            assert_that(&wave).is_equal_to(10);
            assert_that(&next_multiplier).is_equal_to(None);
        }
        other => panic!("expected risk overlay, got {other:?}"),
    }
}

#[test]
fn test_terminal_overlays_carry_run_totals() {
    let mut game = common::create_game();
    game.world.insert_resource(outbreak::systems::ScoreResource(4321));
    game.world.insert_resource(outbreak::systems::KillCount(17));

    common::set_stage(&mut game, GameStage::GameOver);
    match game.snapshot().overlay {
        Overlay::GameOver { score, kills } => {
            assert_that(&score).is_equal_to(4321);
            assert_that(&kills).is_equal_to(17);
        }
        other => panic!("expected game-over overlay, got {other:?}"),
    }

    common::set_stage(&mut game, GameStage::Victory);
    match game.snapshot().overlay {
        Overlay::Victory { score, kills } => {
            assert_that(&score).is_equal_to(4321);
            assert_that(&kills).is_equal_to(17);
        }
        other => panic!("expected victory overlay, got {other:?}"),
    }
}
