//! This module contains all the balance and timing constants used by the simulation.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The fixed logical playfield. External renderers scale this to physical pixels.
pub mod playfield {
    use glam::Vec2;

    /// Playfield width, in logical units.
    pub const WIDTH: f32 = 320.0;
    /// Playfield height, in logical units.
    pub const HEIGHT: f32 = 568.0;
    /// Playfield size as a vector.
    pub const SIZE: Vec2 = Vec2::new(WIDTH, HEIGHT);
    /// The center of the playfield, where the player starts and banners appear.
    pub const CENTER: Vec2 = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
}

/// Player mechanics constants.
pub mod mechanics {
    /// Maximum (and starting) player health.
    pub const MAX_HEALTH: i32 = 100;
    /// Health restored when continuing into the next wave.
    pub const CONTINUE_HEAL: i32 = 15;
    /// Extra clamp margin on the left and right playfield edges.
    pub const MARGIN_X: f32 = 10.0;
    /// Extra clamp margin below the top edge, leaving room for the HUD.
    pub const MARGIN_TOP: f32 = 50.0;
    /// Extra clamp margin above the bottom edge.
    pub const MARGIN_BOTTOM: f32 = 30.0;
}

/// Combat resolution constants.
pub mod combat {
    /// Leniency added to the sum of two collision radii, tuned for touch play.
    pub const COLLISION_MARGIN: f32 = 10.0;
    /// Radius of the area-of-effect damage around an explosive hit.
    pub const SPLASH_RADIUS: f32 = 50.0;
    /// Base score awarded per kill, before the wave multiplier.
    pub const KILL_SCORE: u32 = 100;
    /// How far outside the playfield a bullet may travel before it is culled.
    pub const BULLET_CULL_MARGIN: f32 = 50.0;
    /// How far outside the playfield an enemy may drift before it is culled.
    pub const ENEMY_CULL_MARGIN: f32 = 100.0;

    /// Contact damage dealt by an enemy reaching the player on the given wave.
    pub const fn contact_damage(wave: u32) -> i32 {
        8 + 2 * wave as i32
    }
}

/// Spawn director constants.
pub mod spawning {
    /// Distance outside the playfield edge at which enemies appear.
    pub const EDGE_OFFSET: f32 = 30.0;

    /// Seconds between timed spawn bursts; shrinks as waves progress.
    pub fn interval(wave: u32) -> f32 {
        (2.0 - 0.1 * wave as f32).max(0.8)
    }

    /// Enemies spawned per timed burst.
    pub const fn burst(wave: u32) -> u32 {
        let count = 1 + wave / 3;
        if count > 2 {
            2
        } else {
            count
        }
    }

    /// Minimum number of live enemies the director tops up to while under quota.
    pub const fn pressure_floor(wave: u32) -> u32 {
        let floor = 2 + wave;
        if floor > 6 {
            6
        } else {
            floor
        }
    }
}

/// Wave progression constants.
pub mod waves {
    /// Clearing this wave and continuing wins the run.
    pub const MAX_WAVE: u32 = 10;
    /// Score bonus awarded on victory.
    pub const VICTORY_BONUS: u32 = 10_000;

    /// Kill quota for the given wave.
    pub const fn quota(wave: u32) -> u32 {
        if wave <= 1 {
            return 5;
        }
        let quota = 5 + 3 * wave;
        if quota > 25 {
            25
        } else {
            quota
        }
    }

    /// Score multiplier for the given wave.
    pub fn multiplier(wave: u32) -> f32 {
        1.0 + 0.5 * (wave - 1) as f32
    }

    /// Upgrade level derived from the wave number.
    pub const fn level(wave: u32) -> u32 {
        wave / 3 + 1
    }
}

/// Upgrade card constants.
pub mod cards {
    /// Cards offered per level-up.
    pub const OFFER_SIZE: usize = 3;
    /// Hard cap on the multi-shot count.
    pub const MULTI_SHOT_CAP: u32 = 5;
    /// Bullets added per multi-shot card.
    pub const MULTI_SHOT_STEP: u32 = 2;
    /// Health restored by the heal card.
    pub const HEAL_AMOUNT: i32 = 25;
    /// Fire-rate multiplier applied by the rapid-fire card. Stacks.
    pub const FIRE_RATE_FACTOR: f32 = 1.5;
    /// Damage multiplier applied by the damage-up card, floored to an integer.
    pub const DAMAGE_FACTOR: f32 = 1.5;
    /// Angular width of the multi-shot fan, in radians.
    pub const SPREAD_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
}

/// Floating-text effect constants.
pub mod effects {
    /// Lifetime of a floating-text effect, in ticks.
    pub const TTL_TICKS: u32 = 60;
}
