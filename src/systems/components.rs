//! Components, bundles, and resources owned by the simulation world.

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use bitflags::bitflags;
use glam::Vec2;
use rand::rngs::SmallRng;
use strum_macros::EnumIter;

use crate::constants::{mechanics, waves};

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// Position in logical playfield units.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Linear speed, in playfield units per tick at the reference 60 Hz rate.
#[derive(Component, Debug, Clone, Copy)]
pub struct Velocity {
    pub speed: f32,
}

/// Hit points for the player and enemies.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Fraction of health remaining, clamped to `0.0..=1.0`.
    pub fn ratio(&self) -> f32 {
        (self.current.max(0) as f32 / self.max as f32).min(1.0)
    }

    /// Restores health, never exceeding the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Applies damage, never dropping below zero.
    pub fn damage(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    pub fn depleted(&self) -> bool {
        self.current <= 0
    }
}

/// Circular collision boundary.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    /// Distance-based overlap test with the shared leniency margin.
    pub fn collides_with(&self, other_radius: f32, distance: f32) -> bool {
        distance < self.radius + other_radius + crate::constants::combat::COLLISION_MARGIN
    }
}

bitflags! {
    /// Behavior modifiers carried by a bullet at the moment it was fired.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BulletFlags: u8 {
        /// The bullet survives hits and keeps travelling.
        const PIERCING = 1 << 0;
        /// Hits splash half damage onto nearby enemies.
        const EXPLOSIVE = 1 << 1;
    }
}

/// A projectile travelling along a fixed heading.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    /// Heading angle in radians; 0 points right, -PI/2 points up.
    pub heading: f32,
    pub speed: f32,
    pub damage: i32,
    pub flags: BulletFlags,
}

/// The cosmetic enemy kind. All kinds share collision and damage mechanics,
/// differing only in base health and speed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum EnemyKind {
    Microbe,
    Helix,
    Scope,
}

impl EnemyKind {
    pub const fn base_health(&self) -> i32 {
        match self {
            EnemyKind::Microbe => 12,
            EnemyKind::Helix => 18,
            EnemyKind::Scope => 10,
        }
    }

    pub const fn base_speed(&self) -> f32 {
        match self {
            EnemyKind::Microbe => 1.2,
            EnemyKind::Helix => 1.0,
            EnemyKind::Scope => 1.5,
        }
    }
}

/// Marker components for collision filtering.
#[derive(Component)]
pub struct PlayerCollider;

#[derive(Component)]
pub struct EnemyCollider;

#[derive(Component)]
pub struct BulletCollider;

/// Palette entry for a floating-text effect, resolved to RGB by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectColor {
    /// Direct bullet damage.
    Damage,
    /// Splash damage from an explosive hit.
    Splash,
    /// Explosion marker.
    Blast,
    /// Score gained from a kill.
    Score,
    /// Damage taken by the player.
    PlayerHurt,
    /// Wave banners, card picks, and other golden announcements.
    Banner,
    /// Retreat confirmation.
    Safe,
    /// Wave-start call-outs.
    Alert,
}

impl EffectColor {
    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            EffectColor::Damage => (0xFF, 0x6B, 0x6B),
            EffectColor::Splash => (0xFF, 0x99, 0x99),
            EffectColor::Blast => (0xFF, 0xFF, 0x00),
            EffectColor::Score => (0x51, 0xCF, 0x66),
            EffectColor::PlayerHurt => (0xFF, 0x00, 0x00),
            EffectColor::Banner => (0xFF, 0xD7, 0x00),
            EffectColor::Safe => (0x00, 0xFF, 0x00),
            EffectColor::Alert => (0xFF, 0x66, 0x00),
        }
    }
}

/// A transient floating-text marker. Purely cosmetic.
#[derive(Component, Debug, Clone)]
pub struct Effect {
    pub text: String,
    pub color: EffectColor,
    /// Vertical drift per tick; negative floats upward.
    pub drift: f32,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub health: Health,
    pub collider: Collider,
    pub player_collider: PlayerCollider,
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub kind: EnemyKind,
    pub position: Position,
    pub velocity: Velocity,
    pub health: Health,
    pub collider: Collider,
    pub enemy_collider: EnemyCollider,
}

#[derive(Bundle)]
pub struct BulletBundle {
    pub bullet: Bullet,
    pub position: Position,
    pub collider: Collider,
    pub bullet_collider: BulletCollider,
}

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Default)]
pub struct ScoreResource(pub u32);

/// Total enemies killed over the whole run.
#[derive(Resource, Debug, Default)]
pub struct KillCount(pub u32);

/// The upgrade level already granted to the player. Compared against the
/// level derived from the wave number to trigger level-ups.
#[derive(Resource, Debug)]
pub struct PlayerLevel(pub u32);

impl Default for PlayerLevel {
    fn default() -> Self {
        Self(1)
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime {
    pub seconds: f32,
    pub ticks: u32,
}

/// Progression bookkeeping for the active wave.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WaveState {
    pub wave: u32,
    /// Enemies spawned so far this wave. Never exceeds `quota`.
    pub spawned: u32,
    /// Enemies killed by bullets this wave.
    pub killed: u32,
    pub quota: u32,
    pub multiplier: f32,
}

impl WaveState {
    /// Fresh bookkeeping for the given wave.
    pub fn for_wave(wave: u32) -> Self {
        Self {
            wave,
            spawned: 0,
            killed: 0,
            quota: waves::quota(wave),
            multiplier: waves::multiplier(wave),
        }
    }

    /// Whether every enemy for this wave has been spawned.
    pub fn quota_spawned(&self) -> bool {
        self.spawned >= self.quota
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::for_wave(1)
    }
}

/// The player's current upgrade levels. Mutated only by applying a chosen card.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Abilities {
    pub fire_rate: f32,
    pub piercing: bool,
    pub multi_shot: u32,
    pub explosive: bool,
    pub bullet_speed: f32,
    pub damage: i32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            fire_rate: 1.2,
            piercing: false,
            multi_shot: 1,
            explosive: false,
            bullet_speed: 1.0,
            damage: 8,
        }
    }
}

impl Abilities {
    /// The bullet flag set implied by the current upgrades.
    pub fn bullet_flags(&self) -> BulletFlags {
        let mut flags = BulletFlags::empty();
        flags.set(BulletFlags::PIERCING, self.piercing);
        flags.set(BulletFlags::EXPLOSIVE, self.explosive);
        flags
    }
}

/// Accumulating timer driving the auto-fire action.
#[derive(Resource, Debug, Default)]
pub struct FireTimer(pub f32);

/// Accumulating timer driving timed spawn bursts.
#[derive(Resource, Debug, Default)]
pub struct SpawnTimer(pub f32);

/// The latest movement vector from the input layer, read once per tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MoveIntent(pub Vec2);

/// Simulation-owned RNG. Seedable in tests for deterministic runs.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

/// Platform tuning profile: a touch profile (the default, matching the
/// 320x568 logical space) and a desktop profile with larger entities and
/// faster pacing.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub player_radius: f32,
    pub player_speed: f32,
    pub enemy_radius: f32,
    /// Flat multiplier applied on top of per-wave enemy speed scaling.
    pub enemy_speed_scale: f32,
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    /// Base seconds between shots, before the fire-rate ability divides it.
    pub fire_interval: f32,
    /// Vertical drift of floating-text effects, per tick.
    pub effect_drift: f32,
}

impl Tuning {
    pub const TOUCH: Tuning = Tuning {
        player_radius: 20.0,
        player_speed: 4.0,
        enemy_radius: 15.0,
        enemy_speed_scale: 1.0,
        bullet_radius: 8.0,
        bullet_speed: 8.0,
        fire_interval: 0.4,
        effect_drift: -1.0,
    };

    pub const DESKTOP: Tuning = Tuning {
        player_radius: 30.0,
        player_speed: 6.0,
        enemy_radius: 20.0,
        enemy_speed_scale: 1.3,
        bullet_radius: 8.0,
        bullet_speed: 12.0,
        fire_interval: 0.3,
        effect_drift: -2.0,
    };

    /// Player spawn bundle for this profile, centered on the playfield.
    pub fn player_bundle(&self) -> PlayerBundle {
        PlayerBundle {
            player: PlayerControlled,
            position: Position(crate::constants::playfield::CENTER),
            velocity: Velocity {
                speed: self.player_speed,
            },
            health: Health::new(mechanics::MAX_HEALTH),
            collider: Collider {
                radius: self.player_radius,
            },
            player_collider: PlayerCollider,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::TOUCH
    }
}
