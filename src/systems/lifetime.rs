//! Expiry and drift for transient floating-text effects.

use bevy_ecs::{
    component::Component,
    entity::Entity,
    observer::Trigger,
    system::{Commands, Query, Res},
};

use crate::constants::effects;
use crate::events::SpawnEffect;
use crate::systems::components::{DeltaTime, Effect, Position, Tuning};

/// Component for entities that should be automatically deleted after a
/// certain number of ticks.
#[derive(Component, Debug, Clone, Copy)]
pub struct TimeToLive {
    pub remaining_ticks: u32,
    pub budget: u32,
}

impl TimeToLive {
    pub fn new(ticks: u32) -> Self {
        Self {
            remaining_ticks: ticks,
            budget: ticks,
        }
    }

    /// Fraction of the lifetime remaining; drives renderer fade-out.
    pub fn ratio(&self) -> f32 {
        self.remaining_ticks as f32 / self.budget as f32
    }
}

/// Observer that materializes a floating-text effect entity.
pub fn spawn_effect_observer(trigger: Trigger<SpawnEffect>, tuning: Res<Tuning>, mut commands: Commands) {
    let event = trigger.event();
    commands.spawn((
        Position(event.position),
        Effect {
            text: event.text.clone(),
            color: event.color,
            drift: tuning.effect_drift,
        },
        TimeToLive::new(effects::TTL_TICKS),
    ));
}

/// Drifts effects vertically, decrements their remaining ticks, and despawns
/// them when they expire.
pub fn effect_lifetime_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    mut effects: Query<(Entity, &mut Position, &Effect, &mut TimeToLive)>,
) {
    for (entity, mut position, effect, mut ttl) in effects.iter_mut() {
        if ttl.remaining_ticks <= delta_time.ticks {
            commands.entity(entity).despawn();
            continue;
        }
        ttl.remaining_ticks = ttl.remaining_ticks.saturating_sub(delta_time.ticks);
        position.0.y += effect.drift;
    }
}
