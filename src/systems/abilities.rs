//! The upgrade card catalog: randomized offers and stat mutation.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::info;

use crate::constants::cards;
use crate::systems::components::{Abilities, Health};

/// A permanent run-scoped upgrade. The catalog is fixed; a subset of three
/// is offered at each level-up, and the same card may be offered and applied
/// again in a later level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Card {
    RapidFire,
    Piercing,
    MultiShot,
    Explosive,
    Heal,
    DamageUp,
}

/// What applying a card does, as data. Interpreted by [`apply`] in a single
/// match rather than stored as behavior on the card itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEffect {
    MultiplyFireRate(f32),
    SetPiercing,
    AddMultiShot(u32),
    SetExplosive,
    Heal(i32),
    MultiplyDamage(f32),
}

impl Card {
    pub fn name(&self) -> &'static str {
        match self {
            Card::RapidFire => "Rapid Fire",
            Card::Piercing => "Piercing Shot",
            Card::MultiShot => "Multi Shot",
            Card::Explosive => "Explosive Shot",
            Card::Heal => "Field Dressing",
            Card::DamageUp => "Damage Up",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Card::RapidFire => "Shots come 50% faster",
            Card::Piercing => "Bullets pass through enemies",
            Card::MultiShot => "Fire two extra bullets in a fan",
            Card::Explosive => "Hits splash damage nearby enemies",
            Card::Heal => "Restore 25 health",
            Card::DamageUp => "Bullet damage increased by 50%",
        }
    }

    pub fn effect(&self) -> CardEffect {
        match self {
            Card::RapidFire => CardEffect::MultiplyFireRate(cards::FIRE_RATE_FACTOR),
            Card::Piercing => CardEffect::SetPiercing,
            Card::MultiShot => CardEffect::AddMultiShot(cards::MULTI_SHOT_STEP),
            Card::Explosive => CardEffect::SetExplosive,
            Card::Heal => CardEffect::Heal(cards::HEAL_AMOUNT),
            Card::DamageUp => CardEffect::MultiplyDamage(cards::DAMAGE_FACTOR),
        }
    }
}

/// Samples three distinct cards from the catalog in random order.
pub fn draw_offer(rng: &mut SmallRng) -> [Card; cards::OFFER_SIZE] {
    let mut catalog: Vec<Card> = Card::iter().collect();
    catalog.shuffle(rng);

    let mut offer = [catalog[0]; cards::OFFER_SIZE];
    offer.copy_from_slice(&catalog[..cards::OFFER_SIZE]);
    offer
}

/// Applies a chosen card exactly once.
///
/// Repeated applications across level-ups compose: fire-rate and damage
/// stack multiplicatively, multi-shot adds up to its cap, flags and full
/// health saturate.
pub fn apply(card: Card, abilities: &mut Abilities, player_health: &mut Health) {
    match card.effect() {
        CardEffect::MultiplyFireRate(factor) => abilities.fire_rate *= factor,
        CardEffect::SetPiercing => abilities.piercing = true,
        CardEffect::AddMultiShot(step) => {
            abilities.multi_shot = (abilities.multi_shot + step).min(cards::MULTI_SHOT_CAP);
        }
        CardEffect::SetExplosive => abilities.explosive = true,
        CardEffect::Heal(amount) => player_health.heal(amount),
        CardEffect::MultiplyDamage(factor) => {
            abilities.damage = (abilities.damage as f32 * factor).floor() as i32;
        }
    }
    info!(card = card.name(), abilities = ?abilities, "Applied upgrade card");
}
