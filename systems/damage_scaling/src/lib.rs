#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Damage policy that trades a controller's direct damage for turret damage.
//!
//! Once a controller reaches the gating perk level, every turret they have deployed
//! raises the damage dealt by their turrets and turret items, and lowers the damage
//! they deal directly. Damage dealt by anyone else is never touched.

use better_turrets_core::{
    DamageEvent, EntityDescriptor, EntityId, Origin, Tuning, PERK_GATE_LEVEL,
};
use better_turrets_system_census::TurretCensus;
use tracing::debug;

/// Multipliers and gating threshold applied by [`DamageScalingPolicy`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageTuning {
    /// Base multiplier for turret-origin damage.
    pub base_multiplier: f32,
    /// Turret-origin damage fraction added per deployed turret.
    pub per_deployed_bonus: f32,
    /// Direct damage fraction removed per deployed turret.
    pub penalty_per_deployed: f32,
    /// Perk level below which the policy is inert.
    pub gate_level: u32,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self::from(Tuning::default())
    }
}

impl From<Tuning> for DamageTuning {
    fn from(tuning: Tuning) -> Self {
        Self {
            base_multiplier: tuning.base_turret_damage_multiplier,
            per_deployed_bonus: tuning.per_turret_damage_bonus,
            penalty_per_deployed: tuning.player_damage_penalty_per_turret,
            gate_level: PERK_GATE_LEVEL,
        }
    }
}

/// Rescales raw combat damage according to the attacker's deployed turrets.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageScalingPolicy {
    tuning: DamageTuning,
    census: TurretCensus,
}

impl DamageScalingPolicy {
    /// Creates a policy with the provided tuning.
    #[must_use]
    pub fn new(tuning: DamageTuning) -> Self {
        Self {
            tuning,
            census: TurretCensus::new(),
        }
    }

    /// Returns the adjusted damage for `event`.
    ///
    /// The product is computed in `f32` and floored, so raw amounts above 2^24 lose
    /// integer precision before scaling.
    ///
    /// `resolve` looks up live entities and `perk_level` reports a controller's
    /// qualifying perk level. Any missing context leaves the damage unchanged.
    #[must_use]
    pub fn scale<R, P>(
        &self,
        event: &DamageEvent,
        entities: &[EntityDescriptor],
        resolve: R,
        perk_level: P,
    ) -> i32
    where
        R: Fn(EntityId) -> Option<EntityDescriptor>,
        P: Fn(EntityId) -> u32,
    {
        let Some(multiplier) = self.multiplier(event, entities, resolve, perk_level) else {
            return event.raw_amount;
        };

        let scaled = (event.raw_amount as f32 * multiplier).floor() as i32;
        let adjusted = scaled.max(0);
        debug!(
            attacker = event.attacker.get(),
            victim = event.victim.get(),
            raw = event.raw_amount,
            adjusted,
            multiplier,
            "rescaled damage"
        );
        adjusted
    }

    /// Computes the multiplier `event` is subject to, or `None` when the policy is inert.
    #[must_use]
    pub fn multiplier<R, P>(
        &self,
        event: &DamageEvent,
        entities: &[EntityDescriptor],
        resolve: R,
        perk_level: P,
    ) -> Option<f32>
    where
        R: Fn(EntityId) -> Option<EntityDescriptor>,
        P: Fn(EntityId) -> u32,
    {
        if event.raw_amount <= 0 {
            return None;
        }

        let attacker = resolve(event.attacker)?;
        if resolve(event.victim).is_none() {
            return None;
        }

        let perk_owner = match event.origin {
            Origin::TrackedEntity => resolve(attacker.owner?)?.id,
            _ => attacker.id,
        };

        if perk_level(perk_owner) < self.tuning.gate_level {
            return None;
        }

        let deployed = self.census.count_active(perk_owner, entities);
        if deployed == 0 {
            return None;
        }
        let deployed = deployed as f32;

        if event.origin.is_tracked() {
            Some(self.tuning.base_multiplier * (1.0 + self.tuning.per_deployed_bonus * deployed))
        } else if attacker.id == perk_owner {
            Some((1.0 - self.tuning.penalty_per_deployed * deployed).max(0.0))
        } else {
            None
        }
    }
}
