#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative entity state standing in for the host simulation.
//!
//! The overlay never owns entities. This crate models the slice of host state the
//! overlay reads (ownership, liveness, perk progression, turret cosmetics and ammo)
//! and exposes it through [`apply`] for mutations and [`query`] for read-only
//! capability lookups.

mod turrets;

use std::collections::BTreeMap;

use better_turrets_core::{Command, EntityId, EntityKind, Event};

use crate::turrets::TurretState;

/// Host-side state of a single entity.
#[derive(Clone, Debug)]
struct EntityState {
    kind: EntityKind,
    alive: bool,
    remote: bool,
    owner: Option<EntityId>,
    perk_level: u32,
    turret: Option<TurretState>,
}

impl EntityState {
    fn new(kind: EntityKind, remote: bool) -> Self {
        Self {
            kind,
            alive: true,
            remote,
            owner: None,
            perk_level: 0,
            turret: None,
        }
    }
}

/// Represents the authoritative entity table of a simulation session.
#[derive(Debug, Default)]
pub struct World {
    entities: BTreeMap<EntityId, EntityState>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(&mut self, id: EntityId, state: EntityState, out_events: &mut Vec<Event>) {
        if self.entities.contains_key(&id) {
            out_events.push(Event::SpawnRejected { id });
            return;
        }

        let kind = state.kind;
        let _ = self.entities.insert(id, state);
        out_events.push(Event::EntitySpawned { id, kind });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SpawnController {
            id,
            perk_level,
            remote,
        } => {
            let mut state = EntityState::new(EntityKind::Controller, remote);
            state.perk_level = perk_level;
            world.spawn(id, state, out_events);
        }
        Command::SpawnTurret {
            id,
            owner,
            ammo,
            base_capacity,
            item,
            remote,
        } => {
            let mut state = EntityState::new(EntityKind::Turret, remote);
            state.owner = Some(owner);
            state.turret = Some(TurretState::new(ammo, base_capacity, item));
            world.spawn(id, state, out_events);
        }
        Command::SpawnCreature { id } => {
            world.spawn(id, EntityState::new(EntityKind::Creature, false), out_events);
        }
        Command::SetPerkLevel { controller, level } => {
            if let Some(state) = world.entities.get_mut(&controller) {
                if state.kind == EntityKind::Controller {
                    state.perk_level = level;
                }
            }
        }
        Command::KillEntity { id } => {
            if let Some(state) = world.entities.get_mut(&id) {
                if state.alive {
                    state.alive = false;
                    out_events.push(Event::EntityDied { id });
                }
            }
        }
        Command::RemoveEntity { id } => {
            if let Some(state) = world.entities.remove(&id) {
                out_events.push(Event::EntityRemoved {
                    id,
                    kind: state.kind,
                });
            }
        }
        Command::RefillTurret { turret, ammo } => {
            let Some(state) = world.entities.get_mut(&turret) else {
                return;
            };
            if !state.alive {
                return;
            }
            if let Some(payload) = state.turret.as_mut() {
                payload.ammo = ammo;
                out_events.push(Event::TurretRefilled { turret, ammo });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use better_turrets_core::{CosmeticSample, EntityDescriptor, EntityId};

    use super::{turrets, EntityState, World};

    /// Captures descriptors for every entity currently in the world, ordered by id.
    #[must_use]
    pub fn entities(world: &World) -> Vec<EntityDescriptor> {
        world
            .entities
            .iter()
            .map(|(id, state)| describe(*id, state))
            .collect()
    }

    /// Resolves a single entity, if it is present.
    #[must_use]
    pub fn descriptor(world: &World, id: EntityId) -> Option<EntityDescriptor> {
        world.entities.get(&id).map(|state| describe(id, state))
    }

    /// Reports the turret perk level of a controller. Unknown entities report zero.
    #[must_use]
    pub fn perk_level(world: &World, id: EntityId) -> u32 {
        world
            .entities
            .get(&id)
            .map_or(0, |state| state.perk_level)
    }

    /// Resolves the cosmetic capability data of a turret.
    ///
    /// Returns `None` for unknown entities or entities that are not turrets.
    #[must_use]
    pub fn cosmetic(world: &World, turret: EntityId) -> Option<CosmeticSample> {
        world
            .entities
            .get(&turret)
            .and_then(|state| state.turret.as_ref())
            .map(|payload| turrets::resolve_cosmetic(&payload.item))
    }

    /// Rounds currently loaded in a turret.
    #[must_use]
    pub fn ammo(world: &World, turret: EntityId) -> Option<i32> {
        world
            .entities
            .get(&turret)
            .and_then(|state| state.turret.as_ref())
            .map(|payload| payload.ammo)
    }

    /// Unscaled magazine capacity of the item a turret was deployed from.
    #[must_use]
    pub fn base_capacity(world: &World, turret: EntityId) -> Option<i32> {
        world
            .entities
            .get(&turret)
            .and_then(|state| state.turret.as_ref())
            .map(|payload| payload.base_capacity)
    }

    fn describe(id: EntityId, state: &EntityState) -> EntityDescriptor {
        EntityDescriptor {
            id,
            kind: state.kind,
            alive: state.alive,
            locally_simulated: !state.remote,
            owner: state.owner,
        }
    }
}
