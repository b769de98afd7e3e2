//! Simulation session wiring the world to the overlay systems.

use better_turrets_core::{Command, DamageEvent, EntityId, Event, Tuning};
use better_turrets_system_damage_scaling::{DamageScalingPolicy, DamageTuning};
use better_turrets_system_identity::IdentityRegistry;
use better_turrets_system_magazine::Magazine;
use better_turrets_system_status::{StatusPanel, StatusRow};
use better_turrets_world::{self as world, query, World};

/// Owns the world and every piece of overlay state for one session.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    identities: IdentityRegistry,
    magazine: Magazine,
    damage: DamageScalingPolicy,
    status: StatusPanel,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            world: World::new(),
            identities: IdentityRegistry::new(seed),
            magazine: Magazine::new(tuning.magazine_multiplier),
            damage: DamageScalingPolicy::new(DamageTuning::from(tuning)),
            status: StatusPanel::new(),
            events: Vec::new(),
        }
    }

    /// Applies a command and forwards the resulting events to the overlay systems.
    pub(crate) fn apply(&mut self, command: Command) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
        self.identities.handle(&self.events);
        self.magazine.handle(&self.events);
    }

    /// Status rows of `controller`'s turrets.
    pub(crate) fn status(&mut self, controller: EntityId) -> Vec<StatusRow> {
        let mut rows = Vec::new();
        let Some(viewer) = query::descriptor(&self.world, controller) else {
            return rows;
        };

        let entities = query::entities(&self.world);
        let world = &self.world;
        self.status.handle(
            &viewer,
            &entities,
            &mut self.identities,
            |turret| query::cosmetic(world, turret),
            |turret| query::ammo(world, turret),
            &mut rows,
        );
        rows
    }

    /// Adjusted amount of a damage event.
    pub(crate) fn hit(&self, event: &DamageEvent) -> i32 {
        let entities = query::entities(&self.world);
        self.damage.scale(
            event,
            &entities,
            |entity| query::descriptor(&self.world, entity),
            |entity| query::perk_level(&self.world, entity),
        )
    }

    /// Offers the reload command to `controller` and activates it.
    ///
    /// Returns the turret's ammo after the refill, or `None` when no refill happened.
    pub(crate) fn reload(&mut self, controller: EntityId, turret: EntityId) -> Option<i32> {
        let descriptor = query::descriptor(&self.world, turret)?;

        let mut activation = Vec::new();
        self.magazine.offer(&descriptor, controller, &mut activation);
        let index = activation.len().checked_sub(1)?;

        let mut commands = Vec::new();
        let base_capacity = query::base_capacity(&self.world, turret);
        if !self
            .magazine
            .activate(&descriptor, index, base_capacity, &mut commands)
        {
            return None;
        }

        let refilled = !commands.is_empty();
        for command in commands {
            self.apply(command);
        }

        if refilled {
            query::ammo(&self.world, turret)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use better_turrets_core::{ItemMod, Origin, Rgb, TurretItem};

    fn id(value: u32) -> EntityId {
        EntityId::new(value)
    }

    fn session() -> Session {
        let mut session = Session::new(Tuning::default(), 1);
        session.apply(Command::SpawnController {
            id: id(1),
            perk_level: 5,
            remote: false,
        });
        session.apply(Command::SpawnCreature { id: id(50) });
        session.apply(Command::SpawnTurret {
            id: id(100),
            owner: id(1),
            ammo: 3,
            base_capacity: 60,
            item: TurretItem {
                cosmetic_mods: vec![ItemMod {
                    name: "dyeOrange".to_owned(),
                    tint: Some(Rgb::new(0.95, 0.5, 0.1)),
                }],
                ..TurretItem::default()
            },
            remote: false,
        });
        session
    }

    #[test]
    fn removal_releases_identity_and_reload_state() {
        let mut session = session();
        assert_eq!(session.status(id(1))[0].to_string(), "Michelangelo: 3");

        session.apply(Command::RemoveEntity { id: id(100) });

        assert!(session.identities.identity(id(100)).is_none());
        assert!(session.status(id(1)).is_empty());
        assert_eq!(session.reload(id(1), id(100)), None);
    }

    #[test]
    fn reload_refills_to_doubled_capacity_for_owner_only() {
        let mut session = session();

        assert_eq!(session.reload(id(2), id(100)), None);
        assert_eq!(session.reload(id(1), id(100)), Some(120));
        assert_eq!(session.status(id(1))[0].ammo, 120);
    }

    #[test]
    fn hits_are_scaled_by_deployed_turrets() {
        let session = session();
        let event = DamageEvent {
            attacker: id(100),
            victim: id(50),
            raw_amount: 100,
            origin: Origin::TrackedEntity,
        };

        assert_eq!(session.hit(&event), 125);
    }
}
