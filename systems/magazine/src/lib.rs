#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turret magazine scaling and the owner-only reload interaction.

use std::collections::HashMap;

use better_turrets_core::{
    ActivationCommand, Command, EntityDescriptor, EntityId, EntityKind, Event, ItemFamily,
};
use tracing::debug;

/// Multipliers at or below this value leave capacity untouched.
pub const MULTIPLIER_DISABLED_AT: f32 = 1.001;

const RELOAD_TEXT: &str = "Reload";
const RELOAD_ICON: &str = "ui_game_symbol_ammo";
const RELOAD_EVENT: &str = "reloadTurret";
const RELOAD_HOLD_SECONDS: f32 = 1.0;

/// Scales a magazine capacity, rounding up and never dropping below one round.
///
/// Non-positive capacities and disabled multipliers pass through unchanged.
#[must_use]
pub fn scaled_capacity(base: i32, multiplier: f32) -> i32 {
    if base <= 0 || multiplier <= MULTIPLIER_DISABLED_AT {
        return base;
    }

    ((base as f32 * multiplier).ceil() as i32).max(1)
}

/// Offers and resolves the reload command and reports scaled capacities.
#[derive(Debug)]
pub struct Magazine {
    multiplier: f32,
    reload_index: HashMap<EntityId, usize>,
}

impl Magazine {
    /// Creates the system with the configured magazine multiplier.
    #[must_use]
    pub fn new(multiplier: f32) -> Self {
        Self {
            multiplier,
            reload_index: HashMap::new(),
        }
    }

    /// Capacity of an item after scaling. Only turret items are scaled.
    #[must_use]
    pub fn capacity(&self, family: ItemFamily, base: i32) -> i32 {
        match family {
            ItemFamily::Turret => scaled_capacity(base, self.multiplier),
            ItemFamily::Other => base,
        }
    }

    /// Appends the reload command when `focusing` owns `turret`.
    ///
    /// `commands` holds the host's own activation commands; the reload entry goes last
    /// and its index is remembered for [`Magazine::activate`].
    pub fn offer(
        &mut self,
        turret: &EntityDescriptor,
        focusing: EntityId,
        commands: &mut Vec<ActivationCommand>,
    ) {
        if !turret.is_turret() || turret.owner != Some(focusing) {
            return;
        }

        commands.push(ActivationCommand {
            text: RELOAD_TEXT.to_owned(),
            icon: RELOAD_ICON.to_owned(),
            enabled: true,
            event_name: RELOAD_EVENT.to_owned(),
            hold_seconds: RELOAD_HOLD_SECONDS,
        });
        let _ = self.reload_index.insert(turret.id, commands.len() - 1);
    }

    /// Handles activation of command `index` on `turret`.
    ///
    /// Returns `true` when the activation was the reload command and must not reach
    /// the host. A living turret with a positive scaled capacity is refilled to it.
    pub fn activate(
        &mut self,
        turret: &EntityDescriptor,
        index: usize,
        base_capacity: Option<i32>,
        out: &mut Vec<Command>,
    ) -> bool {
        if self.reload_index.get(&turret.id) != Some(&index) {
            return false;
        }

        if !turret.alive {
            return true;
        }

        let capacity = base_capacity.map_or(0, |base| self.capacity(ItemFamily::Turret, base));
        if capacity <= 0 {
            return true;
        }

        debug!(turret = turret.id.get(), capacity, "reloading turret");
        out.push(Command::RefillTurret {
            turret: turret.id,
            ammo: capacity,
        });
        true
    }

    /// Forgets reload state of turrets reported as removed from the simulation.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Event::EntityRemoved {
                id,
                kind: EntityKind::Turret,
            } = event
            {
                let _ = self.reload_index.remove(id);
            }
        }
    }
}
