//! Scenario files replayed by the command-line adapter.

use anyhow::{Context, Result};
use better_turrets_core::{Command, DamageEvent, EntityId, ItemMod, Origin, Rgb, TurretItem};
use serde::Deserialize;

/// Entities to spawn and steps to replay against them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Seed for fallback name draws.
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    #[serde(default)]
    pub(crate) controllers: Vec<ControllerSpec>,
    #[serde(default)]
    pub(crate) turrets: Vec<TurretSpec>,
    #[serde(default)]
    pub(crate) creatures: Vec<CreatureSpec>,
    #[serde(default)]
    pub(crate) steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ControllerSpec {
    id: u32,
    #[serde(default)]
    perk_level: u32,
    #[serde(default)]
    remote: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TurretSpec {
    id: u32,
    owner: u32,
    #[serde(default)]
    ammo: i32,
    #[serde(default)]
    base_capacity: i32,
    /// Dye tint as `[r, g, b]` in `[0, 1]`.
    #[serde(default)]
    color: Option<[f32; 3]>,
    /// Dye item name, such as `dyeRed`.
    #[serde(default)]
    dye: Option<String>,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    dead: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CreatureSpec {
    id: u32,
}

/// Single replayed action.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum Step {
    /// Prints the status rows of a controller.
    Status { controller: u32 },
    /// Resolves a damage event.
    Hit {
        attacker: u32,
        victim: u32,
        amount: i32,
        origin: Origin,
    },
    /// Removes an entity from the world.
    Remove { id: u32 },
    /// Has a controller reload one of its turrets.
    Reload { controller: u32, turret: u32 },
}

impl Step {
    /// Damage event described by a `hit` step.
    pub(crate) fn damage_event(&self) -> Option<DamageEvent> {
        match self {
            Step::Hit {
                attacker,
                victim,
                amount,
                origin,
            } => Some(DamageEvent {
                attacker: EntityId::new(*attacker),
                victim: EntityId::new(*victim),
                raw_amount: *amount,
                origin: *origin,
            }),
            _ => None,
        }
    }
}

impl Scenario {
    /// Parses a scenario from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse scenario toml contents")
    }

    /// World commands that establish the scenario's starting state.
    pub(crate) fn setup_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();

        for controller in &self.controllers {
            commands.push(Command::SpawnController {
                id: EntityId::new(controller.id),
                perk_level: controller.perk_level,
                remote: controller.remote,
            });
        }

        for creature in &self.creatures {
            commands.push(Command::SpawnCreature {
                id: EntityId::new(creature.id),
            });
        }

        for turret in &self.turrets {
            let id = EntityId::new(turret.id);
            commands.push(Command::SpawnTurret {
                id,
                owner: EntityId::new(turret.owner),
                ammo: turret.ammo,
                base_capacity: turret.base_capacity,
                item: turret.item(),
                remote: turret.remote,
            });
            if turret.dead {
                commands.push(Command::KillEntity { id });
            }
        }

        commands
    }
}

impl TurretSpec {
    fn item(&self) -> TurretItem {
        let tint = self
            .color
            .map(|[red, green, blue]| Rgb::new(red, green, blue));
        match &self.dye {
            Some(dye) => TurretItem {
                cosmetic_mods: vec![ItemMod {
                    name: dye.clone(),
                    tint,
                }],
                ..TurretItem::default()
            },
            None => TurretItem {
                tint,
                ..TurretItem::default()
            },
        }
    }
}
