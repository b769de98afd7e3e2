#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Better Turrets overlay.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing host-side mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems never own entity state: they consume immutable
//! [`EntityDescriptor`] snapshots and capability queries such as
//! [`CosmeticSample`], and answer with adjusted numbers or new commands.

use serde::{Deserialize, Serialize};

/// Minimum perk level at which damage scaling becomes active.
pub const PERK_GATE_LEVEL: u32 = 5;

/// Unique identifier assigned to an entity by the host simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Broad classification of host entities relevant to the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Autonomous defense entity deployed by a controller.
    Turret,
    /// Player-like entity that owns turrets and carries perk progression.
    Controller,
    /// Any other living entity, such as a hostile creature.
    Creature,
}

/// Immutable snapshot of a live entity used by the census and damage policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Identifier assigned to the entity by the host.
    pub id: EntityId,
    /// Classification of the entity.
    pub kind: EntityKind,
    /// Whether the entity is still alive.
    pub alive: bool,
    /// Whether the entity is simulated by this process rather than mirrored from a remote peer.
    pub locally_simulated: bool,
    /// Controller that deployed the entity, if any.
    pub owner: Option<EntityId>,
}

impl EntityDescriptor {
    /// Reports whether the entity is a turret.
    #[must_use]
    pub const fn is_turret(&self) -> bool {
        matches!(self.kind, EntityKind::Turret)
    }

    /// Reports whether the entity is alive and simulated locally.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.alive && self.locally_simulated
    }
}

/// Color sample expressed as linear RGB channels in the `[0, 1]` range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    red: f32,
    green: f32,
    blue: f32,
}

impl Rgb {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from byte channels.
    #[must_use]
    pub fn from_bytes(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
        )
    }

    /// Unpacks a color stored as an ARGB32 integer, discarding alpha.
    #[must_use]
    pub fn from_argb32(packed: u32) -> Self {
        let [_, red, green, blue] = packed.to_be_bytes();
        Self::from_bytes(red, green, blue)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` notation, discarding alpha.
    ///
    /// The short `#RGB` and `#RGBA` forms are not supported and yield `None`.
    #[must_use]
    pub fn parse_hex(value: &str) -> Option<Self> {
        let digits = value.trim().strip_prefix('#')?;
        if digits.len() != 6 && digits.len() != 8 {
            return None;
        }
        let channel = |index: usize| {
            digits
                .get(index..index + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        };
        Some(Self::from_bytes(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Converts the color into hue, saturation and value components.
    ///
    /// Hue wraps in `[0, 1)`. Achromatic colors report a hue and saturation of zero.
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        let delta = max - min;

        if max <= 0.0 {
            return Hsv::new(0.0, 0.0, 0.0);
        }

        let saturation = delta / max;
        if delta <= 0.0 {
            return Hsv::new(0.0, 0.0, max);
        }

        let sector = if max == self.red {
            (self.green - self.blue) / delta
        } else if max == self.green {
            2.0 + (self.blue - self.red) / delta
        } else {
            4.0 + (self.red - self.green) / delta
        };

        let mut hue = sector / 6.0;
        if hue < 0.0 {
            hue += 1.0;
        }
        if hue >= 1.0 {
            hue -= 1.0;
        }

        Hsv::new(hue, saturation, max)
    }
}

/// Color expressed as hue, saturation and value, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    hue: f32,
    saturation: f32,
    value: f32,
}

impl Hsv {
    /// Creates a new HSV triple.
    #[must_use]
    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Hue as a wraparound scalar in `[0, 1)`.
    #[must_use]
    pub const fn hue(&self) -> f32 {
        self.hue
    }

    /// Saturation in `[0, 1]`.
    #[must_use]
    pub const fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Value (brightness) in `[0, 1]`.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Shortest distance between two hues on the unit circle.
    #[must_use]
    pub fn hue_distance(&self, other: &Hsv) -> f32 {
        let direct = (self.hue - other.hue).abs();
        direct.min(1.0 - direct)
    }
}

/// Cosmetic data the host may expose for a turret.
///
/// Either field may be absent; consumers degrade gracefully.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CosmeticSample {
    /// Tint of the applied dye, if the host could determine one.
    pub color: Option<Rgb>,
    /// Name of the item the tint came from, such as `dyeRed`.
    pub source_item: Option<String>,
}

/// Tint stored in an item's metadata, in whichever encoding the host used.
#[derive(Clone, Debug, PartialEq)]
pub enum TintMetadata {
    /// Floating point color.
    Color(Rgb),
    /// Packed ARGB32 integer.
    Argb32(u32),
    /// `#RRGGBB` or `#RRGGBBAA` notation.
    Html(String),
}

impl TintMetadata {
    /// Decodes the stored tint, if it is well formed.
    #[must_use]
    pub fn resolve(&self) -> Option<Rgb> {
        match self {
            TintMetadata::Color(color) => Some(*color),
            TintMetadata::Argb32(packed) => Some(Rgb::from_argb32(*packed)),
            TintMetadata::Html(text) => Rgb::parse_hex(text),
        }
    }
}

/// Modification slotted into a turret item, such as a dye.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemMod {
    /// Item class name of the modification.
    pub name: String,
    /// Icon tint declared by the modification's item class.
    pub tint: Option<Rgb>,
}

/// Host item a turret was deployed from, carrying its cosmetic data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurretItem {
    /// Item class name of the turret item.
    pub name: String,
    /// Cosmetic modification slots, searched first.
    pub cosmetic_mods: Vec<ItemMod>,
    /// Regular modification slots, searched after cosmetic slots.
    pub modifications: Vec<ItemMod>,
    /// Tint stored in the item's metadata.
    pub tint_metadata: Option<TintMetadata>,
    /// Icon tint declared by the turret item's own class.
    pub tint: Option<Rgb>,
}

/// Family an item belongs to, supplied by the integration layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemFamily {
    /// Turret items and turret-specific ranged actions.
    Turret,
    /// Everything else.
    Other,
}

/// Classification of the source of a damage event, supplied by the integration layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// The attacker is a turret entity.
    TrackedEntity,
    /// The attacking item is tagged as belonging to the turret family.
    TrackedItem,
    /// Neither of the above.
    Other,
}

impl Origin {
    /// Reports whether the hit originated from a turret or turret item.
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        matches!(self, Origin::TrackedEntity | Origin::TrackedItem)
    }
}

/// Raw combat damage reported by the host before adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    /// Entity that dealt the damage.
    pub attacker: EntityId,
    /// Entity receiving the damage.
    pub victim: EntityId,
    /// Damage amount computed by the host.
    pub raw_amount: i32,
    /// Classification of the damage source.
    pub origin: Origin,
}

/// Tunable multipliers consumed by the damage and magazine systems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    /// Multiplier applied to turret magazine capacity.
    pub magazine_multiplier: f32,
    /// Base multiplier applied to turret-origin damage.
    pub base_turret_damage_multiplier: f32,
    /// Additional turret-origin damage fraction per deployed turret.
    pub per_turret_damage_bonus: f32,
    /// Fraction of the owner's direct damage removed per deployed turret.
    pub player_damage_penalty_per_turret: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            magazine_multiplier: 2.0,
            base_turret_damage_multiplier: 1.0,
            per_turret_damage_bonus: 0.25,
            player_damage_penalty_per_turret: 0.25,
        }
    }
}

/// Extra interaction command offered when a controller focuses an entity.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivationCommand {
    /// Text shown in the radial menu.
    pub text: String,
    /// Icon identifier understood by the host.
    pub icon: String,
    /// Whether the command can currently be selected.
    pub enabled: bool,
    /// Event name forwarded to the host when activated.
    pub event_name: String,
    /// Seconds the activation key must be held.
    pub hold_seconds: f32,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Adds a controller with the provided perk progression.
    SpawnController {
        /// Identifier requested for the controller.
        id: EntityId,
        /// Level of the turret perk.
        perk_level: u32,
        /// Whether the controller is mirrored from a remote peer.
        remote: bool,
    },
    /// Adds a turret deployed by a controller.
    SpawnTurret {
        /// Identifier requested for the turret.
        id: EntityId,
        /// Controller that deployed the turret.
        owner: EntityId,
        /// Rounds currently loaded.
        ammo: i32,
        /// Magazine capacity of the turret item before scaling.
        base_capacity: i32,
        /// Item the turret was deployed from.
        item: TurretItem,
        /// Whether the turret is mirrored from a remote peer.
        remote: bool,
    },
    /// Adds a creature that neither owns nor is a turret.
    SpawnCreature {
        /// Identifier requested for the creature.
        id: EntityId,
    },
    /// Updates the turret perk level of a controller.
    SetPerkLevel {
        /// Controller whose progression changes.
        controller: EntityId,
        /// New perk level.
        level: u32,
    },
    /// Marks an entity as dead while it remains in the world.
    KillEntity {
        /// Entity to kill.
        id: EntityId,
    },
    /// Removes an entity from the simulation.
    RemoveEntity {
        /// Entity to remove.
        id: EntityId,
    },
    /// Sets the loaded ammo of a turret.
    RefillTurret {
        /// Turret to refill.
        turret: EntityId,
        /// New ammo count.
        ammo: i32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an entity joined the simulation.
    EntitySpawned {
        /// Identifier of the new entity.
        id: EntityId,
        /// Classification of the new entity.
        kind: EntityKind,
    },
    /// Reports that a spawn request reused an identifier already in use.
    SpawnRejected {
        /// Identifier that was requested.
        id: EntityId,
    },
    /// Confirms that an entity died.
    EntityDied {
        /// Identifier of the entity.
        id: EntityId,
    },
    /// Confirms that an entity left the simulation. Delivered once per entity.
    EntityRemoved {
        /// Identifier of the removed entity.
        id: EntityId,
        /// Classification of the removed entity.
        kind: EntityKind,
    },
    /// Confirms that a turret's ammo was refilled.
    TurretRefilled {
        /// Turret that was refilled.
        turret: EntityId,
        /// Ammo count after the refill.
        ammo: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn primary_colors_map_to_expected_hues() {
        assert_close(Rgb::new(1.0, 0.0, 0.0).to_hsv().hue(), 0.0);
        assert_close(Rgb::new(0.0, 1.0, 0.0).to_hsv().hue(), 1.0 / 3.0);
        assert_close(Rgb::new(0.0, 0.0, 1.0).to_hsv().hue(), 2.0 / 3.0);
    }

    #[test]
    fn magenta_hue_wraps_below_one() {
        let hsv = Rgb::new(1.0, 0.0, 0.5).to_hsv();
        assert!(hsv.hue() < 1.0);
        assert_close(hsv.hue(), 11.0 / 12.0);
    }

    #[test]
    fn achromatic_colors_have_zero_saturation() {
        let grey = Rgb::new(0.4, 0.4, 0.4).to_hsv();
        assert_close(grey.saturation(), 0.0);
        assert_close(grey.value(), 0.4);

        let black = Rgb::new(0.0, 0.0, 0.0).to_hsv();
        assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn hue_distance_wraps_around_the_circle() {
        let near_zero = Hsv::new(0.02, 1.0, 1.0);
        let near_one = Hsv::new(0.98, 1.0, 1.0);
        assert_close(near_zero.hue_distance(&near_one), 0.04);
    }

    #[test]
    fn hex_notation_parses_with_and_without_alpha() {
        assert_eq!(
            Rgb::parse_hex("#FF0000"),
            Some(Rgb::from_bytes(255, 0, 0))
        );
        assert_eq!(
            Rgb::parse_hex("#00ff0080"),
            Some(Rgb::from_bytes(0, 255, 0))
        );
        assert_eq!(Rgb::parse_hex("00ff00"), None);
        assert_eq!(Rgb::parse_hex("#12345"), None);
        assert_eq!(Rgb::parse_hex("#f00"), None, "short form is not supported");
        assert_eq!(Rgb::parse_hex("#f00a"), None);
        assert_eq!(Rgb::parse_hex("#zz0000"), None);
    }

    #[test]
    fn argb32_discards_alpha() {
        assert_eq!(
            Rgb::from_argb32(0x80_11_22_33),
            Rgb::from_bytes(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn metadata_tint_decodes_every_encoding() {
        let red = Rgb::from_bytes(255, 0, 0);
        assert_eq!(TintMetadata::Color(red).resolve(), Some(red));
        assert_eq!(TintMetadata::Argb32(0xFF_FF_00_00).resolve(), Some(red));
        assert_eq!(TintMetadata::Html("#ff0000".to_owned()).resolve(), Some(red));
        assert_eq!(TintMetadata::Html("crimson".to_owned()).resolve(), None);
    }

    #[test]
    fn default_tuning_matches_documented_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.magazine_multiplier, 2.0);
        assert_eq!(tuning.base_turret_damage_multiplier, 1.0);
        assert_eq!(tuning.per_turret_damage_bonus, 0.25);
        assert_eq!(tuning.player_damage_penalty_per_turret, 0.25);
    }
}
