//! Authoritative turret state and cosmetic capability resolution.

use better_turrets_core::{CosmeticSample, ItemMod, TurretItem};

/// Snapshot of a turret's host-side payload stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TurretState {
    /// Rounds currently loaded.
    pub(crate) ammo: i32,
    /// Magazine capacity of the turret item before scaling.
    pub(crate) base_capacity: i32,
    /// Item the turret was deployed from.
    pub(crate) item: TurretItem,
}

impl TurretState {
    pub(crate) fn new(ammo: i32, base_capacity: i32, item: TurretItem) -> Self {
        Self {
            ammo,
            base_capacity,
            item,
        }
    }
}

/// Resolves the dye color and dye item name carried by a turret item.
///
/// Cosmetic slots win over regular modification slots, which win over a tint stored in
/// metadata, which wins over the turret item's own class tint. A metadata tint borrows
/// the name of the first slotted modification, if any.
pub(crate) fn resolve_cosmetic(item: &TurretItem) -> CosmeticSample {
    let first_mod_name = item
        .cosmetic_mods
        .iter()
        .chain(item.modifications.iter())
        .map(|slot| slot.name.as_str())
        .find(|name| !name.is_empty());

    if let Some(sample) = first_tinted(&item.cosmetic_mods) {
        return sample;
    }

    if let Some(sample) = first_tinted(&item.modifications) {
        return sample;
    }

    if let Some(color) = item.tint_metadata.as_ref().and_then(|meta| meta.resolve()) {
        return CosmeticSample {
            color: Some(color),
            source_item: first_mod_name.map(str::to_owned),
        };
    }

    if let Some(color) = item.tint {
        return CosmeticSample {
            color: Some(color),
            source_item: Some(item.name.clone()).filter(|name| !name.is_empty()),
        };
    }

    CosmeticSample::default()
}

fn first_tinted(slots: &[ItemMod]) -> Option<CosmeticSample> {
    slots
        .iter()
        .filter(|slot| !slot.name.is_empty())
        .find_map(|slot| {
            slot.tint.map(|color| CosmeticSample {
                color: Some(color),
                source_item: Some(slot.name.clone()),
            })
        })
}
