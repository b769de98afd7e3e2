#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Projects a controller's deployed turrets into status rows for display.
//!
//! Rendering is left to the adapter; this system only decides which turrets appear,
//! in which order, and under which name.

use std::fmt;

use better_turrets_core::{CosmeticSample, EntityDescriptor, EntityId, Rgb};
use better_turrets_system_identity::IdentityRegistry;
use rand::Rng;

/// Single status line describing one deployed turret.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusRow {
    /// Turret the row describes.
    pub turret: EntityId,
    /// Display name of the turret.
    pub name: String,
    /// Rounds currently loaded.
    pub ammo: i32,
    /// Dye color used to tint the row icon, if known.
    pub tint: Option<Rgb>,
}

impl fmt::Display for StatusRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ammo)
    }
}

/// Pure system that builds status rows for the local controller.
#[derive(Debug, Default)]
pub struct StatusPanel {
    scratch: Vec<StatusRow>,
}

impl StatusPanel {
    /// Creates a new status panel with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one row per live, local turret owned by `viewer`, in entity order.
    ///
    /// Names come from `registry`, which assigns them on first sight. A viewer that is
    /// dead or mirrored from a remote peer sees nothing.
    pub fn handle<R, C, A>(
        &mut self,
        viewer: &EntityDescriptor,
        entities: &[EntityDescriptor],
        registry: &mut IdentityRegistry<R>,
        cosmetic: C,
        ammo: A,
        out: &mut Vec<StatusRow>,
    ) where
        R: Rng,
        C: Fn(EntityId) -> Option<CosmeticSample>,
        A: Fn(EntityId) -> Option<i32>,
    {
        if !viewer.is_active() {
            return;
        }

        self.scratch.clear();

        for entity in entities {
            if !entity.is_turret() || !entity.is_active() || entity.owner != Some(viewer.id) {
                continue;
            }

            let sample = cosmetic(entity.id).unwrap_or_default();
            let name = registry
                .get_or_assign(entity.id, sample.color, sample.source_item.as_deref())
                .to_owned();
            self.scratch.push(StatusRow {
                turret: entity.id,
                name,
                ammo: ammo(entity.id).unwrap_or(0),
                tint: sample.color,
            });
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
