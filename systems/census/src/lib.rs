#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateless count of the turrets a controller currently has deployed.

use better_turrets_core::{EntityDescriptor, EntityId};

/// Number of active turrets owned by a controller at the time of a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CensusResult {
    /// Controller that was counted for.
    pub owner: EntityId,
    /// Turrets that are alive, simulated locally and owned by `owner`.
    pub active_count: u32,
}

/// Counts live, locally simulated turrets per owner. Nothing is cached between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurretCensus;

impl TurretCensus {
    /// Creates a new census.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Counts turrets in `entities` that are alive, local and owned by `owner`.
    #[must_use]
    pub fn count_active<'a, I>(&self, owner: EntityId, entities: I) -> u32
    where
        I: IntoIterator<Item = &'a EntityDescriptor>,
    {
        let count = entities
            .into_iter()
            .filter(|entity| entity.is_turret() && entity.is_active())
            .filter(|entity| entity.owner == Some(owner))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Runs [`TurretCensus::count_active`] and pairs the result with its owner.
    #[must_use]
    pub fn take<'a, I>(&self, owner: EntityId, entities: I) -> CensusResult
    where
        I: IntoIterator<Item = &'a EntityDescriptor>,
    {
        CensusResult {
            owner,
            active_count: self.count_active(owner, entities),
        }
    }
}
