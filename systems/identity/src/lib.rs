#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stable turret nicknames derived from dye provenance, dye color, or a fallback pool.
//!
//! The registry is owned by the simulation session and injected wherever names are
//! needed. Names live exactly as long as the turret they belong to: the first lookup
//! assigns one, later lookups return it unchanged, and the removal notification
//! releases it.

mod pool;

use std::collections::{hash_map::Entry, HashMap};

use better_turrets_core::{EntityId, EntityKind, Event, Rgb};
use better_turrets_system_color::ColorClassifier;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

pub use crate::pool::{FallbackPool, FALLBACK_NAMES, SYNTHESIZED_PREFIX};

const SOURCE_ITEM_NICKNAMES: [(&str, &str); 9] = [
    ("dyered", "Raphael"),
    ("dyeblue", "Leonardo"),
    ("dyepurple", "Donatello"),
    ("dyeorange", "Michelangelo"),
    ("dyegreen", "Mutagen"),
    ("dyeblack", "Shredder"),
    ("dyebrown", "Splinter"),
    ("dyeyellow", "April"),
    ("dyepink", "Pinky"),
];

/// Maps a dye item name onto its nickname. Case-insensitive.
#[must_use]
pub fn nickname_for_source_item(item: &str) -> Option<&'static str> {
    SOURCE_ITEM_NICKNAMES
        .iter()
        .find(|(source, _)| source.eq_ignore_ascii_case(item))
        .map(|(_, nickname)| *nickname)
}

/// Display name assigned to a live turret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Turret the name belongs to.
    pub entity: EntityId,
    /// Assigned display name.
    pub name: String,
    /// Whether the name was drawn from the fallback pool.
    pub from_fallback_pool: bool,
}

/// Session-scoped map from live turrets to their display names.
#[derive(Debug)]
pub struct IdentityRegistry<R = ChaCha8Rng> {
    identities: HashMap<EntityId, Identity>,
    pool: FallbackPool,
    classifier: ColorClassifier,
    rng: R,
}

impl IdentityRegistry<ChaCha8Rng> {
    /// Creates a registry with the reference palette and pool, seeding draws from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> IdentityRegistry<R> {
    /// Creates a registry with the reference palette and pool drawing from `rng`.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self::with_parts(ColorClassifier::default(), FallbackPool::default(), rng)
    }

    /// Creates a registry from explicit parts.
    #[must_use]
    pub fn with_parts(classifier: ColorClassifier, pool: FallbackPool, rng: R) -> Self {
        Self {
            identities: HashMap::new(),
            pool,
            classifier,
            rng,
        }
    }

    /// Returns the name of `entity`, assigning one on first sight.
    ///
    /// A known dye item name wins over color estimation, which wins over the
    /// fallback pool. Later calls ignore their arguments and return the stored name.
    pub fn get_or_assign(
        &mut self,
        entity: EntityId,
        color: Option<Rgb>,
        source_item: Option<&str>,
    ) -> &str {
        let slot = match self.identities.entry(entity) {
            Entry::Occupied(occupied) => return occupied.into_mut().name.as_str(),
            Entry::Vacant(vacant) => vacant,
        };

        let derived = source_item
            .and_then(nickname_for_source_item)
            .or_else(|| color.and_then(|sample| self.classifier.classify(sample)));
        let identity = match derived {
            Some(name) => Identity {
                entity,
                name: name.to_owned(),
                from_fallback_pool: false,
            },
            None => Identity {
                entity,
                name: self.pool.draw(&mut self.rng),
                from_fallback_pool: true,
            },
        };

        debug!(
            entity = entity.get(),
            name = %identity.name,
            from_pool = identity.from_fallback_pool,
            "assigned turret identity"
        );
        slot.insert(identity).name.as_str()
    }

    /// Forgets the identity of `entity`, returning it to the pool if it came from there.
    ///
    /// Unknown entities are ignored.
    pub fn release(&mut self, entity: EntityId) -> Option<Identity> {
        let identity = self.identities.remove(&entity)?;
        if identity.from_fallback_pool {
            let _ = self.pool.release(&identity.name);
        }
        debug!(entity = entity.get(), name = %identity.name, "released turret identity");
        Some(identity)
    }

    /// Releases identities of turrets reported as removed from the simulation.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Event::EntityRemoved {
                id,
                kind: EntityKind::Turret,
            } = event
            {
                let _ = self.release(*id);
            }
        }
    }

    /// Looks up the identity of `entity` without assigning one.
    #[must_use]
    pub fn identity(&self, entity: EntityId) -> Option<&Identity> {
        self.identities.get(&entity)
    }

    /// Provides read-only access to the fallback pool.
    #[must_use]
    pub fn pool(&self) -> &FallbackPool {
        &self.pool
    }

    /// Number of live identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Reports whether no identities are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Drops every identity at the end of a session.
    pub fn clear(&mut self) {
        self.identities.clear();
        self.pool.clear();
    }
}
