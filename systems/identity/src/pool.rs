//! Fallback nickname pool with case-insensitive usage tracking.

use std::collections::HashSet;

use rand::Rng;

/// Names handed out when no color-derived nickname applies.
pub const FALLBACK_NAMES: [&str; 56] = [
    "Ben", "Gwen", "Kevin", "SamuraiJack", "Aku", "Numbuh1", "Numbuh2", "Numbuh3", "Numbuh4",
    "Numbuh5", "Bloo", "Mac", "Eduardo", "Wilt", "Coco", "Dexter", "DeeDee", "Blossom", "Bubbles",
    "Buttercup", "Aang", "Katara", "Sokka", "Toph", "Zuko", "Iroh", "Appa", "Momo", "Danny", "Sam",
    "Tucker", "Timmy", "Cosmo", "Wanda", "Jorgen", "Jimmy", "Sheen", "Carl", "Cindy", "Libby",
    "Goddard", "Zim", "GIR", "Dib", "Gaz", "Luffy", "Zoro", "Nami", "Usopp", "Sanji", "Chopper",
    "Robin", "Franky", "Brook", "Jinbe", "Alastor",
];

/// Prefix of names synthesized once every pool name is in use.
pub const SYNTHESIZED_PREFIX: &str = "Turbo";

/// Ordered candidate names plus the set currently handed out.
#[derive(Clone, Debug)]
pub struct FallbackPool {
    names: Vec<String>,
    prefix: String,
    used: HashSet<String>,
    last_suffix: usize,
}

impl Default for FallbackPool {
    fn default() -> Self {
        Self::new(FALLBACK_NAMES, SYNTHESIZED_PREFIX)
    }
}

impl FallbackPool {
    /// Creates a pool over `names`, synthesizing `"<prefix>-<n>"` once they run out.
    #[must_use]
    pub fn new<I, S>(names: I, prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            prefix: prefix.into(),
            used: HashSet::new(),
            last_suffix: 0,
        }
    }

    /// Number of candidate names in the pool, excluding synthesized ones.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.names.len()
    }

    /// Number of drawn names not yet released, synthesized ones included.
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.used.len()
    }

    /// Reports whether `name` is currently handed out. Case-insensitive.
    #[must_use]
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(&fold(name))
    }

    /// Draws an unused name uniformly at random and marks it used.
    ///
    /// Once every candidate is in use a numbered name is synthesized instead. Its
    /// suffix is one past the in-use count, bumped further when needed so suffixes
    /// strictly increase for the lifetime of the pool.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> String {
        let available: Vec<&String> = self
            .names
            .iter()
            .filter(|name| !self.used.contains(&fold(name)))
            .collect();

        let name = if available.is_empty() {
            let suffix = (self.used.len() + 1).max(self.last_suffix + 1);
            self.last_suffix = suffix;
            format!("{}-{suffix}", self.prefix)
        } else {
            available[rng.gen_range(0..available.len())].clone()
        };

        let _ = self.used.insert(fold(&name));
        name
    }

    /// Frees `name` for future draws. Returns whether it was in use.
    pub fn release(&mut self, name: &str) -> bool {
        self.used.remove(&fold(name))
    }

    /// Forgets every handed-out name. Synthesized suffixes keep increasing.
    pub fn clear(&mut self) {
        self.used.clear();
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn reference_pool_names_are_distinct_ignoring_case() {
        let folded: HashSet<String> = FALLBACK_NAMES.iter().map(|name| fold(name)).collect();
        assert_eq!(folded.len(), FALLBACK_NAMES.len());
    }

    #[test]
    fn usage_is_case_insensitive() {
        let mut pool = FallbackPool::new(["Zim"], "Turbo");
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(pool.draw(&mut rng), "Zim");
        assert!(pool.is_used("ZIM"));
        assert!(pool.release("zim"));
        assert!(!pool.is_used("Zim"));
    }

    #[test]
    fn synthesized_suffix_never_repeats_after_release() {
        let mut pool = FallbackPool::new(["Aku"], "Turbo");
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        assert_eq!(pool.draw(&mut rng), "Aku");
        assert_eq!(pool.draw(&mut rng), "Turbo-2");
        assert_eq!(pool.draw(&mut rng), "Turbo-3");
        assert!(pool.release("Turbo-2"));
        assert_eq!(pool.draw(&mut rng), "Turbo-4");
    }

    #[test]
    fn clear_keeps_suffixes_increasing() {
        let mut pool = FallbackPool::new(Vec::<String>::new(), "Turbo");
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(pool.draw(&mut rng), "Turbo-1");
        pool.clear();
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.draw(&mut rng), "Turbo-2");
    }
}
