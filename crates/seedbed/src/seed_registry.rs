use crate::error::SeedError;
use crate::name_index::NameIndex;
use crate::seed::{Seed, SeedRef};
use crate::slot::{SlotName, join_names};
use crate::target::Seedable;
use crate::type_index::SharedTypeIndex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns every seed of one target type.
///
/// Enforces that no two seeds share a slot-name set and fans each accepted seed
/// into the private [`NameIndex`] and the shared type index.
pub struct SeedRegistry<T: Seedable> {
    seeds: Vec<Arc<Seed<T>>>,
    names: NameIndex<T>,
    types: SharedTypeIndex,
}

impl<T: Seedable> SeedRegistry<T> {
    /// Creates an empty registry that publishes into `types`.
    #[must_use]
    pub fn new(types: SharedTypeIndex) -> Self {
        Self { seeds: Vec::new(), names: NameIndex::new(), types }
    }

    /// Accepts `seed` unless another seed already declares the same slot names.
    ///
    /// Adding the very same seed again is a no-op.
    ///
    /// # Errors
    /// Returns [`SeedError::DuplicateSeed`] on a slot-name set collision.
    pub fn add_seed(&mut self, seed: Arc<Seed<T>>) -> Result<(), SeedError> {
        if self.seeds.iter().any(|existing| Arc::ptr_eq(existing, &seed)) {
            return Ok(());
        }

        if self.seeds.iter().any(|existing| existing.matches_keys(seed.keys())) {
            warn!(
                target_type = std::any::type_name::<T>(),
                keys = %join_names(seed.keys()),
                "Rejected seed with duplicate slot names"
            );
            return Err(SeedError::DuplicateSeed {
                message: format!(
                    "{} already has a seed for [{}]",
                    std::any::type_name::<T>(),
                    join_names(seed.keys())
                )
                .into(),
                context: None,
            });
        }

        self.names.add_seed(Arc::clone(&seed));
        let erased: SeedRef = seed.clone();
        self.types.add_seed(erased);

        debug!(
            target_type = std::any::type_name::<T>(),
            keys = %join_names(seed.keys()),
            "Registered seed"
        );
        self.seeds.push(seed);
        Ok(())
    }

    /// The seed declaring exactly `names`, if any.
    pub fn find_by_names<'a>(
        &self,
        names: impl IntoIterator<Item = &'a SlotName>,
    ) -> Option<Arc<Seed<T>>> {
        self.names.find_seed_for_names(names).cloned()
    }

    /// Seeds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Seed<T>>> {
        self.seeds.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    #[must_use]
    pub const fn type_index(&self) -> &SharedTypeIndex {
        &self.types
    }
}

impl<'a, T: Seedable> IntoIterator for &'a SeedRegistry<T> {
    type Item = &'a Arc<Seed<T>>;
    type IntoIter = std::slice::Iter<'a, Arc<Seed<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.seeds.iter()
    }
}

impl<T: Seedable> fmt::Debug for SeedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedRegistry")
            .field("target", &std::any::type_name::<T>())
            .field("seeds", &self.seeds)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
