use crate::seed::Seed;
use crate::slot::SlotName;
use crate::target::Seedable;
use fxhash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Canonical form of a slot-name set: normalized, sorted, de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NameKey(Box<[SlotName]>);

impl NameKey {
    pub(crate) fn new<'a>(names: impl IntoIterator<Item = &'a SlotName>) -> Self {
        let mut names: Vec<SlotName> = names.into_iter().cloned().collect();
        names.sort_unstable();
        names.dedup();
        Self(names.into_boxed_slice())
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// Exact lookup from a set of slot names to the seed declaring exactly those names.
///
/// Lookups ignore name order and key spelling (`"Order"` and `"order"` are the same slot).
pub struct NameIndex<T: Seedable> {
    seeds: FxHashMap<NameKey, Arc<Seed<T>>>,
}

impl<T: Seedable> NameIndex<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { seeds: FxHashMap::default() }
    }

    /// Stores `seed` under its name set, returning the seed it displaced.
    pub fn add_seed(&mut self, seed: Arc<Seed<T>>) -> Option<Arc<Seed<T>>> {
        self.seeds.insert(NameKey::new(seed.keys()), seed)
    }

    pub fn find_seed_for_names<'a>(
        &self,
        names: impl IntoIterator<Item = &'a SlotName>,
    ) -> Option<&Arc<Seed<T>>> {
        self.seeds.get(&NameKey::new(names))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

impl<T: Seedable> Default for NameIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Seedable> fmt::Debug for NameIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameIndex")
            .field("target", &std::any::type_name::<T>())
            .field("keys", &self.seeds.keys().collect::<Vec<_>>())
            .finish()
    }
}
