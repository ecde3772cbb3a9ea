use crate::seed::SeedRef;
use crate::slot::SlotValue;
use crate::types::{SlotType, TypeHierarchy, TypeTag};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// Canonical form of a template's declared types: a sorted multiset.
///
/// Two slots of the same declared type stay two entries, so such a template
/// needs two matching objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeKey(Box<[SlotType]>);

impl TypeKey {
    pub fn new(types: impl IntoIterator<Item = SlotType>) -> Self {
        let mut types: Vec<SlotType> = types.into_iter().collect();
        types.sort_unstable();
        Self(types.into_boxed_slice())
    }

    #[must_use]
    pub fn types(&self) -> &[SlotType] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Covering lookup from runtime object types to every seed they can fill.
///
/// Seeds of all target types share one index. Buckets keep first-registration
/// order, and seeds inside a bucket keep insertion order.
#[derive(Debug, Default)]
pub struct TypeIndex {
    buckets: Vec<(TypeKey, Vec<SeedRef>)>,
    positions: FxHashMap<TypeKey, usize>,
    hierarchy: TypeHierarchy,
}

impl TypeIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_seed(&mut self, seed: SeedRef) {
        let key = TypeKey::new(seed.types());
        let position = match self.positions.get(&key) {
            Some(position) => *position,
            None => {
                self.buckets.push((key.clone(), Vec::new()));
                self.positions.insert(key, self.buckets.len() - 1);
                self.buckets.len() - 1
            },
        };
        self.buckets[position].1.push(seed);
    }

    #[must_use]
    pub fn find_seeds_for_objects(&self, objects: &[SlotValue]) -> Vec<SeedRef> {
        let types: Vec<TypeTag> = objects.iter().map(SlotValue::runtime_type).collect();
        self.find_seeds_for_types(&types)
    }

    /// Every seed whose declared types can be filled by distinct objects of `runtime`.
    #[must_use]
    pub fn find_seeds_for_types(&self, runtime: &[TypeTag]) -> Vec<SeedRef> {
        let found: Vec<SeedRef> = self
            .buckets
            .iter()
            .filter(|(key, _)| covers(&self.hierarchy, runtime, key.types()))
            .flat_map(|(_, seeds)| seeds.iter().cloned())
            .collect();

        trace!(objects = runtime.len(), buckets = self.buckets.len(), found = found.len(), "Covering lookup");
        found
    }

    #[must_use]
    pub const fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub const fn hierarchy_mut(&mut self) -> &mut TypeHierarchy {
        &mut self.hierarchy
    }

    /// Number of indexed seeds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, seeds)| seeds.len()).sum()
    }

    /// Number of distinct declared-type multisets.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drops every indexed seed. Declared subtype edges are kept.
    pub fn clear(&mut self) -> usize {
        let count = self.len();
        self.buckets.clear();
        self.positions.clear();
        count
    }
}

/// Decides whether the runtime types can fill every declared slot type.
///
/// Each declared type needs its own runtime object, one that is the declared
/// type or a declared subtype of it. Solved as bipartite matching with
/// augmenting paths: `O(|declared|² · |runtime|)` subtype checks at worst.
///
/// # Examples
/// ```rust
/// use seedbed::{TypeHierarchy, TypeTag, covers};
///
/// struct Number;
///
/// let mut hierarchy = TypeHierarchy::new();
/// hierarchy.declare_subtype::<i64, Number>();
///
/// let runtime = [TypeTag::of::<String>(), TypeTag::of::<i64>()];
/// assert!(covers(&hierarchy, &runtime, &[TypeTag::of::<Number>(), TypeTag::of::<String>()]));
/// assert!(!covers(&hierarchy, &runtime, &[TypeTag::of::<String>(), TypeTag::of::<String>()]));
/// ```
#[must_use]
pub fn covers(hierarchy: &TypeHierarchy, runtime: &[TypeTag], declared: &[SlotType]) -> bool {
    if declared.len() > runtime.len() {
        return false;
    }

    let candidates: Vec<Vec<usize>> = declared
        .iter()
        .map(|slot| {
            runtime
                .iter()
                .enumerate()
                .filter(|(_, object)| hierarchy.is_subtype_or_equal(**object, *slot))
                .map(|(index, _)| index)
                .collect()
        })
        .collect();
    if candidates.iter().any(Vec::is_empty) {
        return false;
    }

    let mut owner: Vec<Option<usize>> = vec![None; runtime.len()];
    (0..declared.len()).all(|slot| {
        let mut visited = vec![false; runtime.len()];
        augment(slot, &candidates, &mut owner, &mut visited)
    })
}

/// Kuhn's step: finds an object for `slot`, re-seating earlier slots if needed.
fn augment(
    slot: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &object in &candidates[slot] {
        if visited[object] {
            continue;
        }
        visited[object] = true;

        let free = match owner[object] {
            None => true,
            Some(previous) => augment(previous, candidates, owner, visited),
        };
        if free {
            owner[object] = Some(slot);
            return true;
        }
    }
    false
}

/// A [`TypeIndex`] shared between every per-target registry of one [`crate::Registry`].
///
/// Cloning is inexpensive: clones share the same index.
#[derive(Debug, Clone, Default)]
pub struct SharedTypeIndex {
    inner: Arc<RwLock<TypeIndex>>,
}

impl SharedTypeIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_seed(&self, seed: SeedRef) {
        self.inner.write().add_seed(seed);
    }

    #[must_use]
    pub fn find_seeds_for_objects(&self, objects: &[SlotValue]) -> Vec<SeedRef> {
        self.inner.read().find_seeds_for_objects(objects)
    }

    #[must_use]
    pub fn find_seeds_for_types(&self, runtime: &[TypeTag]) -> Vec<SeedRef> {
        self.inner.read().find_seeds_for_types(runtime)
    }

    pub fn declare(&self, sub: TypeTag, sup: TypeTag) -> bool {
        let added = self.inner.write().hierarchy_mut().declare(sub, sup);
        if added {
            debug!(sub = sub.name(), sup = sup.name(), "Declared subtype");
        }
        added
    }

    #[must_use]
    pub fn is_subtype_or_equal(&self, sub: TypeTag, sup: TypeTag) -> bool {
        self.inner.read().hierarchy().is_subtype_or_equal(sub, sup)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Drops every indexed seed, returning how many were dropped.
    pub fn clear(&self) -> usize {
        self.inner.write().clear()
    }
}
