use fxhash::{FxHashMap, FxHashSet};
use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A runtime type descriptor: the [`TypeId`] plus a readable type name.
///
/// Equality, hashing and ordering only look at the [`TypeId`]; the name is kept
/// for logs and error messages.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Describes `T`. Unsized types such as `dyn Trait` or `str` are allowed.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: std::any::type_name::<T>() }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declared slot type of a template slot.
pub type SlotType = TypeTag;

/// The subtype relation used when matching runtime objects against declared slot types.
///
/// Rust has no runtime subtyping, so the relation is declared explicitly:
/// `declare_subtype::<i64, Number>()` lets an `i64` object fill a `Number` slot.
/// The relation is reflexive and transitive; cycles are tolerated.
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    supertypes: FxHashMap<TypeTag, FxHashSet<TypeTag>>,
}

impl TypeHierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `sub` a direct subtype of `sup`.
    ///
    /// Returns `false` if the edge was already known or `sub == sup`.
    pub fn declare(&mut self, sub: TypeTag, sup: TypeTag) -> bool {
        if sub == sup {
            return false;
        }
        self.supertypes.entry(sub).or_default().insert(sup)
    }

    /// Typed shorthand for [`TypeHierarchy::declare`].
    pub fn declare_subtype<Sub: ?Sized + 'static, Sup: ?Sized + 'static>(&mut self) -> bool {
        self.declare(TypeTag::of::<Sub>(), TypeTag::of::<Sup>())
    }

    /// True iff `sub` equals `sup` or reaches it through declared edges.
    #[must_use]
    pub fn is_subtype_or_equal(&self, sub: TypeTag, sup: TypeTag) -> bool {
        if sub == sup {
            return true;
        }

        let mut visited = FxHashSet::default();
        let mut pending = vec![sub];
        while let Some(current) = pending.pop() {
            let Some(parents) = self.supertypes.get(&current) else { continue };
            for parent in parents {
                if *parent == sup {
                    return true;
                }
                if visited.insert(*parent) {
                    pending.push(*parent);
                }
            }
        }

        false
    }

    /// Direct supertypes declared for `tag`.
    pub fn supertypes(&self, tag: TypeTag) -> impl Iterator<Item = TypeTag> + '_ {
        self.supertypes.get(&tag).into_iter().flatten().copied()
    }

    /// Number of declared edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.supertypes.values().map(FxHashSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.supertypes.is_empty()
    }

    pub fn clear(&mut self) {
        self.supertypes.clear();
    }
}
