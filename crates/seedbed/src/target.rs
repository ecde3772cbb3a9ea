use crate::error::SeedError;
use crate::types::TypeTag;
use fxhash::FxHashMap;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// Name of an attribute on a target record.
pub type AttributeName = Cow<'static, str>;

/// A record type that seeds can materialize.
///
/// The core needs two things from a target: a way to ask whether it declares an
/// attribute, and a constructor from the generated attribute map. Schema and
/// validation stay with the implementor.
///
/// # Examples
/// ```rust
/// use seedbed::{AttributeMap, SeedError, Seedable};
///
/// struct Invoice {
///     name: String,
///     total_price: f64,
/// }
///
/// impl Seedable for Invoice {
///     fn has_attribute(name: &str) -> bool {
///         matches!(name, "name" | "total_price")
///     }
///
///     fn construct(mut attributes: AttributeMap) -> Result<Self, SeedError> {
///         Ok(Self {
///             name: attributes.take_or_default("name")?,
///             total_price: attributes.take_or_default("total_price")?,
///         })
///     }
/// }
/// ```
pub trait Seedable: Sized + Send + Sync + 'static {
    fn has_attribute(name: &str) -> bool;

    /// Builds an instance from the attributes a recipe produced.
    ///
    /// # Errors
    /// Implementors report missing or mistyped attributes, usually by
    /// propagating the errors of [`AttributeMap::take`].
    fn construct(attributes: AttributeMap) -> Result<Self, SeedError>;
}

/// A single generated attribute value.
pub struct AttributeValue {
    tag: TypeTag,
    value: Box<dyn Any + Send + Sync>,
}

impl AttributeValue {
    pub fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self { tag: TypeTag::of::<V>(), value: Box::new(value) }
    }

    #[must_use]
    pub const fn value_type(&self) -> TypeTag {
        self.tag
    }

    #[must_use]
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }

    /// Unwraps the value, handing `self` back if it is not a `V`.
    ///
    /// # Errors
    /// Returns the untouched value on a type mismatch.
    pub fn downcast<V: Any>(self) -> Result<V, Self> {
        let tag = self.tag;
        self.value.downcast::<V>().map(|boxed| *boxed).map_err(|value| Self { tag, value })
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeValue({})", self.tag.name())
    }
}

/// Attribute name → generated value, handed to [`Seedable::construct`].
#[derive(Debug, Default)]
pub struct AttributeMap {
    values: FxHashMap<AttributeName, AttributeValue>,
}

impl AttributeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()) }
    }

    pub fn insert(
        &mut self,
        name: impl Into<AttributeName>,
        value: AttributeValue,
    ) -> Option<AttributeValue> {
        self.values.insert(name.into(), value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Borrows the attribute as a `V`.
    ///
    /// # Errors
    /// Returns [`SeedError::AttributeMissing`] or [`SeedError::AttributeTypeMismatch`].
    pub fn get<V: Any>(&self, name: &str) -> Result<&V, SeedError> {
        let value = self.values.get(name).ok_or_else(|| missing(name))?;
        value.downcast_ref::<V>().ok_or_else(|| mismatch::<V>(name, value.value_type()))
    }

    /// Moves the attribute out as a `V`.
    ///
    /// # Errors
    /// Returns [`SeedError::AttributeMissing`] or [`SeedError::AttributeTypeMismatch`];
    /// a mistyped value stays in the map.
    pub fn take<V: Any>(&mut self, name: &str) -> Result<V, SeedError> {
        let (key, value) = self.values.remove_entry(name).ok_or_else(|| missing(name))?;
        value.downcast::<V>().map_err(|value| {
            let err = mismatch::<V>(name, value.value_type());
            self.values.insert(key, value);
            err
        })
    }

    /// Like [`AttributeMap::take`], but an attribute the recipe never seeded yields `V::default()`.
    ///
    /// # Errors
    /// Returns [`SeedError::AttributeTypeMismatch`] if the attribute exists with another type.
    pub fn take_or_default<V: Any + Default>(&mut self, name: &str) -> Result<V, SeedError> {
        if self.contains(name) { self.take(name) } else { Ok(V::default()) }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn missing(name: &str) -> SeedError {
    SeedError::AttributeMissing { message: name.to_owned().into(), context: None }
}

fn mismatch<V: Any>(name: &str, found: TypeTag) -> SeedError {
    SeedError::AttributeTypeMismatch {
        message: format!("`{name}` holds {found}, expected {}", std::any::type_name::<V>()).into(),
        context: None,
    }
}
