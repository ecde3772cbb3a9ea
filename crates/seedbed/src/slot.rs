use crate::error::SeedError;
use crate::name_index::NameKey;
use crate::types::{SlotType, TypeTag};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Name of a template slot.
///
/// Names are normalized on construction: surrounding whitespace is trimmed and
/// the rest is lower-cased with Unicode rules, so `"Order"`, `" order"` and
/// `String::from("ORDER")` address the same slot, as do `"Ölfeld"` and `"ölfeld"`.
/// Enum keys can take part by implementing `From<MyKey> for SlotName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotName(Cow<'static, str>);

impl SlotName {
    pub fn new(raw: impl Into<Cow<'static, str>>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        if normalized == raw {
            return Self(raw);
        }
        Self(Cow::Owned(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for SlotName {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SlotName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&SlotName> for SlotName {
    fn from(value: &SlotName) -> Self {
        value.clone()
    }
}

impl AsRef<str> for SlotName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A caller-supplied domain object, shared and type-erased.
///
/// The runtime type recorded here is the one used by covering lookups.
/// Wrap an existing `Arc<T>` with [`SlotValue::shared`]; [`SlotValue::new`]
/// on an `Arc<T>` would record `Arc<T>` itself as the runtime type.
#[derive(Clone)]
pub struct SlotValue {
    tag: TypeTag,
    value: Arc<dyn Any + Send + Sync>,
}

impl SlotValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::shared(Arc::new(value))
    }

    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self { tag: TypeTag::of::<T>(), value }
    }

    #[must_use]
    pub const fn runtime_type(&self) -> TypeTag {
        self.tag
    }

    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns another handle to the shared object if it is a `T`.
    #[must_use]
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

impl fmt::Debug for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotValue({})", self.tag.name())
    }
}

impl<T: Any + Send + Sync> From<Arc<T>> for SlotValue {
    fn from(value: Arc<T>) -> Self {
        Self::shared(value)
    }
}

/// The slot-name → slot-type declaration of a seed, in declaration order.
///
/// # Examples
/// ```rust
/// use seedbed::{SeedTemplate, TypeTag};
///
/// struct User;
/// struct Order;
///
/// let template = SeedTemplate::new().slot::<User>("user").slot::<Order>("Order");
/// assert_eq!(template.len(), 2);
/// assert_eq!(template.names().map(|n| n.as_str()).collect::<Vec<_>>(), ["user", "order"]);
/// assert_eq!(template.slot_type(&"order".into()), Some(TypeTag::of::<Order>()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedTemplate {
    slots: Vec<(SlotName, SlotType)>,
}

impl SeedTemplate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot of type `T`.
    #[must_use]
    pub fn slot<T: ?Sized + 'static>(self, name: impl Into<SlotName>) -> Self {
        self.slot_of(name, TypeTag::of::<T>())
    }

    /// Adds a slot from an existing type descriptor.
    #[must_use]
    pub fn slot_of(mut self, name: impl Into<SlotName>, slot_type: SlotType) -> Self {
        self.slots.push((name.into(), slot_type));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &SlotName> {
        self.slots.iter().map(|(name, _)| name)
    }

    pub fn types(&self) -> impl Iterator<Item = SlotType> + '_ {
        self.slots.iter().map(|(_, ty)| *ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotName, SlotType)> {
        self.slots.iter().map(|(name, ty)| (name, *ty))
    }

    #[must_use]
    pub fn slot_type(&self, name: &SlotName) -> Option<SlotType> {
        self.slots.iter().find(|(slot, _)| slot == name).map(|(_, ty)| *ty)
    }

    #[must_use]
    pub fn contains(&self, name: &SlotName) -> bool {
        self.slot_type(name).is_some()
    }

    /// True iff `names` holds exactly this template's slot names, in any order.
    pub fn matches_names<'a>(&self, names: impl IntoIterator<Item = &'a SlotName>) -> bool {
        NameKey::new(self.names()) == NameKey::new(names)
    }

    /// Checks the template can back a seed.
    ///
    /// # Errors
    /// Returns [`SeedError::InvalidTemplate`] if the template is empty, larger than
    /// `max_slots`, or contains an empty or repeated slot name.
    pub fn validate(&self, max_slots: usize) -> Result<(), SeedError> {
        if self.slots.is_empty() {
            return Err(SeedError::InvalidTemplate {
                message: "a seed template needs at least one slot".into(),
                context: None,
            });
        }
        if self.slots.len() > max_slots {
            return Err(SeedError::InvalidTemplate {
                message: format!("{} slots exceed the limit of {max_slots}", self.slots.len())
                    .into(),
                context: None,
            });
        }
        if self.slots.iter().any(|(name, _)| name.is_empty()) {
            return Err(SeedError::InvalidTemplate {
                message: "slot names cannot be empty".into(),
                context: None,
            });
        }
        if NameKey::new(self.names()).len() != self.slots.len() {
            return Err(SeedError::InvalidTemplate {
                message: format!("slot names repeat: [{}]", join_names(self.names())).into(),
                context: None,
            });
        }
        Ok(())
    }
}

impl<N: Into<SlotName>> FromIterator<(N, SlotType)> for SeedTemplate {
    fn from_iter<I: IntoIterator<Item = (N, SlotType)>>(iter: I) -> Self {
        Self { slots: iter.into_iter().map(|(name, ty)| (name.into(), ty)).collect() }
    }
}

/// Caller-supplied objects for one materialization, keyed by slot name.
///
/// Inserting a name twice keeps the last value.
///
/// # Examples
/// ```rust
/// use seedbed::SeedData;
///
/// let data = SeedData::new().with("order", 42_u32).with(String::from("User"), "Ada");
/// assert_eq!(data.len(), 2);
/// assert!(data.get(&"user".into()).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    values: Vec<(SlotName, SlotValue)>,
}

impl SeedData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<T: Any + Send + Sync>(self, name: impl Into<SlotName>, value: T) -> Self {
        self.with_value(name, SlotValue::new(value))
    }

    #[must_use]
    pub fn with_shared<T: Any + Send + Sync>(self, name: impl Into<SlotName>, value: Arc<T>) -> Self {
        self.with_value(name, SlotValue::shared(value))
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<SlotName>, value: SlotValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Stores `value` under `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<SlotName>, value: SlotValue) -> Option<SlotValue> {
        let name = name.into();
        if let Some((_, existing)) = self.values.iter_mut().find(|(slot, _)| *slot == name) {
            return Some(std::mem::replace(existing, value));
        }
        self.values.push((name, value));
        None
    }

    #[must_use]
    pub fn get(&self, name: &SlotName) -> Option<&SlotValue> {
        self.values.iter().find(|(slot, _)| slot == name).map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &SlotName> {
        self.values.iter().map(|(name, _)| name)
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

impl<N: Into<SlotName>> FromIterator<(N, SlotValue)> for SeedData {
    fn from_iter<I: IntoIterator<Item = (N, SlotValue)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (name, value) in iter {
            data.insert(name, value);
        }
        data
    }
}

impl IntoIterator for SeedData {
    type Item = (SlotName, SlotValue);
    type IntoIter = std::vec::IntoIter<(SlotName, SlotValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

pub(crate) fn join_names<'a>(names: impl IntoIterator<Item = &'a SlotName>) -> String {
    names.into_iter().map(SlotName::as_str).collect::<Vec<_>>().join(", ")
}
