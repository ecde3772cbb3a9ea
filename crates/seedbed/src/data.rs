use crate::error::SeedError;
use crate::slot::{SeedData, SeedTemplate, SlotName, SlotValue, join_names};
use fxhash::FxHashMap;
use std::any::Any;
use std::sync::Arc;

/// Read-only view of the objects supplied for one materialization.
///
/// Built only after the supplied names were checked against the seed's template,
/// so every template slot is present. Generators read slots through the typed
/// accessors; nothing else is reachable from here.
#[derive(Debug, Clone)]
pub struct SlotData {
    values: FxHashMap<SlotName, SlotValue>,
}

impl SlotData {
    /// Binds `data` to `template`.
    ///
    /// # Errors
    /// Returns [`SeedError::DataMismatch`] unless `data` names exactly the template's
    /// slots: no fewer, no more, no others.
    pub fn for_template(template: &SeedTemplate, data: SeedData) -> Result<Self, SeedError> {
        if !template.matches_names(data.names()) {
            return Err(SeedError::DataMismatch {
                message: format!(
                    "expected [{}], got [{}]",
                    join_names(template.names()),
                    join_names(data.names())
                )
                .into(),
                context: None,
            });
        }

        Ok(Self { values: data.into_iter().collect() })
    }

    /// The raw slot value.
    ///
    /// # Errors
    /// Returns [`SeedError::SlotMissing`] if `name` is not one of the slots.
    pub fn value(&self, name: impl Into<SlotName>) -> Result<&SlotValue, SeedError> {
        let name = name.into();
        self.values.get(&name).ok_or_else(|| SeedError::SlotMissing {
            message: format!("no slot named `{name}`").into(),
            context: None,
        })
    }

    /// Borrows the object in slot `name` as a `T`.
    ///
    /// # Errors
    /// Returns [`SeedError::SlotMissing`] or [`SeedError::SlotTypeMismatch`].
    pub fn get<T: Any>(&self, name: impl Into<SlotName>) -> Result<&T, SeedError> {
        let name = name.into();
        let value = self.value(&name)?;
        value.downcast_ref::<T>().ok_or_else(|| type_mismatch::<T>(&name, value))
    }

    /// Shares the object in slot `name` as an `Arc<T>`.
    ///
    /// # Errors
    /// Returns [`SeedError::SlotMissing`] or [`SeedError::SlotTypeMismatch`].
    pub fn shared<T: Any + Send + Sync>(
        &self,
        name: impl Into<SlotName>,
    ) -> Result<Arc<T>, SeedError> {
        let name = name.into();
        let value = self.value(&name)?;
        value.downcast_arc::<T>().ok_or_else(|| type_mismatch::<T>(&name, value))
    }

    /// Clones the object in slot `name` out as a `T`.
    ///
    /// # Errors
    /// Returns [`SeedError::SlotMissing`] or [`SeedError::SlotTypeMismatch`].
    pub fn cloned<T: Any + Clone>(&self, name: impl Into<SlotName>) -> Result<T, SeedError> {
        self.get::<T>(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &SlotName) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &SlotName> {
        self.values.keys()
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

fn type_mismatch<T: Any>(name: &SlotName, value: &SlotValue) -> SeedError {
    SeedError::SlotTypeMismatch {
        message: format!(
            "slot `{name}` holds {}, requested {}",
            value.runtime_type(),
            std::any::type_name::<T>()
        )
        .into(),
        context: None,
    }
}

/// The evaluation context recipe generators receive.
///
/// [`SlotData`] is the dynamic context; `#[seed_slots]` structs are the
/// statically-shaped one.
pub trait SlotContext: Sized + 'static {
    /// Builds the context from already-validated slot data.
    ///
    /// # Errors
    /// Returns the slot access errors of [`SlotData`].
    fn from_slot_data(data: SlotData) -> Result<Self, SeedError>;
}

impl SlotContext for SlotData {
    fn from_slot_data(data: SlotData) -> Result<Self, SeedError> {
        Ok(data)
    }
}

/// A statically-shaped slot record that also knows its own template.
///
/// Implemented by `#[seed_slots]`.
pub trait SlotRecord: SlotContext {
    fn template() -> SeedTemplate;
}
