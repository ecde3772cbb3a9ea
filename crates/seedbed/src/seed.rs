use crate::data::{SlotContext, SlotData, SlotRecord};
use crate::error::SeedError;
use crate::materializer::{Materializer, Recipe};
use crate::slot::{SeedData, SeedTemplate, SlotName};
use crate::target::Seedable;
use crate::types::{SlotType, TypeTag};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// One registered template + recipe pair for target type `T`.
///
/// A seed's identity is the set of its slot names; its target type is fixed at
/// construction.
pub struct Seed<T: Seedable> {
    template: SeedTemplate,
    recipe: Box<dyn Recipe<T>>,
}

impl<T: Seedable> Seed<T> {
    /// Builds a seed whose generators read the dynamic [`SlotData`].
    ///
    /// The template size is not limited here; [`crate::Registry::add_seed`] checks it
    /// against the registry's own `max_template_slots`.
    ///
    /// # Errors
    /// Returns [`SeedError::InvalidTemplate`] for an empty or name-repeating template, or
    /// whatever `recipe` returns (e.g. [`SeedError::UnknownAttribute`]).
    pub fn new<F>(template: SeedTemplate, recipe: F) -> Result<Self, SeedError>
    where
        F: FnOnce(&mut Materializer<T, SlotData>) -> Result<(), SeedError>,
    {
        Self::build::<SlotData, F>(template, usize::MAX, recipe)
    }

    /// Builds a seed from a `#[seed_slots]` record; the template comes from `S`.
    ///
    /// # Errors
    /// Same as [`Seed::new`].
    pub fn from_record<S, F>(recipe: F) -> Result<Self, SeedError>
    where
        S: SlotRecord,
        F: FnOnce(&mut Materializer<T, S>) -> Result<(), SeedError>,
    {
        Self::build::<S, F>(S::template(), usize::MAX, recipe)
    }

    pub(crate) fn build<C, F>(
        template: SeedTemplate,
        max_slots: usize,
        recipe: F,
    ) -> Result<Self, SeedError>
    where
        C: SlotContext,
        F: FnOnce(&mut Materializer<T, C>) -> Result<(), SeedError>,
    {
        template.validate(max_slots)?;

        let mut materializer = Materializer::<T, C>::new(template.names().cloned());
        recipe(&mut materializer)?;

        Ok(Self { template, recipe: Box::new(materializer) })
    }

    /// Constructs a `T` from objects keyed by slot name.
    ///
    /// # Errors
    /// Returns [`SeedError::DataMismatch`] unless the supplied names equal the template's
    /// exactly; generator and constructor errors propagate unchanged.
    pub fn materialize_from(&self, data: SeedData) -> Result<T, SeedError> {
        let slots = SlotData::for_template(&self.template, data)?;
        trace!(
            target_type = std::any::type_name::<T>(),
            slots = slots.len(),
            "Materializing seed"
        );
        self.recipe.merge(slots)
    }

    /// True iff `names` is exactly this seed's slot-name set.
    pub fn matches_keys<'a>(&self, names: impl IntoIterator<Item = &'a SlotName>) -> bool {
        self.template.matches_names(names)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SlotName> {
        self.template.names()
    }

    pub fn types(&self) -> impl Iterator<Item = SlotType> + '_ {
        self.template.types()
    }

    #[must_use]
    pub const fn template(&self) -> &SeedTemplate {
        &self.template
    }

    #[must_use]
    pub fn target(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    /// Attribute names the recipe seeds.
    #[must_use]
    pub fn attributes(&self) -> Vec<&str> {
        self.recipe.attribute_names()
    }
}

impl<T: Seedable> fmt::Debug for Seed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("target", &std::any::type_name::<T>())
            .field("template", &self.template)
            .field("recipe", &self.recipe)
            .finish()
    }
}

/// Type-erased view of a [`Seed`], as returned by covering lookups across target types.
pub trait AnySeed: fmt::Debug + Send + Sync + 'static {
    fn target(&self) -> TypeTag;

    fn template(&self) -> &SeedTemplate;

    /// Materializes the target record behind a `Box<dyn Any>`.
    ///
    /// # Errors
    /// Same as [`Seed::materialize_from`].
    fn materialize_any(&self, data: SeedData) -> Result<Box<dyn Any + Send + Sync>, SeedError>;

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a seed of any target type.
pub type SeedRef = Arc<dyn AnySeed>;

impl<T: Seedable> AnySeed for Seed<T> {
    fn target(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    fn template(&self) -> &SeedTemplate {
        &self.template
    }

    fn materialize_any(&self, data: SeedData) -> Result<Box<dyn Any + Send + Sync>, SeedError> {
        Ok(Box::new(self.materialize_from(data)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn AnySeed {
    pub fn keys(&self) -> impl Iterator<Item = &SlotName> {
        self.template().names()
    }

    pub fn types(&self) -> impl Iterator<Item = SlotType> + '_ {
        self.template().types()
    }

    #[must_use]
    pub fn is_for<T: Seedable>(&self) -> bool {
        self.target() == TypeTag::of::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Seedable>(&self) -> Option<&Seed<T>> {
        self.as_any().downcast_ref::<Seed<T>>()
    }

    /// Materializes a `T`, checking first that this seed targets `T`.
    ///
    /// # Errors
    /// Returns [`SeedError::TargetMismatch`] for a seed of another target type, otherwise
    /// the errors of [`Seed::materialize_from`].
    pub fn materialize<T: Seedable>(&self, data: SeedData) -> Result<T, SeedError> {
        let seed = self.downcast_ref::<T>().ok_or_else(|| SeedError::TargetMismatch {
            message: format!(
                "seed builds {}, not {}",
                self.target(),
                std::any::type_name::<T>()
            )
            .into(),
            context: None,
        })?;
        seed.materialize_from(data)
    }
}
