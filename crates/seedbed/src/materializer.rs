use crate::data::{SlotContext, SlotData};
use crate::error::SeedError;
use crate::slot::SlotName;
use crate::target::{AttributeMap, AttributeName, AttributeValue, Seedable};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

type Generator<C> = Box<dyn Fn(&C) -> Result<AttributeValue, SeedError> + Send + Sync>;

/// Holds a seed's recipe: one generator per target attribute.
///
/// A materializer is bound to its target type `T` and to the template's slot
/// names. Generators receive the slot context `C` (dynamic [`SlotData`] by
/// default, or a `#[seed_slots]` record) and nothing else.
///
/// Registering an attribute `T` does not declare fails immediately with
/// [`SeedError::UnknownAttribute`]. Registering an attribute twice keeps the
/// last generator.
pub struct Materializer<T, C = SlotData> {
    slot_names: Box<[SlotName]>,
    generators: Vec<(AttributeName, Generator<C>)>,
    _marker: PhantomData<fn() -> (T, C)>,
}

impl<T: Seedable, C: SlotContext> Materializer<T, C> {
    pub(crate) fn new(slot_names: impl IntoIterator<Item = SlotName>) -> Self {
        Self { slot_names: slot_names.into_iter().collect(), generators: Vec::new(), _marker: PhantomData }
    }

    /// Seeds `name` with the value `generator` computes from the slot context.
    ///
    /// # Errors
    /// Returns [`SeedError::UnknownAttribute`] if `T` does not declare `name`.
    ///
    /// # Examples
    /// ```rust
    /// # use seedbed::{AttributeMap, SeedError, SeedTemplate, Seedable, Registry};
    /// # #[derive(Debug)]
    /// # struct Label { text: String }
    /// # impl Seedable for Label {
    /// #     fn has_attribute(name: &str) -> bool { name == "text" }
    /// #     fn construct(mut a: AttributeMap) -> Result<Self, SeedError> {
    /// #         Ok(Self { text: a.take("text")? })
    /// #     }
    /// # }
    /// let registry = Registry::new();
    /// registry.seed_with::<Label, _>(SeedTemplate::new().slot::<u32>("count"), |recipe| {
    ///     recipe.attribute("text", |slots| Ok(format!("{} items", slots.get::<u32>("count")?)))?;
    ///     assert!(recipe.attribute("colour", |_| Ok(0_u8)).is_err());
    ///     Ok(())
    /// })?;
    /// # Ok::<(), SeedError>(())
    /// ```
    pub fn attribute<V, F>(
        &mut self,
        name: impl Into<AttributeName>,
        generator: F,
    ) -> Result<&mut Self, SeedError>
    where
        V: Any + Send + Sync,
        F: Fn(&C) -> Result<V, SeedError> + Send + Sync + 'static,
    {
        let name = self.declared(name.into())?;
        self.store(name, Box::new(move |context| generator(context).map(AttributeValue::new)));
        Ok(self)
    }

    /// Seeds `name` with a clone of a fixed value.
    ///
    /// # Errors
    /// Returns [`SeedError::UnknownAttribute`] if `T` does not declare `name`.
    pub fn constant<V>(&mut self, name: impl Into<AttributeName>, value: V) -> Result<&mut Self, SeedError>
    where
        V: Any + Clone + Send + Sync,
    {
        let name = self.declared(name.into())?;
        self.store(name, Box::new(move |_| Ok(AttributeValue::new(value.clone()))));
        Ok(self)
    }

    /// Evaluates every generator against `data` and constructs a `T`.
    ///
    /// # Errors
    /// Propagates context-building, generator and constructor errors unchanged.
    pub fn merge(&self, data: SlotData) -> Result<T, SeedError> {
        let context = C::from_slot_data(data)?;

        let mut attributes = AttributeMap::with_capacity(self.generators.len());
        for (name, generator) in &self.generators {
            attributes.insert(name.clone(), generator(&context)?);
        }

        trace!(
            target_type = std::any::type_name::<T>(),
            attributes = attributes.len(),
            "Constructing seeded record"
        );
        T::construct(attributes)
    }

    #[must_use]
    pub fn slot_names(&self) -> &[SlotName] {
        &self.slot_names
    }

    /// Seeded attribute names, in registration order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.generators.iter().map(|(name, _)| name.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    fn declared(&self, name: AttributeName) -> Result<AttributeName, SeedError> {
        if T::has_attribute(&name) {
            return Ok(name);
        }
        Err(SeedError::UnknownAttribute {
            message: format!("{} does not declare `{name}`", std::any::type_name::<T>()).into(),
            context: None,
        })
    }

    fn store(&mut self, name: AttributeName, generator: Generator<C>) {
        match self.generators.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = generator,
            None => self.generators.push((name, generator)),
        }
    }
}

impl<T, C> fmt::Debug for Materializer<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Materializer")
            .field("target", &std::any::type_name::<T>())
            .field("slot_names", &self.slot_names)
            .field("attributes", &self.generators.iter().map(|(name, _)| name).collect::<Vec<_>>())
            .finish()
    }
}

/// Object-safe face of a [`Materializer`], so seeds can hide their slot context type.
pub(crate) trait Recipe<T>: fmt::Debug + Send + Sync {
    fn merge(&self, data: SlotData) -> Result<T, SeedError>;

    fn attribute_names(&self) -> Vec<&str>;
}

impl<T: Seedable, C: SlotContext> Recipe<T> for Materializer<T, C> {
    fn merge(&self, data: SlotData) -> Result<T, SeedError> {
        Self::merge(self, data)
    }

    fn attribute_names(&self) -> Vec<&str> {
        self.attributes().collect()
    }
}
