use crate::config::{ConfigError, RegistryConfig};
use crate::data::{SlotData, SlotRecord};
use crate::error::SeedError;
use crate::materializer::Materializer;
use crate::seed::{Seed, SeedRef};
use crate::seed_registry::SeedRegistry;
use crate::slot::{SeedData, SeedTemplate, SlotName, SlotValue, join_names};
use crate::target::Seedable;
use crate::type_index::SharedTypeIndex;
use crate::types::TypeTag;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type TargetMap = FxHashMap<TypeId, Box<dyn Any + Send + Sync>>;

/// Entry point: one [`SeedRegistry`] per target type plus the type index they share.
///
/// `Registry` is a cheap handle; clones see the same seeds. Recipes and
/// materialization run outside the internal locks, so generators may call back
/// into the registry.
///
/// # Examples
/// ```rust
/// use seedbed::{AttributeMap, Registry, SeedData, SeedError, SeedTemplate, Seedable};
///
/// #[derive(Debug)]
/// struct Greeting {
///     text: String,
/// }
///
/// impl Seedable for Greeting {
///     fn has_attribute(name: &str) -> bool {
///         name == "text"
///     }
///
///     fn construct(mut attributes: AttributeMap) -> Result<Self, SeedError> {
///         Ok(Self { text: attributes.take("text")? })
///     }
/// }
///
/// let registry = Registry::new();
/// registry.seed_with::<Greeting, _>(SeedTemplate::new().slot::<String>("name"), |recipe| {
///     recipe.attribute("text", |slots| Ok(format!("Hello, {}!", slots.get::<String>("name")?)))?;
///     Ok(())
/// })?;
///
/// let greeting: Greeting = registry.materialize_with(SeedData::new().with("name", String::from("Ada")))?;
/// assert_eq!(greeting.text, "Hello, Ada!");
/// # Ok::<(), SeedError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    config: RegistryConfig,
    types: SharedTypeIndex,
    targets: RwLock<TargetMap>,
}

impl fmt::Debug for RegistryInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryInner")
            .field("config", &self.config)
            .field("targets", &self.targets.read().len())
            .field("seeds", &self.types.len())
            .finish()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry bound to `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `config` fails [`RegistryConfig::validate`].
    pub fn with_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { inner: Arc::new(RegistryInner { config, ..RegistryInner::default() }) })
    }

    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    /// Registers a seed for `T` whose generators read the dynamic [`SlotData`].
    ///
    /// # Errors
    /// * [`SeedError::InvalidTemplate`] for an empty, oversized or name-repeating template.
    /// * [`SeedError::UnknownAttribute`] when the recipe seeds an attribute `T` lacks.
    /// * [`SeedError::DuplicateSeed`] when `T` already has a seed with these slot names.
    pub fn seed_with<T, F>(&self, template: SeedTemplate, recipe: F) -> Result<Arc<Seed<T>>, SeedError>
    where
        T: Seedable,
        F: FnOnce(&mut Materializer<T, SlotData>) -> Result<(), SeedError>,
    {
        let seed = Arc::new(Seed::build::<SlotData, F>(template, self.inner.config.max_template_slots, recipe)?);
        self.add_seed(Arc::clone(&seed))?;
        Ok(seed)
    }

    /// Registers a seed for `T` whose generators read the `#[seed_slots]` record `S`.
    ///
    /// # Errors
    /// Same as [`Registry::seed_with`].
    pub fn seed_with_record<T, S, F>(&self, recipe: F) -> Result<Arc<Seed<T>>, SeedError>
    where
        T: Seedable,
        S: SlotRecord,
        F: FnOnce(&mut Materializer<T, S>) -> Result<(), SeedError>,
    {
        let seed = Arc::new(Seed::build::<S, F>(S::template(), self.inner.config.max_template_slots, recipe)?);
        self.add_seed(Arc::clone(&seed))?;
        Ok(seed)
    }

    /// Registers an already built seed.
    ///
    /// # Errors
    /// [`SeedError::InvalidTemplate`] if the template exceeds this registry's limit,
    /// [`SeedError::DuplicateSeed`] on a slot-name collision.
    pub fn add_seed<T: Seedable>(&self, seed: Arc<Seed<T>>) -> Result<(), SeedError> {
        seed.template().validate(self.inner.config.max_template_slots)?;

        let mut targets = self.inner.targets.write();
        let entry = targets
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SeedRegistry::<T>::new(self.inner.types.clone())));
        let registry = entry
            .downcast_mut::<SeedRegistry<T>>()
            .ok_or_else(misplaced_registry::<T>)?;
        registry.add_seed(seed)
    }

    /// Builds a `T` with the seed whose slot names equal the keys of `data`.
    ///
    /// # Errors
    /// [`SeedError::SeedNotFound`] if no seed of `T` declares exactly these names;
    /// otherwise the generator and constructor errors of the chosen seed.
    pub fn materialize_with<T: Seedable>(&self, data: SeedData) -> Result<T, SeedError> {
        let seed = self.find_seed::<T>(data.names()).ok_or_else(|| SeedError::SeedNotFound {
            message: format!(
                "{} has no seed for [{}]",
                std::any::type_name::<T>(),
                join_names(data.names())
            )
            .into(),
            context: None,
        })?;
        seed.materialize_from(data)
    }

    /// The seed of `T` declaring exactly `names`.
    pub fn find_seed<'a, T: Seedable>(
        &self,
        names: impl IntoIterator<Item = &'a SlotName>,
    ) -> Option<Arc<Seed<T>>> {
        let targets = self.inner.targets.read();
        registry_of::<T>(&targets).and_then(|registry| registry.find_by_names(names))
    }

    /// Seeds of `T` in registration order.
    #[must_use]
    pub fn seeds<T: Seedable>(&self) -> Vec<Arc<Seed<T>>> {
        let targets = self.inner.targets.read();
        registry_of::<T>(&targets).map(|registry| registry.iter().cloned().collect()).unwrap_or_default()
    }

    #[must_use]
    pub fn has_seeds<T: Seedable>(&self) -> bool {
        let targets = self.inner.targets.read();
        registry_of::<T>(&targets).is_some_and(|registry| !registry.is_empty())
    }

    /// Every seed, of any target type, whose slot types the objects can fill one-to-one.
    ///
    /// Never fails; an empty result means nothing matched.
    #[must_use]
    pub fn available_seeds_for(&self, objects: &[SlotValue]) -> Vec<SeedRef> {
        let seeds = self.inner.types.find_seeds_for_objects(objects);
        trace!(objects = objects.len(), found = seeds.len(), "Looked up available seeds");
        seeds
    }

    /// Like [`Registry::available_seeds_for`], from runtime types alone.
    #[must_use]
    pub fn available_seeds_for_types(&self, types: &[TypeTag]) -> Vec<SeedRef> {
        self.inner.types.find_seeds_for_types(types)
    }

    /// Lets objects of `Sub` fill slots declared as `Sup`.
    ///
    /// Returns `false` if the relation was already declared.
    pub fn declare_subtype<Sub, Sup>(&self) -> bool
    where
        Sub: ?Sized + 'static,
        Sup: ?Sized + 'static,
    {
        self.inner.types.declare(TypeTag::of::<Sub>(), TypeTag::of::<Sup>())
    }

    #[must_use]
    pub fn is_subtype_or_equal(&self, sub: TypeTag, sup: TypeTag) -> bool {
        self.inner.types.is_subtype_or_equal(sub, sup)
    }

    #[must_use]
    pub fn type_index(&self) -> &SharedTypeIndex {
        &self.inner.types
    }

    /// Number of target types with a registry.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.inner.targets.read().len()
    }

    /// Drops every seed of every target type and empties the type index.
    ///
    /// Declared subtypes survive. Returns the number of seeds dropped.
    pub fn clear(&self) -> usize {
        let mut targets = self.inner.targets.write();
        let target_count = targets.len();
        targets.clear();
        let seed_count = self.inner.types.clear();

        debug!(targets = target_count, seeds = seed_count, "Cleared registry");
        seed_count
    }
}

fn registry_of<T: Seedable>(targets: &TargetMap) -> Option<&SeedRegistry<T>> {
    targets.get(&TypeId::of::<T>()).and_then(|entry| entry.downcast_ref::<SeedRegistry<T>>())
}

fn misplaced_registry<T>() -> SeedError {
    SeedError::Internal {
        message: format!("registry entry for {} has another type", std::any::type_name::<T>()).into(),
        context: None,
    }
}
