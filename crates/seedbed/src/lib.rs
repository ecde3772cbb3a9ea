//! # Seedbed
//!
//! A typed registry of *seeds*: recipes that turn a named, typed set of domain
//! objects into a fully built record.
//!
//! ## Overview
//!
//! A target type registers one or more seeds. Each seed declares a template
//! (slot name → slot type) and a recipe (one generator per target attribute).
//! Callers can then:
//!
//! * **Materialize by name**: hand over objects keyed by slot name and get the
//!   record built by the seed declaring exactly those names.
//! * **Discover by type**: hand over bare objects and get every seed, of any
//!   target type, that those objects can fill one-to-one.
//!
//! ## Features
//!
//! * **Type-Safe**: Targets implement [`Seedable`]; recipes are checked against
//!   the target's attributes when they are registered.
//! * **Covering Lookup**: Bipartite matching with declared subtypes
//!   ([`Registry::declare_subtype`]).
//! * **Static Slot Records**: `#[seed_slots]` structs give generators typed fields.
//! * **Thread Safe**: `FxHashMap` + `parking_lot::RwLock` behind a cloneable [`Registry`].
//!
//! # Example
//!
//! ```rust
//! use seedbed::{AttributeMap, Registry, SeedData, SeedError, SeedTemplate, Seedable, SlotValue};
//!
//! #[derive(Debug, Clone)]
//! struct Order { product_name: String, quantity: u32, unit_price: f64 }
//!
//! #[derive(Debug)]
//! struct Invoice { name: String, total_price: f64 }
//!
//! impl Seedable for Invoice {
//!     fn has_attribute(name: &str) -> bool {
//!         matches!(name, "name" | "total_price")
//!     }
//!
//!     fn construct(mut attributes: AttributeMap) -> Result<Self, SeedError> {
//!         Ok(Self {
//!             name: attributes.take_or_default("name")?,
//!             total_price: attributes.take_or_default("total_price")?,
//!         })
//!     }
//! }
//!
//! fn main() -> Result<(), SeedError> {
//!     let registry = Registry::new();
//!     registry.seed_with::<Invoice, _>(SeedTemplate::new().slot::<Order>("order"), |recipe| {
//!         recipe
//!             .attribute("name", |slots| Ok(slots.get::<Order>("order")?.product_name.clone()))?
//!             .attribute("total_price", |slots| {
//!                 let order = slots.get::<Order>("order")?;
//!                 Ok(f64::from(order.quantity) * order.unit_price)
//!             })?;
//!         Ok(())
//!     })?;
//!
//!     let order = Order { product_name: "Foo".into(), quantity: 3, unit_price: 4.0 };
//!
//!     let invoice: Invoice = registry.materialize_with(SeedData::new().with("order", order.clone()))?;
//!     assert_eq!(invoice.name, "Foo");
//!     assert!((invoice.total_price - 12.0).abs() < f64::EPSILON);
//!
//!     let seeds = registry.available_seeds_for(&[SlotValue::new(order)]);
//!     assert_eq!(seeds.len(), 1);
//!     Ok(())
//! }
//! ```

mod config;
mod data;
mod error;
mod materializer;
mod name_index;
mod registry;
mod seed;
mod seed_registry;
mod slot;
mod target;
mod type_index;
mod types;

pub use crate::config::{
    ConfigError, ConfigErrorExt, DEFAULT_MAX_TEMPLATE_SLOTS, RegistryConfig, load_config,
};
pub use data::{SlotContext, SlotData, SlotRecord};
pub use error::{SeedError, SeedErrorExt};
pub use materializer::Materializer;
pub use name_index::NameIndex;
pub use registry::Registry;
pub use seed::{AnySeed, Seed, SeedRef};
pub use seed_registry::SeedRegistry;
pub use seedbed_derive::seed_slots;
pub use slot::{SeedData, SeedTemplate, SlotName, SlotValue};
pub use target::{AttributeMap, AttributeName, AttributeValue, Seedable};
pub use type_index::{SharedTypeIndex, TypeIndex, TypeKey, covers};
pub use types::{SlotType, TypeHierarchy, TypeTag};

/// The names most callers need, for glob import.
pub mod prelude {
    pub use crate::{
        AnySeed, AttributeMap, Registry, SeedData, SeedError, SeedErrorExt, SeedTemplate, Seedable,
        SlotData, SlotValue, seed_slots,
    };
}
