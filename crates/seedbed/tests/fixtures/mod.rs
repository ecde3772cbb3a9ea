#![allow(dead_code)]

use seedbed::prelude::*;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct Invoice {
    pub name: String,
    pub total_price: f64,
    pub customer: Option<String>,
}

impl Seedable for Invoice {
    fn has_attribute(name: &str) -> bool {
        matches!(name, "name" | "total_price" | "customer")
    }

    fn construct(mut attributes: AttributeMap) -> Result<Self, SeedError> {
        Ok(Self {
            name: attributes.take_or_default("name")?,
            total_price: attributes.take_or_default("total_price")?,
            customer: attributes.take_or_default("customer")?,
        })
    }
}

/// A second target type, for lookups that span targets.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub summary: String,
}

impl Seedable for Report {
    fn has_attribute(name: &str) -> bool {
        name == "summary"
    }

    fn construct(mut attributes: AttributeMap) -> Result<Self, SeedError> {
        Ok(Self { summary: attributes.take("summary")? })
    }
}

/// Abstract numeric slot type; integers become subtypes of it by declaration.
pub struct Number;

pub type Hash = HashMap<String, String>;
pub type Array = Vec<String>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[must_use]
pub fn order() -> Order {
    Order { product_name: "Foo".into(), quantity: 3, unit_price: 4.00 }
}

#[must_use]
pub fn user() -> User {
    User { name: "Ada".into() }
}

/// A registry with a single `Invoice` seed over `{order: Order}`.
/// # Panics
/// * If the seed cannot be registered.
#[must_use]
pub fn invoice_registry() -> Registry {
    init_tracing();

    let registry = Registry::new();
    registry
        .seed_with::<Invoice, _>(SeedTemplate::new().slot::<Order>("order"), |recipe| {
            recipe
                .attribute("name", |slots| Ok(slots.get::<Order>("order")?.product_name.clone()))?
                .attribute("total_price", |slots| {
                    let order = slots.get::<Order>("order")?;
                    Ok(f64::from(order.quantity) * order.unit_price)
                })?;
            Ok(())
        })
        .expect("Invoice seed registration failed");
    registry
}

/// Registers a seed with no generators, for lookup-only tests.
/// # Panics
/// * If the seed cannot be registered.
pub fn bare_seed<T: Seedable>(registry: &Registry, template: SeedTemplate) {
    registry.seed_with::<T, _>(template, |_| Ok(())).expect("Bare seed registration failed");
}
