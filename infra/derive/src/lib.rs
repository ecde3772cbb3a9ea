#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the seedbed workspace.
//! This crate provides attribute macros that remove the boilerplate around
//! error enums and statically-shaped seed slot records.
//!
//! ## Usage
//! `seedbed` re-exports `seed_slots`; crates that declare their own error enums
//! depend on this crate directly:
//! ```toml
//! [dependencies]
//! seedbed-derive = { path = "../infra/derive" }
//! ```
//!
//! Doc examples are `ignore`d here; `tests/ui` compiles the real cases with `trybuild`.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Turns an enum into a workspace error type.
///
/// Each variant is a struct variant carrying either a `message: Cow<'static, str>`
/// or a `source` error, plus an optional `context: Option<Cow<'static, str>>`.
/// The expansion adds:
///
/// * `#[derive(Debug, thiserror::Error)]`, unless already derived.
/// * A `<Name>Ext` trait whose `.context(..)` annotates a failed `Result`, for
///   `Result<_, Name>` and for `Result<_, S>` of every source type `S`.
/// * `From<S>` for every source-carrying variant, so `?` converts upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for `#[error(..)]` strings.
///
/// Tuple variants, unit variants and sources without a `context` field are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use seedbed_derive::seedbed_error;
/// use std::borrow::Cow;
///
/// #[seedbed_error]
/// pub enum QuantityError {
///     #[error("Bad quantity{}: {source}", format_context(.context))]
///     Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
///
///     #[error("Quantity error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn quantity(raw: &str) -> Result<u32, QuantityError> {
///     raw.parse::<u32>().context("Reading order quantity")
/// }
/// ```
#[proc_macro_attribute]
pub fn seedbed_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro that turns a struct into a statically-shaped seed slot record.
///
/// Every named field becomes one slot: the field name is the slot name and the
/// field type is the declared slot type. `Arc<T>` fields declare a `T` slot and
/// share the caller's object instead of cloning it; every other field type must
/// be `Clone`.
///
/// The struct gains `seedbed::SlotContext` (conversion from `SlotData`) and
/// `seedbed::SlotRecord` (the generated `SeedTemplate`).
///
/// # Example
///
/// ```rust,ignore
/// use seedbed::seed_slots;
/// use std::sync::Arc;
///
/// #[seed_slots]
/// struct Checkout {
///     user: User,
///     order: Arc<Order>,
/// }
///
/// registry.seed_with_record::<Invoice, Checkout>(|recipe| {
///     recipe.attribute("total_price", |slots: &Checkout| Ok(slots.order.total()))?;
///     Ok(())
/// })?;
/// ```
#[proc_macro_attribute]
pub fn seed_slots(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slots::expand_slots(input).into()
}
