use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, GenericArgument, ItemStruct, LitStr, PathArguments, Type};

/// How a field is pulled out of `SlotData`.
enum Extraction<'a> {
    /// `Arc<T>` fields share the caller's object.
    Shared(&'a Type),
    /// Any other field is cloned out of the slot.
    Cloned(&'a Type),
}

impl Extraction<'_> {
    fn slot_type(&self) -> &Type {
        match self {
            Self::Shared(ty) | Self::Cloned(ty) => ty,
        }
    }
}

pub fn expand_slots(input: ItemStruct) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Fields::Named(fields) = &input.fields else {
        return syn::Error::new_spanned(&input.ident, "seed_slots requires a struct with named fields")
            .to_compile_error();
    };
    if fields.named.is_empty() {
        return syn::Error::new_spanned(&input.ident, "seed_slots requires at least one slot field")
            .to_compile_error();
    }

    let mut template_slots = Vec::new();
    let mut field_inits = Vec::new();

    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        let slot = ident.to_string();
        let slot = LitStr::new(slot.strip_prefix("r#").unwrap_or(&slot), ident.span());

        let extraction = classify(&field.ty);
        let slot_type = extraction.slot_type();
        template_slots.push(quote! { .slot::<#slot_type>(#slot) });
        field_inits.push(match extraction {
            Extraction::Shared(ty) => quote! { #ident: data.shared::<#ty>(#slot)? },
            Extraction::Cloned(ty) => quote! { #ident: data.cloned::<#ty>(#slot)? },
        });
    }

    quote! {
        #input

        #[automatically_derived]
        impl #impl_generics ::seedbed::SlotContext for #name #ty_generics #where_clause {
            fn from_slot_data(data: ::seedbed::SlotData) -> ::std::result::Result<Self, ::seedbed::SeedError> {
                ::std::result::Result::Ok(Self { #(#field_inits,)* })
            }
        }

        #[automatically_derived]
        impl #impl_generics ::seedbed::SlotRecord for #name #ty_generics #where_clause {
            fn template() -> ::seedbed::SeedTemplate {
                ::seedbed::SeedTemplate::new() #(#template_slots)*
            }
        }
    }
}

fn classify(ty: &Type) -> Extraction<'_> {
    let Type::Path(path) = ty else {
        return Extraction::Cloned(ty);
    };
    let Some(segment) = path.path.segments.last() else {
        return Extraction::Cloned(ty);
    };
    if segment.ident != "Arc" {
        return Extraction::Cloned(ty);
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Extraction::Shared(inner),
            _ => Extraction::Cloned(ty),
        },
        _ => Extraction::Cloned(ty),
    }
}
