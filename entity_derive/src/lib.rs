//! Procedural macros for repository entities
//!
//! This crate provides the `Entity` derive and the `#[model]` attribute,
//! which implement `row_store::Entity` for a struct with a `#[primary_key]`
//! field. Generated code refers to `row_store::...`, which is in scope after
//! `use repohaus::prelude::*;`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod model_macro;
mod parsing;

use model_macro::model_attribute;
use parsing::{parse_field_attributes, parse_table_attributes};

/// Derive macro for the `Entity` trait
///
/// The key field may be `Option<T>` (new entities carry `None` until the
/// store generates a key) or a plain `T`. `#[table(name = "...")]` is
/// optional and lets `Repository::for_entity` find the table.
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
/// #[table(name = "users")]
/// pub struct User {
///     #[primary_key]
///     pub id: Option<i64>,
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(table, primary_key))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table_info = match parse_table_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let field_info = match parse_field_attributes(&input) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let field = &field_info.primary_key_field;
    let column = &field_info.primary_key_column;
    let id_type = &field_info.id_type;

    let table = match &table_info.name {
        Some(table) => quote! { Some(#table) },
        None => quote! { None },
    };

    let (get_id, set_id) = if field_info.optional {
        (
            quote! { self.#field.clone() },
            quote! { self.#field = Some(id); },
        )
    } else {
        (
            quote! { Some(self.#field.clone()) },
            quote! { self.#field = id; },
        )
    };

    let expanded = quote! {
        impl #impl_generics row_store::Entity for #name #ty_generics #where_clause {
            type Id = #id_type;

            const PRIMARY_KEY: &'static str = #column;

            const TABLE: Option<&'static str> = #table;

            fn id(&self) -> Option<Self::Id> {
                #get_id
            }

            fn set_id(&mut self, id: Self::Id) {
                #set_id
            }
        }
    };

    TokenStream::from(expanded)
}

/// Convenience attribute macro that adds all necessary derives for an entity
///
/// Usage:
/// ```rust,ignore
/// use repohaus::prelude::*;
///
/// #[model]
/// #[table(name = "users")]
/// pub struct User {
///     #[primary_key]
///     pub id: Option<i64>,
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
