use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, LitStr, Result};

use crate::container::Container;

pub(crate) fn expand_from_records(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromRecords` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromRecords` may only be derived on structs with named fields.",
        ))?
    };

    let mut seen = HashSet::new();
    let mut cases = Vec::new();

    for field in &fields.named {
        let Some(record) = record_name(field)? else {
            continue;
        };

        if !seen.insert(record.value()) {
            Err(Error::new(record.span(), "Record names must be unique."))?
        }

        let ident = &field.ident;

        // Each occurrence of a record starts a fresh receiver.
        let receiver = match Container::of(&field.ty)? {
            Container::Option(_) => quote! {
                Some(self.#ident.insert(::core::default::Default::default()))
            },
            Container::Vec => quote! {{
                self.#ident.push(::core::default::Default::default());
                self.#ident.last_mut().map(|r| r as _)
            }},
        };

        cases.push(quote! { #record => #receiver, });
    }

    let name = &input.ident;

    let expanded = quote! {
        impl ::stdf_reader::avec::FromRecords for #name {
            fn add_record(&mut self, name: &str) -> Option<&mut dyn ::stdf_reader::avec::FromRecord> {
                match name {
                    #(#cases)*
                    _ => None,
                }
            }
        }
    };

    Ok(expanded.into())
}

/// The record name given by a `#[record("NAME")]` attribute, if present.
fn record_name(field: &Field) -> Result<Option<LitStr>> {
    field
        .attrs
        .iter()
        .find(|a| a.path().is_ident("record"))
        .map(|attr| attr.parse_args::<LitStr>())
        .transpose()
}
