use std::collections::HashSet;

use proc_macro::{Span, TokenStream};
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, LitStr, Pat, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

use crate::container::Container;

pub(crate) fn expand_from_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromRecord` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromRecord` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    type Case = (Ident, Type, Option<(Type, ExprClosure)>);
    let mut value_cases: Vec<(LitStr, Case)> = Vec::new();
    let mut header_case: Option<Ident> = None;
    let mut seen = HashSet::new();

    for field in fields {
        match field.identifier {
            FieldIdentifier::Name(name) => {
                if !seen.insert(name.value()) {
                    Err(Error::new(name.span(), "Field names must be unique."))?
                }

                value_cases.push((name, (field.name, field.primitive, field.handler)));
            }
            FieldIdentifier::Header => {
                let existing = header_case.replace(field.name);

                if existing.is_some() {
                    Err(Error::new(
                        field.span.into(),
                        "Field names must be unique.",
                    ))?;
                }
            }
        }
    }

    let value = quote! { ::stdf_reader::sans::data::Value };

    let cases = value_cases
        .into_iter()
        .map(|(literal, (name, primitive, handler))| {
            let convert = quote! {
                <#primitive as ::core::convert::TryFrom<&#value>>::try_from(value)
            };

            let assignment = if let Some((field_type, handler)) = handler {
                let body = handler.body;
                let acc = handler.inputs.iter().nth(0).unwrap();
                let val = handler.inputs.iter().nth(1).unwrap();

                quote! {
                    for value in value.items() {
                        if let Ok(value) = #convert {
                            (|#acc: &mut #field_type, #val| {#body})(&mut self.#name, value)
                        }
                    }
                }
            } else {
                quote! {
                    if let Ok(value) = #convert {
                        self.#name = Some(value)
                    }
                }
            };

            quote! { #literal => { #assignment } }
        });

    let header_method = header_case.map(|name| {
        quote! {
            fn add_header(&mut self, header: &::stdf_reader::sans::header::RecordHeader) {
                self.#name = Some(*header);
            }
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl ::stdf_reader::avec::FromRecord for #name {
            fn add_value(&mut self, field: &str, value: &#value) {
                match field {
                    #(#cases)*
                    _ => {}
                };
            }

            #header_method
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    primitive: Type,
    identifier: FieldIdentifier,
    handler: Option<(Type, ExprClosure)>,
    span: Span,
}

#[derive(Debug)]
enum FieldIdentifier {
    Name(LitStr),
    Header,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(None);
        };

        let span = attr.span().unwrap();

        let FieldAttribute {
            identifier,
            handler,
        } = attr.meta.require_list()?.parse_args()?;

        let primitive = if let Some(handler) = &handler {
            let Some(parameter) = handler.inputs.iter().nth(1) else {
                Err(Error::new_spanned(
                    handler,
                    "Handler closure must have two parameters.",
                ))?
            };

            let Pat::Type(pat_type) = parameter else {
                Err(Error::new_spanned(
                    parameter,
                    "Handler closure's second parameter must be annotated with the expected element type.",
                ))?
            };

            (*pat_type.ty).clone()
        } else {
            let Container::Option(inner) = Container::of(&field.ty)? else {
                Err(Error::new_spanned(
                    &field.ty,
                    "Field without a handler must have type `Option<T>`.",
                ))?
            };

            inner.clone()
        };

        if matches!(identifier, FieldIdentifier::Header) && handler.is_some() {
            Err(Error::new_spanned(
                &field.ty,
                "The record header cannot be received through a handler.",
            ))?
        }

        let handler = handler.map(|h| (field.ty.clone(), h));

        Ok(Some(Self {
            name,
            primitive,
            identifier,
            handler,
            span,
        }))
    }
}

#[derive(Debug)]
struct FieldAttribute {
    identifier: FieldIdentifier,
    handler: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let identifier = if let Ok(ident) = input.parse::<Ident>() {
            if ident == "header" {
                FieldIdentifier::Header
            } else {
                Err(Error::new_spanned(
                    ident,
                    "Field identifier must be a string literal or `header`.",
                ))?
            }
        } else {
            FieldIdentifier::Name(input.parse::<LitStr>()?)
        };

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self {
            identifier,
            handler,
        })
    }
}
