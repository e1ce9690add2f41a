//! Procedural macros for formguard
//!
//! - `#[derive(Record)]` - expose a struct's fields to
//!   `RuleSet::validate_record`
//!
//! Field attributes:
//!
//! - `#[record(rename = "Name")]` - use a different key segment
//! - `#[record(skip)]` - never validate this field

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive `formguard::Record` for a struct with named fields.
///
/// Each field is reported under its name (or its `rename`) and shaped by
/// `formguard::AsField`: strings are validated, other derived records are
/// walked with a dotted prefix, everything else is skipped. The derive also
/// implements `AsField` for the struct itself, so it can be nested.
///
/// # Example
///
/// ```rust,ignore
/// use formguard::Record;
///
/// #[derive(Record)]
/// struct Signup {
///     email: String,
///     #[record(rename = "zip")]
///     postal_code: String,
///     #[record(skip)]
///     referrer: String,
///     address: Address,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Options collected from `#[record(...)]` on one field.
#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
}

fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                if name.value().is_empty() || name.value().contains('.') {
                    return Err(syn::Error::new_spanned(
                        name,
                        "record field names must be non-empty and contain no '.'",
                    ));
                }
                options.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(options)
}

fn expand_record(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let named: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ))
        }
    };

    let mut entries = Vec::with_capacity(named.len());
    for field in named {
        let options = field_options(field)?;
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        // Raw identifiers keep their `r#` prefix in to_string().
        let key = options
            .rename
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());

        let value = if options.skip {
            quote!(::formguard::Field::Other)
        } else {
            quote!(::formguard::AsField::as_field(&self.#ident))
        };
        entries.push(quote!((#key, #value)));
    }

    Ok(quote! {
        impl #impl_generics ::formguard::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<(&'static str, ::formguard::Field<'_>)> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics ::formguard::AsField for #name #ty_generics #where_clause {
            fn as_field(&self) -> ::formguard::Field<'_> {
                ::formguard::Field::Nested(self)
            }
        }
    })
}
