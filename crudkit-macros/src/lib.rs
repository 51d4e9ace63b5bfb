mod decode_field;
mod field_kind;
mod util;

use decode_field::{FieldMetadata, decode_field};
use field_kind::ByteVec;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result, parse_macro_input};

/// Implements `crudkit::Entity` for a type.
///
/// Field annotations go in `#[crud("..")]` attributes, for example
/// `#[crud("pkey,column=id")]`. The annotations are not validated here: a
/// missing table or primary key is reported when an operation runs.
///
/// `Vec<u8>` and `Box<[u8]>` fields are stored as blobs, other vectors,
/// arrays and boxed slices bind as native arrays.
#[proc_macro_derive(Entity, attributes(crud))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    match entity(&item) {
        Ok(v) => v.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn entity(item: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let name = &item.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let (kind, fields) = match &item.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => (
                quote!(::crudkit::EntityKind::Struct),
                named
                    .named
                    .iter()
                    .map(decode_field)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Fields::Unnamed(..) => (quote!(::crudkit::EntityKind::Tuple), vec![]),
            Fields::Unit => (quote!(::crudkit::EntityKind::Unit), vec![]),
        },
        Data::Enum(..) => (quote!(::crudkit::EntityKind::Enum), vec![]),
        Data::Union(..) => {
            return Err(syn::Error::new_spanned(
                name,
                "Entity cannot be derived for unions",
            ));
        }
    };
    let field_defs = fields.iter().map(
        |FieldMetadata {
             name,
             type_name,
             kind,
             tag,
             ..
         }| {
            quote! {
                ::crudkit::FieldDef {
                    name: #name,
                    type_name: #type_name,
                    kind: #kind,
                    tag: #tag,
                }
            }
        },
    );
    let readable = fields.iter().filter(|f| f.is_readable()).map(|f| {
        let field = &f.ident;
        let label = &f.name;
        let value = quote!(::std::clone::Clone::clone(&self.#field));
        let value = match f.bytes {
            Some(ByteVec::Direct) => quote!(::std::boxed::Box::<[u8]>::from(#value)),
            Some(ByteVec::Optional) => quote!(#value.map(::std::boxed::Box::<[u8]>::from)),
            None => value,
        };
        quote!(#label => Some(::crudkit::AsValue::try_as_value(#value)))
    });
    let addressable = fields.iter().filter(|f| f.is_addressable()).map(|f| {
        let field = &f.ident;
        let label = &f.name;
        quote!((#label, &mut self.#field as &mut dyn ::crudkit::FieldSlot))
    });
    Ok(quote! {
        impl #impl_generics ::crudkit::Entity for #name #ty_generics #where_clause {
            fn entity_def() -> &'static ::crudkit::EntityDef {
                static DEF: ::crudkit::EntityDef = ::crudkit::EntityDef {
                    name: #name_str,
                    kind: #kind,
                    fields: &[#(#field_defs),*],
                };
                &DEF
            }

            #[allow(unused_variables)]
            fn field_value(&self, name: &str) -> Option<::crudkit::Result<::crudkit::Value>> {
                match name {
                    #(#readable,)*
                    _ => None,
                }
            }

            fn field_slots(&mut self) -> Vec<(&'static str, &mut dyn ::crudkit::FieldSlot)> {
                vec![#(#addressable),*]
            }
        }
    })
}
