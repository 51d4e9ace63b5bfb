use crate::field_kind::{ByteVec, byte_vec, field_kind, field_kind_tokens};
use crudkit_core::StructTag;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Error, Field, Ident, LitStr, Result};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) type_name: String,
    pub(crate) kind: TokenStream,
    pub(crate) bytes: Option<ByteVec>,
    /// Raw annotation, the `#[crud("..")]` attributes joined with `,`.
    pub(crate) tag: String,
    pub(crate) tags: StructTag,
}

impl FieldMetadata {
    /// The table marker is neither readable nor addressable.
    pub(crate) fn is_readable(&self) -> bool {
        self.tags.table().is_none()
    }

    pub(crate) fn is_addressable(&self) -> bool {
        !self.tags.is_ignored()
    }
}

pub(crate) fn decode_field(field: &Field) -> Result<FieldMetadata> {
    let Some(ident) = field.ident.clone() else {
        return Err(Error::new_spanned(field, "Expected a named field"));
    };
    let mut annotations = Vec::new();
    for attr in field.attrs.iter().filter(|v| v.path().is_ident("crud")) {
        let value = attr.parse_args::<LitStr>().map_err(|e| {
            Error::new(
                e.span(),
                "Error while parsing `crud`, use it like: `#[crud(\"column=name\")]`",
            )
        })?;
        annotations.push(value.value());
    }
    let tag = annotations.join(",");
    let tags = StructTag::parse(&tag);
    let kind = match tags.codec() {
        Some(codec) => quote!(::crudkit::FieldKind::Custom(#codec)),
        None => field_kind_tokens(&field_kind(&field.ty)),
    };
    let name = ident.to_string();
    Ok(FieldMetadata {
        name: name.strip_prefix("r#").unwrap_or(&name).to_string(),
        ident,
        type_name: field.ty.to_token_stream().to_string().replace(' ', ""),
        kind,
        bytes: byte_vec(&field.ty),
        tag,
        tags,
    })
}
