use crate::util::{first_argument, matches_path, type_path};
use crudkit_core::FieldKind;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Type, TypeSlice};

/// Encoding strategy of a field, inferred from its declared type.
///
/// `Option` and `Box` wrappers are looked through. Vectors and arrays are
/// sequences, except the `Box<[u8]>` and `Vec<u8>` blobs. `Json<T>` is json,
/// anything else is scalar.
pub(crate) fn field_kind(ty: &Type) -> FieldKind {
    match ty {
        Type::Array(..) => return FieldKind::Sequence,
        Type::Group(group) => return field_kind(&group.elem),
        Type::Paren(paren) => return field_kind(&paren.elem),
        _ => {}
    }
    let Some(path) = type_path(ty) else {
        return FieldKind::Scalar;
    };
    if matches_path(path, &["std", "option", "Option"]) {
        return first_argument(path).map_or(FieldKind::Scalar, field_kind);
    }
    if matches_path(path, &["std", "boxed", "Box"]) {
        return match first_argument(path) {
            Some(Type::Slice(TypeSlice { elem, .. })) if is_byte(elem) => FieldKind::Scalar,
            Some(Type::Slice(..)) => FieldKind::Sequence,
            Some(inner) => field_kind(inner),
            None => FieldKind::Scalar,
        };
    }
    if matches_path(path, &["std", "vec", "Vec"]) {
        return if first_argument(path).is_some_and(is_byte) {
            FieldKind::Scalar
        } else {
            FieldKind::Sequence
        };
    }
    if matches_path(path, &["crudkit", "Json"]) {
        return FieldKind::Json;
    }
    FieldKind::Scalar
}

/// A `Vec<u8>` field, bound as a blob once converted to `Box<[u8]>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteVec {
    Direct,
    Optional,
}

pub(crate) fn byte_vec(ty: &Type) -> Option<ByteVec> {
    let path = type_path(ty)?;
    if matches_path(path, &["std", "option", "Option"]) {
        return match byte_vec(first_argument(path)?)? {
            ByteVec::Direct => Some(ByteVec::Optional),
            ByteVec::Optional => None,
        };
    }
    (matches_path(path, &["std", "vec", "Vec"]) && first_argument(path).is_some_and(is_byte))
        .then_some(ByteVec::Direct)
}

fn is_byte(ty: &Type) -> bool {
    type_path(ty).is_some_and(|v| v.is_ident("u8"))
}

pub(crate) fn field_kind_tokens(kind: &FieldKind) -> TokenStream {
    match kind {
        FieldKind::Scalar => quote!(::crudkit::FieldKind::Scalar),
        FieldKind::Sequence => quote!(::crudkit::FieldKind::Sequence),
        FieldKind::Json => quote!(::crudkit::FieldKind::Json),
        FieldKind::Custom(name) => quote!(::crudkit::FieldKind::Custom(#name)),
    }
}
