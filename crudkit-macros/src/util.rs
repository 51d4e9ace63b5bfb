use std::cmp::min;
use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

/// True when the trailing segments of `path` are `expect`, `Vec` matches
/// `std::vec::Vec` and the other way around.
pub(crate) fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

/// First generic argument of the last path segment: `T` in `Option<T>`.
pub(crate) fn first_argument(path: &Path) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = &path.segments.last()?.arguments else {
        return None;
    };
    arguments.args.iter().find_map(|v| match v {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

pub(crate) fn type_path(ty: &Type) -> Option<&Path> {
    match ty {
        Type::Path(TypePath { path, .. }) => Some(path),
        Type::Group(group) => type_path(&group.elem),
        Type::Paren(paren) => type_path(&paren.elem),
        _ => None,
    }
}
