use crate::{AsValue, Result, Value};
use std::fmt::{self, Display};

/// Shape of the type an [`EntityDef`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Struct with named fields, the only shape that maps to a table.
    Struct,
    Tuple,
    Unit,
    Enum,
}

/// Encoding strategy selector of a field, see [`crate::CodecRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    /// Vectors and arrays, bound as native array parameters.
    Sequence,
    /// Values stored as json documents.
    Json,
    /// User registered strategy.
    Custom(&'static str),
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar => f.write_str("scalar"),
            FieldKind::Sequence => f.write_str("sequence"),
            FieldKind::Json => f.write_str("json"),
            FieldKind::Custom(name) => write!(f, "custom `{}`", name),
        }
    }
}

/// Static descriptor of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field identifier.
    pub name: &'static str,
    /// Declared Rust type, as written.
    pub type_name: &'static str,
    pub kind: FieldKind,
    /// Raw annotation, parsed by [`crate::StructTag::parse`].
    pub tag: &'static str,
}

/// Static descriptor of an entity type: the field table that replaces
/// runtime introspection. Usually generated by `#[derive(Entity)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDef {
    pub name: &'static str,
    pub kind: EntityKind,
    /// Fields in declaration order.
    pub fields: &'static [FieldDef],
}

/// Scan target: a field that can be overwritten in place with a decoded value.
pub trait FieldSlot {
    fn assign(&mut self, value: Value) -> Result<()>;
}

impl<T: AsValue> FieldSlot for T {
    fn assign(&mut self, value: Value) -> Result<()> {
        *self = T::try_from_value(value)?;
        Ok(())
    }
}

/// A typed record whose fields map to relational columns.
pub trait Entity {
    /// Field descriptor table.
    fn entity_def() -> &'static EntityDef;

    /// Current value of the field `name`, `None` when it cannot be read.
    /// The inner error reports a value that could not be converted.
    fn field_value(&self, name: &str) -> Option<Result<Value>>;

    /// Fields that can be assigned in place, keyed by field name, in
    /// declaration order.
    fn field_slots(&mut self) -> Vec<(&'static str, &mut dyn FieldSlot)>;
}
