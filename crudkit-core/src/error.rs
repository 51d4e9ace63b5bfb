use crate::FieldKind;
use thiserror::Error;

/// The entity description cannot be turned into a table mapping. Always raised
/// before any statement is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("`{0}` must be a struct with named fields")]
    NotAStruct(&'static str),
    #[error("table name not defined for `{0}`, tag one field with `table=<name>`")]
    TableNotDefined(&'static str),
    #[error("primary key not defined for `{0}`, tag one field with `pkey`")]
    PrimaryKeyNotDefined(&'static str),
    #[error("`{0}` declares the table name more than once (again on field `{1}`)")]
    DuplicateTable(&'static str, &'static str),
    #[error("`{0}` declares more than one primary key (again on field `{1}`)")]
    DuplicatePrimaryKey(&'static str, &'static str),
}

/// A value could not be moved between a field and a statement or a row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("field `{0}` cannot be referenced for in-place assignment")]
    FieldNotAddressable(&'static str),
    #[error("cannot extract the value of field `{0}`")]
    FieldNotReadable(&'static str),
    #[error("field `{field}` cannot be encoded as {kind}: {reason}")]
    Encoding {
        field: &'static str,
        kind: FieldKind,
        reason: String,
    },
    #[error("no codec registered for {0}")]
    MissingCodec(FieldKind),
    #[error("column `{0}` is not present in the result row")]
    ColumnNotFound(String),
    #[error("the result row has {found} columns but {expected} fields are expected")]
    ColumnCount { expected: usize, found: usize },
    #[error("`{0}` has no column to update besides the primary key")]
    NothingToUpdate(String),
}

/// The executor completed but the result does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("no rows in result set of table `{0}`")]
    NoRows(String),
    #[error("the insert into `{0}` did not return the generated key")]
    NoReturnedKey(String),
}
