use crudkit_core::{Result, Value};
use rusqlite::types::ValueRef;
use std::str;

pub(crate) fn extract_value(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int64(Some(v)),
        ValueRef::Real(v) => Value::Float64(Some(v)),
        ValueRef::Text(v) => Value::Varchar(Some(str::from_utf8(v)?.to_string())),
        ValueRef::Blob(v) => Value::Blob(Some(v.into())),
    })
}
