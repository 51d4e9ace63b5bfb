use crate::{AsValue, Error, Result};
use rust_decimal::Decimal;
use std::fmt::{self, Display};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed value exchanged with the drivers.
///
/// Every typed variant wraps an `Option` so that a NULL keeps the type it was
/// declared with. The type-only form (`Value::Int32(None)`) is also used as a
/// prototype, for example as the element type of a `List`.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
    Json(Option<serde_json::Value>),
    /// Sequence bound as a native array parameter.
    List(Option<Vec<Value>>, /* type: */ Box<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null
            | Value::Boolean(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Decimal(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None)
            | Value::TimestampWithTimezone(None)
            | Value::Uuid(None)
            | Value::Json(None)
            | Value::List(None, ..) => true,
            _ => false,
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(.., l), Self::List(.., r)) => l.same_type(r),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }

    /// The NULL of the same type.
    pub fn as_null(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(None),
            Value::Int16(..) => Value::Int16(None),
            Value::Int32(..) => Value::Int32(None),
            Value::Int64(..) => Value::Int64(None),
            Value::Float32(..) => Value::Float32(None),
            Value::Float64(..) => Value::Float64(None),
            Value::Decimal(..) => Value::Decimal(None),
            Value::Varchar(..) => Value::Varchar(None),
            Value::Blob(..) => Value::Blob(None),
            Value::Date(..) => Value::Date(None),
            Value::Time(..) => Value::Time(None),
            Value::Timestamp(..) => Value::Timestamp(None),
            Value::TimestampWithTimezone(..) => Value::TimestampWithTimezone(None),
            Value::Uuid(..) => Value::Uuid(None),
            Value::Json(..) => Value::Json(None),
            Value::List(.., inner) => Value::List(None, inner.clone()),
        }
    }

    /// Convert into the type of `prototype`, used by drivers once the server
    /// reports the actual parameter types.
    pub fn try_as(self, prototype: &Value) -> Result<Value> {
        if self.same_type(prototype) || matches!(prototype, Value::Null) {
            return Ok(self);
        }
        if self.is_null() {
            return Ok(prototype.as_null());
        }
        macro_rules! convert {
            ($variant:path, $ty:ty) => {
                <Option<$ty> as AsValue>::try_from_value(self).map($variant)
            };
        }
        match prototype {
            Value::Boolean(..) => convert!(Value::Boolean, bool),
            Value::Int16(..) => convert!(Value::Int16, i16),
            Value::Int32(..) => convert!(Value::Int32, i32),
            Value::Int64(..) => convert!(Value::Int64, i64),
            Value::Float32(..) => convert!(Value::Float32, f32),
            Value::Float64(..) => convert!(Value::Float64, f64),
            Value::Decimal(..) => convert!(Value::Decimal, Decimal),
            Value::Varchar(..) => match self {
                Value::Json(Some(v)) => Ok(Value::Varchar(Some(v.to_string()))),
                Value::Uuid(Some(v)) => Ok(Value::Varchar(Some(v.to_string()))),
                Value::Decimal(Some(v)) => Ok(Value::Varchar(Some(v.to_string()))),
                other => Err(mismatch(&other, prototype)),
            },
            Value::Date(..) => convert!(Value::Date, Date),
            Value::Time(..) => convert!(Value::Time, Time),
            Value::Timestamp(..) => convert!(Value::Timestamp, PrimitiveDateTime),
            Value::TimestampWithTimezone(..) => {
                convert!(Value::TimestampWithTimezone, OffsetDateTime)
            }
            Value::Uuid(..) => convert!(Value::Uuid, Uuid),
            Value::Json(..) => convert!(Value::Json, serde_json::Value),
            Value::List(.., inner) => match self {
                Value::List(Some(values), ..) => Ok(Value::List(
                    Some(
                        values
                            .into_iter()
                            .map(|v| v.try_as(inner))
                            .collect::<Result<_>>()?,
                    ),
                    inner.clone(),
                )),
                other => Err(mismatch(&other, prototype)),
            },
            _ => Err(mismatch(&self, prototype)),
        }
    }
}

fn mismatch(value: &Value, prototype: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} into a value of type {:?}",
        value, prototype
    ))
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }
        match self {
            Value::Boolean(Some(v)) => write!(f, "{}", v),
            Value::Int16(Some(v)) => write!(f, "{}", v),
            Value::Int32(Some(v)) => write!(f, "{}", v),
            Value::Int64(Some(v)) => write!(f, "{}", v),
            Value::Float32(Some(v)) => write!(f, "{}", v),
            Value::Float64(Some(v)) => write!(f, "{}", v),
            Value::Decimal(Some(v)) => write!(f, "{}", v),
            Value::Varchar(Some(v)) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Blob(Some(v)) => write!(f, "<{} bytes>", v.len()),
            Value::Date(Some(v)) => write!(f, "'{}'", v),
            Value::Time(Some(v)) => write!(f, "'{}'", v),
            Value::Timestamp(Some(v)) => write!(f, "'{}'", v),
            Value::TimestampWithTimezone(Some(v)) => write!(f, "'{}'", v),
            Value::Uuid(Some(v)) => write!(f, "'{}'", v),
            Value::Json(Some(v)) => write!(f, "'{}'", v),
            Value::List(Some(values), ..) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    v.fmt(f)?;
                }
                f.write_str("]")
            }
            _ => f.write_str("NULL"),
        }
    }
}
