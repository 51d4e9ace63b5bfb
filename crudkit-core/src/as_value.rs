use crate::{Error, Parse, Result, Value};
use anyhow::Context;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    any,
    ops::{Deref, DerefMut},
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`]
/// used for query parameters and row decoding.
///
/// # Conversion contract
/// - `try_from_value` accepts the canonical variant of the type.
/// - Integers accept any other integer width (and whole decimals) after a range
///   check, so a key declared `i32` can be read back from a `BIGINT` column.
/// - Temporal, uuid, decimal and json types also accept their text form, that
///   is what SQLite hands back for them.
///
/// # Examples
/// ```rust
/// use crudkit_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The NULL value of this type, also used as the type prototype of
    /// containers.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Like [`AsValue::as_value`] but reports conversions that can fail
    /// instead of falling back to NULL.
    fn try_as_value(self) -> Result<Value>
    where
        Self: Sized,
    {
        Ok(self.as_value())
    }
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

fn cannot_convert<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} to {}",
        value,
        any::type_name::<T>()
    ))
}

impl AsValue for Value {
    fn as_empty_value() -> Value {
        Value::Null
    }
    fn as_value(self) -> Value {
        self
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self as _))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let wide: i128 = match value {
                    Value::Int16(Some(v)) => v as i128,
                    Value::Int32(Some(v)) => v as i128,
                    Value::Int64(Some(v)) => v as i128,
                    Value::Boolean(Some(v)) => v as i128,
                    Value::Decimal(Some(v)) if v.fract().is_zero() => v
                        .to_i128()
                        .ok_or_else(|| cannot_convert::<Self>(&value))?,
                    Value::Varchar(Some(ref v)) => v.trim().parse::<i128>().with_context(|| {
                        format!("Cannot parse '{}' as {}", v, any::type_name::<Self>())
                    })?,
                    _ => return Err(cannot_convert::<Self>(&value)),
                };
                <$source>::try_from(wide).map_err(|_| {
                    Error::msg(format!(
                        "Value {} is out of range for {}",
                        wide,
                        any::type_name::<Self>()
                    ))
                })
            }
        }
    };
}

impl_as_value_integer!(i8, Value::Int16);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::Int16);
impl_as_value_integer!(u16, Value::Int32);
impl_as_value_integer!(u32, Value::Int64);

macro_rules! impl_as_value_float {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v),
                    #[allow(unreachable_patterns)]
                    Value::Float32(Some(v)) => Ok(v as _),
                    #[allow(unreachable_patterns)]
                    Value::Float64(Some(v)) => Ok(v as _),
                    Value::Int16(Some(v)) => Ok(v as _),
                    Value::Int32(Some(v)) => Ok(v as _),
                    Value::Int64(Some(v)) => Ok(v as _),
                    Value::Decimal(Some(v)) => v
                        .to_f64()
                        .map(|v| v as _)
                        .ok_or_else(|| cannot_convert::<Self>(&value)),
                    Value::Varchar(Some(ref v)) => v.trim().parse::<$source>().with_context(|| {
                        format!("Cannot parse '{}' as {}", v, any::type_name::<Self>())
                    }),
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value_float!(f32, Value::Float32);
impl_as_value_float!(f64, Value::Float64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            Value::Int16(Some(v)) => Ok(v != 0),
            Value::Int32(Some(v)) => Ok(v != 0),
            Value::Int64(Some(v)) => Ok(v != 0),
            Value::Varchar(Some(ref v)) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(true),
                "false" | "f" | "0" => Ok(false),
                _ => Err(cannot_convert::<Self>(&value)),
            },
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v)) => Ok(v),
            Value::Int16(Some(v)) => Ok(v.into()),
            Value::Int32(Some(v)) => Ok(v.into()),
            Value::Int64(Some(v)) => Ok(v.into()),
            Value::Float32(Some(v)) => {
                Decimal::from_f32(v).ok_or_else(|| cannot_convert::<Self>(&value))
            }
            Value::Float64(Some(v)) => {
                Decimal::from_f64(v).ok_or_else(|| cannot_convert::<Self>(&value))
            }
            Value::Varchar(Some(ref v)) => v
                .trim()
                .parse::<Decimal>()
                .with_context(|| format!("Cannot parse '{}' as rust_decimal::Decimal", v)),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

macro_rules! impl_as_value_textual {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v),
                    $($pat_rest => $expr_rest,)*
                    Value::Varchar(Some(ref v)) => <Self as Parse>::parse(v),
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value_textual!(Date, Value::Date);
impl_as_value_textual!(Time, Value::Time);
impl_as_value_textual!(PrimitiveDateTime, Value::Timestamp);
impl_as_value_textual!(
    OffsetDateTime,
    Value::TimestampWithTimezone,
    Value::Timestamp(Some(v)) => Ok(v.assume_utc()),
);

impl Parse for Uuid {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        Uuid::parse_str(value.as_ref().trim())
            .with_context(|| format!("Cannot parse '{}' as uuid::Uuid", value.as_ref()))
    }
}
impl_as_value_textual!(Uuid, Value::Uuid, Value::Blob(Some(ref v)) => {
    Uuid::from_slice(v).with_context(|| format!("Cannot convert {} bytes to uuid::Uuid", v.len()))
});

impl Parse for serde_json::Value {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        serde_json::from_str(value.as_ref()).context("Cannot parse the text as json")
    }
}
impl_as_value_textual!(serde_json::Value, Value::Json);

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_as_value(self) -> Result<Value> {
        match self {
            Some(v) => v.try_as_value(),
            None => Ok(T::as_empty_value()),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_as_value(self) -> Result<Value> {
        (*self).try_as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        T::try_from_value(value).map(Box::new)
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
    fn try_as_value(self) -> Result<Value> {
        Ok(Value::List(
            Some(
                self.into_iter()
                    .map(AsValue::try_as_value)
                    .collect::<Result<_>>()?,
            ),
            Box::new(T::as_empty_value()),
        ))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(Some(values), ..) => values.into_iter().map(T::try_from_value).collect(),
            Value::Blob(Some(bytes)) => bytes
                .iter()
                .map(|v| T::try_from_value(Value::Int16(Some(*v as i16))))
                .collect(),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl<T: AsValue, const N: usize> AsValue for [T; N] {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
    fn try_as_value(self) -> Result<Value> {
        Ok(Value::List(
            Some(
                self.into_iter()
                    .map(AsValue::try_as_value)
                    .collect::<Result<_>>()?,
            ),
            Box::new(T::as_empty_value()),
        ))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let values = Vec::<T>::try_from_value(value)?;
        let len = values.len();
        values.try_into().map_err(|_| {
            Error::msg(format!(
                "Expected {} elements to fill {}, found {}",
                N,
                any::type_name::<Self>(),
                len
            ))
        })
    }
}

/// Field stored as a json document.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Deref for Json<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Json(value)
    }
}

impl<T: Serialize + DeserializeOwned> AsValue for Json<T> {
    fn as_empty_value() -> Value {
        Value::Json(None)
    }
    fn as_value(self) -> Value {
        match serde_json::to_value(&self.0) {
            Ok(v) => Value::Json(Some(v)),
            Err(e) => {
                log::error!(
                    "Could not serialize {} as json: {:#}",
                    any::type_name::<T>(),
                    e
                );
                Value::Json(None)
            }
        }
    }
    fn try_as_value(self) -> Result<Value> {
        serde_json::to_value(&self.0)
            .map(|v| Value::Json(Some(v)))
            .with_context(|| format!("Cannot serialize {} as json", any::type_name::<T>()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let json = serde_json::Value::try_from_value(value)?;
        serde_json::from_value(json)
            .map(Json)
            .with_context(|| format!("Cannot decode json into {}", any::type_name::<T>()))
    }
}
