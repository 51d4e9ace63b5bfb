use bytes::BytesMut;
use crudkit_core::Value;
use postgres_types::{FromSql, IsNull, Kind, ToSql, Type, to_sql_checked};
use std::error::Error;

type BoxError = Box<dyn Error + Sync + Send>;

/// Adapter moving a [`Value`] in and out of the Postgres binary protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueHolder(pub Value);

impl From<Value> for ValueHolder {
    fn from(value: Value) -> Self {
        ValueHolder(value)
    }
}

impl From<ValueHolder> for Value {
    fn from(value: ValueHolder) -> Self {
        value.0
    }
}

fn decode<'a, T: FromSql<'a>>(ty: &Type, raw: Option<&'a [u8]>) -> Result<Option<T>, BoxError> {
    raw.map(|raw| T::from_sql(ty, raw)).transpose()
}

impl<'a> FromSql<'a> for ValueHolder {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        Self::from_sql_nullable(ty, Some(raw))
    }

    fn from_sql_null(ty: &Type) -> Result<Self, BoxError> {
        Self::from_sql_nullable(ty, None)
    }

    fn from_sql_nullable(ty: &Type, raw: Option<&'a [u8]>) -> Result<Self, BoxError> {
        let value = match postgres_type_to_value(ty) {
            Value::Null if raw.is_some() => {
                return Err(crudkit_core::Error::msg(format!(
                    "Cannot decode a value of postgres type `{}`",
                    ty
                ))
                .into());
            }
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(decode(ty, raw)?),
            Value::Int16(..) if *ty == Type::CHAR => {
                Value::Int16(decode::<i8>(ty, raw)?.map(Into::into))
            }
            Value::Int16(..) => Value::Int16(decode(ty, raw)?),
            Value::Int32(..) => Value::Int32(decode(ty, raw)?),
            Value::Int64(..) if *ty == Type::OID => {
                Value::Int64(decode::<u32>(ty, raw)?.map(Into::into))
            }
            Value::Int64(..) => Value::Int64(decode(ty, raw)?),
            Value::Float32(..) => Value::Float32(decode(ty, raw)?),
            Value::Float64(..) => Value::Float64(decode(ty, raw)?),
            Value::Decimal(..) => Value::Decimal(decode(ty, raw)?),
            Value::Varchar(..) => Value::Varchar(decode(ty, raw)?),
            Value::Blob(..) => Value::Blob(decode::<Vec<u8>>(ty, raw)?.map(Into::into)),
            Value::Date(..) => Value::Date(decode(ty, raw)?),
            Value::Time(..) => Value::Time(decode(ty, raw)?),
            Value::Timestamp(..) => Value::Timestamp(decode(ty, raw)?),
            Value::TimestampWithTimezone(..) => Value::TimestampWithTimezone(decode(ty, raw)?),
            Value::Uuid(..) => Value::Uuid(decode(ty, raw)?),
            Value::Json(..) => Value::Json(decode(ty, raw)?),
            Value::List(.., element) => Value::List(
                decode::<Vec<ValueHolder>>(ty, raw)?
                    .map(|v| v.into_iter().map(Into::into).collect()),
                element,
            ),
        };
        Ok(ValueHolder(value))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

impl ToSql for ValueHolder {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Boolean(v) => v.to_sql(ty, out),
            Value::Int16(v) if *ty == Type::CHAR => v.map(|v| v as i8).to_sql(ty, out),
            Value::Int16(v) => v.to_sql(ty, out),
            Value::Int32(v) => v.to_sql(ty, out),
            Value::Int64(v) if *ty == Type::OID => v.map(|v| v as u32).to_sql(ty, out),
            Value::Int64(v) => v.to_sql(ty, out),
            Value::Float32(v) => v.to_sql(ty, out),
            Value::Float64(v) => v.to_sql(ty, out),
            Value::Decimal(v) => v.to_sql(ty, out),
            Value::Varchar(v) => v.to_sql(ty, out),
            Value::Blob(v) => v.as_deref().to_sql(ty, out),
            Value::Date(v) => v.to_sql(ty, out),
            Value::Time(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::TimestampWithTimezone(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
            Value::List(v, ..) => v
                .as_ref()
                .map(|v| v.iter().cloned().map(ValueHolder).collect::<Vec<_>>())
                .to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}

/// Empty value of the type Postgres reports for a column or a parameter.
///
/// Arrays map to [`Value::List`] of their element, the types without a
/// mapping (and arrays of them) to [`Value::Null`].
pub fn postgres_type_to_value(ty: &Type) -> Value {
    if let Kind::Array(member) = ty.kind() {
        return match postgres_type_to_value(member) {
            Value::Null => Value::Null,
            element => Value::List(None, Box::new(element)),
        };
    }
    match *ty {
        Type::BOOL => Value::Boolean(None),
        Type::CHAR | Type::INT2 => Value::Int16(None),
        Type::INT4 => Value::Int32(None),
        Type::INT8 | Type::OID => Value::Int64(None),
        Type::FLOAT4 => Value::Float32(None),
        Type::FLOAT8 => Value::Float64(None),
        Type::NUMERIC => Value::Decimal(None),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::XML => Value::Varchar(None),
        Type::BYTEA => Value::Blob(None),
        Type::DATE => Value::Date(None),
        Type::TIME => Value::Time(None),
        Type::TIMESTAMP => Value::Timestamp(None),
        Type::TIMESTAMPTZ => Value::TimestampWithTimezone(None),
        Type::UUID => Value::Uuid(None),
        Type::JSON | Type::JSONB => Value::Json(None),
        _ => Value::Null,
    }
}
