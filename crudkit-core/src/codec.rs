use crate::{Error, FieldKind, MappingError, Parse, Result, Value};
use std::{collections::HashMap, fmt, sync::Arc};

/// Encode/decode strategy applied to the values of one [`FieldKind`].
///
/// `encode` runs on the value extracted from the entity before it is bound as a
/// parameter, `decode` runs on the column value before it is assigned to the
/// field.
pub trait FieldCodec: Send + Sync {
    fn encode(&self, value: Value) -> Result<Value>;
    fn decode(&self, value: Value) -> Result<Value>;
}

/// Values pass through unchanged, nested aggregates included.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarCodec;

impl FieldCodec for ScalarCodec {
    fn encode(&self, value: Value) -> Result<Value> {
        Ok(value)
    }
    fn decode(&self, value: Value) -> Result<Value> {
        Ok(value)
    }
}

/// Array parameter adapter: sequences are handed to the driver as
/// `Value::List` so they bind as native arrays instead of scalars.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceCodec;

impl FieldCodec for SequenceCodec {
    fn encode(&self, value: Value) -> Result<Value> {
        match value {
            Value::List(..) => Ok(value),
            Value::Null => Ok(Value::List(None, Box::new(Value::Null))),
            _ => Err(Error::msg(format!("{:?} is not a sequence", value))),
        }
    }
    fn decode(&self, value: Value) -> Result<Value> {
        Ok(value)
    }
}

/// Json documents, accepting their text form as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl JsonCodec {
    fn normalize(value: Value) -> Result<Value> {
        match value {
            Value::Json(..) => Ok(value),
            Value::Varchar(Some(v)) => Ok(Value::Json(Some(serde_json::Value::parse(v)?))),
            _ if value.is_null() => Ok(Value::Json(None)),
            _ => Err(Error::msg(format!("{:?} is not a json document", value))),
        }
    }
}

impl FieldCodec for JsonCodec {
    fn encode(&self, value: Value) -> Result<Value> {
        Self::normalize(value)
    }
    fn decode(&self, value: Value) -> Result<Value> {
        Self::normalize(value)
    }
}

/// Codecs indexed by field kind. The default registry knows the scalar,
/// sequence and json kinds, custom kinds must be registered.
#[derive(Clone)]
pub struct CodecRegistry {
    codecs: HashMap<FieldKind, Arc<dyn FieldCodec>>,
}

impl CodecRegistry {
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Add or replace the strategy of `kind`.
    pub fn register(&mut self, kind: FieldKind, codec: impl FieldCodec + 'static) -> &mut Self {
        self.codecs.insert(kind, Arc::new(codec));
        self
    }

    pub fn get(&self, kind: FieldKind) -> Result<&dyn FieldCodec, MappingError> {
        self.codecs
            .get(&kind)
            .map(|v| v.as_ref())
            .ok_or(MappingError::MissingCodec(kind))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        let mut result = Self::empty();
        result
            .register(FieldKind::Scalar, ScalarCodec)
            .register(FieldKind::Sequence, SequenceCodec)
            .register(FieldKind::Json, JsonCodec);
        result
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("kinds", &self.codecs.keys().collect::<Vec<_>>())
            .finish()
    }
}
