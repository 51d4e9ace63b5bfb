use crate::{CodecRegistry, Entity, Error, FieldModel, MappingError, Result, Value};

/// Extracts field values from an entity instance, ready to be bound.
///
/// The value returned by [`Entity::field_value`] goes through the codec of
/// the field kind; only sequence and json fields are actually transformed.
#[derive(Debug, Clone, Copy)]
pub struct ValueMarshaller<'r> {
    codecs: &'r CodecRegistry,
}

impl<'r> ValueMarshaller<'r> {
    pub fn new(codecs: &'r CodecRegistry) -> Self {
        Self { codecs }
    }

    pub fn value_of<E: Entity>(&self, entity: &E, field: &FieldModel) -> Result<Value> {
        let encoding = |e: Error| -> Error {
            MappingError::Encoding {
                field: field.name,
                kind: field.kind,
                reason: format!("{:#}", e),
            }
            .into()
        };
        let value = entity
            .field_value(field.name)
            .ok_or(MappingError::FieldNotReadable(field.name))?
            .map_err(encoding)?;
        let codec = self.codecs.get(field.kind)?;
        codec.encode(value).map_err(encoding)
    }

    pub fn values_of<'f, E: Entity>(
        &self,
        entity: &E,
        fields: impl IntoIterator<Item = &'f FieldModel>,
    ) -> Result<Vec<Value>> {
        fields
            .into_iter()
            .map(|f| self.value_of(entity, f))
            .collect()
    }
}
