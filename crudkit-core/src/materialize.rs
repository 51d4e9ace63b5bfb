use crate::{
    CodecRegistry, Entity, EntityKind, FieldModel, FieldSlot, MappingError, Result, RowLabeled,
    SchemaError,
};
use anyhow::Context;
use std::{collections::HashMap, fmt, mem};

/// Addressable field of an entity instance paired with its metadata.
pub struct Slot<'e> {
    pub field: FieldModel,
    pub target: &'e mut dyn FieldSlot,
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("field", &self.field)
            .field("target", &"..")
            .finish()
    }
}

/// Produces the scan targets of an entity and decodes result rows into them.
#[derive(Debug, Clone, Copy)]
pub struct ResultMaterializer<'r> {
    codecs: &'r CodecRegistry,
}

impl<'r> ResultMaterializer<'r> {
    pub fn new(codecs: &'r CodecRegistry) -> Self {
        Self { codecs }
    }

    /// One slot per field without the `ignore` or `table` tag, in declaration
    /// order.
    pub fn slots<'e, E: Entity>(&self, entity: &'e mut E) -> Result<Vec<Slot<'e>>> {
        let def = E::entity_def();
        if def.kind != EntityKind::Struct {
            return Err(SchemaError::NotAStruct(def.name).into());
        }
        let mut available: HashMap<&'static str, &'e mut dyn FieldSlot> =
            entity.field_slots().into_iter().collect();
        let mut result = Vec::with_capacity(available.len());
        for field in def.fields {
            let field = FieldModel::new(field);
            if field.tags.is_ignored() {
                continue;
            }
            let Some(target) = available.remove(field.name) else {
                return Err(MappingError::FieldNotAddressable(field.name).into());
            };
            result.push(Slot { field, target });
        }
        Ok(result)
    }

    /// Assign the row values to the slots.
    ///
    /// Labeled rows are matched by column name, unlabeled rows by position.
    pub fn decode(&self, row: RowLabeled, slots: Vec<Slot<'_>>) -> Result<()> {
        let RowLabeled { labels, mut values } = row;
        if labels.is_empty() && values.len() != slots.len() {
            return Err(MappingError::ColumnCount {
                expected: slots.len(),
                found: values.len(),
            }
            .into());
        }
        for (i, slot) in slots.into_iter().enumerate() {
            let index = if labels.is_empty() {
                i
            } else {
                labels
                    .iter()
                    .position(|v| *v == slot.field.column_name)
                    .ok_or_else(|| MappingError::ColumnNotFound(slot.field.column_name.clone()))?
            };
            let value = mem::take(&mut values[index]);
            let value = self.codecs.get(slot.field.kind)?.decode(value)?;
            slot.target.assign(value).with_context(|| {
                format!(
                    "While decoding column `{}` into field `{}`",
                    slot.field.column_name, slot.field.name
                )
            })?;
        }
        Ok(())
    }
}
