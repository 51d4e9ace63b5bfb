use crate::{Entity, EntityDef, EntityKind, FieldDef, FieldKind, SchemaError, StructTag};

/// Resolved metadata of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldModel {
    pub name: &'static str,
    pub type_name: &'static str,
    pub kind: FieldKind,
    pub tags: StructTag,
    /// Declared name unless overridden by a non empty `column=<name>`.
    pub column_name: String,
}

impl FieldModel {
    pub fn new(def: &FieldDef) -> Self {
        let tags = StructTag::parse(def.tag);
        let column_name = tags.column().unwrap_or(def.name).to_string();
        Self {
            name: def.name,
            type_name: def.type_name,
            kind: def.kind,
            tags,
            column_name,
        }
    }
}

/// Table name, primary key and ordered data fields of an entity type.
///
/// `fields` excludes the table marker and the primary key and keeps the
/// declaration order, which is also the column order of the generated
/// statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub table_name: String,
    pub primary_key: FieldModel,
    pub fields: Vec<FieldModel>,
}

impl EntitySchema {
    /// Resolve the schema of `E`. Nothing is cached, each call walks the
    /// descriptor table again.
    pub fn of<E: Entity>() -> Result<Self, SchemaError> {
        Self::resolve(E::entity_def())
    }

    pub fn resolve(def: &EntityDef) -> Result<Self, SchemaError> {
        if def.kind != EntityKind::Struct {
            return Err(SchemaError::NotAStruct(def.name));
        }
        let mut table_name: Option<String> = None;
        let mut primary_key: Option<FieldModel> = None;
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in def.fields {
            let model = FieldModel::new(field);
            if let Some(table) = model.tags.table() {
                if table_name.is_some() {
                    return Err(SchemaError::DuplicateTable(def.name, field.name));
                }
                table_name = Some(table.to_string());
                continue;
            }
            if model.tags.is_primary_key() {
                if primary_key.is_some() {
                    return Err(SchemaError::DuplicatePrimaryKey(def.name, field.name));
                }
                primary_key = Some(model);
                continue;
            }
            fields.push(model);
        }
        let Some(table_name) = table_name.filter(|v| !v.is_empty()) else {
            return Err(SchemaError::TableNotDefined(def.name));
        };
        let Some(primary_key) = primary_key else {
            return Err(SchemaError::PrimaryKeyNotDefined(def.name));
        };
        Ok(Self {
            table_name,
            primary_key,
            fields,
        })
    }

    /// Column names of the data fields, in statement order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(|f| f.column_name.as_str())
    }
}
