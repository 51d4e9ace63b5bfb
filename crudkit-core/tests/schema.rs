#[cfg(test)]
mod tests {
    use crudkit_core::{
        EntityDef, EntityKind, EntitySchema, FieldDef, FieldKind, SchemaError,
    };

    const fn field(name: &'static str, tag: &'static str) -> FieldDef {
        FieldDef {
            name,
            type_name: "i64",
            kind: FieldKind::Scalar,
            tag,
        }
    }

    static ITEM: EntityDef = EntityDef {
        name: "Item",
        kind: EntityKind::Struct,
        fields: &[
            field("_table", "table=items"),
            field("id", "pkey,column=id"),
            field("name", "column=name"),
            field("price", ""),
            field("cached", "ignore"),
        ],
    };

    #[test]
    fn resolve() {
        let schema = EntitySchema::resolve(&ITEM).expect("Item must resolve");
        assert_eq!(schema.table_name, "items");
        assert_eq!(schema.primary_key.name, "id");
        assert_eq!(schema.primary_key.column_name, "id");
        assert_eq!(
            schema.columns().collect::<Vec<_>>(),
            ["name", "price", "cached"]
        );
        assert_eq!(schema.fields[1].column_name, "price");
        assert!(schema.fields[2].tags.is_ignored());
    }

    #[test]
    fn primary_key_anywhere() {
        static LAST: EntityDef = EntityDef {
            name: "Last",
            kind: EntityKind::Struct,
            fields: &[
                field("a", ""),
                field("b", "column=bee"),
                field("key", "pkey,column=the_key"),
                field("_table", "table=last"),
            ],
        };
        let schema = EntitySchema::resolve(&LAST).expect("Last must resolve");
        assert_eq!(schema.table_name, "last");
        assert_eq!(schema.primary_key.column_name, "the_key");
        assert_eq!(schema.columns().collect::<Vec<_>>(), ["a", "bee"]);
    }

    #[test]
    fn empty_column_falls_back_to_field_name() {
        static BARE: EntityDef = EntityDef {
            name: "Bare",
            kind: EntityKind::Struct,
            fields: &[
                field("_table", "table=bare"),
                field("id", "pkey,column="),
                field("label", "column"),
                field("other", "column= "),
            ],
        };
        let schema = EntitySchema::resolve(&BARE).expect("Bare must resolve");
        assert_eq!(schema.primary_key.column_name, "id");
        assert_eq!(
            schema.columns().collect::<Vec<_>>(),
            ["label", "other"]
        );
    }

    #[test]
    fn not_a_struct() {
        for kind in [EntityKind::Tuple, EntityKind::Unit, EntityKind::Enum] {
            let def = EntityDef {
                name: "Other",
                kind,
                fields: &[],
            };
            assert_eq!(
                EntitySchema::resolve(&def),
                Err(SchemaError::NotAStruct("Other"))
            );
        }
    }

    #[test]
    fn table_not_defined() {
        static NO_TABLE: EntityDef = EntityDef {
            name: "NoTable",
            kind: EntityKind::Struct,
            fields: &[field("id", "pkey"), field("name", "")],
        };
        assert_eq!(
            EntitySchema::resolve(&NO_TABLE),
            Err(SchemaError::TableNotDefined("NoTable"))
        );
        static EMPTY_TABLE: EntityDef = EntityDef {
            name: "EmptyTable",
            kind: EntityKind::Struct,
            fields: &[field("_table", "table="), field("id", "pkey")],
        };
        assert_eq!(
            EntitySchema::resolve(&EMPTY_TABLE),
            Err(SchemaError::TableNotDefined("EmptyTable"))
        );
    }

    #[test]
    fn primary_key_not_defined() {
        static NO_KEY: EntityDef = EntityDef {
            name: "NoKey",
            kind: EntityKind::Struct,
            fields: &[field("_table", "table=no_key"), field("id", "column=id")],
        };
        assert_eq!(
            EntitySchema::resolve(&NO_KEY),
            Err(SchemaError::PrimaryKeyNotDefined("NoKey"))
        );
    }

    #[test]
    fn duplicates() {
        static TWO_TABLES: EntityDef = EntityDef {
            name: "TwoTables",
            kind: EntityKind::Struct,
            fields: &[
                field("a", "table=a"),
                field("id", "pkey"),
                field("b", "table=b"),
            ],
        };
        assert_eq!(
            EntitySchema::resolve(&TWO_TABLES),
            Err(SchemaError::DuplicateTable("TwoTables", "b"))
        );
        static TWO_KEYS: EntityDef = EntityDef {
            name: "TwoKeys",
            kind: EntityKind::Struct,
            fields: &[
                field("_table", "table=two_keys"),
                field("a", "pkey"),
                field("b", "pkey"),
            ],
        };
        assert_eq!(
            EntitySchema::resolve(&TWO_KEYS),
            Err(SchemaError::DuplicatePrimaryKey("TwoKeys", "b"))
        );
    }

    #[test]
    fn table_marker_wins_over_key() {
        static BOTH: EntityDef = EntityDef {
            name: "Both",
            kind: EntityKind::Struct,
            fields: &[field("_table", "table=both,pkey"), field("name", "")],
        };
        assert_eq!(
            EntitySchema::resolve(&BOTH),
            Err(SchemaError::PrimaryKeyNotDefined("Both"))
        );
    }
}
