#[cfg(test)]
mod tests {
    use crudkit::{
        Entity, EntityKind, EntitySchema, FieldKind, FieldSlot, Json, SchemaError, Value,
    };
    use serde::{Deserialize, Serialize};
    use time::Date;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Preferences {
        language: String,
        notifications: bool,
    }

    #[derive(Entity, Debug, Default, Clone, PartialEq)]
    struct Account {
        #[crud("table=accounts")]
        _table: (),
        #[crud("pkey")]
        #[crud("column=account_id")]
        id: i64,
        #[crud("column=user_name")]
        name: String,
        birthday: Option<Date>,
        tags: Vec<String>,
        scores: Option<[i32; 3]>,
        avatar: Option<Box<[u8]>>,
        preferences: Json<Preferences>,
        #[crud("ignore")]
        session: Option<String>,
        #[crud("codec=upper")]
        code: String,
    }

    #[test]
    fn entity_def() {
        let def = Account::entity_def();
        assert_eq!(def.name, "Account");
        assert_eq!(def.kind, EntityKind::Struct);
        let names: Vec<_> = def.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "_table",
                "id",
                "name",
                "birthday",
                "tags",
                "scores",
                "avatar",
                "preferences",
                "session",
                "code"
            ]
        );
        assert_eq!(def.fields[0].tag, "table=accounts");
        assert_eq!(def.fields[1].tag, "pkey,column=account_id");
        assert_eq!(def.fields[2].tag, "column=user_name");
        assert_eq!(def.fields[3].tag, "");
        assert_eq!(def.fields[3].type_name, "Option<Date>");
        let kinds: Vec<_> = def.fields.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            [
                FieldKind::Scalar,
                FieldKind::Scalar,
                FieldKind::Scalar,
                FieldKind::Scalar,
                FieldKind::Sequence,
                FieldKind::Sequence,
                FieldKind::Scalar,
                FieldKind::Json,
                FieldKind::Scalar,
                FieldKind::Custom("upper"),
            ]
        );
    }

    #[test]
    fn schema() {
        let schema = EntitySchema::of::<Account>().expect("Account must resolve");
        assert_eq!(schema.table_name, "accounts");
        assert_eq!(schema.primary_key.name, "id");
        assert_eq!(schema.primary_key.column_name, "account_id");
        assert_eq!(
            schema.columns().collect::<Vec<_>>(),
            [
                "user_name",
                "birthday",
                "tags",
                "scores",
                "avatar",
                "preferences",
                "session",
                "code"
            ]
        );
    }

    #[test]
    fn field_values() {
        let account = Account {
            id: 3,
            name: "ann".into(),
            tags: vec!["a".into()],
            session: Some("s".into()),
            ..Default::default()
        };
        let value = |name: &str| account.field_value(name).map(|v| v.unwrap());
        assert_eq!(value("id"), Some(Value::Int64(Some(3))));
        assert_eq!(
            value("name"),
            Some(Value::Varchar(Some("ann".into())))
        );
        assert_eq!(value("birthday"), Some(Value::Date(None)));
        assert_eq!(
            value("tags"),
            Some(Value::List(
                Some(vec![Value::Varchar(Some("a".into()))]),
                Box::new(Value::Varchar(None))
            ))
        );
        assert_eq!(
            value("session"),
            Some(Value::Varchar(Some("s".into())))
        );
        assert_eq!(value("_table"), None);
        assert_eq!(value("missing"), None);
    }

    #[test]
    fn field_slots() {
        let mut account = Account::default();
        let mut slots = account.field_slots();
        let names: Vec<_> = slots.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "id",
                "name",
                "birthday",
                "tags",
                "scores",
                "avatar",
                "preferences",
                "code"
            ]
        );
        slots[0].1.assign(Value::Int32(Some(9))).unwrap();
        slots[1].1.assign(Value::Varchar(Some("bob".into()))).unwrap();
        assert!(slots[0].1.assign(Value::Varchar(Some("nine".into()))).is_err());
        drop(slots);
        assert_eq!(account.id, 9);
        assert_eq!(account.name, "bob");
    }

    #[test]
    fn not_a_struct() {
        #[derive(Entity, Default, Clone)]
        struct Pair(i64, String);

        #[derive(Entity, Default, Clone)]
        struct Marker;

        #[derive(Entity, Default, Clone)]
        #[allow(dead_code)]
        enum Status {
            #[default]
            Active,
            Disabled,
        }

        assert_eq!(Pair::entity_def().kind, EntityKind::Tuple);
        assert_eq!(Marker::entity_def().kind, EntityKind::Unit);
        assert_eq!(Status::entity_def().kind, EntityKind::Enum);
        assert_eq!(
            EntitySchema::of::<Pair>(),
            Err(SchemaError::NotAStruct("Pair"))
        );
        assert_eq!(
            EntitySchema::of::<Marker>(),
            Err(SchemaError::NotAStruct("Marker"))
        );
        assert_eq!(
            EntitySchema::of::<Status>(),
            Err(SchemaError::NotAStruct("Status"))
        );
        assert!(Pair(1, "a".into()).field_value("0").is_none());
    }

    #[test]
    fn byte_vectors_are_blobs() {
        #[derive(Entity, Debug, Default, Clone, PartialEq)]
        struct Attachment {
            #[crud("table=attachments")]
            _table: (),
            #[crud("pkey")]
            id: i64,
            payload: Vec<u8>,
            thumbnail: Option<Vec<u8>>,
            checksums: Vec<u16>,
        }
        let kinds: Vec<_> = Attachment::entity_def()
            .fields
            .iter()
            .map(|f| f.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                FieldKind::Scalar,
                FieldKind::Scalar,
                FieldKind::Scalar,
                FieldKind::Scalar,
                FieldKind::Sequence,
            ]
        );

        let mut attachment = Attachment {
            payload: vec![0, 7, 255],
            checksums: vec![1],
            ..Default::default()
        };
        let value = |v: &Attachment, name: &str| v.field_value(name).map(|v| v.unwrap());
        assert_eq!(
            value(&attachment, "payload"),
            Some(Value::Blob(Some([0u8, 7, 255].into())))
        );
        assert_eq!(value(&attachment, "thumbnail"), Some(Value::Blob(None)));
        assert_eq!(
            value(&attachment, "checksums"),
            Some(Value::List(
                Some(vec![Value::Int32(Some(1))]),
                Box::new(Value::Int32(None))
            ))
        );

        for (name, slot) in attachment.field_slots() {
            match name {
                "payload" => slot.assign(Value::Blob(Some([9u8].into()))).unwrap(),
                "thumbnail" => slot.assign(Value::Blob(Some([4u8, 2].into()))).unwrap(),
                _ => {}
            }
        }
        assert_eq!(attachment.payload, [9]);
        assert_eq!(attachment.thumbnail, Some(vec![4, 2]));
    }

    #[test]
    fn raw_identifier() {
        #[derive(Entity, Default, Clone)]
        struct Keyword {
            #[crud("table=keywords")]
            _table: (),
            #[crud("pkey")]
            r#type: i32,
        }
        assert_eq!(Keyword::entity_def().fields[1].name, "type");
        assert_eq!(
            EntitySchema::of::<Keyword>().unwrap().primary_key.column_name,
            "type"
        );
    }
}
