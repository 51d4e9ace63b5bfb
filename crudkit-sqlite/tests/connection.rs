#[cfg(test)]
mod tests {
    use crudkit_core::{
        Connection, Crud, Entity, EntityDef, EntityKind, Executor, FieldDef, FieldKind,
        FieldSlot, Query, QueryResult, Result, Value, stream::TryStreamExt,
    };
    use crudkit_sqlite::{SqliteConnection, SqliteDriver};
    use crudkit_tests::{init_logs, silent_logs};
    use std::{path::Path, sync::Mutex};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .await
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::connect(format!("sqlite://{}?mode=rwc", DB_PATH).into())
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::connect(format!("sqlite://{}?mode=ro", DB_PATH).into())
            .await
            .expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .await
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        assert!(
            SqliteConnection::connect(format!("sqlite://{}?mode=ro", DB_PATH).into())
                .await
                .is_err(),
            "Should not be able to open in read only unexisting database"
        )
    }

    #[tokio::test]
    async fn wrong_url() {
        silent_logs! {
            assert!(
                SqliteConnection::connect("postgres://some_value".into())
                    .await
                    .is_err()
            );
        };
    }

    #[tokio::test]
    async fn raw_batch() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:".into())
            .await
            .expect("Could not open the in memory database");
        let results: Vec<QueryResult> = connection
            .run(Query::Raw(
                "CREATE TABLE t (v INTEGER); INSERT INTO t VALUES (1), (2); SELECT v FROM t ORDER BY v;"
                    .into(),
            ))
            .try_collect()
            .await
            .expect("Failed to run the batch");
        let rows = results
            .into_iter()
            .filter_map(|v| match v {
                QueryResult::Row(row) => Some(row),
                QueryResult::Affected(..) => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].names(), ["v".to_string()]);
        assert_eq!(rows[0].values(), [Value::Int64(Some(1))]);
        assert_eq!(rows[1].get_column("v"), Some(&Value::Int64(Some(2))));
    }

    #[tokio::test]
    async fn prepare_fails_on_missing_table() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:".into())
            .await
            .expect("Could not open the in memory database");
        silent_logs! {
            let error = connection
                .prepare("SELECT * FROM nowhere".into())
                .await
                .expect_err("The table does not exist");
            assert!(format!("{:#}", error).contains("no such table: nowhere"));
        }
    }

    #[tokio::test]
    async fn query_debug() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:".into())
            .await
            .expect("Could not open the in memory database");
        let raw: Query<SqliteDriver> = "SELECT 1".to_string().into();
        assert_eq!(format!("{:?}", raw), r#"Raw("SELECT 1")"#);
        let prepared = connection
            .prepare("SELECT ?1".into())
            .await
            .expect("Could not prepare a constant select");
        assert_eq!(format!("{:?}", prepared), "Prepared(SELECT ?1)");
    }

    #[derive(Default)]
    struct Note {
        id: i64,
        body: String,
    }

    impl Entity for Note {
        fn entity_def() -> &'static EntityDef {
            static FIELDS: [FieldDef; 3] = [
                FieldDef {
                    name: "_table",
                    type_name: "()",
                    kind: FieldKind::Scalar,
                    tag: "table=notes",
                },
                FieldDef {
                    name: "id",
                    type_name: "i64",
                    kind: FieldKind::Scalar,
                    tag: "pkey",
                },
                FieldDef {
                    name: "body",
                    type_name: "String",
                    kind: FieldKind::Scalar,
                    tag: "",
                },
            ];
            static DEF: EntityDef = EntityDef {
                name: "Note",
                kind: EntityKind::Struct,
                fields: &FIELDS,
            };
            &DEF
        }
        fn field_value(&self, name: &str) -> Option<Result<Value>> {
            match name {
                "id" => Some(Ok(Value::Int64(Some(self.id)))),
                "body" => Some(Ok(Value::Varchar(Some(self.body.clone())))),
                _ => None,
            }
        }
        fn field_slots(&mut self) -> Vec<(&'static str, &mut dyn FieldSlot)> {
            vec![
                ("id", &mut self.id as &mut dyn FieldSlot),
                ("body", &mut self.body as &mut dyn FieldSlot),
            ]
        }
    }

    #[tokio::test]
    async fn crud_without_derive() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:".into())
            .await
            .expect("Could not open the in memory database");
        connection
            .execute(Query::Raw(
                "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL)".into(),
            ))
            .await
            .expect("Failed to create the notes table");
        let crud = Crud::<Note, i64>::new();
        let id = crud
            .create(
                &mut connection,
                &Note {
                    body: "it's \"quoted\"".into(),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to create the note");
        let note = crud
            .detail(&mut connection, id)
            .await
            .expect("Failed to load the note");
        assert_eq!(note.id, id);
        assert_eq!(note.body, "it's \"quoted\"");
        assert!(
            crud.delete(&mut connection, id)
                .await
                .expect("Failed to delete the note")
        );
    }
}
