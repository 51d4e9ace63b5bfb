use crate::reset_table;
use crudkit::{Crud, Entity, ExecutionError, Executor};
use indoc::indoc;
use std::sync::LazyLock;
use tokio::sync::Mutex;

#[derive(Entity, Debug, Default, Clone, PartialEq)]
struct Item {
    #[crud("table=items")]
    _table: (),
    #[crud("pkey,column=id")]
    id: i64,
    #[crud("column=name")]
    name: String,
}

pub async fn items<E: Executor>(executor: &mut E) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    reset_table(
        executor,
        "items",
        "id BIGSERIAL PRIMARY KEY, name TEXT NOT NULL",
        "id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL",
    )
    .await
    .expect("Failed to create the items table");
    let crud = Crud::<Item, i64>::new();

    // Create
    let first = Item {
        name: "x".into(),
        ..Default::default()
    };
    let id = crud
        .create(executor, &first)
        .await
        .expect("Failed to create the first item");
    assert!(id > 0, "The generated key must be positive");
    let second_id = crud
        .create(
            executor,
            &Item {
                name: "y".into(),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create the second item");
    assert_ne!(id, second_id);

    // Detail
    let loaded = crud
        .detail(executor, id)
        .await
        .expect("Failed to load the first item");
    assert_eq!(loaded, Item { id, ..first });

    // Update
    let renamed = Item {
        id,
        name: indoc! {"
            multi
            line
        "}
        .into(),
        ..Default::default()
    };
    assert!(
        crud.update(executor, &renamed)
            .await
            .expect("Failed to update the first item")
    );
    let loaded = crud
        .detail(executor, id)
        .await
        .expect("Failed to load the renamed item");
    assert_eq!(loaded.name, "multi\nline\n");
    let second = crud
        .detail(executor, second_id)
        .await
        .expect("Failed to load the second item");
    assert_eq!(second.name, "y", "Only the row with the key is updated");

    // Delete
    assert!(
        crud.delete(executor, id)
            .await
            .expect("Failed to delete the first item")
    );
    assert!(
        !crud
            .delete(executor, id)
            .await
            .expect("Deleting a missing row is not an error")
    );
    assert!(
        !crud
            .update(executor, &renamed)
            .await
            .expect("Updating a missing row is not an error")
    );
    let error = crud
        .detail(executor, id)
        .await
        .expect_err("The deleted item must not be found");
    assert_eq!(
        error.downcast_ref::<ExecutionError>(),
        Some(&ExecutionError::NoRows("items".into()))
    );
}
