use crate::{reset_table, silent_logs};
use crudkit::{Crud, Entity, Executor};
use std::sync::LazyLock;
use tokio::sync::Mutex;

#[derive(Entity, Debug, Default, Clone, PartialEq)]
struct Ledger {
    #[crud("table=ledgers")]
    _table: (),
    #[crud("pkey")]
    id: i64,
    code: String,
}

#[derive(Entity, Debug, Default, Clone, PartialEq)]
struct Ghost {
    #[crud("table=ghosts_never_created")]
    _table: (),
    #[crud("pkey")]
    id: i64,
    name: String,
}

pub async fn failures<E: Executor>(executor: &mut E) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    reset_table(
        executor,
        "ledgers",
        "id BIGSERIAL PRIMARY KEY, code TEXT NOT NULL UNIQUE",
        "id INTEGER PRIMARY KEY AUTOINCREMENT, code TEXT NOT NULL UNIQUE",
    )
    .await
    .expect("Failed to create the ledgers table");
    let crud = Crud::<Ledger, i64>::new();
    let ledger = Ledger {
        code: "L-001".into(),
        ..Default::default()
    };
    let id = crud
        .create(executor, &ledger)
        .await
        .expect("Failed to create the ledger");

    // Unique violation
    silent_logs! {
        let result = crud.create(executor, &ledger).await;
        assert!(result.is_err(), "A duplicate code must be rejected");
    }

    // Missing table
    let ghosts = Crud::<Ghost, i64>::new();
    silent_logs! {
        let error = ghosts
            .detail(executor, 1)
            .await
            .expect_err("The table does not exist");
        assert!(
            format!("{:#}", error).contains("ghosts_never_created"),
            "The error must mention the statement: {:#}",
            error
        );
    }

    // The executor is still usable
    assert_eq!(
        crud.detail(executor, id)
            .await
            .expect("Failed to load the ledger after the failures")
            .code,
        "L-001"
    );
}
