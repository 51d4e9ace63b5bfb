use crate::reset_table;
use crudkit::{Crud, Entity, Executor};
use std::sync::LazyLock;
use tokio::sync::Mutex;

#[derive(Entity, Debug, Default, Clone, PartialEq)]
struct Series {
    #[crud("table=series")]
    _table: (),
    #[crud("pkey")]
    id: i64,
    scores: Vec<i32>,
    labels: Vec<String>,
    #[crud("column=bounds")]
    range: [f64; 2],
    flags: Option<Vec<bool>>,
}

pub async fn arrays<E: Executor>(executor: &mut E) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    reset_table(
        executor,
        "series",
        "id BIGSERIAL PRIMARY KEY,
        scores INTEGER[] NOT NULL,
        labels TEXT[] NOT NULL,
        bounds DOUBLE PRECISION[] NOT NULL,
        flags BOOLEAN[]",
        "id INTEGER PRIMARY KEY AUTOINCREMENT,
        scores TEXT NOT NULL,
        labels TEXT NOT NULL,
        bounds TEXT NOT NULL,
        flags TEXT",
    )
    .await
    .expect("Failed to create the series table");
    let crud = Crud::<Series, i64>::new();

    let series = Series {
        scores: vec![3, -1, 4, 1, 5],
        labels: vec!["alpha".into(), "".into(), "gamma, delta".into()],
        range: [-0.25, 1e10],
        flags: Some(vec![true, false, true]),
        ..Default::default()
    };
    let id = crud
        .create(executor, &series)
        .await
        .expect("Failed to create the series");
    let loaded = crud
        .detail(executor, id)
        .await
        .expect("Failed to load the series");
    assert_eq!(loaded, Series { id, ..series });

    // Empty and missing arrays
    let updated = Series {
        scores: vec![],
        labels: vec!["only".into()],
        flags: None,
        ..loaded
    };
    assert!(
        crud.update(executor, &updated)
            .await
            .expect("Failed to update the series")
    );
    assert_eq!(
        crud.detail(executor, id)
            .await
            .expect("Failed to load the updated series"),
        updated
    );
}
