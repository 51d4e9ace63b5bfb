use crate::reset_table;
use crudkit::{Crud, Entity, Executor};
use rust_decimal::Decimal;
use std::{str::FromStr, sync::LazyLock};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, macros::datetime};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Entity, Debug, Default, Clone, PartialEq)]
struct Account {
    #[crud("table=accounts")]
    _table: (),
    #[crud("pkey")]
    id: i64,
    #[crud("column=user_name")]
    name: String,
    active: bool,
    balance: Decimal,
    rating: Option<f64>,
    visits: i32,
    born: Option<Date>,
    wake_up: Option<Time>,
    last_seen: Option<PrimitiveDateTime>,
    created_at: Option<OffsetDateTime>,
    external_id: Option<Uuid>,
    avatar: Option<Box<[u8]>>,
    signature: Vec<u8>,
    #[crud("ignore")]
    session: Option<String>,
}

pub async fn accounts<E: Executor>(executor: &mut E) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    reset_table(
        executor,
        "accounts",
        "id BIGSERIAL PRIMARY KEY,
        user_name TEXT NOT NULL UNIQUE,
        active BOOLEAN NOT NULL,
        balance NUMERIC NOT NULL,
        rating DOUBLE PRECISION,
        visits INTEGER NOT NULL,
        born DATE,
        wake_up TIME,
        last_seen TIMESTAMP,
        created_at TIMESTAMPTZ,
        external_id UUID,
        avatar BYTEA,
        signature BYTEA NOT NULL,
        session TEXT",
        "id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_name TEXT NOT NULL UNIQUE,
        active INTEGER NOT NULL,
        balance TEXT NOT NULL,
        rating REAL,
        visits INTEGER NOT NULL,
        born TEXT,
        wake_up TEXT,
        last_seen TEXT,
        created_at TEXT,
        external_id TEXT,
        avatar BLOB,
        signature BLOB NOT NULL,
        session TEXT",
    )
    .await
    .expect("Failed to create the accounts table");
    let crud = Crud::<Account, i64>::new();

    // Every field set
    let full = Account {
        name: "ada".into(),
        active: true,
        balance: Decimal::from_str("1234.56").unwrap(),
        rating: Some(4.75),
        visits: -12,
        born: Some(Date::from_calendar_date(1815, Month::December, 10).unwrap()),
        wake_up: Some(Time::from_hms_micro(6, 30, 15, 250_000).unwrap()),
        last_seen: Some(datetime!(2024-03-01 18:45:00.125)),
        created_at: Some(datetime!(2023-11-20 09:00:00 +02:00)),
        external_id: Some(Uuid::new_v4()),
        avatar: Some([0u8, 1, 2, 254, 255].into()),
        signature: vec![0xde, 0xad, 0xbe, 0xef],
        session: Some("write only".into()),
        ..Default::default()
    };
    let id = crud
        .create(executor, &full)
        .await
        .expect("Failed to create the full account");
    let loaded = crud
        .detail(executor, id)
        .await
        .expect("Failed to load the full account");
    assert_eq!(
        loaded,
        Account {
            id,
            session: None,
            ..full.clone()
        }
    );

    // Nullable fields left empty
    let empty = Account {
        name: "bob".into(),
        balance: Decimal::ZERO,
        ..Default::default()
    };
    let empty_id = crud
        .create(executor, &empty)
        .await
        .expect("Failed to create the empty account");
    assert_ne!(id, empty_id);
    let loaded = crud
        .detail(executor, empty_id)
        .await
        .expect("Failed to load the empty account");
    assert_eq!(
        loaded,
        Account {
            id: empty_id,
            ..empty
        }
    );

    // Update every field
    let updated = Account {
        id: empty_id,
        name: "bobby".into(),
        active: true,
        visits: 3,
        rating: Some(-0.5),
        born: Some(Date::from_calendar_date(2001, Month::January, 1).unwrap()),
        signature: vec![1, 2, 3],
        ..loaded
    };
    assert!(
        crud.update(executor, &updated)
            .await
            .expect("Failed to update the account")
    );
    assert_eq!(
        crud.detail(executor, empty_id)
            .await
            .expect("Failed to load the updated account"),
        updated
    );
    assert_eq!(
        crud.detail(executor, id)
            .await
            .expect("Failed to load the full account again")
            .name,
        "ada"
    );
}
