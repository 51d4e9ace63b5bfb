use crate::reset_table;
use crudkit::{Crud, Entity, Executor, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{collections::BTreeMap, sync::LazyLock};
use tokio::sync::Mutex;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
struct Preferences {
    theme: String,
    font_size: u16,
    shortcuts: BTreeMap<String, String>,
}

#[derive(Entity, Debug, Default, Clone, PartialEq)]
struct Profile {
    #[crud("table=profiles")]
    _table: (),
    #[crud("pkey")]
    id: i64,
    preferences: Json<Preferences>,
    history: Option<Json<Vec<String>>>,
    extra: serde_json::Value,
}

pub async fn documents<E: Executor>(executor: &mut E) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    reset_table(
        executor,
        "profiles",
        "id BIGSERIAL PRIMARY KEY, preferences JSONB NOT NULL, history JSONB, extra JSONB NOT NULL",
        "id INTEGER PRIMARY KEY AUTOINCREMENT, preferences TEXT NOT NULL, history TEXT, extra TEXT NOT NULL",
    )
    .await
    .expect("Failed to create the profiles table");
    let crud = Crud::<Profile, i64>::new();

    let profile = Profile {
        preferences: Preferences {
            theme: "dark".into(),
            font_size: 14,
            shortcuts: [("save".to_string(), "ctrl+s".to_string())].into(),
        }
        .into(),
        history: Some(vec!["login".to_string(), "logout".to_string()].into()),
        extra: json!({"tags": ["a", "b"], "nested": {"level": 2}}),
        ..Default::default()
    };
    let id = crud
        .create(executor, &profile)
        .await
        .expect("Failed to create the profile");
    let loaded = crud
        .detail(executor, id)
        .await
        .expect("Failed to load the profile");
    assert_eq!(loaded, Profile { id, ..profile });

    let mut updated = loaded.clone();
    updated.preferences.font_size = 18;
    updated.history = None;
    updated.extra = json!([1, 2, 3]);
    assert!(
        crud.update(executor, &updated)
            .await
            .expect("Failed to update the profile")
    );
    assert_eq!(
        crud.detail(executor, id)
            .await
            .expect("Failed to load the updated profile"),
        updated
    );
}
