//! Unit tests for store settings persistence.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use quickpath::clock::FixedClock;
use quickpath::storage::{MemoryStorage, StorageBackend};
use quickpath::store::path_store::{PathBookmarkStore, PathStoreTrait, SETTINGS_KEY};
use quickpath::types::record::NameMode;
use quickpath::types::settings::StoreSettings;

fn setup() -> PathBookmarkStore<MemoryStorage> {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    PathBookmarkStore::new(
        MemoryStorage::new(),
        NameMode::Strict,
        Box::new(Arc::new(FixedClock::new(t0))),
    )
}

#[test]
fn test_default_settings_values() {
    let defaults = StoreSettings::default();
    assert!(defaults.show_notifications);
    assert!(defaults.auto_suggest);
    assert!(defaults.keyboard_shortcuts);
}

/// With nothing stored yet, reading settings yields the defaults.
#[tokio::test]
async fn test_missing_settings_fall_back_to_defaults() {
    let store = setup();
    assert_eq!(store.settings().await.unwrap(), StoreSettings::default());
}

#[tokio::test]
async fn test_settings_roundtrip() {
    let store = setup();

    let updated = StoreSettings {
        show_notifications: false,
        auto_suggest: true,
        keyboard_shortcuts: false,
    };
    store.update_settings(updated.clone()).await.unwrap();
    assert_eq!(store.settings().await.unwrap(), updated);
}

/// Settings written by an older version may lack fields; missing ones take
/// their defaults.
#[tokio::test]
async fn test_partial_settings_blob_fills_defaults() {
    let backend = MemoryStorage::new();
    backend
        .set(SETTINGS_KEY, r#"{ "showNotifications": false }"#)
        .await
        .unwrap();

    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let store = PathBookmarkStore::new(
        backend,
        NameMode::Strict,
        Box::new(Arc::new(FixedClock::new(t0))),
    );

    let settings = store.settings().await.unwrap();
    assert!(!settings.show_notifications);
    assert!(settings.auto_suggest);
    assert!(settings.keyboard_shortcuts);
}

#[tokio::test]
async fn test_initialize_seeds_default_settings() {
    let store = setup();
    store.initialize().await.unwrap();
    assert_eq!(store.settings().await.unwrap(), StoreSettings::default());
}

#[tokio::test]
async fn test_initialize_keeps_modified_settings() {
    let store = setup();
    let modified = StoreSettings {
        show_notifications: false,
        ..StoreSettings::default()
    };
    store.update_settings(modified.clone()).await.unwrap();

    store.initialize().await.unwrap();
    assert_eq!(store.settings().await.unwrap(), modified);
}

#[test]
fn test_settings_serialize_camel_case() {
    let blob = serde_json::to_value(StoreSettings::default()).unwrap();
    assert!(blob.get("showNotifications").is_some());
    assert!(blob.get("autoSuggest").is_some());
    assert!(blob.get("keyboardShortcuts").is_some());
}
