//! Integration tests for the encrypted store.

use cryptkv_core::{Config, CoreError, EncryptedStore};
use proptest::prelude::*;
use proptest::test_runner::TestRunner;
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn open(path: &Path) -> EncryptedStore {
    let config = Config::default().lock_timeout(Duration::from_millis(100));
    EncryptedStore::open_with_config(path, config).unwrap()
}

#[test]
fn concrete_scenario() {
    let dir = tempdir().unwrap();
    let mut store = EncryptedStore::open(dir.path().join("app")).unwrap();
    assert!(dir.path().join("app.db").exists());
    assert!(dir.path().join("app.lock").exists());

    store.create_table("users").unwrap();
    store
        .set("users", "alice", "secret-token", "pw123")
        .unwrap();
    assert_eq!(store.get("users", "alice", "pw123").unwrap(), "secret-token");
    assert!(matches!(
        store.get("users", "alice", "wrongpw"),
        Err(CoreError::Decode { .. })
    ));
    assert_eq!(store.keys("users").unwrap(), vec!["alice"]);

    store.close().unwrap();
    assert!(!dir.path().join("app.lock").exists());
    assert!(dir.path().join("app.db").exists());
}

#[test]
fn open_creates_default_table() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("app"));
    assert_eq!(store.tables().unwrap(), vec!["store"]);
}

#[test]
fn explicit_suffix_is_kept() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("app.db"));
    assert_eq!(store.path(), Some(dir.path().join("app.db").as_path()));
    assert!(dir.path().join("app.lock").exists());
}

#[test]
fn wrong_passphrase_never_returns_a_value() {
    let store = EncryptedStore::open_in_memory().unwrap();
    store.set("store", "k", "value", "one").unwrap();

    for wrong in ["two", "ONE", "one ", "on", "\u{1F511}"] {
        assert!(matches!(
            store.get("store", "k", wrong),
            Err(CoreError::Decode { .. })
        ));
    }
}

#[test]
fn missing_bucket_everywhere() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("app"));

    assert!(matches!(
        store.get("ghost", "k", "pw"),
        Err(CoreError::BucketNotFound { .. })
    ));
    assert!(matches!(
        store.set("ghost", "k", "v", "pw"),
        Err(CoreError::BucketNotFound { .. })
    ));
    assert!(matches!(
        store.remove("ghost", "k"),
        Err(CoreError::BucketNotFound { .. })
    ));
    assert!(matches!(
        store.keys("ghost"),
        Err(CoreError::BucketNotFound { .. })
    ));
    // A failed set does not create the table.
    assert_eq!(store.tables().unwrap(), vec!["store"]);
}

#[test]
fn create_table_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("app"));

    store.create_table("users").unwrap();
    store.set("users", "alice", "v", "pw").unwrap();
    store.create_table("users").unwrap();

    let tables = store.tables().unwrap();
    assert_eq!(tables.iter().filter(|t| *t == "users").count(), 1);
    assert_eq!(store.get("users", "alice", "pw").unwrap(), "v");
}

#[test]
fn delete_then_get_is_not_found() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("app"));

    store.set("store", "k", "v", "pw").unwrap();
    store.remove("store", "k").unwrap();
    assert!(matches!(
        store.get("store", "k", "pw"),
        Err(CoreError::NotFound { .. })
    ));
    assert!(store.keys("store").unwrap().is_empty());
}

#[test]
fn remove_absent_key_succeeds() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("app"));
    store.remove("store", "never-set").unwrap();
}

#[test]
fn get_absent_key_is_not_found() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("app"));
    assert!(store.get("store", "nope", "pw").unwrap_err().is_not_found());
}

#[test]
fn closed_store_rejects_everything() {
    let dir = tempdir().unwrap();
    let mut store = open(&dir.path().join("app"));
    store.set("store", "k", "v", "pw").unwrap();
    store.close().unwrap();

    assert!(matches!(store.get("store", "k", "pw"), Err(CoreError::NotOpened)));
    assert!(matches!(
        store.set("store", "k", "v", "pw"),
        Err(CoreError::NotOpened)
    ));
    assert!(matches!(store.remove("store", "k"), Err(CoreError::NotOpened)));
    assert!(matches!(store.keys("store"), Err(CoreError::NotOpened)));
    assert!(matches!(store.tables(), Err(CoreError::NotOpened)));
    assert!(matches!(store.create_table("t"), Err(CoreError::NotOpened)));
}

#[test]
fn overwrite_with_new_passphrase() {
    let store = EncryptedStore::open_in_memory().unwrap();
    store.set("store", "k", "old", "pw1").unwrap();
    store.set("store", "k", "new", "pw2").unwrap();

    assert_eq!(store.get("store", "k", "pw2").unwrap(), "new");
    assert!(matches!(
        store.get("store", "k", "pw1"),
        Err(CoreError::Decode { .. })
    ));
}

#[test]
fn empty_and_unicode_values() {
    let store = EncryptedStore::open_in_memory().unwrap();
    store.set("store", "empty", "", "pw").unwrap();
    store.set("store", "emoji", "caf\u{e9} \u{1F600}", "p\u{e4}ss").unwrap();

    assert_eq!(store.get("store", "empty", "pw").unwrap(), "");
    assert_eq!(
        store.get("store", "emoji", "p\u{e4}ss").unwrap(),
        "caf\u{e9} \u{1F600}"
    );
}

#[test]
fn values_are_not_stored_in_plaintext() {
    let dir = tempdir().unwrap();
    let mut store = open(&dir.path().join("app"));
    let secret = "plaintext-marker-0123456789";
    store.set("store", "k", secret, "pw").unwrap();
    store.close().unwrap();

    let raw = std::fs::read(dir.path().join("app.db")).unwrap();
    assert!(!raw
        .windows(secret.len())
        .any(|window| window == secret.as_bytes()));
}

#[test]
fn data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app");
    {
        let store = open(&path);
        store.create_table("users").unwrap();
        store.set("users", "alice", "secret-token", "pw123").unwrap();
    }

    let store = open(&path);
    assert_eq!(store.tables().unwrap(), vec!["store", "users"]);
    assert_eq!(store.get("users", "alice", "pw123").unwrap(), "secret-token");
}

#[test]
fn second_store_times_out_on_lock() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app");
    let _first = open(&path);

    let config = Config::default().lock_timeout(Duration::from_millis(30));
    let second = EncryptedStore::open_with_config(&path, config);
    assert!(matches!(second, Err(CoreError::LockTimeout { .. })));

    // The losing open must not disturb the holder's lock file.
    assert!(dir.path().join("app.lock").exists());
}

#[test]
fn waiting_store_opens_after_close() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app");
    let mut first = open(&path);
    first.set("store", "k", "from first", "pw").unwrap();

    let (tx, rx) = mpsc::channel();
    let waiter_path = path.clone();
    let waiter = thread::spawn(move || {
        tx.send(()).unwrap();
        let config = Config::default().lock_timeout(Duration::from_secs(10));
        let store = EncryptedStore::open_with_config(&waiter_path, config).unwrap();
        store.get("store", "k", "pw").unwrap()
    });

    rx.recv().unwrap();
    thread::sleep(Duration::from_millis(20));
    first.close().unwrap();

    assert_eq!(waiter.join().unwrap(), "from first");
}

#[test]
fn concurrent_writers_in_one_process() {
    let dir = tempdir().unwrap();
    let store = Arc::new(open(&dir.path().join("app")));
    store.create_table("events").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("w{worker}-{i:02}");
                    store.set("events", &key, &key, "pw").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let keys = store.keys("events").unwrap();
    assert_eq!(keys.len(), 100);
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(store.get("events", "w3-24", "pw").unwrap(), "w3-24");
}

#[test]
fn roundtrip_property_on_disk() {
    let dir = tempdir().unwrap();
    let store = open(&dir.path().join("prop"));
    let mut runner = TestRunner::new(ProptestConfig::with_cases(48));

    runner
        .run(
            &("[a-zA-Z0-9_-]{1,16}", ".*", ".{1,24}"),
            |(key, value, passphrase)| {
                store.set("store", &key, &value, &passphrase).unwrap();
                prop_assert_eq!(store.get("store", &key, &passphrase).unwrap(), value);
                Ok(())
            },
        )
        .unwrap();
}
