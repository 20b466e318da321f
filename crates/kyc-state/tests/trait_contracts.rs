//! Contract tests for RecordStore.
//!
//! Every check is written once against `&dyn RecordStore` and run against
//! both the in-memory store and the SurrealDB store. Any conforming
//! implementation must pass these.

use kyc_state::{
    KeyModification, MemoryRecordStore, RecordStore, StorageError, SurrealRecordStore, TxStamp,
};

fn stamp(tx: &str, ts: i64) -> TxStamp {
    TxStamp::new(tx, ts)
}

async fn get_missing_returns_none(store: &dyn RecordStore) {
    assert!(store.get("missing").await.unwrap().is_none());
    assert!(!store.contains("missing").await.unwrap());
}

async fn put_then_get_round_trip(store: &dyn RecordStore) {
    store
        .put("kyc1", b"{\"id\":\"kyc1\"}".to_vec(), &stamp("tx1", 100))
        .await
        .unwrap();

    let value = store.get("kyc1").await.unwrap();
    assert_eq!(value.as_deref(), Some(&b"{\"id\":\"kyc1\"}"[..]));
    assert!(store.contains("kyc1").await.unwrap());
}

async fn overwrite_is_last_writer_wins(store: &dyn RecordStore) {
    store.put("k", b"first".to_vec(), &stamp("tx1", 1)).await.unwrap();
    store.put("k", b"second".to_vec(), &stamp("tx2", 2)).await.unwrap();

    assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"second"[..]));
}

async fn history_is_oldest_first(store: &dyn RecordStore) {
    store.put("k", b"v1".to_vec(), &stamp("tx1", 10)).await.unwrap();
    store.put("k", b"v2".to_vec(), &stamp("tx2", 20)).await.unwrap();
    store.put("k", b"v3".to_vec(), &stamp("tx3", 30)).await.unwrap();

    let history = store.history_of("k").await.unwrap();
    let tx_ids: Vec<&str> = history.iter().map(|m| m.tx_id.as_str()).collect();
    assert_eq!(tx_ids, vec!["tx1", "tx2", "tx3"]);
    assert_eq!(history[2].value.as_deref(), Some(&b"v3"[..]));
    assert!(history.iter().all(|m| !m.is_deleted));
}

async fn history_keeps_order_for_equal_timestamps(store: &dyn RecordStore) {
    // Same-second writes must still come back in commit order.
    store.put("k", b"a".to_vec(), &stamp("tx-a", 5)).await.unwrap();
    store.put("k", b"b".to_vec(), &stamp("tx-b", 5)).await.unwrap();

    let history = store.history_of("k").await.unwrap();
    assert_eq!(history[0].tx_id, "tx-a");
    assert_eq!(history[1].tx_id, "tx-b");
}

async fn history_of_unknown_key_is_empty(store: &dyn RecordStore) {
    assert!(store.history_of("never-written").await.unwrap().is_empty());
}

async fn history_is_scoped_per_key(store: &dyn RecordStore) {
    store.put("a", b"1".to_vec(), &stamp("tx1", 1)).await.unwrap();
    store.put("b", b"2".to_vec(), &stamp("tx2", 2)).await.unwrap();

    assert_eq!(store.history_of("a").await.unwrap().len(), 1);
    assert_eq!(store.history_of("b").await.unwrap().len(), 1);
}

async fn delete_records_a_deletion(store: &dyn RecordStore) {
    store.put("k", b"v".to_vec(), &stamp("tx1", 1)).await.unwrap();
    store.delete("k", &stamp("tx2", 2)).await.unwrap();

    assert!(store.get("k").await.unwrap().is_none());
    let history = store.history_of("k").await.unwrap();
    assert_eq!(
        history,
        vec![
            KeyModification {
                tx_id: "tx1".to_string(),
                timestamp: 1,
                is_deleted: false,
                value: Some(b"v".to_vec()),
            },
            KeyModification {
                tx_id: "tx2".to_string(),
                timestamp: 2,
                is_deleted: true,
                value: None,
            },
        ]
    );
}

async fn delete_missing_is_noop(store: &dyn RecordStore) {
    store.delete("ghost", &stamp("tx1", 1)).await.unwrap();
    assert!(store.history_of("ghost").await.unwrap().is_empty());
}

async fn write_after_delete_revives_key(store: &dyn RecordStore) {
    store.put("k", b"v1".to_vec(), &stamp("tx1", 1)).await.unwrap();
    store.delete("k", &stamp("tx2", 2)).await.unwrap();
    store.put("k", b"v2".to_vec(), &stamp("tx3", 3)).await.unwrap();

    assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"v2"[..]));
    let flags: Vec<bool> = store
        .history_of("k")
        .await
        .unwrap()
        .iter()
        .map(|m| m.is_deleted)
        .collect();
    assert_eq!(flags, vec![false, true, false]);
}

async fn empty_value_is_not_contained(store: &dyn RecordStore) {
    store.put("k", Vec::new(), &stamp("tx1", 1)).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(Vec::new()));
    assert!(!store.contains("k").await.unwrap());
}

async fn preserves_binary_data(store: &dyn RecordStore) {
    let data: Vec<u8> = (0u8..=255).collect();
    store.put("bin", data.clone(), &stamp("tx1", 1)).await.unwrap();
    assert_eq!(store.get("bin").await.unwrap(), Some(data));
}

async fn empty_key_reads_absent_and_rejects_writes(store: &dyn RecordStore) {
    assert!(store.get("").await.unwrap().is_none());
    assert!(!store.contains("").await.unwrap());
    assert!(store.history_of("").await.unwrap().is_empty());

    let err = store
        .put("", b"v".to_vec(), &stamp("tx1", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::EmptyKey));
    let err = store.delete("", &stamp("tx2", 2)).await.unwrap_err();
    assert!(matches!(err, StorageError::EmptyKey));
    assert!(store.history_of("").await.unwrap().is_empty());
}

async fn keys_with_punctuation_round_trip(store: &dyn RecordStore) {
    let key = "kyc:2024/acme-01 #7";
    store.put(key, b"v".to_vec(), &stamp("tx1", 1)).await.unwrap();
    assert_eq!(store.get(key).await.unwrap().as_deref(), Some(&b"v"[..]));
    assert_eq!(store.history_of(key).await.unwrap().len(), 1);
}

async fn interleaved_writers_are_all_logged(store: &dyn RecordStore) {
    let (sa, sb, sc, sd) = (
        stamp("tx-a", 1),
        stamp("tx-b", 1),
        stamp("tx-c", 1),
        stamp("tx-d", 1),
    );
    let (a, b, c, d) = tokio::join!(
        store.put("shared", b"a".to_vec(), &sa),
        store.put("shared", b"b".to_vec(), &sb),
        store.put("shared", b"c".to_vec(), &sc),
        store.put("shared", b"d".to_vec(), &sd),
    );
    for result in [a, b, c, d] {
        result.unwrap();
    }

    let history = store.history_of("shared").await.unwrap();
    assert_eq!(history.len(), 4);
    let current = store.get("shared").await.unwrap();
    assert_eq!(current, history.last().unwrap().value);
}

macro_rules! contract_suite {
    ($backend:ident, $make:expr) => {
        mod $backend {
            use super::*;

            #[tokio::test]
            async fn get_missing_returns_none() {
                super::get_missing_returns_none(&$make).await;
            }

            #[tokio::test]
            async fn put_then_get_round_trip() {
                super::put_then_get_round_trip(&$make).await;
            }

            #[tokio::test]
            async fn overwrite_is_last_writer_wins() {
                super::overwrite_is_last_writer_wins(&$make).await;
            }

            #[tokio::test]
            async fn history_is_oldest_first() {
                super::history_is_oldest_first(&$make).await;
            }

            #[tokio::test]
            async fn history_keeps_order_for_equal_timestamps() {
                super::history_keeps_order_for_equal_timestamps(&$make).await;
            }

            #[tokio::test]
            async fn history_of_unknown_key_is_empty() {
                super::history_of_unknown_key_is_empty(&$make).await;
            }

            #[tokio::test]
            async fn history_is_scoped_per_key() {
                super::history_is_scoped_per_key(&$make).await;
            }

            #[tokio::test]
            async fn delete_records_a_deletion() {
                super::delete_records_a_deletion(&$make).await;
            }

            #[tokio::test]
            async fn delete_missing_is_noop() {
                super::delete_missing_is_noop(&$make).await;
            }

            #[tokio::test]
            async fn write_after_delete_revives_key() {
                super::write_after_delete_revives_key(&$make).await;
            }

            #[tokio::test]
            async fn empty_value_is_not_contained() {
                super::empty_value_is_not_contained(&$make).await;
            }

            #[tokio::test]
            async fn preserves_binary_data() {
                super::preserves_binary_data(&$make).await;
            }

            #[tokio::test]
            async fn empty_key_reads_absent_and_rejects_writes() {
                super::empty_key_reads_absent_and_rejects_writes(&$make).await;
            }

            #[tokio::test]
            async fn interleaved_writers_are_all_logged() {
                super::interleaved_writers_are_all_logged(&$make).await;
            }

            #[tokio::test]
            async fn keys_with_punctuation_round_trip() {
                super::keys_with_punctuation_round_trip(&$make).await;
            }
        }
    };
}

contract_suite!(memory, MemoryRecordStore::new());
contract_suite!(surreal, SurrealRecordStore::in_memory().await.unwrap());
