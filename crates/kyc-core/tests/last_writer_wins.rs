//! Concurrent transitions of one record: the engine does no compare-and-swap,
//! so the last write the store accepts is the current record.

use std::sync::Arc;

use kyc_core::{
    KycApplication, KycContract, KycStatus, MemoryEventLog, MemoryRecordStore, RecordStore,
    SurrealRecordStore, TxContext,
};

fn setup() -> (KycContract, Arc<MemoryEventLog>) {
    with_store(Arc::new(MemoryRecordStore::new()))
}

fn with_store(store: Arc<dyn RecordStore>) -> (KycContract, Arc<MemoryEventLog>) {
    let events = Arc::new(MemoryEventLog::new());
    let contract = KycContract::new(store, events.clone());
    (contract, events)
}

fn application() -> KycApplication {
    KycApplication::new("race", "Ada Park", "1979-11-30", "KOR", "Passport", "QmRace")
}

#[tokio::test]
async fn sequential_conflicting_decisions_keep_the_later_one() {
    let (contract, _) = setup();
    contract
        .create_kyc(&TxContext::new("Org1MSP", 1), application())
        .await
        .unwrap();

    contract
        .verify_kyc(&TxContext::new("AuditorMSP", 2), "race", "APPROVE")
        .await
        .unwrap();
    contract
        .verify_kyc(&TxContext::new("Org2MSP", 2), "race", "REJECT")
        .await
        .unwrap();

    let current = contract.get_kyc("race").await.unwrap();
    assert_eq!(current.status, KycStatus::Rejected);
    assert_eq!(current.issuer_msp, "Org2MSP");
    assert_eq!(contract.get_kyc_history("race").await.unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_all_succeed_and_one_wins() {
    let (contract, events) = setup();
    assert_concurrent_writers_all_land(contract, events).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_all_land_on_surreal() {
    let store = SurrealRecordStore::in_memory().await.unwrap();
    let (contract, events) = with_store(Arc::new(store));
    assert_concurrent_writers_all_land(contract, events).await;
}

async fn assert_concurrent_writers_all_land(contract: KycContract, events: Arc<MemoryEventLog>) {
    contract
        .create_kyc(&TxContext::new("Org1MSP", 1), application())
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for i in 0..16i64 {
        let contract = contract.clone();
        tasks.push(tokio::spawn(async move {
            let ctx = TxContext::new(format!("Auditor{i}MSP"), 100 + i);
            if i % 2 == 0 {
                contract.verify_kyc(&ctx, "race", "APPROVE").await
            } else {
                contract.expire_kyc(&ctx, "race").await
            }
        }));
    }

    let mut written = Vec::new();
    for task in tasks {
        written.push(task.await.unwrap().unwrap());
    }

    let history = contract.get_kyc_history("race").await.unwrap();
    assert_eq!(history.len(), 17);
    assert_eq!(events.len(), 17);

    let current = contract.get_kyc("race").await.unwrap();
    assert_eq!(history.last().unwrap().record.as_ref(), Some(&current));
    assert!(written.contains(&current));
    assert_eq!(current.full_name, "Ada Park");
}
