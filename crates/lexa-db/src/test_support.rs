//! Shared test utilities for lexa-db unit tests.

use chrono::{DateTime, TimeZone, Utc};

use lexa_core::entities::Department;
use lexa_core::enums::{LegacyStatusPolicy, Priority, Visibility};
use lexa_engine::lifecycle::LifecycleResolver;
use lexa_engine::store::CaseDraft;

use crate::LexaDb;
use crate::store::LibSqlStore;

pub async fn test_store() -> LibSqlStore {
    test_store_with(LegacyStatusPolicy::Fallback).await
}

pub async fn test_store_with(policy: LegacyStatusPolicy) -> LibSqlStore {
    let db = LexaDb::open_local(":memory:").await.unwrap();
    LibSqlStore::new(db, LifecycleResolver::new(policy))
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0).unwrap()
}

pub fn draft() -> CaseDraft {
    CaseDraft {
        title: "Trademark opposition".into(),
        visibility: Visibility::Public,
        priority: Priority::Urgent,
        client_id: "usr-client01".into(),
        department: Department {
            name: "Intellectual Property".into(),
            sla_hours: 96,
        },
        created_at: t0(),
    }
}
