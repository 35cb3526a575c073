//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use lexa_core::entities::{Actor, Case, Department, NewCase, Notification};
use lexa_core::enums::{ActorRole, Priority, Visibility};
use lexa_core::errors::CoreError;
use lexa_engine::clock::ManualClock;
use lexa_engine::memory::InMemoryStore;
use lexa_engine::store::Notifier;
use lexa_engine::{CaseEngine, EngineSettings, Stores};

pub const CLIENT: &str = "usr-client01";
pub const LAWYER: &str = "usr-lawyer01";
pub const FIRM: &str = "usr-firm0001";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

pub fn client() -> Actor {
    Actor::client(CLIENT)
}

pub fn lawyer() -> Actor {
    Actor::lawyer(LAWYER)
}

pub fn firm() -> Actor {
    Actor::new(FIRM, ActorRole::Firm)
}

pub fn new_case(sla_hours: i64) -> NewCase {
    NewCase {
        title: "Commercial lease review".into(),
        visibility: Visibility::Private,
        priority: Priority::High,
        department: Department {
            name: "Real Estate".into(),
            sla_hours,
        },
    }
}

pub struct Harness {
    pub engine: CaseEngine,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::new(t0()));
        let engine = CaseEngine::with_clock(
            Stores::single(store.clone()),
            EngineSettings::default(),
            clock.clone(),
        );
        Self {
            engine,
            store,
            clock,
        }
    }

    /// A case created and assigned at `t0`, accepted into `in_review`.
    pub async fn accepted_case(&self, sla_hours: i64) -> Case {
        let case = self
            .engine
            .create_case(&client(), new_case(sla_hours))
            .await
            .unwrap();
        self.engine
            .assign_case(&firm(), &case.id, LAWYER)
            .await
            .unwrap();
        self.engine.accept_case(&lawyer(), &case.id).await.unwrap()
    }
}

/// Notifier that always fails.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _notification: Notification) -> Result<(), CoreError> {
        Err(CoreError::Storage("mail relay unreachable".into()))
    }
}
