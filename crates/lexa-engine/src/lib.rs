//! # lexa-engine
//!
//! The case lifecycle and SLA workflow engine.
//!
//! - [`transition`]: which status changes are legal and who may make them
//! - [`audit`]: ordered view of a case's audit log, with status replay
//! - [`sla`]: SLA classification with pause accounting
//! - [`lifecycle`]: display lifecycle, progress, next action, urgency
//! - [`workflow`]: aggregated workflow view and dashboard summary
//! - [`post_opinion`]: guards for acknowledgement, queries, and closure
//! - [`engine`]: `CaseEngine`, which runs the guards against the stores
//!
//! Persistence is behind the traits in [`store`]. [`memory::InMemoryStore`]
//! implements all of them; `lexa-db` provides the libSQL backend.

pub mod audit;
pub mod clock;
pub mod engine;
pub mod lifecycle;
pub mod memory;
pub mod post_opinion;
pub mod sla;
pub mod store;
pub mod transition;
pub mod workflow;

pub use engine::{CaseEngine, EngineSettings, Stores};
