//! Entity structs for all Lexa domain objects.
//!
//! Each persisted entity maps to a table in the libSQL database (see
//! `lexa-db/migrations`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod actor;
mod audit;
mod case;
mod notification;
mod query;

pub use actor::Actor;
pub use audit::AuditEntry;
pub use case::{Case, Department, NewCase};
pub use notification::Notification;
pub use query::PostOpinionQuery;
