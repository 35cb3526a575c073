mod audit;
mod case;
mod clarification;
mod closure;
mod query;
mod sla;

pub use audit::AuditCommands;
pub use case::CaseCommands;
pub use clarification::ClarificationCommands;
pub use closure::ClosureCommands;
pub use query::QueryCommands;
pub use sla::SlaCommands;
