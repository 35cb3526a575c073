//! Repository modules, one per table.
//!
//! Each module adds `DatabaseError`-returning methods to `LibSqlStore` and
//! implements the matching `lexa-engine` store trait on top of them.

pub mod audit;
pub mod cases;
pub mod notifications;
pub mod queries;
