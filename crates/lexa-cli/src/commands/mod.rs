pub mod audit;
pub mod case;
pub mod clarification;
pub mod closure;
pub mod dispatch;
pub mod query;
pub mod shared;
pub mod sla;
