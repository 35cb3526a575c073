//! # lexa-core
//!
//! Core types, ID generation, and error types for Lexa.
//!
//! This crate provides the foundational types shared across all Lexa crates:
//! - Entity structs for cases, audit entries, and post-opinion queries
//! - Status enums with the case state machine table
//! - Legacy status parsing at the storage boundary
//! - ID prefix constants and generation helpers
//! - Cross-cutting error types with structured failure reasons
//! - Audit detail payloads
//! - Projection types consumed by dashboards (SLA, progress, next action, summary)

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod projections;
pub mod responses;
