use clap::Subcommand;

use crate::cli::subcommands::{
    AuditCommands, CaseCommands, ClarificationCommands, ClosureCommands, QueryCommands,
    SlaCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Submit, assign, and progress cases.
    Case {
        #[command(subcommand)]
        action: CaseCommands,
    },
    /// Request and answer clarifications.
    Clarification {
        #[command(subcommand)]
        action: ClarificationCommands,
    },
    /// SLA report and manual pauses.
    Sla {
        #[command(subcommand)]
        action: SlaCommands,
    },
    /// Opinion acknowledgement and case closure.
    Closure {
        #[command(subcommand)]
        action: ClosureCommands,
    },
    /// Post-opinion queries.
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },
    /// Audit trail and replay.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
}
