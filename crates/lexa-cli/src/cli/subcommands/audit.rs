use clap::Subcommand;

/// Audit commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Audit entries in time order.
    Trail { id: String },
    /// Rebuild the status from the audit log and compare with the record.
    Replay { id: String },
}
