use clap::Subcommand;

/// SLA commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SlaCommands {
    /// Current SLA classification.
    Report { id: String },
    /// Stop the SLA clock (assigned lawyer).
    Pause {
        id: String,
        #[arg(long)]
        reason: String,
    },
    /// Restart the SLA clock (assigned lawyer).
    Resume { id: String },
}
