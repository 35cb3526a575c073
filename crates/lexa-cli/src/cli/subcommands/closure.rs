use clap::Subcommand;

/// Post-opinion closure commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClosureCommands {
    /// Acknowledge the delivered opinion (client).
    Acknowledge { id: String },
    /// Confirm there are no further questions (client).
    Confirm { id: String },
    /// Close the case (assigned lawyer).
    Close { id: String },
}
