use clap::Subcommand;

/// Clarification commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClarificationCommands {
    /// Ask the client for information (assigned lawyer). Pauses the SLA.
    Request {
        id: String,
        #[arg(long)]
        subject: String,
    },
    /// Answer an outstanding clarification (client).
    Respond {
        id: String,
        #[arg(long)]
        response: String,
    },
}
