use clap::Subcommand;

/// Post-opinion query commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QueryCommands {
    /// Raise a question about the opinion (client).
    Submit {
        /// Case ID
        id: String,
        #[arg(long)]
        text: String,
    },
    /// Answer an open query (assigned lawyer).
    Resolve {
        /// Query ID
        id: String,
        #[arg(long)]
        response: String,
    },
    /// List queries for a case.
    List { id: String },
}
