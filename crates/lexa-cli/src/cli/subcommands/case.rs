use clap::Subcommand;

/// Case commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CaseCommands {
    /// Submit a new request (client).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        department: String,
        /// SLA budget in hours (defaults to sla.default_sla_hours)
        #[arg(long)]
        sla_hours: Option<i64>,
        /// low, medium, high, urgent
        #[arg(long)]
        priority: Option<String>,
        /// Post to the marketplace instead of routing privately
        #[arg(long)]
        public: bool,
    },
    /// Assign a submitted case to a lawyer (firm, bank, admin, or a lawyer
    /// claiming a public case).
    Assign {
        id: String,
        #[arg(long)]
        lawyer: String,
    },
    /// Accept an assigned case (assigned lawyer).
    Accept { id: String },
    /// Decline an assigned case (assigned lawyer).
    Reject {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Ask the client for documents (assigned lawyer).
    RequestDocuments {
        id: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Report requested documents as uploaded (client).
    DocumentsUploaded { id: String },
    /// Move a case along the transition table (assigned lawyer).
    Update {
        id: String,
        #[arg(long)]
        status: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Get a case and its post-opinion queries.
    Get { id: String },
    /// List cases, newest first.
    List,
    /// Dashboard summary.
    Summary { id: String },
    /// Workflow view with timeline.
    Workflow { id: String },
}
