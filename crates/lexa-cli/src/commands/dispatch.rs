use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Case { action } => commands::case::handle(&action, ctx, flags).await,
        Commands::Clarification { action } => {
            commands::clarification::handle(&action, ctx, flags).await
        }
        Commands::Sla { action } => commands::sla::handle(&action, ctx, flags).await,
        Commands::Closure { action } => commands::closure::handle(&action, ctx, flags).await,
        Commands::Query { action } => commands::query::handle(&action, ctx, flags).await,
        Commands::Audit { action } => commands::audit::handle(&action, ctx, flags).await,
    }
}
