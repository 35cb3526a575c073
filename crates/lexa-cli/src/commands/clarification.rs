use crate::cli::GlobalFlags;
use crate::cli::subcommands::ClarificationCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexa clarification`.
pub async fn handle(
    action: &ClarificationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entry = match action {
        ClarificationCommands::Request { id, subject } => {
            ctx.engine
                .request_clarification(ctx.actor()?, id, subject)
                .await?
        }
        ClarificationCommands::Respond { id, response } => {
            ctx.engine
                .respond_to_clarification(ctx.actor()?, id, response)
                .await?
        }
    };
    output(&entry, flags.format)
}
