use crate::cli::GlobalFlags;
use crate::cli::subcommands::ClosureCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexa closure`.
pub async fn handle(
    action: &ClosureCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    let case = match action {
        ClosureCommands::Acknowledge { id } => ctx.engine.acknowledge_opinion(actor, id).await?,
        ClosureCommands::Confirm { id } => {
            ctx.engine.confirm_no_further_questions(actor, id).await?
        }
        ClosureCommands::Close { id } => ctx.engine.close_case(actor, id).await?,
    };
    output(&case, flags.format)
}
