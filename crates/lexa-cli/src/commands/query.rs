use crate::cli::GlobalFlags;
use crate::cli::subcommands::QueryCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexa query`.
pub async fn handle(action: &QueryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        QueryCommands::Submit { id, text } => {
            let query = ctx.engine.submit_query(ctx.actor()?, id, text).await?;
            output(&query, flags.format)
        }
        QueryCommands::Resolve { id, response } => {
            let query = ctx.engine.resolve_query(ctx.actor()?, id, response).await?;
            output(&query, flags.format)
        }
        QueryCommands::List { id } => output(&ctx.engine.list_queries(id).await?, flags.format),
    }
}
