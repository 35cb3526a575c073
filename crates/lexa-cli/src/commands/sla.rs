use crate::cli::GlobalFlags;
use crate::cli::subcommands::SlaCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexa sla`.
pub async fn handle(action: &SlaCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SlaCommands::Report { id } => output(&ctx.engine.sla_report(id).await?, flags.format),
        SlaCommands::Pause { id, reason } => {
            let entry = ctx.engine.pause_sla(ctx.actor()?, id, reason).await?;
            output(&entry, flags.format)
        }
        SlaCommands::Resume { id } => {
            let entry = ctx.engine.resume_sla(ctx.actor()?, id).await?;
            output(&entry, flags.format)
        }
    }
}
