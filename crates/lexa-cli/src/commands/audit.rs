use lexa_core::responses::AuditTrailResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexa audit`.
pub async fn handle(action: &AuditCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuditCommands::Trail { id } => {
            let response = AuditTrailResponse {
                case_id: id.clone(),
                entries: ctx.engine.audit_trail(id).await?,
            };
            output(&response, flags.format)
        }
        AuditCommands::Replay { id } => output(&ctx.engine.verify_replay(id).await?, flags.format),
    }
}
