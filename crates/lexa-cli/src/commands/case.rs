use lexa_core::entities::{Department, NewCase};
use lexa_core::enums::{CaseStatus, Priority, Visibility};
use lexa_core::responses::CaseDetailResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CaseCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexa case`.
pub async fn handle(action: &CaseCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let engine = &ctx.engine;
    match action {
        CaseCommands::Create {
            title,
            department,
            sla_hours,
            priority,
            public,
        } => {
            let priority = match priority {
                Some(raw) => parse_enum(raw, "priority")?,
                None => Priority::default(),
            };
            let input = NewCase {
                title: title.clone(),
                visibility: if *public {
                    Visibility::Public
                } else {
                    Visibility::Private
                },
                priority,
                department: Department {
                    name: department.clone(),
                    sla_hours: sla_hours.unwrap_or(ctx.config.sla.default_sla_hours),
                },
            };
            let case = engine.create_case(ctx.actor()?, input).await?;
            output(&case, flags.format)
        }
        CaseCommands::Assign { id, lawyer } => {
            let case = engine.assign_case(ctx.actor()?, id, lawyer).await?;
            output(&case, flags.format)
        }
        CaseCommands::Accept { id } => {
            let case = engine.accept_case(ctx.actor()?, id).await?;
            output(&case, flags.format)
        }
        CaseCommands::Reject { id, note } => {
            let entry = engine.reject_case(ctx.actor()?, id, note.clone()).await?;
            output(&entry, flags.format)
        }
        CaseCommands::RequestDocuments { id, message } => {
            let case = engine
                .request_documents(ctx.actor()?, id, message.clone())
                .await?;
            output(&case, flags.format)
        }
        CaseCommands::DocumentsUploaded { id } => {
            let case = engine.documents_uploaded(ctx.actor()?, id).await?;
            output(&case, flags.format)
        }
        CaseCommands::Update { id, status, notes } => {
            let target: CaseStatus = parse_enum(status, "status")?;
            let case = engine
                .update_status(ctx.actor()?, id, target, notes.clone())
                .await?;
            output(&case, flags.format)
        }
        CaseCommands::Get { id } => {
            let response = CaseDetailResponse {
                case: engine.get_case(id).await?,
                queries: engine.list_queries(id).await?,
            };
            output(&response, flags.format)
        }
        CaseCommands::List => output(&engine.list_cases().await?, flags.format),
        CaseCommands::Summary { id } => output(&engine.case_summary(id).await?, flags.format),
        CaseCommands::Workflow { id } => output(&engine.case_workflow(id).await?, flags.format),
    }
}
