use clap::Parser;

use lexa_config::LexaConfig;
use lexa_core::entities::Actor;
use lexa_core::enums::ActorRole;

use crate::commands::shared::parse::parse_enum;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `lexa` binary.
#[derive(Debug, Parser)]
#[command(name = "lexa", version, about = "Lexa - legal case lifecycle and SLA workflow")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw (defaults to general.default_format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Acting user ID
    #[arg(short, long, global = true, requires = "role")]
    pub actor: Option<String>,

    /// Acting user's role: client, lawyer, firm, bank, admin
    #[arg(short, long, global = true, requires = "actor")]
    pub role: Option<String>,

    /// Database path (overrides database.path)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Resolve global flags, falling back to `config` where a flag is absent.
    pub fn global_flags(&self, config: &LexaConfig) -> anyhow::Result<GlobalFlags> {
        let actor = match (&self.actor, &self.role) {
            (Some(user_id), Some(role)) => {
                let role: ActorRole = parse_enum(role, "role")?;
                Some(Actor::new(user_id.clone(), role))
            }
            _ => None,
        };

        Ok(GlobalFlags {
            format: self
                .format
                .unwrap_or_else(|| OutputFormat::from_config(&config.general.default_format)),
            actor,
            db: self.db.clone(),
        })
    }
}
