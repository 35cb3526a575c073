use std::sync::Arc;

use anyhow::Context;

use lexa_config::LexaConfig;
use lexa_core::entities::Actor;
use lexa_db::store::LibSqlStore;
use lexa_engine::{CaseEngine, EngineSettings, Stores};

use crate::cli::GlobalFlags;

/// Resources shared by every command.
pub struct AppContext {
    pub engine: CaseEngine,
    pub config: LexaConfig,
    actor: Option<Actor>,
}

impl AppContext {
    pub async fn init(mut config: LexaConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(path) = &flags.db {
            config.database.path.clone_from(path);
        }

        let store = LibSqlStore::open(&config)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        let engine = CaseEngine::new(
            Stores::single(Arc::new(store)),
            EngineSettings::from(&config),
        );

        Ok(Self {
            engine,
            config,
            actor: flags.actor.clone(),
        })
    }

    /// The caller identity from `--actor`/`--role`.
    pub fn actor(&self) -> anyhow::Result<&Actor> {
        self.actor
            .as_ref()
            .context("this command needs an identity: pass --actor <user-id> and --role <role>")
    }
}
