use clap::ValueEnum;

use lexa_core::entities::Actor;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

impl OutputFormat {
    /// Map a `general.default_format` config value. Unknown values fall back
    /// to JSON; config validation rejects them before this point.
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        match value {
            "raw" => Self::Raw,
            _ => Self::Json,
        }
    }
}

/// Global flags resolved against configuration.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub actor: Option<Actor>,
    pub db: Option<String>,
}
