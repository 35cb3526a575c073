//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lexa_config::{ConfigError, LexaConfig};
use pretty_assertions::assert_eq;
use lexa_core::enums::LegacyStatusPolicy;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sla]
warning_days = 3
default_sla_hours = 48

[lifecycle]
legacy_status_policy = "reject"

[database]
path = "/var/lib/lexa/cases.db"

[general]
default_format = "raw"
"#,
        )?;

        let config: LexaConfig = Figment::from(Serialized::defaults(LexaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.sla.warning_days, 3);
        assert_eq!(config.sla.default_sla_hours, 48);
        assert_eq!(
            config.lifecycle.legacy_status_policy,
            LegacyStatusPolicy::Reject
        );
        assert_eq!(config.database.path, "/var/lib/lexa/cases.db");
        assert_eq!(config.general.default_format, "raw");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[sla]\nwarning_days = 1\n")?;

        let config: LexaConfig = Figment::from(Serialized::defaults(LexaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.sla.warning_days, 1);
        assert_eq!(config.sla.default_sla_hours, 72);
        assert_eq!(
            config.lifecycle.legacy_status_policy,
            LegacyStatusPolicy::Fallback
        );
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lexa")?;
        jail.create_file(".lexa/config.toml", "[database]\npath = \":memory:\"\n")?;

        let config = LexaConfig::load().map_err(|e| e.to_string())?;
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[sla]\nwarning_days = -4\n")?;

        let figment = Figment::from(Serialized::defaults(LexaConfig::default()))
            .merge(Toml::file("config.toml"));
        let result = LexaConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn unknown_policy_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            "[lifecycle]\nlegacy_status_policy = \"guess\"\n",
        )?;

        let figment = Figment::from(Serialized::defaults(LexaConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("LEXA_").split("__"));
        let result = LexaConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
