use figment::Jail;
use pretty_assertions::assert_eq;
use lexa_config::LexaConfig;
use lexa_core::enums::LegacyStatusPolicy;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("LEXA_SLA__WARNING_DAYS", "5");
        jail.set_env("LEXA_LIFECYCLE__LEGACY_STATUS_POLICY", "reject");

        let config = LexaConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.sla.warning_days, 5);
        assert_eq!(
            config.lifecycle.legacy_status_policy,
            LegacyStatusPolicy::Reject
        );
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lexa")?;
        jail.create_file(".lexa/config.toml", "[database]\npath = \"from-toml.db\"\n")?;
        jail.set_env("LEXA_DATABASE__PATH", "from-env.db");

        let config = LexaConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}
