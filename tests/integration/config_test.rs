use std::fs;
use tempfile::tempdir;
use repopilot::{
    config::{load_config_with_env_prefix, CliArgs, ConfigBuilder, EnvConfig, FileConfig},
    error::RepoPilotError,
    models::config::{OutputFormat, PartialSettings},
};

const UNSET_PREFIX: &str = "REPOPILOT_INTEGRATION_UNSET";

#[test]
fn test_config_file_settings_applied() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repopilot.toml");
    fs::write(
        &path,
        r#"
exclude_patterns = ["generated"]
output_format = "csv"
n_clusters = 3
clone_depth = 2
openai_model = "gpt-4o"
"#,
    )
    .unwrap();

    let settings = load_config_with_env_prefix(
        CliArgs {
            config: Some(path),
            ..Default::default()
        },
        UNSET_PREFIX,
    )
    .unwrap();

    assert_eq!(settings.exclude_patterns, vec!["generated".to_string()]);
    assert_eq!(settings.output_format, OutputFormat::Csv);
    assert_eq!(settings.n_clusters, Some(3));
    assert_eq!(settings.clone_depth, 2);
    assert_eq!(settings.openai_model, "gpt-4o");
    assert!(settings.openai_api_key.is_none());
}

#[test]
fn test_precedence_file_env_cli() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repopilot.toml");
    fs::write(&path, "hot_spot_limit = 2\nmax_depth = 3\nclone_timeout_secs = 10\n").unwrap();

    let env = EnvConfig::new("TEST").load_with(|key| match key {
        "TEST_MAX_DEPTH" => Some("6".to_string()),
        "TEST_CLONE_TIMEOUT_SECS" => Some("20".to_string()),
        _ => None,
    });
    let cli = PartialSettings {
        clone_timeout_secs: Some(30),
        ..Default::default()
    };

    let settings = ConfigBuilder::new()
        .add_config_file(&path)
        .unwrap()
        .merge(env)
        .merge(cli)
        .build()
        .unwrap();

    assert_eq!(settings.hot_spot_limit, 2);
    assert_eq!(settings.max_depth, Some(6));
    assert_eq!(settings.clone_timeout_secs, 30);
}

#[test]
fn test_invalid_config_file_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repopilot.toml");
    fs::write(&path, "max_depth = 0\n").unwrap();

    let result = load_config_with_env_prefix(
        CliArgs {
            config: Some(path),
            ..Default::default()
        },
        UNSET_PREFIX,
    );
    assert!(matches!(result, Err(RepoPilotError::Config { .. })));
}

#[test]
fn test_default_config_template_round_trips() {
    let dir = tempdir().unwrap();
    let source = FileConfig::with_path(dir.path().join("repopilot.toml"));
    source.create_default().unwrap();

    let settings = ConfigBuilder::new().add_config_file(source.path()).unwrap().build().unwrap();
    assert_eq!(settings, repopilot::Settings::default());
}

#[test]
fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repopilot.toml");
    fs::write(&path, "exclude_patterns = [unterminated\n").unwrap();

    let err = load_config_with_env_prefix(
        CliArgs {
            config: Some(path),
            ..Default::default()
        },
        UNSET_PREFIX,
    )
    .unwrap_err();
    assert!(matches!(err, RepoPilotError::ConfigParse { .. }));
    assert!(err.is_critical());
}
