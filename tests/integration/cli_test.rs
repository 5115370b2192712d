use std::fs;
use std::path::PathBuf;
use clap::Parser;
use tempfile::tempdir;
use repopilot::{
    cli::{
        args::{Args, Commands, OutputFormat},
        commands::{run_init, Command, InitOutcome},
    },
    config::{parse_config_file, CliArgs},
    core::RepositoryTarget,
    models::config,
};

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from([
        "repopilot",
        "--exclude",
        "vendor",
        "--exclude",
        "*.min.js",
        "--max-depth",
        "5",
        "--output",
        "json",
        "--output-file",
        "results.json",
        "--quiet",
        "analyze",
        "./project",
    ]);

    assert_eq!(
        args.command,
        Commands::Analyze {
            target: "./project".to_string()
        }
    );
    assert_eq!(args.exclude, vec!["vendor".to_string(), "*.min.js".to_string()]);
    assert_eq!(args.max_depth, Some(5));
    assert_eq!(args.output, Some(OutputFormat::Json));
    assert_eq!(args.output_file, Some(PathBuf::from("results.json")));
    assert!(args.quiet);
    assert!(!args.verbose);
}

#[test]
fn test_cli_output_formats() {
    for (flag, expected) in [
        ("text", OutputFormat::Text),
        ("json", OutputFormat::Json),
        ("csv", OutputFormat::Csv),
        ("html", OutputFormat::Html),
    ] {
        let args = Args::parse_from(["repopilot", "--output", flag, "analyze", "."]);
        assert_eq!(args.output, Some(expected));
    }
}

#[test]
fn test_cli_invalid_output_format() {
    assert!(Args::try_parse_from(["repopilot", "--output", "invalid", "analyze", "."]).is_err());
}

#[test]
fn test_workflows_subcommand() {
    let args = Args::parse_from(["repopilot", "workflows", "--out-dir", ".github/workflows"]);
    assert_eq!(
        Command::from_args(&args),
        Command::Workflows {
            out_dir: Some(PathBuf::from(".github/workflows"))
        }
    );
}

#[test]
fn test_target_detection() {
    let args = Args::parse_from(["repopilot", "analyze", "https://github.com/rust-lang/log"]);
    assert_eq!(
        Command::from_args(&args),
        Command::Analyze {
            target: RepositoryTarget::GitHub("https://github.com/rust-lang/log".to_string())
        }
    );
}

#[test]
fn test_cli_args_conversion() {
    let args = Args::parse_from(["repopilot", "--no-progress", "--hot-spots", "3", "--output", "html", "batch", "repos.csv"]);
    let cli_args = CliArgs::from(&args);
    assert!(cli_args.no_progress);
    assert_eq!(cli_args.hot_spot_limit, Some(3));
    assert_eq!(cli_args.output_format, Some(config::OutputFormat::Html));
}

#[test]
fn test_init_writes_parseable_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".repopilot.toml");

    assert!(matches!(run_init(&path, false).unwrap(), InitOutcome::Created(_)));
    assert!(fs::read_to_string(&path).unwrap().contains("hot_spot_limit"));
    assert!(parse_config_file(&path).is_ok());
}
