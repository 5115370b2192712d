use std::process;

use repopilot::{
    cli::{exit_code, Args, Command},
    config::{load_config, CliArgs},
    logging::init_logging,
    models::config::Settings,
    RepoPilotError, Result,
};

fn main() {
    let args = Args::parse_args();
    let command = Command::from_args(&args);
    let cli_args = CliArgs::from(&args);

    process::exit(run_command(command, cli_args));
}

/// Run the command and map its outcome to a process exit code
fn run_command(command: Command, cli_args: CliArgs) -> i32 {
    match execute_command(command, cli_args) {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            exit_code(&err)
        }
    }
}

fn execute_command(command: Command, cli_args: CliArgs) -> Result<()> {
    let settings = if command.needs_settings() {
        load_config(cli_args)?
    } else {
        Settings {
            quiet: cli_args.quiet,
            verbose: cli_args.verbose,
            use_colors: !cli_args.no_colors,
            ..Settings::default()
        }
    };

    if let Err(err) = init_logging(
        &settings.log_level,
        settings.verbose,
        settings.quiet,
        settings.use_colors,
    ) {
        eprintln!("Warning: {}", err.user_message());
    }

    tracing::debug!(
        format = %settings.output_format,
        clustering = settings.enable_clustering,
        generative = settings.openai_api_key.is_some(),
        "settings loaded"
    );
    command.execute(&settings)
}

fn report_error(err: &RepoPilotError) {
    eprintln!("\nError: {}", err.user_message());
    if let Some(suggestion) = err.suggestion() {
        eprintln!("Suggestion: {}", suggestion);
    }

    let code = exit_code(err);
    if code > 0 {
        eprintln!("\nExiting with code {} due to {}", code, err.severity());
    }
}
