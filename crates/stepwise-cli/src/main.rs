use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::env;
use std::io;

mod commands;
mod logging;

/// Stepwise interpreter.
///
/// Executes already-parsed Stepwise programs, supplied as versioned JSON,
/// one statement at a time over an explicit call stack.
///
/// EXAMPLES:
///     stepwise run fact.json            Run a program
///     stepwise run fact.json --stats    Run and report statistics
///     stepwise check fact.json          Validate without running
///     stepwise dump fact.json           Show the statement listing
///
/// ENVIRONMENT VARIABLES:
///     STEPWISE_TRACE    Set to '1' to log every tick
///     STEPWISE_STATS    Set to '1' to print run statistics
///     STEPWISE_LOG      Log filter (same syntax as RUST_LOG)
///     STEPWISE_JSON     Set to 'true' for JSON output from check
#[derive(Parser)]
#[command(name = "stepwise")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Log filter, e.g. "debug" or "stepwise_runtime=trace"
    #[arg(long, global = true, env = "STEPWISE_LOG")]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program
    ///
    /// Loads the program, executes it to completion and prints its output.
    /// A fatal runtime error is printed as `<line>: <message>` and the
    /// command exits with status 1.
    ///
    /// EXAMPLES:
    ///     stepwise run fact.json              Run a program
    ///     stepwise run fact.json --trace      Log every tick to stderr
    #[command(visible_alias = "r")]
    Run {
        /// Path to the program JSON file
        file: String,
        /// Log every tick at trace level
        #[arg(long)]
        trace: bool,
        /// Print run statistics to stderr after completion
        #[arg(long)]
        stats: bool,
    },

    /// Validate a program without running it
    ///
    /// EXAMPLES:
    ///     stepwise check fact.json           Prints "ok" when valid
    ///     stepwise check fact.json --json    Machine-readable summary
    #[command(visible_alias = "c")]
    Check {
        /// Path to the program JSON file
        file: String,
        /// Output the result in JSON format
        #[arg(long, env = "STEPWISE_JSON")]
        json: bool,
    },

    /// Print a program listing
    ///
    /// One statement per line with its source line number; function bodies
    /// are indented under their declaration.
    ///
    /// EXAMPLES:
    ///     stepwise dump fact.json            Human-readable listing
    ///     stepwise dump fact.json --json     Normalized program JSON
    Dump {
        /// Path to the program JSON file
        file: String,
        /// Print the program as normalized JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     stepwise completions bash > ~/.local/share/bash-completion/completions/stepwise
    ///     stepwise completions zsh > ~/.zfunc/_stepwise
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, trace, stats } => {
            let cwd = env::current_dir().context("Failed to determine working directory")?;
            let config = stepwise_config::ConfigLoader::new()
                .load_from_directory(&cwd)
                .context("Failed to load configuration")?;

            let options = commands::run::RunOptions {
                trace: trace || config.trace(),
                stats: stats || config.stats(),
            };
            logging::init(options.trace, cli.log.as_deref(), config.log_filter());
            commands::run::run(&file, options)?;
        }
        Commands::Check { file, json } => {
            logging::init(false, cli.log.as_deref(), None);
            commands::check::run(&file, json)?;
        }
        Commands::Dump { file, json } => {
            logging::init(false, cli.log.as_deref(), None);
            commands::dump::run(&file, json)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
