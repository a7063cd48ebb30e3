mod config;
mod convert;
mod view;

use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use stringsheet::Workspace;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{CliError, FileConfig, Settings},
    convert::{run_export_command, run_import_command},
    view::{run_list_command, run_print_command},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Directory searched for .strings files [default: .]
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Comma-separated language codes, in sheet column order
    #[arg(long, global = true, env = "STRINGSHEET_LANGUAGES")]
    languages: Option<String>,

    /// TOML file providing `languages` and `root`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the .strings files found under the root.
    List,

    /// Print every entry of every .strings file found under the root.
    Print,

    /// Export the .strings files under the root to one CSV sheet.
    Export {
        /// The CSV file to write; standard output when omitted
        output: Option<PathBuf>,
    },

    /// Import a CSV sheet back into .strings files.
    Import {
        /// The CSV file to read; standard input when omitted
        input: Option<PathBuf>,

        /// Root directory the .strings files are written under
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

fn init_tracing() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time()
                .compact(),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();
    if let Err(e) = installed {
        eprintln!("Warning: cannot install logger: {}", e);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file_config, args.root, args.languages.as_deref())?;
    let workspace = Workspace::new(settings.root, settings.languages);

    match args.commands {
        Commands::List => run_list_command(&workspace),
        Commands::Print => run_print_command(&workspace),
        Commands::Export { output } => run_export_command(&workspace, output.as_deref()),
        Commands::Import { input, output_dir } => {
            run_import_command(input.as_deref(), workspace.languages(), &output_dir)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
