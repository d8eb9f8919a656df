use anyhow::Result;
use clap::{Parser, Subcommand};
use docmig::{commands, config};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = docmig::constants::CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
struct MigrateArgs {
    /// Document files or glob patterns (e.g. "exports/*.yaml")
    #[arg(required = true)]
    paths: Vec<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    family_args: config::FamilyArgs,

    #[command(flatten)]
    output_args: config::OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring documents up to the latest schema version
    Migrate(MigrateArgs),

    /// Show which migrations a document already reflects
    Detect {
        /// Document file
        path: PathBuf,

        #[command(flatten)]
        family_args: config::FamilyArgs,
    },

    /// List the migrations registered for a family
    Steps {
        #[command(flatten)]
        family_args: config::FamilyArgs,
    },
}

fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    if let Err(e) = run_main(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_main(cli: Cli) -> Result<()> {
    let file_config = config::load_config(&cli.config_file)?;

    match &cli.command {
        Commands::Migrate(args) => {
            let cli_config = config::ConfigInput {
                migration: Some(args.family_args.clone().into()),
                output: Some(args.output_args.clone().into()),
            };

            let config = config::ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_config)
                .resolve()?;

            info!("Migrating {} documents", config.migration.family);
            commands::cmd_migrate(&config, &args.paths, args.dry_run)
        }
        Commands::Detect { path, family_args } => {
            let config = resolve_with_family(file_config, family_args)?;
            commands::cmd_detect(&config, path)
        }
        Commands::Steps { family_args } => {
            let config = resolve_with_family(file_config, family_args)?;
            commands::cmd_steps(&config)
        }
    }
}

fn resolve_with_family(
    file_config: config::ConfigInput,
    family_args: &config::FamilyArgs,
) -> Result<config::Config> {
    let cli_config = config::ConfigInput {
        migration: Some(family_args.clone().into()),
        output: None,
    };

    config::ConfigBuilder::new()
        .with_file(file_config)
        .with_cli_args(cli_config)
        .resolve()
}
