use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use brand_registry::cli::{
    handle_audit_command, handle_brand_command, AuditCommands, BrandCommands, IdentityArgs,
};
use brand_registry::config::{paths::RegistryPaths, settings::Settings};
use brand_registry::storage::{initialize_storage, Storage};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "BRAND_REGISTRY_LOG";

#[derive(Parser)]
#[command(
    name = "brandreg",
    version,
    about = "Brand registration records with a field-level audit trail",
    long_about = "brandreg manages brand registration records. Every create, \
                  update, status change and delete is captured as an immutable \
                  audit record with before/after snapshots that can be queried \
                  and exported."
)]
struct Cli {
    #[command(flatten)]
    identity: IdentityArgs,

    /// More log output (repeat for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Brand management commands
    #[command(subcommand)]
    Brand(BrandCommands),

    /// Audit history commands
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Initialize the registry data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = RegistryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_tracing(cli.quiet, cli.verbose, &settings.log_level)?;

    match cli.command {
        Some(Commands::Brand(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_brand_command(&storage, &cli.identity, cmd)?;
        }
        Some(Commands::Audit(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_audit_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing brand registry at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'brandreg brand create <NAME> --owner <OWNER>' to register a brand.");
        }
        Some(Commands::Config) => {
            let query = settings.query.effective();
            println!("Brand Registry Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Brands file:    {}", paths.brands_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Default page size: {}", query.default_limit);
            println!("  Maximum page size: {}", query.max_limit);
            println!("  Recent entries:    {}", query.recent_limit);
            println!("  Log level:         {}", settings.log_level);
        }
        None => {
            println!("brandreg - brand registry with audit trail");
            println!();
            println!("Run 'brandreg --help' for usage information.");
        }
    }

    Ok(())
}

fn open_storage(paths: &RegistryPaths) -> Result<Storage> {
    initialize_storage(paths)?;
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    Ok(storage)
}

fn init_tracing(quiet: bool, verbose: u8, configured: &str) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => configured,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
