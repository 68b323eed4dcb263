use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gastos::cli::{handle_expense_command, handle_report_command, ExpenseCommands, ReportCommands};
use gastos::config::{GastosPaths, Settings};
use gastos::display::{format_category_list, format_history};
use gastos::storage::Storage;

const LOG_ENV: &str = "GASTOS_LOG";

#[derive(Parser)]
#[command(
    name = "gastos",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "gastos records everyday expenses in a local JSON file, \
                  lists and deletes them, and writes printable reports for \
                  all expenses or one per category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Show the available categories
    Categories,

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory, data file and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = GastosPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone(), &settings);

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Categories) => {
            print!("{}", format_category_list());
        }
        Some(Commands::History { limit }) => {
            let entries = storage.audit_log().read_recent(limit)?;
            print!("{}", format_history(&entries));
        }
        Some(Commands::Init) => {
            println!("Initializing gastos at: {}", paths.base_dir().display());
            gastos::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'gastos categories' to see the available categories.");
        }
        Some(Commands::Config) => {
            println!("gastos Configuration");
            println!("====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data file:       {}", paths.expenses_file().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Initialized:     {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Report title:    {}", settings.report_title);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("gastos - Terminal-based personal expense tracker");
            println!();
            println!("Run 'gastos --help' for usage information.");
        }
    }

    Ok(())
}
