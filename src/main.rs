use anyhow::Result;
use clap::{Parser, Subcommand};

use erp::cli::{
    handle_audit_command, handle_report_command, handle_table_command, run_menu, ReportCommands,
    TableArgs,
};
use erp::config::{paths::ErpPaths, settings::Settings};
use erp::models::TableKind;
use erp::prompt::TerminalPrompter;
use erp::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "erp",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based record managers for a small shop",
    long_about = "erp-cli keeps the records of a small shop (accounting, customers, \
                  staff, inventory, incoming orders, partners, sales and the game \
                  store) in plain ';'-separated files and reports across them."
)]
struct Cli {
    /// Reference year for year checks and durability reports
    #[arg(long, global = true, value_name = "YYYY")]
    year: Option<i32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu
    Menu,

    /// Record management for one manager's table
    Table(TableArgs),

    /// Manager and data analyser reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

/// Open the tables, pointing first-time users at `erp init`
fn open_storage(paths: ErpPaths, settings: &Settings) -> Result<Storage> {
    if needs_initialization(&paths) {
        eprintln!("erp-cli is not initialized. Run 'erp init' to create the settings and table files.");
    }
    Ok(Storage::open(paths, settings)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ErpPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(year) = cli.year {
        settings.current_year = year;
    }

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing erp-cli at: {}", paths.data_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Empty tables have been created for:");
            for kind in TableKind::ALL {
                println!("  - {} ({})", kind.title(), kind.file_name());
            }
            println!();
            println!("Run 'erp table <manager> add' or 'erp menu' to start adding records.");
        }
        Some(Commands::Config) => {
            println!("erp-cli Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Current year:   {}", settings.current_year);
            println!("  Cancel words:   {}", settings.cancel_words.join(", "));
            println!("  Audit enabled:  {}", settings.audit_enabled);
        }
        Some(Commands::Table(args)) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_table_command(&mut storage, &settings, args, &mut TerminalPrompter::new())?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = open_storage(paths, &settings)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            let storage = open_storage(paths, &settings)?;
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Menu) | None => {
            let mut storage = open_storage(paths, &settings)?;
            run_menu(&mut storage, &settings, &mut TerminalPrompter::new())?;
        }
    }

    Ok(())
}
