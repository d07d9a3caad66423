use anyhow::Result;
use clap::{Parser, Subcommand};

use travel_expenses::cli::{
    handle_category_command, handle_expense_command, handle_export_command, handle_rate_command,
    handle_travel_command, CategoryCommands, ExpenseCommands, ExportArgs, RateCommands,
    TravelCommands,
};
use travel_expenses::config::{Settings, TravelPaths};
use travel_expenses::logging::init_tracing;
use travel_expenses::models::{UserId, DEFAULT_CATEGORIES};
use travel_expenses::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "travex",
    version,
    about = "Travel expense tracking with multi-currency summaries",
    long_about = "travex records what you spend on each trip, in whatever currency you \
                  paid, and summarizes it by category in both the travel currency and \
                  your home currency."
)]
struct Cli {
    /// User whose travels, expenses and categories are used
    #[arg(long, global = true, env = "TRAVEX_USER", default_value = "local")]
    user: String,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and system categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Travel management and summaries
    #[command(subcommand)]
    Travel(TravelCommands),

    /// Expense management
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Currency rates of a travel
    #[command(subcommand)]
    Rate(RateCommands),

    /// Export travel summaries
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = TravelPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let user = UserId::new(cli.user.trim());

    let Some(command) = cli.command else {
        println!("travex - travel expense tracking");
        println!();
        println!("Run 'travex --help' for usage information.");
        println!("Run 'travex init' to set up the data directory.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing travex at: {}", paths.base_dir().display());
            let seeded = initialize_storage(&paths)?;
            settings.save(&paths)?;
            if seeded == 0 {
                println!("Data directory already initialized; existing categories kept.");
            }
            println!("Initialization complete!");
            println!();
            println!("System categories:");
            for (name, icon, _) in DEFAULT_CATEGORIES {
                println!("  {} {}", icon, name);
            }
            println!();
            println!("Run 'travex travel create <NAME> --currency <CODE>' to start a trip.");
            return Ok(());
        }
        Commands::Config => {
            println!("travex Configuration");
            println!("====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Default home currency: {}", settings.default_home_currency);
            println!("  Missing-rate policy:   {:?}", settings.missing_rate_policy);
            println!("  Rate source:           {}", settings.rates.api_base_url);
            println!("  Fetch rate on create:  {}", settings.rates.fetch_on_create);
            println!("  Date format:           {}", settings.date_format);
            println!();
            println!("User: {}", user);
            return Ok(());
        }
        _ => {}
    }

    let storage = Storage::new(paths)?;
    storage.load_all()?;

    match command {
        Commands::Travel(cmd) => handle_travel_command(&storage, &settings, &user, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, &user, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, &user, cmd)?,
        Commands::Rate(cmd) => handle_rate_command(&storage, &settings, &user, cmd)?,
        Commands::Export(args) => handle_export_command(&storage, &settings, &user, args)?,
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
