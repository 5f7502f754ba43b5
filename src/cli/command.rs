use clap::{ArgAction, Parser, Subcommand, builder::BoolishValueParser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rusty-customers", version, about = "Simple Customer Book")]
pub struct Cli {
    /// Storage choice (json, txt, mem) are available
    #[arg(long, env = "STORAGE_CHOICE", default_value_t = String::from("json"), global = true)]
    pub storage_choice: String,

    /// Path to the data file (defaults to ./.instance/customers.<ext>)
    #[arg(long, env = "CUSTOMERS_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Create an empty data file when none exists
    #[arg(
        long,
        env = "CREATE_DB_IF_NOT_EXISTS",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub create_if_missing: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Add a new customer
    Add {
        /// Unique customer ID
        #[arg(long)]
        id: i32,

        /// Customer name
        #[arg(long)]
        name: String,

        /// Customer phone number
        #[arg(long)]
        phone: String,

        /// Customer email address
        #[arg(long)]
        email: String,

        /// Customer postal code
        #[arg(long)]
        postal_code: String,
    },
    /// Edit the data of an existing customer
    /// Provide the customer ID followed by as many fields as you wish to update
    Edit {
        /// ID of the customer to edit
        #[arg(long)]
        id: i32,

        /// Update name
        #[arg(long)]
        new_name: Option<String>,

        /// Update phone number
        #[arg(long)]
        new_phone: Option<String>,

        /// Update email address
        #[arg(long)]
        new_email: Option<String>,

        /// Update postal code
        #[arg(long)]
        new_postal_code: Option<String>,
    },
    /// Show a single customer
    Show {
        /// ID of the customer to show
        #[arg(long)]
        id: i32,
    },
    /// List customers, most recently added first
    List {
        /// Reverse order
        #[arg(short, long)]
        reverse: bool,
    },
    /// Import customers from .csv file
    Import {
        /// File path to the source .csv file
        #[arg(short, long)]
        src: Option<PathBuf>,
    },
    /// Export customers to a .csv file
    Export {
        /// File path to the destination location for export file
        #[arg(short, long)]
        des: Option<PathBuf>,
    },
    /// Interactive menu; changes are saved on exit or Ctrl-C
    Shell,
}
