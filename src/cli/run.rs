use crate::{
    cli::{ConsoleObserver, display_customer, listing_row, shell},
    config::StorageConfig,
    logging::init_logging,
    prelude::{
        AppError, CustomerDataManager, CustomerFields, CustomerRecord, StorageMediums,
        command::{Cli, Commands},
    },
};
use clap::Parser;
use dotenv::dotenv;
use tracing::info;

pub fn run_app() -> Result<(), AppError> {
    // .env values must be in place before clap reads `env = ...` defaults
    dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = StorageConfig::new(
        cli.data_file.clone(),
        StorageMediums::from(&cli.storage_choice)?,
        cli.create_if_missing,
    );

    // A data file that cannot be read stops everything here
    let mut manager = CustomerDataManager::new(&config)?;

    info!(
        medium = manager.medium(),
        path = %manager.data_file().display(),
        customers = manager.customers().len(),
        "storage ready"
    );

    match cli.command {
        Commands::Shell => shell::run_shell(manager),
        command => {
            manager.set_observer(Box::new(ConsoleObserver));
            execute(&mut manager, command)?;
            manager.shutdown()
        }
    }
}

/// Runs one command against the manager. Field values are validated here,
/// before they reach the store.
pub fn execute(manager: &mut CustomerDataManager, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Add {
            id,
            name,
            phone,
            email,
            postal_code,
        } => {
            let fields = CustomerFields::new(name, phone, email, postal_code);
            fields.validate()?;

            manager.add_customer(CustomerRecord::from_fields(id, fields))?;

            println!("Customer added successfully");
            Ok(())
        }

        // Edit Customer
        Commands::Edit {
            id,
            new_name,
            new_phone,
            new_email,
            new_postal_code,
        } => {
            let Some(current) = manager.customer_by_id(id) else {
                return Err(AppError::NotFound(format!("Customer with ID {}", id)));
            };

            let mut fields = current.fields();
            if let Some(name) = new_name {
                fields.name = name;
            }
            if let Some(phone) = new_phone {
                fields.phone = phone;
            }
            if let Some(email) = new_email {
                fields.email = email;
            }
            if let Some(postal_code) = new_postal_code {
                fields.postal_code = postal_code;
            }
            fields.validate()?;

            manager.edit_customer(id, fields)?;

            println!("Customer updated successfully");
            Ok(())
        }

        Commands::Show { id } => match manager.customer_by_id(id) {
            Some(customer) => {
                println!("{}", display_customer(customer));
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Customer with ID {}", id))),
        },

        // Listing customers
        Commands::List { reverse } => {
            let customers = manager.customers();
            if customers.is_empty() {
                println!("No customer yet");
                return Ok(());
            }

            let mut rows: Vec<(usize, &CustomerRecord)> = customers.iter().enumerate().collect();
            if reverse {
                rows.reverse();
            }

            for (i, c) in rows {
                println!("{}", listing_row(i + 1, c));
            }
            Ok(())
        }

        // Import customers into storage from .csv file
        Commands::Import { src } => {
            let summary = manager.import_from_csv(src.as_deref())?;

            println!(
                "Successfully imported {} customers from {:?} ({} skipped, ID already taken; {} rejected, invalid fields).",
                summary.added, summary.path, summary.skipped, summary.rejected
            );
            Ok(())
        }

        Commands::Export { des } => {
            let (path, total) = manager.export_to_csv(des.as_deref())?;

            println!("Successfully exported {} customers to {:?}.", total, path);
            Ok(())
        }

        Commands::Shell => Err(AppError::ParseCommand("shell".to_string())),
    }
}
