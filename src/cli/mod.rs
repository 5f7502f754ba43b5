pub mod command;
pub mod run;
pub mod shell;

pub use run::run_app;

use crate::domain::{ChangeObserver, CustomerRecord};

pub fn display_customer(customer: &CustomerRecord) -> String {
    format!(
        "ID: {}\n\
        Name: {}\n\
        Phone: {}\n\
        Email: {}\n\
        Postal code: {}",
        customer.id(),
        customer.name(),
        customer.phone(),
        customer.email(),
        customer.postal_code()
    )
}

pub fn listing_row(position: usize, customer: &CustomerRecord) -> String {
    format!(
        "{position:>3}. {:<6} {:<20} {:15} {:^30} {:<10}",
        customer.id(),
        customer.name(),
        customer.phone(),
        customer.email(),
        customer.postal_code()
    )
}

/// Mirrors every store change on stdout, the way a table view would
/// insert or replace a row.
pub struct ConsoleObserver;

impl ChangeObserver for ConsoleObserver {
    fn on_item_added(&mut self, record: &CustomerRecord) {
        println!("{}", listing_row(1, record));
    }

    fn on_item_changed(&mut self, index: usize, record: &CustomerRecord) {
        println!("{}", listing_row(index + 1, record));
    }
}
