use rusty_customers::prelude::run_app;
use std::process::exit;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("{}", e);
        exit(1);
    }
}
