pub mod activity;
pub mod board;
pub mod config;
pub mod inbox;
pub mod incentive;
pub mod member;
pub mod revenue;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use teamboard_core::{Config, Database, Ledger};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the ledger over the default database with the saved config.
pub fn open_ledger() -> Result<Ledger<Database>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    Ok(Ledger::new(db, config))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
