//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `ekusa_core` wiring: config, logging, SQLite namespace, services.
//! - Print a deterministic summary of every collection.

use ekusa_core::db::{open_db, open_db_in_memory};
use ekusa_core::{
    ContactService, CoreConfig, EventService, MembershipService, NewsService, RecordStore,
    RegistrationService, SqliteBackend,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ekusa_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::from_env()?;
    config.init_logging()?;

    println!("ekusa_core ping={}", ekusa_core::ping());
    println!("ekusa_core version={}", ekusa_core::core_version());

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = RecordStore::new(SqliteBackend::new(&conn));

    let news = NewsService::new(&store).feed();
    let events = EventService::new(&store).schedule();
    let members = MembershipService::new(&store);
    let contacts = ContactService::new(&store).list();
    let registrations = RegistrationService::new(&store).list();

    println!(
        "news featured={} regular={}",
        news.featured.len(),
        news.regular.len()
    );
    println!(
        "events upcoming={} past={}",
        events.upcoming.len(),
        events.past.len()
    );
    println!(
        "members effective={} interests={}",
        members.members().len(),
        members.interests().len()
    );
    println!("contacts total={}", contacts.len());
    println!("registrations total={}", registrations.len());

    info!("event=cli_summary module=cli status=ok");
    Ok(())
}
