//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive every gateway operation once against an in-memory database.
//! - Keep output deterministic for quick local sanity checks.

use clientbook_core::{
    init_schema, open_db_in_memory, ClientRepository, ClientSearch, ClientUpdate,
    SqliteClientRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    init_schema(&conn)?;
    let repo = SqliteClientRepository::try_new(&conn)?;

    let yakov = repo.create_client("Yakov", "Ivanov", Some("yak_iv@ya.ru"))?;
    let petya = repo.create_client("Petya", "Vasechkin", Some("vasechkin@ya.ru"))?;
    let vasily = repo.create_client("Vasily", "Terkin", Some("vas_ter@internet.ru"))?;

    repo.add_phone(yakov.id, "89089990101")?;
    repo.add_phone(yakov.id, "83435555555")?;
    repo.add_phone(petya.id, "5555")?;
    repo.add_phone(vasily.id, "88003000600")?;

    // Sparse update: only the last name changes.
    repo.update_client(
        petya.id,
        &ClientUpdate {
            last_name: Some("Ivanov".to_string()),
            ..ClientUpdate::default()
        },
    )?;

    let removed = repo.delete_phone(yakov.id, "83435555555")?;
    println!("removed_phone_owner={}", removed.map_or(-1, |id| id));
    repo.delete_client(vasily.id)?;

    let search = ClientSearch {
        last_name: Some("Ivanov".to_string()),
        phone: Some("5555".to_string()),
        ..ClientSearch::default()
    };
    for row in repo.find_clients(&search)? {
        println!(
            "id={} first_name={} last_name={} email={} phone={}",
            row.id,
            row.first_name,
            row.last_name,
            row.email.as_deref().unwrap_or("-"),
            row.phone.as_deref().unwrap_or("-")
        );
    }

    println!("clientbook_core version={}", clientbook_core::core_version());

    Ok(())
}
