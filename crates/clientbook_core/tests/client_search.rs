use clientbook_core::db::{init_schema, open_db_in_memory};
use clientbook_core::{ClientRepository, ClientSearch, RepoError, SqliteClientRepository};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

#[test]
fn single_criterion_matches_all_clients_sharing_last_name() {
    let conn = setup();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();

    let yakov = repo
        .create_client("Yakov", "Ivanov", Some("yak_iv@ya.ru"))
        .unwrap();
    let ivan = repo.create_client("Ivan", "Ivanov", None).unwrap();
    repo.create_client("Vasily", "Terkin", None).unwrap();
    repo.add_phone(yakov.id, "89089990101").unwrap();

    let found = repo
        .find_clients(&ClientSearch::by_last_name("Ivanov"))
        .unwrap();

    let ids: Vec<i64> = found.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![yakov.id, ivan.id]);
    assert_eq!(found[0].phone.as_deref(), Some("89089990101"));
    assert_eq!(found[1].phone, None);
}

#[test]
fn conjunction_excludes_partial_matches() {
    let conn = setup();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();

    // Matches only the last name criterion.
    repo.create_client("Ivan", "Ivanov", None).unwrap();
    // Matches only the phone criterion.
    let petya = repo.create_client("Petya", "Vasechkin", None).unwrap();
    repo.add_phone(petya.id, "5555").unwrap();

    let search = ClientSearch {
        last_name: Some("Ivanov".to_string()),
        phone: Some("5555".to_string()),
        ..ClientSearch::default()
    };
    assert!(repo.find_clients(&search).unwrap().is_empty());

    // A client matching both criteria simultaneously is returned alone.
    let both = repo.create_client("Yakov", "Ivanov", None).unwrap();
    assert_eq!(repo.delete_phone(petya.id, "5555").unwrap(), Some(petya.id));
    repo.add_phone(both.id, "5555").unwrap();

    let found = repo.find_clients(&search).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, both.id);
}

#[test]
fn all_four_criteria_conjoin() {
    let conn = setup();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();

    let target = repo
        .create_client("Yakov", "Ivanov", Some("yak_iv@ya.ru"))
        .unwrap();
    repo.add_phone(target.id, "89089990101").unwrap();
    let decoy = repo
        .create_client("Yakov", "Ivanov", Some("other@ya.ru"))
        .unwrap();
    repo.add_phone(decoy.id, "83435555555").unwrap();

    let search = ClientSearch {
        first_name: Some("Yakov".to_string()),
        last_name: Some("Ivanov".to_string()),
        email: Some("yak_iv@ya.ru".to_string()),
        phone: Some("89089990101".to_string()),
    };
    let found = repo.find_clients(&search).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, target.id);
}

#[test]
fn empty_search_is_rejected() {
    let conn = setup();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();
    repo.create_client("Yakov", "Ivanov", None).unwrap();

    let err = repo.find_clients(&ClientSearch::default()).unwrap_err();
    assert!(matches!(err, RepoError::EmptySearch));

    // Empty strings count as "not supplied", same as None.
    let blank = ClientSearch {
        first_name: Some(String::new()),
        last_name: Some(String::new()),
        email: Some(String::new()),
        phone: Some(String::new()),
    };
    let err = repo.find_clients(&blank).unwrap_err();
    assert!(matches!(err, RepoError::EmptySearch));
}

#[test]
fn client_with_several_phones_yields_one_row_per_phone() {
    let conn = setup();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();

    let client = repo.create_client("Yakov", "Ivanov", None).unwrap();
    repo.add_phone(client.id, "83435555555").unwrap();
    repo.add_phone(client.id, "89089990101").unwrap();

    let found = repo
        .find_clients(&ClientSearch::by_last_name("Ivanov"))
        .unwrap();

    let phones: Vec<Option<&str>> = found.iter().map(|row| row.phone.as_deref()).collect();
    assert_eq!(phones, vec![Some("83435555555"), Some("89089990101")]);
}

#[test]
fn rerunning_a_search_yields_identical_rows() {
    let conn = setup();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();

    let yakov = repo.create_client("Yakov", "Ivanov", None).unwrap();
    repo.create_client("Ivan", "Ivanov", None).unwrap();
    repo.add_phone(yakov.id, "89089990101").unwrap();

    let search = ClientSearch::by_last_name("Ivanov");
    let first_run = repo.find_clients(&search).unwrap();
    let second_run = repo.find_clients(&search).unwrap();
    assert_eq!(first_run, second_run);
}

#[test]
fn search_by_phone_returns_its_owner() {
    let conn = setup();
    let repo = SqliteClientRepository::try_new(&conn).unwrap();

    let petya = repo.create_client("Petya", "Vasechkin", None).unwrap();
    repo.add_phone(petya.id, "5555").unwrap();
    repo.create_client("Yakov", "Ivanov", None).unwrap();

    let search = ClientSearch {
        phone: Some("5555".to_string()),
        ..ClientSearch::default()
    };
    let found = repo.find_clients(&search).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, petya.id);
    assert_eq!(found[0].first_name, "Petya");
}
