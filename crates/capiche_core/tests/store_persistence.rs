use capiche_core::db::{open_db, open_db_in_memory};
use capiche_core::{KeyValueStore, Priority, Project, ProjectList, SqliteStore, Task};
use chrono::Utc;

#[test]
fn sqlite_store_roundtrips_registry() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let mut list = ProjectList::with_storage_key("k1");
    let mut project = Project::with_id("p1", "Home", "");
    project.add_task(Task::new("sweep", "", "Home", Utc::now(), Priority::Low));
    list.add(project).unwrap();
    list.save_to_store(&mut store).unwrap();

    let mut reloaded = ProjectList::with_storage_key("k1");
    assert_eq!(reloaded.load_from_store(&store), 1);
    assert_eq!(reloaded, list);
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capiche.sqlite3");

    let saved = {
        let conn = open_db(&path).unwrap();
        let mut store = SqliteStore::try_new(&conn).unwrap();
        let mut list = ProjectList::new();
        list.add(Project::new("Groceries", "weekly run")).unwrap();
        list.save_to_store(&mut store).unwrap();
        list
    };

    let conn = open_db(&path).unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    let mut reloaded = ProjectList::new();
    assert_eq!(reloaded.load_from_store(&store), 1);
    assert_eq!(reloaded.get_all(), saved.get_all());
}

#[test]
fn sqlite_store_malformed_value_loads_empty() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();
    store.set_item("k1", "not json{").unwrap();

    let mut list = ProjectList::with_storage_key("k1");
    list.add(Project::new("Stale", "")).unwrap();
    assert_eq!(list.load_from_store(&store), 0);
    assert!(list.is_empty());
}

#[test]
fn sqlite_store_remove_item_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    assert!(!store.remove_item("k1").unwrap());
    store.set_item("k1", "{}").unwrap();
    assert!(store.remove_item("k1").unwrap());
    assert_eq!(store.get_item("k1").unwrap(), None);
}
