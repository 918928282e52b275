use rusqlite::Connection;
use serde_json::json;

use modelgen_compiler::schema::{save_snapshot, SqliteSchemaSource};
use modelgen_compiler::{open_source, Config, Generator, Relation};

fn create_shop(path: &std::path::Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE customers (
            id INTEGER PRIMARY KEY,
            email VARCHAR(191) NOT NULL
        );
        CREATE TABLE orders (
            id INTEGER PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES customers(id),
            total DECIMAL(10,2) NOT NULL,
            shipped BOOLEAN
        );
        CREATE TABLE products (
            sku TEXT PRIMARY KEY,
            name VARCHAR(120) NOT NULL
        );",
    )
    .unwrap();
}

#[test]
fn generates_from_sqlite_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.sqlite");
    create_shop(&db);

    let mut source = open_source(&db, "").unwrap();
    let mut generator = Generator::from_source(source.as_mut())
        .unwrap()
        .with_root(dir.path());

    let relations = generator.inspect("customers").unwrap();
    assert!(matches!(&relations[..], [Relation::HasMany(r)] if r.related_table == "orders"));

    let report = generator
        .generate(&Config::new([("class_name", json!("Product"))], None))
        .unwrap();
    let php = std::fs::read_to_string(report.model_path).unwrap();
    assert!(php.contains("protected $primaryKey = 'sku';"));
    assert!(php.contains("protected $keyType = 'string';"));
    assert!(php.contains("public $incrementing = false;"));
    assert!(php.contains("'name' => 'required|max:120',"));
}

#[test]
fn snapshot_round_trip_preserves_classification() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    create_shop(&db);

    let schema = Generator::from_source(&mut SqliteSchemaSource::new(&db, ""))
        .unwrap()
        .schema()
        .clone();
    let snapshot = dir.path().join("shop.json");
    save_snapshot(&schema, &snapshot).unwrap();

    let mut source = open_source(&snapshot, "").unwrap();
    let generator = Generator::from_source(source.as_mut()).unwrap();
    assert_eq!(generator.schema(), &schema);
    assert_eq!(generator.inspect("orders").unwrap().len(), 1);
}

#[test]
fn shared_primary_key_is_one_to_one_for_any_key_type() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("accounts.db");
    let conn = Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY);
        CREATE TABLE profiles (user_id INTEGER PRIMARY KEY REFERENCES users(id));
        CREATE TABLE passports (user_code TEXT PRIMARY KEY REFERENCES users(id));",
    )
    .unwrap();
    drop(conn);

    let generator = Generator::from_source(&mut SqliteSchemaSource::new(&db, "")).unwrap();
    let relations = generator.inspect("users").unwrap();

    assert_eq!(relations.len(), 2);
    assert!(relations.iter().all(|r| matches!(r, Relation::HasOne(_))));
}
