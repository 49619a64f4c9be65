//! Database location, connection policy, and schema bootstrap.
//!
//! The store keeps nothing open between operations. Every insert and
//! fetch opens a short-lived connection that is closed again when it
//! goes out of scope, so the database file is released on success and
//! failure alike. Schema creation runs once when the store is opened
//! and is idempotent: every statement is `CREATE TABLE IF NOT EXISTS`,
//! so an existing database file is reused untouched.

use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::Connection;

use super::error::{Result, StoreError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".university-records-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "university.sqlite";

/// The full schema, one `CREATE TABLE IF NOT EXISTS` per table, listed
/// in dependency order so every foreign key target is created before
/// its referrers. Each statement is paired with its table name so a
/// failure can report exactly which table could not be created.
const TABLE_DDL: &[(&str, &str)] = &[
    (
        "Professor",
        "CREATE TABLE IF NOT EXISTS Professor (
            prof_id INTEGER PRIMARY KEY AUTOINCREMENT,
            f_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT UNIQUE,
            phonenumber TEXT
        )",
    ),
    (
        "Department",
        "CREATE TABLE IF NOT EXISTS Department (
            dep_id INTEGER PRIMARY KEY AUTOINCREMENT,
            dep_name TEXT NOT NULL UNIQUE,
            head_id INTEGER NOT NULL,
            FOREIGN KEY(head_id) REFERENCES Professor(prof_id)
        )",
    ),
    (
        "Student",
        "CREATE TABLE IF NOT EXISTS Student (
            std_id INTEGER PRIMARY KEY AUTOINCREMENT,
            f_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            address TEXT,
            date_of_birth TEXT NOT NULL,
            email TEXT UNIQUE,
            total_credit_hours INTEGER NOT NULL CHECK(total_credit_hours >= 0),
            status TEXT CHECK(status IN ('active', 'graduate', 'suspended')),
            ssn TEXT UNIQUE NOT NULL,
            dep_id INTEGER,
            FOREIGN KEY(dep_id) REFERENCES Department(dep_id)
        )",
    ),
    (
        "Course",
        "CREATE TABLE IF NOT EXISTS Course (
            course_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            credit_hours INTEGER NOT NULL CHECK(credit_hours IN (2, 3)),
            course_code TEXT NOT NULL UNIQUE,
            dep_id INTEGER,
            FOREIGN KEY(dep_id) REFERENCES Department(dep_id)
        )",
    ),
    (
        "Register_in",
        "CREATE TABLE IF NOT EXISTS Register_in (
            std_id INTEGER,
            course_id INTEGER,
            grade TEXT DEFAULT 'NA' CHECK(grade IN
                ('A', 'A-', 'B+', 'B', 'B-', 'C+', 'C', 'C-', 'D+', 'D', 'D-', 'F', 'NA')),
            completed INTEGER DEFAULT 0 CHECK(completed IN (0, 1)),
            year INTEGER CHECK(year >= 2015),
            season TEXT CHECK(season IN ('fall', 'summer', 'spring')),
            PRIMARY KEY (std_id, course_id, year, season),
            FOREIGN KEY(std_id) REFERENCES Student(std_id),
            FOREIGN KEY(course_id) REFERENCES Course(course_id)
        )",
    ),
    (
        "Prerequisite",
        "CREATE TABLE IF NOT EXISTS Prerequisite (
            course_id INTEGER,
            prerequisite_id INTEGER,
            PRIMARY KEY (course_id, prerequisite_id),
            FOREIGN KEY(course_id) REFERENCES Course(course_id),
            FOREIGN KEY(prerequisite_id) REFERENCES Course(course_id),
            CHECK(prerequisite_id != course_id)
        )",
    ),
    (
        "Works_in",
        "CREATE TABLE IF NOT EXISTS Works_in (
            prof_id INTEGER,
            dep_id INTEGER,
            PRIMARY KEY (prof_id, dep_id),
            FOREIGN KEY(prof_id) REFERENCES Professor(prof_id),
            FOREIGN KEY(dep_id) REFERENCES Department(dep_id)
        )",
    ),
    (
        "Teaching",
        "CREATE TABLE IF NOT EXISTS Teaching (
            prof_id INTEGER,
            course_id INTEGER,
            PRIMARY KEY (prof_id, course_id),
            FOREIGN KEY(prof_id) REFERENCES Professor(prof_id),
            FOREIGN KEY(course_id) REFERENCES Course(course_id)
        )",
    ),
    (
        "Student_phoneNumber",
        "CREATE TABLE IF NOT EXISTS Student_phoneNumber (
            std_id INTEGER,
            phone_number TEXT,
            PRIMARY KEY (std_id, phone_number),
            FOREIGN KEY(std_id) REFERENCES Student(std_id)
        )",
    ),
    (
        "Department_contact_details",
        "CREATE TABLE IF NOT EXISTS Department_contact_details (
            contact_details INTEGER,
            dep_id INTEGER,
            PRIMARY KEY (contact_details, dep_id),
            FOREIGN KEY(dep_id) REFERENCES Department(dep_id)
        )",
    ),
];

/// Handle on the on-disk database. Only the file path is retained;
/// see the module docs for the connection lifecycle.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open the store at its default per-user location, creating the
    /// data directory and any missing tables. A schema failure here is
    /// fatal to the caller: without the tables, no other operation can
    /// work.
    pub fn open_default() -> Result<Self> {
        let base_dirs = BaseDirs::new().ok_or(StoreError::NoHomeDir)?;
        Store::at(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
    }

    /// Open the store against an explicit database file. Used by tests
    /// and tooling that should not touch the per-user database.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let store = Self { path };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open a fresh connection with `PRAGMA foreign_keys = ON`. The
    /// pragma is connection-scoped in SQLite, so it has to be toggled
    /// on every connection, not just during schema creation; otherwise
    /// referential integrity would silently lapse for later operations.
    pub(crate) fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(conn)
    }

    /// Create any table that does not exist yet. Statements run in
    /// dependency order; on failure the error names the table that
    /// could not be created and earlier tables are left in place.
    fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        for (table, ddl) in TABLE_DDL {
            conn.execute(ddl, [])
                .map_err(|source| StoreError::Schema { table, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::temp_store;
    use super::*;

    fn table_names(store: &Store) -> Vec<String> {
        let conn = store.connect().expect("open connection");
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .expect("prepare table listing");
        let names = stmt
            .query_map([], |row| row.get(0))
            .expect("query table names")
            .collect::<Result<Vec<String>, _>>()
            .expect("collect table names");
        names
    }

    #[test]
    fn schema_contains_all_ten_tables() {
        let (_dir, store) = temp_store();
        assert_eq!(
            table_names(&store),
            [
                "Course",
                "Department",
                "Department_contact_details",
                "Prerequisite",
                "Professor",
                "Register_in",
                "Student",
                "Student_phoneNumber",
                "Teaching",
                "Works_in",
            ]
        );
    }

    #[test]
    fn reopening_an_existing_database_is_idempotent() {
        let (dir, store) = temp_store();
        let db_file = dir.path().join("university.sqlite");

        store
            .connect()
            .expect("open connection")
            .execute(
                "INSERT INTO Professor (f_name, last_name) VALUES ('Aya', 'Hassan')",
                [],
            )
            .expect("seed a row");

        let reopened = Store::at(&db_file).expect("reopen existing database");
        let conn = reopened.connect().expect("open connection");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Professor", [], |row| row.get(0))
            .expect("count professors");
        assert_eq!(count, 1, "existing data must survive a second bootstrap");
    }

    #[test]
    fn connections_enforce_foreign_keys() {
        let (_dir, store) = temp_store();
        let conn = store.connect().expect("open connection");
        let err = conn
            .execute(
                "INSERT INTO Department (dep_name, head_id) VALUES ('Physics', 999)",
                [],
            )
            .expect_err("dangling head_id must be rejected");
        assert!(err.to_string().contains("FOREIGN KEY"), "got: {err}");
    }
}
