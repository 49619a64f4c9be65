//! Persistence module split across logical submodules.

mod connection;
mod error;
mod records;

pub use connection::Store;
pub use error::{Result, StoreError};
pub use records::{fetch_all_rows, insert_record, RecordRow};

#[cfg(test)]
pub(crate) mod testutil {
    use tempfile::TempDir;

    use super::connection::Store;

    /// File-backed store in a throwaway directory. The directory guard
    /// must stay alive for as long as the store is used.
    pub(crate) fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().expect("create temp dir");
        let store = Store::at(dir.path().join("university.sqlite")).expect("bootstrap store");
        (dir, store)
    }
}
