use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::{Store, StoreConfig};

/// Opens a store on `fun.dat` inside a fresh temp dir.
///
/// The `TempDir` must outlive the store.
pub fn temp_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(StoreConfig::new(dir.path().join("fun.dat"))).unwrap();
    (dir, store)
}

/// Opens a store whose file starts with exactly `contents`.
pub fn store_with_contents(contents: &[u8]) -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fun.dat");
    fs::write(&path, contents).unwrap();
    let store = Store::open(StoreConfig::new(&path)).unwrap();
    (dir, store)
}

pub fn read_bytes(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap()
}
