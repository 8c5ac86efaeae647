use super::helpers::{read_bytes, store_with_contents, temp_store};
use crate::*;
use anyhow::Result;
use std::fs;

// --------------------- ensure_file ---------------------

#[test]
fn open_creates_missing_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fun.dat");
    assert!(!path.exists());

    let store = Store::open(StoreConfig::new(&path))?;
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
    assert!(read_bytes(&path).is_empty());
    Ok(())
}

#[test]
fn ensure_file_never_truncates() -> Result<()> {
    let (_dir, store) = store_with_contents(b"Red     ,12345,CA\n");

    store.ensure_file()?;
    store.ensure_file()?;
    let reopened = Store::open(store.config().clone())?;

    assert_eq!(read_bytes(reopened.path()), b"Red     ,12345,CA\n");
    Ok(())
}

#[test]
fn ensure_file_missing_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = StoreConfig::new(dir.path().join("nope").join("fun.dat"));
    assert!(matches!(Store::open(cfg), Err(StoreError::Io(_))));
}

// --------------------- append ---------------------

#[test]
fn append_then_exists_and_listed_last() -> Result<()> {
    let (_dir, store) = temp_store();

    store.append("Red     ,12345,CA")?;
    store.append("Blue    ,00042,TX")?;

    assert!(store.exists("Blue    ,00042,TX")?);
    assert_eq!(
        store.list()?.last().map(String::as_str),
        Some("Blue    ,00042,TX")
    );
    assert_eq!(
        read_bytes(store.path()),
        b"Red     ,12345,CA\nBlue    ,00042,TX\n"
    );
    Ok(())
}

#[test]
fn append_does_not_check_duplicates() -> Result<()> {
    let (_dir, store) = temp_store();

    store.append("Red     ,12345,CA")?;
    store.append("Red     ,12345,CA")?;

    assert_eq!(store.list()?.len(), 2);
    Ok(())
}

#[test]
fn append_rejects_unencoded_line() -> Result<()> {
    let (_dir, store) = temp_store();

    let err = store.append("Red, 12345, CA").unwrap_err();
    assert!(matches!(err, StoreError::InvalidFormat(_)));
    assert!(err.is_recoverable());
    assert!(read_bytes(store.path()).is_empty());
    Ok(())
}

#[test]
fn append_rejects_line_with_embedded_break() -> Result<()> {
    let (_dir, store) = temp_store();

    for line in ["Red\n    ,12345,CA", "Red\r    ,12345,CA"] {
        let err = store.append(line).unwrap_err();
        assert!(matches!(err, StoreError::InvalidFormat(_)), "{line:?}");
    }
    assert!(read_bytes(store.path()).is_empty());
    assert!(store.list()?.is_empty());
    Ok(())
}

#[test]
fn append_after_file_deleted_is_io_error() {
    let (_dir, store) = temp_store();
    fs::remove_file(store.path()).unwrap();

    let err = store.append("Red     ,12345,CA").unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(!err.is_recoverable());
    assert!(!store.path().exists());
}

#[test]
fn append_with_sync() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Store::open(StoreConfig::new(dir.path().join("fun.dat")).with_sync(true))?;

    store.append("Red     ,12345,CA")?;
    store.update_zipcode("Red     ,12345,CA", "7")?;
    assert_eq!(read_bytes(store.path()), b"Red     ,00007,CA\n");
    Ok(())
}

// --------------------- insert ---------------------

#[test]
fn insert_encodes_and_appends() -> Result<()> {
    let (_dir, store) = temp_store();

    let line = store.insert("Red, 12345, CA")?;
    assert_eq!(line, "Red     ,12345,CA");
    assert_eq!(line.len(), codec::LINE_LEN);
    assert_eq!(store.list()?, vec![line]);
    Ok(())
}

#[test]
fn insert_rejects_duplicate() -> Result<()> {
    let (_dir, store) = temp_store();

    store.insert("Red, 12345, CA")?;
    // same line once encoded
    let err = store.insert("  Red ,12345,CA").unwrap_err();

    match &err {
        StoreError::DuplicateEntry(line) => assert_eq!(line, "Red     ,12345,CA"),
        other => panic!("expected DuplicateEntry, got {other:?}"),
    }
    assert!(err.is_recoverable());
    assert_eq!(store.list()?.len(), 1);
    Ok(())
}

#[test]
fn insert_truncated_colors_collide() -> Result<()> {
    let (_dir, store) = temp_store();

    store.insert("Turquoise, 12345, CA")?;
    assert!(matches!(
        store.insert("Turquoisey, 12345, CA"),
        Err(StoreError::DuplicateEntry(_))
    ));
    Ok(())
}

#[test]
fn insert_rejects_invalid_format() -> Result<()> {
    let (_dir, store) = temp_store();

    for raw in ["Red, 1234, CA", "Red, 12345, ca", "Red, 12345", "Red1, 12345, CA"] {
        let err = store.insert(raw).unwrap_err();
        assert!(matches!(err, StoreError::InvalidFormat(_)), "{raw:?}");
    }
    assert!(store.list()?.is_empty());
    Ok(())
}
