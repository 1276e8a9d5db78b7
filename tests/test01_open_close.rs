use std::collections::HashMap;
use std::path::Path;

use sqlite_conn::prelude::*;
use sqlite_conn::test_utils::{EngineEvent, RecordingHandle};
use sqlite_conn::types::{GeneratedKeys, LargeObjectKind};
use tempfile::tempdir;

fn open_memory() -> Result<Connection<RecordingHandle>, SqliteConnError> {
    Connection::<RecordingHandle>::open_with_engine(
        "sqlite::memory:",
        ":memory:",
        &ConnectOptions::default(),
    )
}

#[test]
fn memory_open_defaults() -> Result<(), SqliteConnError> {
    let conn = open_memory()?;
    assert!(!conn.is_read_only());
    assert!(conn.auto_commit()?);
    assert_eq!(conn.transaction_state()?, TransactionState::AutoCommit);
    assert_eq!(conn.isolation_level()?, IsolationLevel::Serializable);
    assert_eq!(conn.busy_timeout()?, 3000);
    assert_eq!(conn.url(), "sqlite::memory:");
    assert_eq!(conn.date_encoding(), DateEncoding::UnixMillis);

    let journal = conn.handle()?.journal();
    assert_eq!(
        journal.events(),
        vec![
            EngineEvent::Open {
                path: Path::new(":memory:").to_path_buf(),
                flags: EngineFlags::default(),
            },
            EngineEvent::BusyTimeout(3000),
        ]
    );
    Ok(())
}

#[test]
fn missing_parent_names_first_missing_ancestor() {
    let err = Connection::<RecordingHandle>::open_with_engine(
        "sqlite:/no/such/parent/db.file",
        "/no/such/parent/db.file",
        &ConnectOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("/no/such/parent"));
    match err {
        SqliteConnError::MissingDirectory { missing, .. } => {
            assert_eq!(missing, Path::new("/no"));
        }
        other => panic!("expected MissingDirectory, got {other:?}"),
    }
}

#[test]
fn missing_parent_inside_existing_tree() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("x").join("y").join("app.db");
    let err = Connection::<RecordingHandle>::open_with_engine(
        "sqlite:app",
        target.to_str().expect("utf8 path"),
        &ConnectOptions::default(),
    )
    .unwrap_err();
    match err {
        SqliteConnError::MissingDirectory { missing, .. } => {
            assert_eq!(missing, dir.path().join("x"));
        }
        other => panic!("expected MissingDirectory, got {other:?}"),
    }
}

#[test]
fn file_open_passes_absolute_path_and_flags() -> Result<(), SqliteConnError> {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("app.db");
    let options = ConnectOptions::builder()
        .shared_cache(true)
        .julian_day(true)
        .busy_timeout_ms(500)
        .finish();
    let conn = Connection::<RecordingHandle>::open_with_engine(
        "sqlite:app.db",
        target.to_str().expect("utf8 path"),
        &options,
    )?;

    assert!(!target.exists(), "write check must not leave a file behind");
    assert!(conn.shared_cache());
    assert_eq!(conn.date_encoding(), DateEncoding::JulianDay);
    assert_eq!(
        conn.handle()?.journal().events(),
        vec![
            EngineEvent::Open {
                path: target.clone(),
                flags: EngineFlags {
                    shared_cache: true,
                    read_only: false,
                },
            },
            EngineEvent::BusyTimeout(500),
        ]
    );
    Ok(())
}

#[test]
fn engine_open_failure_is_a_resource_error() {
    RecordingHandle::fail_next_open();
    let err = open_memory().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn close_is_idempotent() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    let journal = conn.handle()?.journal();

    conn.close()?;
    assert!(conn.is_closed());
    conn.close()?;
    assert!(conn.is_closed());

    let closes = journal
        .events()
        .into_iter()
        .filter(|e| *e == EngineEvent::Close)
        .count();
    assert_eq!(closes, 1);
    Ok(())
}

#[test]
fn operations_after_close_are_state_errors() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    conn.close()?;

    let errors = [
        conn.auto_commit().map(|_| ()).unwrap_err(),
        conn.set_auto_commit(false).unwrap_err(),
        conn.commit().unwrap_err(),
        conn.rollback().unwrap_err(),
        conn.set_isolation_level(IsolationLevel::ReadUncommitted)
            .unwrap_err(),
        conn.set_busy_timeout(10).unwrap_err(),
        conn.set_savepoint().map(|_| ()).unwrap_err(),
        conn.release_savepoint(&Savepoint::Anonymous(0)).unwrap_err(),
        conn.create_statement().map(|_| ()).unwrap_err(),
        conn.meta_data().map(|_| ()).unwrap_err(),
        conn.handle().map(|_| ()).unwrap_err(),
        conn.catalog().map(|_| ()).unwrap_err(),
        conn.prepare_call("CALL p()").map(|_| ()).unwrap_err(),
        conn.prepare_statement_returning("INSERT INTO t VALUES (1)", GeneratedKeys::Auto)
            .map(|_| ())
            .unwrap_err(),
        conn.type_map().map(|_| ()).unwrap_err(),
        conn.set_type_map(HashMap::new()).unwrap_err(),
        conn.client_info("app").map(|_| ()).unwrap_err(),
        conn.set_client_info("app", "x").unwrap_err(),
        conn.create_large_object(LargeObjectKind::Blob)
            .map(|_| ())
            .unwrap_err(),
        conn.create_array_of("TEXT", &[]).map(|_| ()).unwrap_err(),
        conn.create_struct("pair", &[]).map(|_| ()).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::State, "{err}");
        assert_eq!(err.to_string(), "database connection closed");
    }
    assert!(!conn.is_valid());

    // Fixed-at-open facts stay readable for collaborators after close.
    assert_eq!(conn.url(), "sqlite::memory:");
    assert!(!conn.is_read_only());
    assert!(!conn.shared_cache());
    assert_eq!(conn.date_encoding(), DateEncoding::UnixMillis);
    Ok(())
}

#[test]
fn busy_timeout_reconfigures_the_handle() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    conn.set_busy_timeout(42)?;
    assert_eq!(conn.busy_timeout()?, 42);
    assert_eq!(
        conn.handle()?.journal().events().last(),
        Some(&EngineEvent::BusyTimeout(42))
    );
    Ok(())
}

#[test]
fn metadata_is_created_once_and_closed_with_the_connection() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    let first = conn.meta_data()?.clone();
    assert_eq!(first.url(), "sqlite::memory:");
    assert_eq!(first.database_product_version(), "3.0.0-recording");
    assert_eq!(first.engine_status(), "native");
    assert_eq!(conn.meta_data()?, &first);

    conn.close()?;
    assert!(conn.meta_data().is_err());
    Ok(())
}

#[test]
fn compat_operations_are_trivial_or_typed_unsupported() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    assert_eq!(conn.catalog()?, None);
    conn.set_catalog("main")?;
    assert_eq!(conn.native_sql("SELECT 1")?, "SELECT 1");
    assert_eq!(conn.warnings()?, None);
    conn.clear_warnings()?;
    conn.set_read_only(true)?;
    assert!(!conn.is_read_only());
    assert!(conn.is_valid());

    assert!(matches!(
        conn.type_map(),
        Err(SqliteConnError::Unsupported(Capability::TypeMap))
    ));
    assert!(matches!(
        conn.client_info("app"),
        Err(SqliteConnError::Unsupported(Capability::ClientInfo))
    ));
    assert!(matches!(
        conn.prepare_call("CALL p()").map(|_| ()),
        Err(SqliteConnError::Unsupported(Capability::StoredProcedures))
    ));
    assert!(matches!(
        conn.create_large_object(LargeObjectKind::Blob),
        Err(SqliteConnError::Unsupported(Capability::LargeObject(_)))
    ));
    assert!(conn.handle()?.journal().commands().is_empty());
    Ok(())
}
