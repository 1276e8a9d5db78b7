use sqlite_conn::prelude::*;
use sqlite_conn::test_utils::RecordingHandle;

fn open_memory() -> Result<Connection<RecordingHandle>, SqliteConnError> {
    Connection::<RecordingHandle>::open_with_engine(
        "sqlite::memory:",
        ":memory:",
        &ConnectOptions::default(),
    )
}

fn rejected_specs() -> Vec<CursorSpec> {
    let mut specs = Vec::new();
    for rt in [
        ResultSetType::ForwardOnly,
        ResultSetType::ScrollInsensitive,
        ResultSetType::ScrollSensitive,
    ] {
        for c in [Concurrency::ReadOnly, Concurrency::Updatable] {
            for h in [Holdability::CloseAtCommit, Holdability::HoldOverCommit] {
                let spec = CursorSpec::new(rt, c, h);
                if spec != CursorSpec::default() {
                    specs.push(spec);
                }
            }
        }
    }
    specs
}

#[test]
fn scroll_insensitive_statement_is_rejected_without_engine_calls() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    let journal = conn.handle()?.journal();
    journal.clear();

    let err = conn
        .create_statement_with(CursorSpec::with_type(
            ResultSetType::ScrollInsensitive,
            Concurrency::ReadOnly,
        ))
        .map(|_| ())
        .unwrap_err();

    assert!(matches!(
        err,
        SqliteConnError::Unsupported(Capability::ResultType(ResultSetType::ScrollInsensitive))
    ));
    assert!(journal.events().is_empty());
    Ok(())
}

#[test]
fn every_non_default_triple_is_rejected_on_both_paths() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    let journal = conn.handle()?.journal();
    journal.clear();

    let specs = rejected_specs();
    assert_eq!(specs.len(), 11);
    for spec in specs {
        let err = conn.create_statement_with(spec).map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported, "{spec:?}");
        let err = conn
            .prepare_statement_with("SELECT 1", spec)
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported, "{spec:?}");
    }
    assert!(journal.events().is_empty());
    Ok(())
}

#[test]
fn cursor_is_checked_before_the_connection_state() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    conn.close()?;
    let err = conn
        .create_statement_with(CursorSpec::with_type(
            ResultSetType::ForwardOnly,
            Concurrency::Updatable,
        ))
        .map(|_| ())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    Ok(())
}

#[test]
fn default_statements_run_through_the_handle() -> Result<(), SqliteConnError> {
    let mut conn = open_memory()?;
    let journal = conn.handle()?.journal();

    {
        let mut stmt = conn.prepare_statement("DELETE FROM t")?;
        assert_eq!(stmt.sql(), "DELETE FROM t");
        assert_eq!(stmt.cursor(), CursorSpec::default());
        stmt.execute()?;
    }
    conn.create_statement()?.execute_batch("VACUUM")?;

    assert_eq!(journal.commands(), vec!["DELETE FROM t", "VACUUM"]);
    Ok(())
}

#[test]
fn holdability_only_accepts_close_at_commit() -> Result<(), SqliteConnError> {
    let conn = open_memory()?;
    assert_eq!(conn.holdability()?, Holdability::CloseAtCommit);
    conn.set_holdability(Holdability::CloseAtCommit)?;
    let err = conn
        .set_holdability(Holdability::HoldOverCommit)
        .unwrap_err();
    assert!(matches!(
        err,
        SqliteConnError::Unsupported(Capability::Holdability(Holdability::HoldOverCommit))
    ));
    Ok(())
}
