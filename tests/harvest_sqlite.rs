// tests/harvest_sqlite.rs
//! End-to-end harvests against a mock API into the SQLite sink.

mod common;

use brp_feedback::{AppError, Harvester, SkipLog, SqliteSink, TableName, TablePolicy};
use common::*;
use pretty_assertions::assert_eq;
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

fn table() -> TableName {
    TableName::new("feedback").unwrap()
}

type Row = (i64, Option<String>, Option<String>);

fn rows(db: &Path) -> Vec<Row> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare("SELECT id, attachmentUrl, ersFileName FROM feedback ORDER BY rowid")
        .unwrap();
    stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .map(Result::unwrap)
        .collect()
}

async fn harvest_into(
    server: &MockServer,
    db: &Path,
    skipped: &Path,
    policy: TablePolicy,
) -> Result<brp_feedback::HarvestReport, AppError> {
    let mut sink = SqliteSink::open(db, table(), policy)?;
    let mut skip_log = SkipLog::new(skipped);
    let client = client(server);
    let plan = plan();
    Harvester::new(&client, &plan)
        .run(&mut sink, &mut skip_log)
        .await
}

#[tokio::test]
async fn two_pages_become_three_rows() {
    let server = MockServer::start().await;
    mount_two_pages(&server, None).await;
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("data").join("feedback.db");

    let report = harvest_into(&server, &db, &dir.path().join("skipped.txt"), TablePolicy::Fresh)
        .await
        .unwrap();

    assert_eq!(report.sink.records_written, 3);
    assert_eq!(
        rows(&db),
        vec![
            (
                1,
                Some("https://example.org/download/A1".to_string()),
                Some("doc.pdf".to_string())
            ),
            (2, None, None),
            (3, None, None),
        ]
    );

    let conn = Connection::open(&db).unwrap();
    let (surname, publication): (String, i64) = conn
        .query_row(
            "SELECT surname, publicationId FROM feedback WHERE id = 2",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(surname, "Doe");
    assert_eq!(publication, 8285038);
}

#[tokio::test]
async fn committed_pages_survive_a_skipped_page() {
    let server = MockServer::start().await;
    mount_two_pages(&server, Some(ResponseTemplate::new(500))).await;
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("feedback.db");
    let skipped = dir.path().join("skipped.txt");

    let report = harvest_into(&server, &db, &skipped, TablePolicy::Fresh)
        .await
        .unwrap();

    assert_eq!(report.skipped_pages, vec![1]);
    assert_eq!(rows(&db).len(), 2);
    assert_eq!(std::fs::read_to_string(&skipped).unwrap(), "1\n");
}

#[tokio::test]
async fn zero_pages_leave_an_empty_table() {
    let server = MockServer::start().await;
    mount_count(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope(0, 0, vec![])),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("feedback.db");

    let report = harvest_into(&server, &db, &dir.path().join("skipped.txt"), TablePolicy::Fresh)
        .await
        .unwrap();

    assert_eq!(report.sink.records_written, 0);
    assert!(rows(&db).is_empty());
}

#[tokio::test]
async fn rerun_requires_an_explicit_policy() {
    let server = MockServer::start().await;
    mount_two_pages(&server, None).await;
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("feedback.db");
    let skipped = dir.path().join("skipped.txt");

    harvest_into(&server, &db, &skipped, TablePolicy::Fresh)
        .await
        .unwrap();

    let sent = server.received_requests().await.unwrap().len();
    let fresh = harvest_into(&server, &db, &skipped, TablePolicy::Fresh).await;
    assert!(matches!(fresh, Err(AppError::DestinationExists { .. })));
    assert_eq!(server.received_requests().await.unwrap().len(), sent);

    let append = harvest_into(&server, &db, &skipped, TablePolicy::Append).await;
    assert!(matches!(append, Err(AppError::Database(_))));
    assert_eq!(rows(&db).len(), 3);

    let replace = harvest_into(&server, &db, &skipped, TablePolicy::Replace)
        .await
        .unwrap();
    assert_eq!(replace.sink.records_written, 3);
    assert_eq!(rows(&db).len(), 3);
}
