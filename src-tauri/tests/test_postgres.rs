//! Live PostgreSQL tests.
//! Run with: RECORDS_TEST_PG_HOST=localhost RECORDS_TEST_PG_USER=postgres \
//!   RECORDS_TEST_PG_PASSWORD=... cargo test --test test_postgres -- --ignored

use app_lib::app::{
    connect, record_delete, record_insert, record_select, record_update, shutdown, ConnectReq,
    RecordStoreView,
};
use app_lib::domain::{Confirmation, ConnectionState, FormOutcome, RecordForm};
use app_lib::infra::SessionKind;
use sqlx::{Connection, PgConnection};

fn env_req() -> ConnectReq {
    let var = |k: &str, d: &str| std::env::var(k).unwrap_or_else(|_| d.to_string());
    ConnectReq {
        host: var("RECORDS_TEST_PG_HOST", "localhost"),
        port: var("RECORDS_TEST_PG_PORT", "5432"),
        username: var("RECORDS_TEST_PG_USER", "postgres"),
        password: var("RECORDS_TEST_PG_PASSWORD", "postgres"),
        database: std::env::var("RECORDS_TEST_PG_DATABASE").ok(),
    }
}

fn form(name: &str, age: &str) -> FormOutcome<RecordForm> {
    FormOutcome::Accepted(RecordForm {
        name: name.into(),
        age: age.into(),
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn connect_twice_keeps_one_table() {
    let mut view = RecordStoreView::new();
    let dto = connect(&mut view, &env_req()).await.unwrap();
    assert_eq!(dto.state, ConnectionState::Connected);
    assert_eq!(dto.backend, Some(SessionKind::Postgres));
    connect(&mut view, &env_req()).await.unwrap();
    shutdown(&mut view).await;

    let options = env_req().to_options().unwrap();
    let mut conn = PgConnection::connect_with(&options).await.unwrap();
    let tables: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = 'records'",
    )
    .fetch_one(&mut conn)
    .await
    .unwrap();
    assert_eq!(tables, 1);
    conn.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn crud_round_on_live_server() {
    let mut view = RecordStoreView::new();
    connect(&mut view, &env_req()).await.unwrap();

    let name = format!("it-{}", std::process::id());
    let dto = record_insert(&mut view, form(&name, "30")).await.unwrap();
    let i = dto
        .records
        .iter()
        .position(|r| r.name.as_deref() == Some(name.as_str()))
        .unwrap();
    let id = dto.records[i].id;

    record_select(&mut view, Some(i)).unwrap();
    let dto = record_update(&mut view, form(&name, "31")).await.unwrap();
    let rec = dto.records.iter().find(|r| r.id == id).unwrap();
    assert_eq!(rec.age, Some(31));

    let i = dto.records.iter().position(|r| r.id == id).unwrap();
    record_select(&mut view, Some(i)).unwrap();
    let dto = record_delete(&mut view, Confirmation::Yes).await.unwrap();
    assert!(dto.records.iter().all(|r| r.id != id));

    shutdown(&mut view).await;
}
