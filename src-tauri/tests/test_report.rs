//! Report integration tests: the report reflects what the table shows

use app_lib::app::{
    attach_session, record_filter, record_insert, report_generate, report_save, RecordStoreView,
    ReportFormat,
};
use app_lib::domain::{FormOutcome, RecordFilter, RecordForm};
use app_lib::infra::open_test_session;

async fn seeded_view() -> RecordStoreView {
    let mut view = RecordStoreView::new();
    attach_session(&mut view, open_test_session()).await.unwrap();
    for (name, age) in [("Alice", "30"), ("Bob", "41"), ("Carol, Jr", "19")] {
        record_insert(
            &mut view,
            FormOutcome::Accepted(RecordForm {
                name: name.into(),
                age: age.into(),
            }),
        )
        .await
        .unwrap();
    }
    view
}

#[tokio::test]
async fn csv_report_lists_every_displayed_row() {
    let view = seeded_view().await;
    let csv = report_generate(&view, ReportFormat::Csv).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "id,name,age");
    assert!(lines[1].ends_with(",Alice,30"));
    assert!(lines[3].ends_with(",\"Carol, Jr\",19"));
}

#[tokio::test]
async fn json_report_honours_active_filter() {
    let mut view = seeded_view().await;
    record_filter(
        &mut view,
        Some(RecordFilter {
            name_contains: None,
            min_age: Some(25),
            max_age: None,
        }),
    )
    .await
    .unwrap();

    let text = report_generate(&view, ReportFormat::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["summary"]["count"], 2);
    assert_eq!(v["summary"]["minAge"], 30);
    assert_eq!(v["summary"]["maxAge"], 41);
    assert_eq!(v["summary"]["averageAge"], 35.5);
    assert_eq!(v["filter"]["minAge"], 25);
    assert_eq!(v["records"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn report_save_writes_file() {
    let view = seeded_view().await;
    let path = std::env::temp_dir().join(format!("records-report-{}.csv", std::process::id()));
    let written = report_save(&view, ReportFormat::Csv, &path).unwrap();
    assert_eq!(written, 3);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("id,name,age"));
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn report_save_to_missing_dir_is_io_error() {
    let view = seeded_view().await;
    let path = std::env::temp_dir()
        .join(format!("records-missing-{}", std::process::id()))
        .join("nested")
        .join("report.csv");
    let err = report_save(&view, ReportFormat::Csv, &path).unwrap_err();
    assert_eq!(err.code(), "IO_ERROR");
}
