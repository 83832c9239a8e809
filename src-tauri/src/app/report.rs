//! Report use case: format the displayed snapshot as CSV or JSON.

use crate::app::record::RecordStoreView;
use crate::domain::{Record, RecordFilter, ViewAction};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub count: usize,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub average_age: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReport<'a> {
    pub generated_at: String,
    pub filter: Option<&'a RecordFilter>,
    pub summary: ReportSummary,
    pub records: &'a [Record],
}

/// Rows without an age are counted but left out of the age statistics.
pub fn summarize(records: &[Record]) -> ReportSummary {
    let ages: Vec<i32> = records.iter().filter_map(|r| r.age).collect();
    let average_age = if ages.is_empty() {
        None
    } else {
        Some(ages.iter().map(|&a| f64::from(a)).sum::<f64>() / ages.len() as f64)
    };
    ReportSummary {
        count: records.len(),
        min_age: ages.iter().copied().min(),
        max_age: ages.iter().copied().max(),
        average_age,
    }
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn render_csv(records: &[Record]) -> String {
    let mut out = String::from("id,name,age\r\n");
    for r in records {
        let age = r.age.map(|a| a.to_string()).unwrap_or_default();
        let name = r.name.as_deref().unwrap_or_default();
        out.push_str(&format!("{},{},{}\r\n", r.id, csv_field(name), age));
    }
    out
}

pub fn render_json(
    records: &[Record],
    filter: Option<&RecordFilter>,
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let report = RecordReport {
        generated_at: generated_at.to_rfc3339(),
        filter,
        summary: summarize(records),
        records,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Format what the table currently shows (the active filter included).
pub fn report_generate(view: &RecordStoreView, format: ReportFormat) -> Result<String, AppError> {
    view.check(ViewAction::Report)?;
    match format {
        ReportFormat::Csv => Ok(render_csv(view.snapshot())),
        ReportFormat::Json => render_json(view.snapshot(), view.filter(), Utc::now()),
    }
}

/// Generate a report and write it to `path` (picked in the save dialog).
pub fn report_save(
    view: &RecordStoreView,
    format: ReportFormat,
    path: &Path,
) -> Result<usize, AppError> {
    let text = report_generate(view, format)?;
    std::fs::write(path, text.as_bytes())?;
    log::info!(
        "report with {} records written to {:?}",
        view.snapshot().len(),
        path
    );
    Ok(view.snapshot().len())
}
