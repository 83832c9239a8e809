//! Report command handlers.

use crate::app::{report_generate, report_save, RecordStore, ReportFormat};
use crate::error::AppError;
use serde::Deserialize;
use std::path::PathBuf;
use tauri::State;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportReq {
    pub format: ReportFormat,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSaveReq {
    pub format: ReportFormat,
    pub path: PathBuf,
}

#[tauri::command]
pub async fn cmd_report_generate(
    store: State<'_, RecordStore>,
    req: ReportReq,
) -> Result<String, AppError> {
    let view = store.0.lock().await;
    report_generate(&view, req.format)
}

/// Returns the number of records written.
#[tauri::command]
pub async fn cmd_report_save(
    store: State<'_, RecordStore>,
    req: ReportSaveReq,
) -> Result<usize, AppError> {
    let view = store.0.lock().await;
    report_save(&view, req.format, &req.path)
}
