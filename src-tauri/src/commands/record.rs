use crate::app::{
    record_delete, record_edit_form, record_filter, record_insert, record_list, record_select,
    record_update, view_get, RecordStore, ViewDto,
};
use crate::domain::{Confirmation, FormOutcome, RecordFilter, RecordForm};
use crate::error::AppError;
use serde::Deserialize;
use tauri::State;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSelectReq {
    pub row: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFormReq {
    pub outcome: FormOutcome<RecordForm>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDeleteReq {
    pub confirmation: Confirmation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilterReq {
    pub filter: Option<RecordFilter>,
}

#[tauri::command]
pub async fn cmd_view_get(store: State<'_, RecordStore>) -> Result<ViewDto, AppError> {
    let view = store.0.lock().await;
    Ok(view_get(&view))
}

#[tauri::command]
pub async fn cmd_record_list(store: State<'_, RecordStore>) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    record_list(&mut view).await
}

#[tauri::command]
pub async fn cmd_record_select(
    store: State<'_, RecordStore>,
    req: RecordSelectReq,
) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    record_select(&mut view, req.row)
}

#[tauri::command]
pub async fn cmd_record_insert(
    store: State<'_, RecordStore>,
    req: RecordFormReq,
) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    record_insert(&mut view, req.outcome).await
}

#[tauri::command]
pub async fn cmd_record_edit_form(
    store: State<'_, RecordStore>,
) -> Result<Option<RecordForm>, AppError> {
    let view = store.0.lock().await;
    record_edit_form(&view)
}

#[tauri::command]
pub async fn cmd_record_update(
    store: State<'_, RecordStore>,
    req: RecordFormReq,
) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    record_update(&mut view, req.outcome).await
}

#[tauri::command]
pub async fn cmd_record_delete(
    store: State<'_, RecordStore>,
    req: RecordDeleteReq,
) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    record_delete(&mut view, req.confirmation).await
}

#[tauri::command]
pub async fn cmd_record_filter(
    store: State<'_, RecordStore>,
    req: Option<RecordFilterReq>,
) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    record_filter(&mut view, req.and_then(|r| r.filter)).await
}
