//! Connection command handlers.

use crate::app::{connect, connect_local, disconnect, ConnectReq, RecordStore, ViewDto};
use crate::error::AppError;
use tauri::{AppHandle, State};

#[tauri::command]
pub async fn cmd_connect(
    store: State<'_, RecordStore>,
    req: ConnectReq,
) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    connect(&mut view, &req).await
}

#[tauri::command]
pub async fn cmd_connect_local(
    app: AppHandle,
    store: State<'_, RecordStore>,
) -> Result<ViewDto, AppError> {
    let db_path = crate::local_db_path(&app);
    let mut view = store.0.lock().await;
    connect_local(&mut view, &db_path).await
}

#[tauri::command]
pub async fn cmd_disconnect(store: State<'_, RecordStore>) -> Result<ViewDto, AppError> {
    let mut view = store.0.lock().await;
    Ok(disconnect(&mut view).await)
}
