pub mod app;
mod commands;
pub mod domain;
pub mod error;
pub mod infra;

use app::RecordStore;
use std::path::PathBuf;
use tauri::{AppHandle, Manager, RunEvent};

const LOCAL_DB_FILE: &str = "records.db";

fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("com.nickdu.records")
}

/// Embedded database file used by `cmd_connect_local`.
pub(crate) fn local_db_path(app: &AppHandle) -> PathBuf {
    app.path()
        .app_data_dir()
        .unwrap_or_else(|_| app_data_dir())
        .join(LOCAL_DB_FILE)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            log::info!("embedded DB path: {:?}", local_db_path(app.handle()));
            Ok(())
        })
        .manage(RecordStore::default())
        .invoke_handler(tauri::generate_handler![
            commands::connection::cmd_connect,
            commands::connection::cmd_connect_local,
            commands::connection::cmd_disconnect,
            commands::record::cmd_view_get,
            commands::record::cmd_record_list,
            commands::record::cmd_record_select,
            commands::record::cmd_record_insert,
            commands::record::cmd_record_edit_form,
            commands::record::cmd_record_update,
            commands::record::cmd_record_delete,
            commands::record::cmd_record_filter,
            commands::report::cmd_report_generate,
            commands::report::cmd_report_save,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|handle, event| {
        if let RunEvent::Exit = event {
            let store = handle.state::<RecordStore>();
            tauri::async_runtime::block_on(async {
                let mut view = store.0.lock().await;
                app::shutdown(&mut view).await;
            });
        }
    });
}
