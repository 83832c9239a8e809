//! Application use cases.

mod connection;
mod record;
mod report;

pub use connection::{
    attach_session, close_session, connect, connect_local, disconnect, open_local_session,
    open_postgres_session, shutdown, ConnectReq, DEFAULT_PORT,
};
pub use record::{
    record_delete, record_edit_form, record_filter, record_insert, record_list, record_select,
    record_update, view_get, RecordStore, RecordStoreView, ViewDto,
};
pub use report::{
    render_csv, render_json, report_generate, report_save, summarize, RecordReport, ReportFormat,
    ReportSummary,
};
