//! Record store view: the session, the displayed snapshot and the CRUD use cases.

use crate::domain::{
    Confirmation, ConnectionState, FormOutcome, Record, RecordFilter, RecordForm, ViewAction,
};
use crate::error::AppError;
use crate::infra::{Session, SessionKind};
use serde::Serialize;
use tokio::sync::Mutex;

/// Managed state: the single view, serialized behind an async lock.
#[derive(Default)]
pub struct RecordStore(pub Mutex<RecordStoreView>);

/// Everything the table window shows. The snapshot is replaced wholesale on
/// every reload and never diffed.
#[derive(Default)]
pub struct RecordStoreView {
    session: Option<Session>,
    records: Vec<Record>,
    selected: Option<usize>,
    filter: Option<RecordFilter>,
}

#[derive(Debug, Serialize)]
pub struct ViewDto {
    pub state: ConnectionState,
    pub backend: Option<SessionKind>,
    pub records: Vec<Record>,
    pub selected: Option<usize>,
    pub filter: Option<RecordFilter>,
}

impl RecordStoreView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        if self.session.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    pub fn filter(&self) -> Option<&RecordFilter> {
        self.filter.as_ref()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn to_dto(&self) -> ViewDto {
        ViewDto {
            state: self.state(),
            backend: self.session.as_ref().map(Session::kind),
            records: self.records.clone(),
            selected: self.selected,
            filter: self.filter.clone(),
        }
    }

    /// Rejects `action` unless a session is open.
    pub(crate) fn check(&self, action: ViewAction) -> Result<(), AppError> {
        if self.state().permits_table_actions() {
            Ok(())
        } else {
            log::warn!("{} rejected: not connected", action.as_str());
            Err(AppError::NotConnected)
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session, AppError> {
        self.session.as_mut().ok_or(AppError::NotConnected)
    }

    /// Install a fresh session and reset everything derived from the old one.
    pub(crate) fn install_session(&mut self, session: Session) {
        self.session = Some(session);
        self.records.clear();
        self.selected = None;
        self.filter = None;
    }

    /// Remove the session (if any), leaving the view Disconnected and empty.
    pub(crate) fn take_session(&mut self) -> Option<Session> {
        self.records.clear();
        self.selected = None;
        self.filter = None;
        self.session.take()
    }

    async fn reload(&mut self) -> Result<ViewDto, AppError> {
        let filter = self.filter.clone();
        let records = self.session_mut()?.fetch_records(filter.as_ref()).await?;
        log::debug!("reloaded {} records", records.len());
        self.records = records;
        self.selected = None;
        Ok(self.to_dto())
    }
}

pub fn view_get(view: &RecordStoreView) -> ViewDto {
    view.to_dto()
}

/// Re-fetch every row and replace the snapshot.
pub async fn record_list(view: &mut RecordStoreView) -> Result<ViewDto, AppError> {
    view.check(ViewAction::List)?;
    view.reload().await
}

/// Select a snapshot row by index; `None` or an out-of-range index clears it.
pub fn record_select(view: &mut RecordStoreView, row: Option<usize>) -> Result<ViewDto, AppError> {
    view.check(ViewAction::Select)?;
    view.selected = row.filter(|&i| i < view.records.len());
    Ok(view.to_dto())
}

pub async fn record_insert(
    view: &mut RecordStoreView,
    outcome: FormOutcome<RecordForm>,
) -> Result<ViewDto, AppError> {
    view.check(ViewAction::Insert)?;
    let form = match outcome {
        FormOutcome::Accepted(form) => form,
        FormOutcome::Cancelled => {
            log::debug!("insert cancelled");
            return Ok(view.to_dto());
        }
    };
    let input = form.parse()?;
    let id = view.session_mut()?.insert_record(&input).await?;
    log::info!("record {} inserted", id);
    view.reload().await
}

/// Current values of the selected row, or `None` when nothing is selected.
pub fn record_edit_form(view: &RecordStoreView) -> Result<Option<RecordForm>, AppError> {
    view.check(ViewAction::EditForm)?;
    Ok(view.selected_record().map(RecordForm::from_record))
}

pub async fn record_update(
    view: &mut RecordStoreView,
    outcome: FormOutcome<RecordForm>,
) -> Result<ViewDto, AppError> {
    view.check(ViewAction::Update)?;
    let Some(current) = view.selected_record().cloned() else {
        log::debug!("update ignored: no row selected");
        return Ok(view.to_dto());
    };
    let id = current.id;
    let form = match outcome {
        FormOutcome::Accepted(form) => form,
        FormOutcome::Cancelled => {
            log::debug!("update of record {} cancelled", id);
            return Ok(view.to_dto());
        }
    };
    let input = form.parse_edit(&current)?;
    let changed = view.session_mut()?.update_record(id, &input).await?;
    log::info!("record {} updated ({} row(s))", id, changed);
    view.reload().await
}

pub async fn record_delete(
    view: &mut RecordStoreView,
    confirmation: Confirmation,
) -> Result<ViewDto, AppError> {
    view.check(ViewAction::Delete)?;
    let Some(id) = view.selected_record().map(|r| r.id) else {
        log::debug!("delete ignored: no row selected");
        return Ok(view.to_dto());
    };
    if confirmation != Confirmation::Yes {
        log::debug!("delete of record {} not confirmed", id);
        return Ok(view.to_dto());
    }
    let removed = view.session_mut()?.delete_record(id).await?;
    log::info!("record {} deleted ({} row(s))", id, removed);
    view.reload().await
}

/// Set (or clear, with `None`) the filter applied to every reload.
pub async fn record_filter(
    view: &mut RecordStoreView,
    filter: Option<RecordFilter>,
) -> Result<ViewDto, AppError> {
    view.check(ViewAction::Filter)?;
    let filter = match filter {
        Some(f) => f.normalize()?,
        None => None,
    };
    let previous = std::mem::replace(&mut view.filter, filter);
    match view.reload().await {
        Ok(dto) => Ok(dto),
        Err(e) => {
            view.filter = previous;
            Err(e)
        }
    }
}
