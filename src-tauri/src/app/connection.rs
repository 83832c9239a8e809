//! Connection manager: opens, replaces and closes the view's session.

use crate::app::record::{record_list, RecordStoreView, ViewDto};
use crate::error::AppError;
use crate::infra::Session;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 5432;

/// Credentials as typed into the connect form.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectReq {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub database: Option<String>,
}

impl fmt::Debug for ConnectReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectReq")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl ConnectReq {
    /// Build connect options from the form fields only.
    pub fn to_options(&self) -> Result<PgConnectOptions, AppError> {
        let port = self.port.trim();
        let port = if port.is_empty() {
            DEFAULT_PORT
        } else {
            port.parse::<u16>()
                .map_err(|_| AppError::ConnectionFailed(format!("invalid port '{}'", self.port)))?
        };
        // Every field is set explicitly so PG* environment variables never leak in.
        let database = self
            .database
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(self.username.as_str());
        Ok(PgConnectOptions::new()
            .host(self.host.trim())
            .port(port)
            .username(&self.username)
            .password(&self.password)
            .database(database)
            .ssl_mode(PgSslMode::Prefer)
            .application_name("records"))
    }
}

/// Open a PostgreSQL session and make sure the `records` table exists.
pub async fn open_postgres_session(req: &ConnectReq) -> Result<Session, AppError> {
    let options = req.to_options()?;
    let mut session = Session::connect_postgres(&options)
        .await
        .map_err(|e| AppError::ConnectionFailed(e.to_string()))?;
    session.ensure_schema().await?;
    Ok(session)
}

/// Open the embedded database file and make sure the `records` table exists.
pub async fn open_local_session(db_path: &Path) -> Result<Session, AppError> {
    let mut session = Session::open_sqlite(db_path)
        .map_err(|e| AppError::ConnectionFailed(e.to_string()))?;
    session.ensure_schema().await?;
    Ok(session)
}

/// Close the current session, if any. Errors are logged, never returned.
pub async fn close_session(view: &mut RecordStoreView) {
    if let Some(session) = view.take_session() {
        let kind = session.kind();
        match session.close().await {
            Ok(()) => log::info!("{:?} session closed", kind),
            Err(e) => log::warn!("closing {:?} session failed: {}", kind, e),
        }
    }
}

/// Make `session` the view's session and load the snapshot.
pub async fn attach_session(
    view: &mut RecordStoreView,
    session: Session,
) -> Result<ViewDto, AppError> {
    close_session(view).await;
    view.install_session(session);
    record_list(view).await
}

/// Connect with user-supplied credentials. Any failure leaves the view
/// Disconnected, even if a session was open before.
pub async fn connect(view: &mut RecordStoreView, req: &ConnectReq) -> Result<ViewDto, AppError> {
    close_session(view).await;
    log::info!(
        "connecting to postgres at {}:{} as {}",
        req.host,
        req.port,
        req.username
    );
    match open_postgres_session(req).await {
        Ok(session) => attach_session(view, session).await,
        Err(e) => {
            log::warn!("connect failed: {}", e);
            Err(e)
        }
    }
}

pub async fn connect_local(view: &mut RecordStoreView, db_path: &Path) -> Result<ViewDto, AppError> {
    close_session(view).await;
    log::info!("opening embedded database {:?}", db_path);
    match open_local_session(db_path).await {
        Ok(session) => attach_session(view, session).await,
        Err(e) => {
            log::warn!("opening embedded database failed: {}", e);
            Err(e)
        }
    }
}

pub async fn disconnect(view: &mut RecordStoreView) -> ViewDto {
    close_session(view).await;
    view.to_dto()
}

/// Application exit: release the session. A second call finds nothing to close.
pub async fn shutdown(view: &mut RecordStoreView) {
    close_session(view).await;
}
