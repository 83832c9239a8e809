//! Connection state and the table actions gated on it.

use serde::Serialize;

/// Disconnected --connect ok--> Connected. A failed connect lands in
/// Disconnected; table actions never change the connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl ConnectionState {
    /// Every table action needs a live session.
    pub fn permits_table_actions(self) -> bool {
        self == Self::Connected
    }
}

/// User actions offered by the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAction {
    List,
    Select,
    Insert,
    EditForm,
    Update,
    Delete,
    Filter,
    Report,
}

impl ViewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Select => "select",
            Self::Insert => "insert",
            Self::EditForm => "edit_form",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Filter => "filter",
            Self::Report => "report",
        }
    }
}
