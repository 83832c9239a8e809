//! Domain types and rules (no I/O).

mod record;
mod view_state;

pub use record::{
    Confirmation, FormOutcome, NewRecord, Record, RecordFilter, RecordForm, NAME_MAX_CHARS,
};
pub use view_state::{ConnectionState, ViewAction};
