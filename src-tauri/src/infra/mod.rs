//! Infrastructure: database sessions and schema bootstrap.

pub mod db;

pub use db::{open_test_session, Session, SessionKind};
