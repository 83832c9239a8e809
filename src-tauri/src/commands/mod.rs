//! Tauri command handlers (DTO boundary).

pub mod connection;
pub mod record;
pub mod report;
