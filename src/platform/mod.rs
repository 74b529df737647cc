//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time
//! - Storage (a data directory natively, LocalStorage on web)

pub mod storage;
pub mod time;
