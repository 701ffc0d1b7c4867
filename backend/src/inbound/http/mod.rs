//! HTTP inbound adapter exposing the tracking endpoints.

pub mod email_log;
pub mod error;
pub mod health;
pub mod schemas;
pub mod send_email;
pub mod state;
pub mod track;

pub use error::{ApiResult, json_error_handler};
