//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed email log repository using Diesel.
//! - **mail**: SMTP submission of tracked emails using lettre.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod mail;
pub mod persistence;
