//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// One row per sent tracked email.
    ///
    /// `opened_at` and `ip` are either both null or both set; a CHECK
    /// constraint enforces this.
    email_logs (tracking_id) {
        /// Primary key: UUID v4 minted at send time.
        tracking_id -> Uuid,
        /// Recipient address.
        email -> Text,
        /// When the relay accepted the message.
        sent_at -> Timestamptz,
        /// First pixel fetch.
        opened_at -> Nullable<Timestamptz>,
        /// Requester address of the first pixel fetch.
        ip -> Nullable<Text>,
    }
}
