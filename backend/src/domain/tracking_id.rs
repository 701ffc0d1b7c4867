//! Tracking identifier correlating a sent email with its open record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, globally unique tracking identifier (UUID v4).
///
/// Identifiers are minted by [`TrackingId::generate`] at send time. Inbound
/// identifiers arrive as free-form path segments and are parsed with
/// [`FromStr`], which only accepts the exact text [`Display`](fmt::Display)
/// produces. Other spellings of the same UUID (upper-case, simple, braced or
/// URN) never match a record.
///
/// # Examples
/// ```
/// use open_tracker::domain::TrackingId;
///
/// let id = TrackingId::generate();
/// let parsed: TrackingId = id.to_string().parse().expect("round trip");
/// assert_eq!(parsed, id);
/// assert!("nonexistent-id".parse::<TrackingId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(Uuid);

impl TrackingId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated lower-case form; this is what lands in pixel URLs.
        self.0.hyphenated().fmt(f)
    }
}

/// Error returned when text is not a canonical tracking identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingIdParseError {
    #[error("tracking id is not a UUID: {0}")]
    Malformed(#[from] uuid::Error),
    #[error("tracking id must be a lower-case hyphenated UUID")]
    NotCanonical,
}

impl FromStr for TrackingId {
    type Err = TrackingIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::try_parse(s)?;
        let mut buf = Uuid::encode_buffer();
        let canonical: &str = uuid.hyphenated().encode_lower(&mut buf);
        if canonical != s {
            return Err(TrackingIdParseError::NotCanonical);
        }
        Ok(Self(uuid))
    }
}
