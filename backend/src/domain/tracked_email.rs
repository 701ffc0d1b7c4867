//! Content of an outgoing tracked email.
//!
//! The message is a multipart/alternative pair: a plain-text fallback and an
//! HTML part embedding a hidden 1x1 image whose URL carries the tracking
//! identifier.

use super::{EmailAddress, TrackingId};

/// Subject line used for every tracked email.
pub const TRACKED_EMAIL_SUBJECT: &str = "Tracked Email";
/// Plain-text alternative shown by clients that do not render HTML.
pub const TRACKED_EMAIL_TEXT_BODY: &str = "Hello! (HTML version required)";

/// Public origin under which pixel URLs are served, e.g. `https://mail.example.com`.
///
/// Built per request from the inbound connection so links always point back
/// at the host the sender reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelOrigin {
    scheme: String,
    host: String,
}

impl PixelOrigin {
    /// Combine a URL scheme (`http` or `https`) with a `host[:port]` authority.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Absolute pixel URL for `tracking_id`.
    ///
    /// # Examples
    /// ```
    /// use open_tracker::domain::{PixelOrigin, TrackingId};
    ///
    /// let id: TrackingId = "123e4567-e89b-12d3-a456-426614174000".parse().expect("uuid");
    /// let origin = PixelOrigin::new("https", "mail.example.com");
    /// assert_eq!(
    ///     origin.pixel_url(id),
    ///     "https://mail.example.com/track/123e4567-e89b-12d3-a456-426614174000.png",
    /// );
    /// ```
    #[must_use]
    pub fn pixel_url(&self, tracking_id: TrackingId) -> String {
        format!("{}://{}/track/{tracking_id}.png", self.scheme, self.host)
    }
}

/// A fully composed tracked email ready for a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEmail {
    tracking_id: TrackingId,
    recipient: EmailAddress,
    html_body: String,
}

impl TrackedEmail {
    /// Compose the message for `recipient`, embedding the pixel served from
    /// `origin`.
    #[must_use]
    pub fn compose(tracking_id: TrackingId, recipient: EmailAddress, origin: &PixelOrigin) -> Self {
        let url = origin.pixel_url(tracking_id);
        let html_body = format!(
            "<html><body>Hello!<br><img src='{url}' width='1' height='1' style='display:none;'></body></html>"
        );
        Self {
            tracking_id,
            recipient,
            html_body,
        }
    }

    #[must_use]
    pub const fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    #[must_use]
    pub const fn recipient(&self) -> &EmailAddress {
        &self.recipient
    }

    #[must_use]
    pub const fn subject(&self) -> &'static str {
        TRACKED_EMAIL_SUBJECT
    }

    #[must_use]
    pub const fn text_body(&self) -> &'static str {
        TRACKED_EMAIL_TEXT_BODY
    }

    #[must_use]
    pub fn html_body(&self) -> &str {
        self.html_body.as_str()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn tracking_id() -> TrackingId {
        "123e4567-e89b-12d3-a456-426614174000"
            .parse()
            .expect("fixture uuid")
    }

    #[rstest]
    #[case("http", "localhost:8080", "http://localhost:8080/track/")]
    #[case("https", "mail.example.com", "https://mail.example.com/track/")]
    fn pixel_url_uses_request_origin(
        tracking_id: TrackingId,
        #[case] scheme: &str,
        #[case] host: &str,
        #[case] prefix: &str,
    ) {
        let url = PixelOrigin::new(scheme, host).pixel_url(tracking_id);
        assert_eq!(url, format!("{prefix}{tracking_id}.png"));
    }

    #[rstest]
    fn compose_embeds_hidden_pixel(tracking_id: TrackingId) {
        let recipient = EmailAddress::new("a@example.com").expect("valid address");
        let origin = PixelOrigin::new("http", "localhost:8080");

        let email = TrackedEmail::compose(tracking_id, recipient.clone(), &origin);

        assert_eq!(email.recipient(), &recipient);
        assert_eq!(email.subject(), "Tracked Email");
        assert_eq!(email.text_body(), "Hello! (HTML version required)");
        assert_eq!(
            email.html_body(),
            "<html><body>Hello!<br><img src='http://localhost:8080/track/\
             123e4567-e89b-12d3-a456-426614174000.png' width='1' height='1' \
             style='display:none;'></body></html>"
        );
    }
}
