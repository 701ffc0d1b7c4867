//! Send handler.
//!
//! ```text
//! POST /send_email {"email":"a@example.com"}
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PixelOrigin;
use crate::domain::ports::{SendTrackedEmailRequest, SendTrackedEmailResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Status literal returned for every successful send.
pub const SENT_STATUS: &str = "sent";

/// Request payload for sending a tracked email.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SendEmailRequestBody {
    #[schema(format = "email", example = "a@example.com")]
    pub email: String,
}

/// Response payload for a successful send.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SendEmailResponseBody {
    #[schema(example = "sent")]
    pub status: String,
    #[schema(format = "uuid")]
    pub tracking_id: String,
}

impl From<SendTrackedEmailResponse> for SendEmailResponseBody {
    fn from(value: SendTrackedEmailResponse) -> Self {
        Self {
            status: SENT_STATUS.to_owned(),
            tracking_id: value.tracking_id.to_string(),
        }
    }
}

/// Pixel URLs point back at whatever scheme and host the caller reached.
///
/// Only the `Host` header and the listener's own scheme count; `Forwarded`
/// and `X-Forwarded-*` are ignored, matching how the open IP is taken from
/// the peer address.
fn request_origin(req: &HttpRequest) -> PixelOrigin {
    let config = req.app_config();
    let scheme = if config.secure() { "https" } else { "http" };
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().authority().map(|authority| authority.as_str()))
        .unwrap_or_else(|| config.host());
    PixelOrigin::new(scheme, host)
}

/// Send an email embedding a tracking pixel and record it.
#[utoipa::path(
    post,
    path = "/send_email",
    request_body = SendEmailRequestBody,
    responses(
        (status = 200, description = "Email sent and recorded", body = SendEmailResponseBody),
        (status = 400, description = "Invalid recipient or body", body = ErrorSchema),
        (status = 502, description = "Mail relay did not accept the message", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "sendEmail"
)]
#[post("/send_email")]
pub async fn send_email(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<SendEmailRequestBody>,
) -> ApiResult<web::Json<SendEmailResponseBody>> {
    let origin = request_origin(&req);
    let response = state
        .tracked_email
        .send_tracked_email(SendTrackedEmailRequest {
            recipient: payload.into_inner().email,
            origin,
        })
        .await?;

    Ok(web::Json(SendEmailResponseBody::from(response)))
}

#[cfg(test)]
#[path = "send_email_tests.rs"]
mod tests;
