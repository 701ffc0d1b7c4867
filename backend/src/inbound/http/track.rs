//! Pixel handler.
//!
//! ```text
//! GET /track/{tracking_id}.png
//! ```
//!
//! Every request gets the same 200 PNG so the response never reveals whether
//! an identifier exists, was already opened, or could not be recorded.

use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, get, web};
use tracing::warn;

use crate::domain::ports::RecordOpenRequest;
use crate::domain::{TRACKING_PIXEL, TRACKING_PIXEL_CONTENT_TYPE};
use crate::inbound::http::state::HttpState;

fn pixel_response() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(TRACKING_PIXEL_CONTENT_TYPE)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(Bytes::from_static(&TRACKING_PIXEL))
}

/// Peer address of the connection, without the port; empty when unknown.
fn requester_ip(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}

/// Record the first fetch of a tracking pixel and serve the pixel.
#[utoipa::path(
    get,
    path = "/track/{tracking_id}.png",
    params(
        ("tracking_id" = String, Path, description = "Identifier returned by /send_email")
    ),
    responses(
        (status = 200, description = "Fixed 1x1 transparent PNG", content_type = "image/png")
    ),
    tags = ["tracking"],
    operation_id = "trackOpen"
)]
#[get("/track/{tracking_id}.png")]
pub async fn track_open(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let tracking_id = path.into_inner();
    let request = RecordOpenRequest {
        tracking_id: tracking_id.clone(),
        ip: requester_ip(&req),
    };

    if let Err(err) = state.open_tracking.record_open(request).await {
        warn!(
            %tracking_id,
            code = ?err.code(),
            error = %err,
            "open not recorded; serving pixel anyway"
        );
    }

    pixel_response()
}
