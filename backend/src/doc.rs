//! OpenAPI document for the tracking service.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::inbound::http::email_log::{EmailLogLookupBody, EmailLogResponseBody, NotFoundBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::send_email::{SendEmailRequestBody, SendEmailResponseBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Open tracker API",
        description = "Send tracked emails, serve tracking pixels and report first opens."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::send_email::send_email,
        crate::inbound::http::track::track_open,
        crate::inbound::http::email_log::get_email_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SendEmailRequestBody,
        SendEmailResponseBody,
        EmailLogLookupBody,
        EmailLogResponseBody,
        NotFoundBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "tracking", description = "Tracked email delivery and open reporting"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
