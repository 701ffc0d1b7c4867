//! Lookup handler.
//!
//! ```text
//! GET /log/{tracking_id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{EmailLogPayload, GetEmailLogRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Status literal returned when no record matches.
pub const NOT_FOUND_STATUS: &str = "not found";

/// Current state of one tracked email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct EmailLogResponseBody {
    #[schema(format = "email", example = "a@example.com")]
    pub email: String,
    #[schema(format = "date-time")]
    pub sent_at: String,
    #[schema(format = "date-time", nullable = true)]
    pub opened_at: Option<String>,
    #[schema(nullable = true, example = "1.2.3.4")]
    pub ip: Option<String>,
}

impl From<EmailLogPayload> for EmailLogResponseBody {
    fn from(value: EmailLogPayload) -> Self {
        Self {
            email: value.email,
            sent_at: value.sent_at.to_rfc3339(),
            opened_at: value.opened_at.map(|at| at.to_rfc3339()),
            ip: value.ip,
        }
    }
}

/// Body returned when the identifier matches no record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct NotFoundBody {
    #[schema(example = "not found")]
    pub status: String,
}

impl Default for NotFoundBody {
    fn default() -> Self {
        Self {
            status: NOT_FOUND_STATUS.to_owned(),
        }
    }
}

/// Either the record or the not-found marker; both are served with 200.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EmailLogLookupBody {
    Found(EmailLogResponseBody),
    NotFound(NotFoundBody),
}

impl From<Option<EmailLogPayload>> for EmailLogLookupBody {
    fn from(value: Option<EmailLogPayload>) -> Self {
        match value {
            Some(payload) => Self::Found(payload.into()),
            None => Self::NotFound(NotFoundBody::default()),
        }
    }
}

/// Fetch the record behind a tracking identifier.
#[utoipa::path(
    get,
    path = "/log/{tracking_id}",
    params(
        ("tracking_id" = String, Path, description = "Identifier returned by /send_email")
    ),
    responses(
        (status = 200, description = "Record or not-found marker", body = EmailLogLookupBody),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "getEmailLog"
)]
#[get("/log/{tracking_id}")]
pub async fn get_email_log(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmailLogLookupBody>> {
    let found = state
        .email_logs
        .get_email_log(GetEmailLogRequest {
            tracking_id: path.into_inner(),
        })
        .await?;

    Ok(web::Json(EmailLogLookupBody::from(found)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockEmailLogQuery;

    async fn lookup(query: MockEmailLogQuery, uri: &str) -> (StatusCode, Value) {
        let state = HttpState {
            email_logs: Arc::new(query),
            ..HttpState::default()
        };
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_email_log),
        )
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let status = res.status();
        let body: Value = actix_test::read_body_json(res).await;
        (status, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn unopened_record_has_null_open_fields() {
        let sent_at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut query = MockEmailLogQuery::new();
        query
            .expect_get_email_log()
            .withf(|request: &GetEmailLogRequest| request.tracking_id == "abc")
            .times(1)
            .return_once(move |_| {
                Ok(Some(EmailLogPayload {
                    email: "a@example.com".to_owned(),
                    sent_at,
                    opened_at: None,
                    ip: None,
                }))
            });

        let (status, body) = lookup(query, "/log/abc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "email": "a@example.com",
                "sent_at": "2026-03-01T09:00:00+00:00",
                "opened_at": null,
                "ip": null,
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn opened_record_reports_time_and_ip() {
        let sent_at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let opened_at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 5, 0)
            .single()
            .expect("valid timestamp");
        let mut query = MockEmailLogQuery::new();
        query.expect_get_email_log().times(1).return_once(move |_| {
            Ok(Some(EmailLogPayload {
                email: "a@example.com".to_owned(),
                sent_at,
                opened_at: Some(opened_at),
                ip: Some("1.2.3.4".to_owned()),
            }))
        });

        let (status, body) = lookup(query, "/log/abc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opened_at"], json!("2026-03-01T09:05:00+00:00"));
        assert_eq!(body["ip"], json!("1.2.3.4"));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_record_is_reported_in_body() {
        let mut query = MockEmailLogQuery::new();
        query
            .expect_get_email_log()
            .times(1)
            .return_once(|_| Ok(None));

        let (status, body) = lookup(query, "/log/nonexistent-id").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "not found" }));
    }

    #[rstest]
    #[actix_web::test]
    async fn unavailable_store_yields_503() {
        let mut query = MockEmailLogQuery::new();
        query
            .expect_get_email_log()
            .times(1)
            .return_once(|_| Err(Error::service_unavailable("db down")));

        let (status, body) = lookup(query, "/log/abc").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], json!("service_unavailable"));
    }
}
