use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use service::QueryError;

pub type RouteResult<O> = Result<O, ErrorResponse>;

/// JSON error body: a machine-readable kind plus a human-readable message.
/// Store failures map to 500 with a generic message, internals stay in the
/// server log.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status_code: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status_code,
            error,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "badRequest", message)
    }
}

impl From<QueryError> for ErrorResponse {
    fn from(why: QueryError) -> Self {
        match &why {
            QueryError::InvalidField(_) => {
                Self::new(StatusCode::BAD_REQUEST, "invalidField", why.to_string())
            }
            QueryError::InvalidCursor => {
                Self::new(StatusCode::BAD_REQUEST, "invalidCursor", why.to_string())
            }
            QueryError::CursorValueType { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "cursorValueType", why.to_string())
            }
            QueryError::BadRequest(_) => Self::bad_request(why.to_string()),
            QueryError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "notFound", why.to_string())
            }
            QueryError::Database(_) => {
                log::error!("request failed: {}", why);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use database::DatabaseError;
    use model::query::KeysetValueKind;

    use super::*;

    #[test]
    fn caller_caused_errors_map_to_400() {
        for why in [
            QueryError::InvalidField("foo".to_owned()),
            QueryError::InvalidCursor,
            QueryError::CursorValueType {
                value: "foo".to_owned(),
                expected: KeysetValueKind::Timestamp,
            },
            QueryError::BadRequest("nope".to_owned()),
        ] {
            let response = ErrorResponse::from(why);
            assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ErrorResponse::from(QueryError::NotFound);
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failures_leak_no_detail() {
        let why = QueryError::Database(DatabaseError::Other("secret detail".into()));
        let response = ErrorResponse::from(why);
        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.message.contains("secret"));
    }
}
