//! JSON body extractor that also enforces `validator` rules
//!
//! Malformed JSON is answered with 400 / `INVALID_JSON`. Rule violations
//! are folded into `DomainError::Validation` and answered with 422 /
//! `VALIDATION_ERROR`, naming every offending field in name order.

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{ApiError, ApiResponse};
use crate::domain::DomainError;

/// `axum::Json<T>` plus `T::validate()`
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError<()>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error_with_code(
                    format!("Invalid JSON: {}", rejection),
                    "INVALID_JSON",
                )),
            )
        })?;

        if let Err(errors) = value.validate() {
            let err = validation_error(&errors);
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error_with_code(err.to_string(), err.code())),
            ));
        }

        Ok(ValidatedJson(value))
    }
}

/// Flatten field errors into one `Validation` error, e.g.
/// `customer_id: must be at least 1; registration: length must be at most 20`
pub fn validation_error(errors: &ValidationErrors) -> DomainError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| format!("{}: {}", field, describe(e))))
        .collect();

    if parts.is_empty() {
        DomainError::Validation("request body failed validation".to_string())
    } else {
        DomainError::Validation(parts.join("; "))
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }

    let min = err.params.get("min");
    let max = err.params.get("max");
    match (err.code.as_ref(), min, max) {
        ("range", Some(min), Some(max)) => format!("must be between {} and {}", min, max),
        ("range", Some(min), None) => format!("must be at least {}", min),
        ("range", None, Some(max)) => format!("must be at most {}", max),
        ("length", Some(min), Some(max)) => {
            format!("length must be between {} and {}", min, max)
        }
        ("length", Some(min), None) => format!("length must be at least {}", min),
        ("length", None, Some(max)) => format!("length must be at most {}", max),
        (code, _, _) => format!("failed the '{}' rule", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct VehicleBody {
        #[validate(length(max = 20))]
        registration: String,
        #[validate(range(min = 1))]
        customer_id: i32,
    }

    async fn accept(ValidatedJson(body): ValidatedJson<VehicleBody>) -> String {
        body.registration
    }

    async fn post_raw(body: Body) -> (StatusCode, Value) {
        let app = Router::new().route("/vehicles", post(accept));
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/vehicles")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn post_json(body: Value) -> (StatusCode, Value) {
        post_raw(Body::from(serde_json::to_vec(&body).unwrap())).await
    }

    #[tokio::test]
    async fn valid_body_reaches_handler() {
        let (status, _) = post_json(json!({"registration": "KA-01-1234", "customer_id": 3})).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, body) = post_raw(Body::from("{registration")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn rule_violations_are_422_in_field_order() {
        let (status, body) = post_json(json!({
            "registration": "THIS-PLATE-IS-FAR-TOO-LONG",
            "customer_id": 0
        }))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"],
            "Validation: customer_id: must be at least 1; registration: length must be at most 20"
        );
    }

    #[test]
    fn custom_message_wins_over_rule_description() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("range");
        err.message = Some("pick a real vehicle".into());
        errors.add("vehicle_id", err);

        match validation_error(&errors) {
            DomainError::Validation(msg) => assert_eq!(msg, "vehicle_id: pick a real vehicle"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
