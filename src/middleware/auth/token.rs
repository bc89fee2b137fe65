//! Token check for every consignment call: extract → validate remotely → pass through.
//!
//! This is an interface-level decorator: the wrapped router exposes exactly
//! the same surface as the inner one, with a single validation round trip
//! in front of every call. Validation and delegation are strictly
//! sequential; the inner handler is never entered before the authority has
//! answered.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Metadata key carrying the caller's credential. Clients historically
/// send it as `Token`; header-name matching is case-insensitive, so the
/// lowercase form here matches any casing on the wire.
pub const TOKEN_HEADER: &str = "token";

/// Put the token check in front of every route in `router`.
///
/// Example:
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::token::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, token_middleware))
}

async fn token_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // No metadata at all → reject before anything else runs. An empty
    // token value is NOT rejected here; the authority decides.
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingAuthMetadata)?
        .to_owned();

    tracing::debug!(
        backend = state.auth.backend_name(),
        "authenticating inbound call"
    );

    // One synchronous round trip per call. A failure (rejection or
    // transport) is surfaced to the caller as-is, not reinterpreted.
    state.auth.validate_token(&token).await?;

    let res = next.run(req).await;

    tracing::debug!(status = %res.status(), "auth-wrapped handler completed");

    Ok(res)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::{TOKEN_HEADER, apply};
    use crate::error::AppError;
    use crate::services::auth::client::{TokenValidator, ValidationError, ValidationResult};
    use crate::services::vessel::{Vessel, VesselError, VesselFinder, VesselSpec};
    use crate::state::AppState;

    enum Verdict {
        AcceptAll,
        RejectAll(&'static str),
        AcceptOnly(&'static str),
    }

    /// Canned authority; records every credential it is asked about.
    struct TestValidator {
        verdict: Verdict,
        seen: Mutex<Vec<String>>,
    }

    impl TestValidator {
        fn new(verdict: Verdict) -> Arc<Self> {
            Arc::new(Self {
                verdict,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenValidator for TestValidator {
        fn backend_name(&self) -> &'static str {
            "test"
        }

        async fn validate_token(&self, token: &str) -> ValidationResult {
            self.seen.lock().unwrap().push(token.to_owned());
            match self.verdict {
                Verdict::AcceptAll => Ok(()),
                Verdict::RejectAll(detail) => Err(ValidationError::Rejected {
                    detail: detail.to_string(),
                }),
                Verdict::AcceptOnly(good) => {
                    if token == good {
                        Ok(())
                    } else {
                        Err(ValidationError::Rejected {
                            detail: "token invalid".to_string(),
                        })
                    }
                }
            }
        }
    }

    struct NoVessels;

    #[async_trait]
    impl VesselFinder for NoVessels {
        async fn find_available(&self, _spec: &VesselSpec) -> Result<Vessel, VesselError> {
            Err(VesselError::NoneAvailable)
        }
    }

    fn test_state(validator: Arc<TestValidator>) -> AppState {
        // connect_lazy never touches the network; the handlers under test
        // never use the pool.
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://0.0.0.0:5432/consignments")
            .unwrap();
        AppState::new(db, Arc::new(NoVessels), validator)
    }

    /// Inner router with a handler that counts its invocations and echoes
    /// the request body.
    fn echo_router(validator: Arc<TestValidator>, hits: Arc<AtomicUsize>) -> Router {
        let state = test_state(validator);
        let inner = Router::new().route(
            "/echo",
            post(move |body: String| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    body
                }
            }),
        );
        apply(inner, state.clone()).with_state(state)
    }

    fn echo_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/echo");
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder.body(Body::from("payload")).unwrap()
    }

    async fn error_body(res: axum::response::Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_metadata_rejects_before_validation_and_handler() {
        let validator = TestValidator::new(Verdict::AcceptAll);
        let hits = Arc::new(AtomicUsize::new(0));
        let app = echo_router(validator.clone(), hits.clone());

        let res = app.oneshot(echo_request(None)).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = error_body(res).await;
        assert_eq!(body["error"]["code"], "MISSING_AUTH_METADATA");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(validator.seen().is_empty());
    }

    #[tokio::test]
    async fn rejected_token_short_circuits_with_detail_unchanged() {
        let validator = TestValidator::new(Verdict::RejectAll("token invalid for user"));
        let hits = Arc::new(AtomicUsize::new(0));
        let app = echo_router(validator.clone(), hits.clone());

        let res = app.oneshot(echo_request(Some("bad"))).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = error_body(res).await;
        assert_eq!(body["error"]["message"], "token invalid for user");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(validator.seen(), vec!["bad".to_string()]);
    }

    #[tokio::test]
    async fn accepted_token_runs_handler_exactly_once() {
        let validator = TestValidator::new(Verdict::AcceptAll);
        let hits = Arc::new(AtomicUsize::new(0));
        let app = echo_router(validator, hits.clone());

        let res = app.oneshot(echo_request(Some("good"))).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"payload");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_token_goes_to_the_authority_unchanged() {
        let validator = TestValidator::new(Verdict::AcceptAll);
        let hits = Arc::new(AtomicUsize::new(0));
        let app = echo_router(validator.clone(), hits.clone());

        let res = app.oneshot(echo_request(Some(""))).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(validator.seen(), vec![String::new()]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handler_error_passes_through_unwrapped() {
        let validator = TestValidator::new(Verdict::AcceptAll);
        let state = test_state(validator);
        let inner = Router::new().route(
            "/fail",
            post(|| async { Err::<String, AppError>(AppError::not_found("consignment")) }),
        );
        let app = apply(inner, state.clone()).with_state(state);

        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/fail")
                    .header(TOKEN_HEADER, "good")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = error_body(res).await;
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn concurrent_calls_resolve_independently() {
        let validator = TestValidator::new(Verdict::AcceptOnly("good"));
        let hits = Arc::new(AtomicUsize::new(0));
        let app = echo_router(validator, hits.clone());

        let (ok, rejected) = tokio::join!(
            app.clone().oneshot(echo_request(Some("good"))),
            app.clone().oneshot(echo_request(Some("bad"))),
        );

        assert_eq!(ok.unwrap().status(), StatusCode::OK);
        assert_eq!(rejected.unwrap().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
