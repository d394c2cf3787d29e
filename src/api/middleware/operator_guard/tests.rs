//! Tests for the operator guard modules

mod sanitizer_tests {
    use super::super::sanitizers::RequestSanitizer;
    use serde_json::{json, Map, Value};

    #[test]
    fn test_unsafe_key_is_removed_with_one_change() {
        let sanitizer = RequestSanitizer::default();

        let input = json!({"name": "John", "$where": "function() {}", "age": 30});
        let outcome = sanitizer.sanitize(&input);

        assert_eq!(outcome.sanitized, json!({"name": "John", "age": 30}));
        assert_eq!(outcome.changes.len(), 1);
        assert!(outcome.changes[0].contains("$where"));
    }

    #[test]
    fn test_unsafe_value_is_blanked_with_one_change() {
        let sanitizer = RequestSanitizer::default();

        let input = json!({"name": "John", "query": "$ne: null", "age": 30});
        let outcome = sanitizer.sanitize(&input);

        assert_eq!(
            outcome.sanitized,
            json!({"name": "John", "query": "", "age": 30})
        );
        assert_eq!(outcome.changes.len(), 1);
        assert!(outcome.changes[0].contains("query"));
    }

    #[test]
    fn test_array_of_objects() {
        let sanitizer = RequestSanitizer::default();

        let input = json!([{"name": "John"}, {"$where": "function() {}"}, {"age": 30}]);
        let outcome = sanitizer.sanitize(&input);

        assert_eq!(outcome.sanitized, json!([{"name": "John"}, {}, {"age": 30}]));
        assert_eq!(outcome.changes.len(), 1);
    }

    #[test]
    fn test_nested_structures_preserve_shape() {
        let sanitizer = RequestSanitizer::default();

        let input = json!({
            "filter": {
                "author": {"$ne": "admin"},
                "tags": ["news", {"$gt": 1}],
            },
            "page": 2,
        });
        let outcome = sanitizer.sanitize(&input);

        assert_eq!(
            outcome.sanitized,
            json!({
                "filter": {
                    "author": {},
                    "tags": ["news", {}],
                },
                "page": 2,
            })
        );
        assert_eq!(outcome.changes.len(), 2);
    }

    #[test]
    fn test_null_input_yields_empty_object() {
        let sanitizer = RequestSanitizer::default();

        let outcome = sanitizer.sanitize(&Value::Null);
        assert_eq!(outcome.sanitized, json!({}));
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_clean_input_is_untouched() {
        let sanitizer = RequestSanitizer::default();

        let input = json!({"name": "John", "profile": {"bio": "hi"}, "scores": [1, 2]});
        let outcome = sanitizer.sanitize(&input);

        assert_eq!(outcome.sanitized, input);
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let sanitizer = RequestSanitizer::default();

        let input = json!({
            "$where": "function() {}",
            "query": "$ne: null",
            "items": [{"price[$gt]": 1}, "ok"],
        });
        let first = sanitizer.sanitize(&input);
        let second = sanitizer.sanitize(&first.sanitized);

        assert_eq!(second.sanitized, first.sanitized);
        assert!(second.changes.is_empty());
    }

    #[test]
    fn test_unsafe_key_value_is_not_descended_into() {
        let sanitizer = RequestSanitizer::default();

        // The $or subtree disappears wholesale with a single change record
        let input = json!({"$or": [{"a": {"$ne": 1}}, {"b": 2}]});
        let outcome = sanitizer.sanitize(&input);

        assert_eq!(outcome.sanitized, json!({}));
        assert_eq!(outcome.changes.len(), 1);
    }

    fn params(entries: &[(&str, &str)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_params_negation_operator_is_blanked() {
        let sanitizer = RequestSanitizer::default();

        let outcome = sanitizer.sanitize_params(&params(&[("id", "123"), ("query", "$ne: null")]));

        assert_eq!(outcome.sanitized, json!({"id": "123", "query": ""}));
        assert_eq!(outcome.changes.len(), 1);
        assert!(outcome.changes[0].contains("negation"));
    }

    #[test]
    fn test_params_bare_sigil_is_untouched() {
        let sanitizer = RequestSanitizer::default();

        let input = params(&[("id", "123"), ("name", "John"), ("amount", "$50")]);
        let outcome = sanitizer.sanitize_params(&input);

        assert_eq!(
            outcome.sanitized,
            json!({"id": "123", "name": "John", "amount": "$50"})
        );
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_params_family_priority() {
        let sanitizer = RequestSanitizer::default();

        let outcome = sanitizer.sanitize_params(&params(&[("a", "$exists: true")]));
        assert!(outcome.changes[0].contains("existence"));

        let outcome = sanitizer.sanitize_params(&params(&[("b", "$gte: 10")]));
        assert!(outcome.changes[0].contains("comparison"));

        let outcome = sanitizer.sanitize_params(&params(&[("c", "$regex: /x/")]));
        assert!(outcome.changes[0].contains("operator token"));
    }

    #[test]
    fn test_params_are_not_recursed() {
        let sanitizer = RequestSanitizer::default();

        // A non-string value passes through the param sanitizer untouched
        let mut input = Map::new();
        input.insert("nested".to_string(), json!({"$ne": 1}));
        let outcome = sanitizer.sanitize_params(&input);

        assert_eq!(outcome.sanitized, json!({"nested": {"$ne": 1}}));
        assert!(outcome.changes.is_empty());
    }
}

mod middleware_tests {
    use super::super::config::{OperatorGuardConfig, SanitizationPolicy};
    use super::super::middleware::{OperatorGuard, SanitizedRequest};
    use crate::application::ports::{AuditSink, SecurityEventContext};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        extract::Request,
        http::{header, StatusCode},
        middleware as axum_middleware,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct CapturingSink {
        events: Mutex<Vec<(String, SecurityEventContext, Vec<String>)>>,
    }

    #[async_trait]
    impl AuditSink for CapturingSink {
        async fn record(&self, event: &str, context: SecurityEventContext, changes: Vec<String>) {
            self.events
                .lock()
                .unwrap()
                .push((event.to_string(), context, changes));
        }
    }

    fn router(guard: OperatorGuard) -> Router {
        async fn echo(request: Request) -> Json<Value> {
            let snapshot = request
                .extensions()
                .get::<SanitizedRequest>()
                .cloned()
                .unwrap_or_default();
            Json(json!({
                "query": snapshot.query(),
                "body": snapshot.body(),
                "params": snapshot.params(),
            }))
        }

        Router::new()
            .route("/items/{id}", post(echo))
            .layer(axum_middleware::from_fn(move |request, next| {
                let guard = guard.clone();
                async move { guard.layer(request, next).await }
            }))
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_guard_attaches_sanitized_snapshots() {
        let sink = Arc::new(CapturingSink::default());
        let guard = OperatorGuard::new(OperatorGuardConfig::default(), sink.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/items/123?filter=%24ne%3A%20null&page=2")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"name": "John", "$where": "function() {}"}).to_string(),
            ))
            .unwrap();

        let response = router(guard).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let seen = response_json(response).await;
        assert_eq!(seen["query"], json!({"filter": "", "page": "2"}));
        assert_eq!(seen["body"], json!({"name": "John"}));
        assert_eq!(seen["params"], json!({"id": "123"}));

        // Let the fire-and-forget audit task run
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let (event, context, changes) = &events[0];
        assert_eq!(event, "operator_injection_redacted");
        assert_eq!(context.method, "POST");
        assert_eq!(changes.len(), 2);
    }

    #[tokio::test]
    async fn test_guard_rewrites_body_for_downstream_handlers() {
        async fn read_body(Json(body): Json<Value>) -> Json<Value> {
            Json(body)
        }

        let guard = OperatorGuard::new(
            OperatorGuardConfig::default(),
            Arc::new(CapturingSink::default()),
        );
        let app = Router::new()
            .route("/echo", post(read_body))
            .layer(axum_middleware::from_fn(move |request, next| {
                let guard = guard.clone();
                async move { guard.layer(request, next).await }
            }));

        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"title": "Hello", "status": {"$ne": "DRAFT"}}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The handler parsed the rewritten body, not the original
        let seen = response_json(response).await;
        assert_eq!(seen, json!({"title": "Hello", "status": {}}));
    }

    #[tokio::test]
    async fn test_clean_request_records_no_event() {
        let sink = Arc::new(CapturingSink::default());
        let guard = OperatorGuard::new(OperatorGuardConfig::default(), sink.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/items/123")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"name": "John"}).to_string()))
            .unwrap();

        let response = router(guard).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        tokio::task::yield_now().await;
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reject_policy_returns_bad_request() {
        let sink = Arc::new(CapturingSink::default());
        let config =
            OperatorGuardConfig::default().with_policy(SanitizationPolicy::RedactAndReject);
        let guard = OperatorGuard::new(config, sink);

        let request = Request::builder()
            .method("POST")
            .uri("/items/123")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"$where": "function() {}"}).to_string()))
            .unwrap();

        let response = router(guard).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_passes_through() {
        let sink = Arc::new(CapturingSink::default());
        let guard = OperatorGuard::new(OperatorGuardConfig::default(), sink.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/items/123")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router(guard).oneshot(request).await.unwrap();
        // The guard itself never rejects malformed input
        assert_eq!(response.status(), StatusCode::OK);

        tokio::task::yield_now().await;
        assert!(sink.events.lock().unwrap().is_empty());
    }
}
