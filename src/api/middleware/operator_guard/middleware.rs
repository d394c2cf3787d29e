use axum::{
    body::{to_bytes, Body},
    extract::{FromRequestParts, Query, RawPathParams, Request},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::config::{OperatorGuardConfig, SanitizationPolicy};
use super::matcher::OperatorMatcher;
use super::sanitizers::RequestSanitizer;
use crate::api::errors::ApiError;
use crate::application::ports::{AuditSink, SecurityEventContext};
use crate::domain::authorization::ActorContext;

static EMPTY_OBJECT: Lazy<Value> = Lazy::new(|| Value::Object(Map::new()));

/// Immutable sanitized views of one request, attached to its extensions
/// exactly once by the operator guard.
///
/// Accessors fall back to an empty mapping when the corresponding input was
/// absent, so downstream handlers never branch on `Option`.
#[derive(Debug, Clone, Default)]
pub struct SanitizedRequest {
    query: Option<Arc<Value>>,
    body: Option<Arc<Value>>,
    params: Option<Arc<Value>>,
}

impl SanitizedRequest {
    pub fn query(&self) -> &Value {
        self.query.as_deref().unwrap_or(&EMPTY_OBJECT)
    }

    pub fn body(&self) -> &Value {
        self.body.as_deref().unwrap_or(&EMPTY_OBJECT)
    }

    pub fn params(&self) -> &Value {
        self.params.as_deref().unwrap_or(&EMPTY_OBJECT)
    }
}

/// Request-pipeline stage running the operator sanitizers over query, body
/// and path params, in that order.
///
/// The guard rewrites, logs and (by default) never rejects: downstream
/// handlers only ever observe sanitized input, and one security event is
/// recorded per request that needed any redaction.
#[derive(Clone)]
pub struct OperatorGuard {
    sanitizer: Arc<RequestSanitizer>,
    policy: SanitizationPolicy,
    max_body_bytes: usize,
    audit: Arc<dyn AuditSink>,
}

impl OperatorGuard {
    pub fn new(config: OperatorGuardConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            sanitizer: Arc::new(RequestSanitizer::new(OperatorMatcher::new(config.vocabulary))),
            policy: config.policy,
            max_body_bytes: config.max_body_bytes,
            audit,
        }
    }

    pub fn sanitizer(&self) -> &RequestSanitizer {
        &self.sanitizer
    }

    pub async fn layer(&self, request: Request, next: Next) -> Response {
        let (mut parts, body) = request.into_parts();

        let mut snapshot = SanitizedRequest::default();
        let mut changes: Vec<String> = Vec::new();

        // Query string
        if parts.uri.query().is_some() {
            if let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
                let mut map = Map::new();
                for (key, value) in pairs {
                    map.insert(key, Value::String(value));
                }
                let outcome = self.sanitizer.sanitize(&Value::Object(map));
                changes.extend(outcome.changes);
                snapshot.query = Some(Arc::new(outcome.sanitized));
            }
        }

        // JSON body: buffer, sanitize, rewrite so handlers parse the
        // sanitized bytes. Non-JSON and malformed bodies pass through.
        let body = if is_json(&parts.headers) {
            match to_bytes(body, self.max_body_bytes).await {
                Ok(bytes) if !bytes.is_empty() => match serde_json::from_slice::<Value>(&bytes) {
                    Ok(parsed) => {
                        let outcome = self.sanitizer.sanitize(&parsed);
                        changes.extend(outcome.changes);
                        let rewritten = serde_json::to_vec(&outcome.sanitized)
                            .unwrap_or_else(|_| bytes.to_vec());
                        parts.headers.insert(
                            header::CONTENT_LENGTH,
                            header::HeaderValue::from(rewritten.len()),
                        );
                        snapshot.body = Some(Arc::new(outcome.sanitized));
                        Body::from(rewritten)
                    }
                    Err(_) => Body::from(bytes),
                },
                Ok(bytes) => Body::from(bytes),
                Err(_) => {
                    return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large")
                        .into_response();
                }
            }
        } else {
            body
        };

        // Path params
        if let Ok(raw_params) = RawPathParams::from_request_parts(&mut parts, &()).await {
            let mut map = Map::new();
            for (key, value) in raw_params.iter() {
                map.insert(key.to_string(), Value::String(value.to_string()));
            }
            if !map.is_empty() {
                let outcome = self.sanitizer.sanitize_params(&map);
                changes.extend(outcome.changes);
                snapshot.params = Some(Arc::new(outcome.sanitized));
            }
        }

        if !changes.is_empty() {
            let context = SecurityEventContext {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                remote_addr: extract_remote_addr(&parts.headers),
                actor_id: parts
                    .extensions
                    .get::<ActorContext>()
                    .map(|actor| actor.user_id().to_string()),
            };
            let audit = Arc::clone(&self.audit);
            let recorded = changes.clone();
            tokio::spawn(async move {
                audit
                    .record("operator_injection_redacted", context, recorded)
                    .await;
            });

            if self.policy == SanitizationPolicy::RedactAndReject {
                return ApiError::bad_request("request contained query operators").into_response();
            }
        }

        parts.extensions.insert(snapshot);
        let request = Request::from_parts(parts, body);
        next.run(request).await
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|content_type| content_type.starts_with("application/json"))
        .unwrap_or(false)
}

/// Client address from proxy headers, best-effort
fn extract_remote_addr(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded_for) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(first_ip) = forwarded_str.split(',').next() {
                return Some(first_ip.trim().to_string());
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(|ip| ip.to_string())
}
