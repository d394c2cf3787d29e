use async_trait::async_trait;
use tracing::warn;

use crate::application::ports::{AuditSink, SecurityEventContext};

/// Audit sink that emits security events as structured tracing records.
///
/// Redaction details are operational data, not PII: only the request method,
/// path and the change descriptions are logged.
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: &str, context: SecurityEventContext, changes: Vec<String>) {
        warn!(
            event,
            method = %context.method,
            path = %context.path,
            remote_addr = context.remote_addr.as_deref().unwrap_or("unknown"),
            actor_id = context.actor_id.as_deref().unwrap_or("anonymous"),
            change_count = changes.len(),
            changes = ?changes,
            "security event recorded"
        );
    }
}
