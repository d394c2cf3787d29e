use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Request context attached to a recorded security event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityEventContext {
    pub method: String,
    pub path: String,
    pub remote_addr: Option<String>,
    pub actor_id: Option<String>,
}

/// Port for recording security-relevant events.
///
/// Fire-and-forget: callers never block a request on the sink and ignore
/// its outcome.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: &str, context: SecurityEventContext, changes: Vec<String>);
}
