//! Task-local trace context for web requests.
//!
//! Exposes the current request's trace_id to anything on the request path,
//! most importantly error-response rendering. Established by the
//! `RequestTrace` middleware; core/service code must not import this module.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Get the trace_id for the current task.
/// Returns "unknown" outside of a request context.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future within a trace context scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trace_id_outside_context() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn test_trace_id_within_context() {
        let test_trace_id = "test-trace-123".to_string();

        let result = with_trace_id(test_trace_id.clone(), async {
            assert_eq!(trace_id(), test_trace_id);
            "success"
        })
        .await;

        assert_eq!(result, "success");
    }
}
