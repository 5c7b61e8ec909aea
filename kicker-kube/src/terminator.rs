//! Pod deletion abstraction.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors from Pod deletion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerminateError {
    #[error("failed to create in-cluster kubernetes client config: {0}")]
    InClusterConfig(String),

    #[error("failed to create kubernetes client: {0}")]
    Client(String),

    #[error("failed to delete pod {namespace}/{name}: {message}")]
    Delete {
        namespace: String,
        name: String,
        message: String,
    },
}

/// Trait for requesting deletion of a Pod.
///
/// Implementations issue the request and return; they do not wait for the
/// Pod to go away and do not retry.
pub trait PodTerminator: Send + Sync {
    /// Delete `namespace/name`, allowing `grace_period_secs` for shutdown.
    fn delete_pod(
        &self,
        namespace: &str,
        name: &str,
        grace_period_secs: u32,
    ) -> Result<(), TerminateError>;
}

impl<T: PodTerminator + ?Sized> PodTerminator for &T {
    fn delete_pod(
        &self,
        namespace: &str,
        name: &str,
        grace_period_secs: u32,
    ) -> Result<(), TerminateError> {
        (**self).delete_pod(namespace, name, grace_period_secs)
    }
}

/// A delete call captured by `MockTerminator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub namespace: String,
    pub name: String,
    pub grace_period_secs: u32,
}

/// Mock terminator for testing that records every call.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MockTerminator {
    requests: Arc<Mutex<Vec<DeleteRequest>>>,
    failure: Option<TerminateError>,
}

impl MockTerminator {
    /// Create a terminator whose deletes succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a terminator whose deletes are recorded and then fail with `error`.
    pub fn failing(error: TerminateError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// All recorded calls, in order.
    pub fn requests(&self) -> Vec<DeleteRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl PodTerminator for MockTerminator {
    fn delete_pod(
        &self,
        namespace: &str,
        name: &str,
        grace_period_secs: u32,
    ) -> Result<(), TerminateError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DeleteRequest {
                namespace: namespace.to_string(),
                name: name.to_string(),
                grace_period_secs,
            });

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_terminator_records_calls() {
        let terminator = MockTerminator::new();
        terminator.delete_pod("calico", "kicker-abc", 10).unwrap();

        assert_eq!(
            terminator.requests(),
            vec![DeleteRequest {
                namespace: "calico".to_string(),
                name: "kicker-abc".to_string(),
                grace_period_secs: 10,
            }]
        );
    }

    #[test]
    fn test_mock_terminator_clone_shares_record() {
        let terminator = MockTerminator::new();
        let handle = terminator.clone();
        terminator.delete_pod("ns", "pod", 10).unwrap();
        assert_eq!(handle.count(), 1);
    }

    #[test]
    fn test_mock_terminator_failing_still_records() {
        let terminator = MockTerminator::failing(TerminateError::Client("refused".into()));
        let result = terminator.delete_pod("ns", "pod", 10);

        assert_eq!(result, Err(TerminateError::Client("refused".into())));
        assert_eq!(terminator.count(), 1);
    }

    #[test]
    fn test_terminator_through_reference() {
        let terminator = MockTerminator::new();
        let by_ref: &dyn PodTerminator = &terminator;
        by_ref.delete_pod("ns", "pod", 10).unwrap();
        assert_eq!(terminator.count(), 1);
    }

    #[test]
    fn test_terminate_error_display() {
        let err = TerminateError::Delete {
            namespace: "calico".into(),
            name: "kicker-abc".into(),
            message: "forbidden".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to delete pod calico/kicker-abc: forbidden"
        );
    }
}
