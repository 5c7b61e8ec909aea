//! Self-termination trigger.
//!
//! Asks the orchestrator to delete the Pod this process runs in. The request
//! is fire-and-forget: no waiting for the deletion, no retry.

use kicker_kube::{PodTerminator, TerminateError};
use tracing::{debug, error, info};

/// Seconds the Pod is given to shut down after deletion is requested.
pub const DELETION_GRACE_PERIOD_SECS: u32 = 10;

/// What a termination attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationOutcome {
    /// The delete request was accepted.
    Requested,
    /// No Pod name was configured; nothing was sent.
    MissingName,
    /// Client setup or the delete call failed.
    Failed(TerminateError),
}

/// Issues the Pod deletion through a `PodTerminator`.
#[derive(Debug)]
pub struct TerminationTrigger<T> {
    terminator: T,
}

impl<T: PodTerminator> TerminationTrigger<T> {
    pub fn new(terminator: T) -> Self {
        Self { terminator }
    }

    /// Request deletion of `namespace/name`.
    pub fn terminate(&self, namespace: &str, name: Option<&str>) -> TerminationOutcome {
        debug!("terminating our own Pod");

        let Some(name) = name else {
            error!("POD_NAME environment variable is not set; cannot kill own Pod");
            return TerminationOutcome::MissingName;
        };

        match self
            .terminator
            .delete_pod(namespace, name, DELETION_GRACE_PERIOD_SECS)
        {
            Ok(()) => {
                info!(
                    pod_name = name,
                    pod_namespace = namespace,
                    "scheduled deletion of own Pod"
                );
                TerminationOutcome::Requested
            }
            Err(e) => {
                error!(
                    error = %e,
                    pod_name = name,
                    pod_namespace = namespace,
                    "failed to kill own Pod"
                );
                TerminationOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kicker_kube::{DeleteRequest, MockTerminator};

    #[test]
    fn test_terminate_requests_deletion() {
        let terminator = MockTerminator::new();
        let trigger = TerminationTrigger::new(&terminator);

        let outcome = trigger.terminate("calico", Some("kicker-7xk2p"));

        assert_eq!(outcome, TerminationOutcome::Requested);
        assert_eq!(
            terminator.requests(),
            vec![DeleteRequest {
                namespace: "calico".to_string(),
                name: "kicker-7xk2p".to_string(),
                grace_period_secs: 10,
            }]
        );
    }

    #[test]
    fn test_terminate_without_name_sends_nothing() {
        let terminator = MockTerminator::new();
        let trigger = TerminationTrigger::new(&terminator);

        let outcome = trigger.terminate("calico", None);

        assert_eq!(outcome, TerminationOutcome::MissingName);
        assert_eq!(terminator.count(), 0);
    }

    #[test]
    fn test_terminate_reports_setup_failure() {
        let error = TerminateError::InClusterConfig("not in a cluster".to_string());
        let terminator = MockTerminator::failing(error.clone());
        let trigger = TerminationTrigger::new(&terminator);

        let outcome = trigger.terminate("calico", Some("kicker-7xk2p"));

        assert_eq!(outcome, TerminationOutcome::Failed(error));
    }

    #[test]
    fn test_terminate_reports_delete_failure() {
        let error = TerminateError::Delete {
            namespace: "calico".to_string(),
            name: "kicker-7xk2p".to_string(),
            message: "pods \"kicker-7xk2p\" is forbidden".to_string(),
        };
        let terminator = MockTerminator::failing(error.clone());
        let trigger = TerminationTrigger::new(&terminator);

        assert_eq!(
            trigger.terminate("calico", Some("kicker-7xk2p")),
            TerminationOutcome::Failed(error)
        );
        assert_eq!(terminator.count(), 1);
    }

    #[test]
    fn test_grace_period_constant() {
        assert_eq!(DELETION_GRACE_PERIOD_SECS, 10);
    }
}
