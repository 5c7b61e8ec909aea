//! Kubernetes API terminator.
//!
//! The client is built from the in-cluster service account on every call.
//! The trigger fires at most once per process, so nothing is cached.

use std::sync::Arc;

use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams};
use kube::{Client, Config};
use tokio::runtime::Runtime;

use crate::terminator::{PodTerminator, TerminateError};

/// Terminator that deletes Pods through the Kubernetes API.
pub struct KubePodTerminator {
    runtime: Arc<Runtime>,
}

impl KubePodTerminator {
    /// Create a terminator that drives its requests on `runtime`.
    pub fn new(runtime: Arc<Runtime>) -> Self {
        Self { runtime }
    }

    async fn delete(
        namespace: &str,
        name: &str,
        grace_period_secs: u32,
    ) -> Result<(), TerminateError> {
        let config =
            Config::incluster().map_err(|e| TerminateError::InClusterConfig(e.to_string()))?;
        let client =
            Client::try_from(config).map_err(|e| TerminateError::Client(e.to_string()))?;

        let pods: Api<Pod> = Api::namespaced(client, namespace);
        pods.delete(name, &delete_params(grace_period_secs))
            .await
            .map(|_| ())
            .map_err(|e| TerminateError::Delete {
                namespace: namespace.to_string(),
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

impl PodTerminator for KubePodTerminator {
    fn delete_pod(
        &self,
        namespace: &str,
        name: &str,
        grace_period_secs: u32,
    ) -> Result<(), TerminateError> {
        self.runtime
            .block_on(Self::delete(namespace, name, grace_period_secs))
    }
}

/// Delete options for a Pod deletion with the given grace period.
pub fn delete_params(grace_period_secs: u32) -> DeleteParams {
    DeleteParams {
        grace_period_seconds: Some(grace_period_secs),
        ..DeleteParams::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_params_sets_grace_period() {
        let params = delete_params(10);
        assert_eq!(params.grace_period_seconds, Some(10));
        assert!(!params.dry_run);
    }

    #[test]
    fn test_delete_outside_cluster_fails_on_config() {
        if std::env::var_os("KUBERNETES_SERVICE_HOST").is_some() {
            return;
        }

        let runtime = Arc::new(
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime"),
        );
        let terminator = KubePodTerminator::new(runtime);

        let result = terminator.delete_pod("calico", "kicker-abc", 10);
        assert!(matches!(result, Err(TerminateError::InClusterConfig(_))));
    }
}
