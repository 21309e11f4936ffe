use std::path::Path;

use anyhow::Context;
use k8s_openapi::api::core::v1::{Event, Pod};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, api::ListParams};
use tracing::debug;

const POD_PENDING: &str = "Pending";

/// Read-only view of the cluster objects this tool needs.
pub trait ClusterReader {
    async fn list_pods(&self, namespace: &str) -> anyhow::Result<Vec<Pod>>;
    async fn list_events(&self, namespace: &str) -> anyhow::Result<Vec<Event>>;
}

impl ClusterReader for Client {
    async fn list_pods(&self, namespace: &str) -> anyhow::Result<Vec<Pod>> {
        let api: Api<Pod> = Api::namespaced(self.clone(), namespace);
        let pods = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list pods in namespace {}", namespace))?;
        Ok(pods.items)
    }

    async fn list_events(&self, namespace: &str) -> anyhow::Result<Vec<Event>> {
        let api: Api<Event> = Api::namespaced(self.clone(), namespace);
        let events = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list events in namespace {}", namespace))?;
        Ok(events.items)
    }
}

/// Build a client from the kubeconfig at `path`, using its current context.
pub async fn client_from_kubeconfig(path: &Path) -> anyhow::Result<Client> {
    let kubeconfig = Kubeconfig::read_from(path)
        .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
    let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .with_context(|| format!("Failed to load kubeconfig {}", path.display()))?;
    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}

pub async fn get_pods<C: ClusterReader>(cluster: &C, namespace: &str) -> anyhow::Result<Vec<Pod>> {
    cluster.list_pods(namespace).await
}

pub async fn get_pending_pods<C: ClusterReader>(
    cluster: &C,
    namespace: &str,
) -> anyhow::Result<Vec<Pod>> {
    let pods = get_pods(cluster, namespace).await?;
    let total = pods.len();
    let pending = pending_pods(pods);
    debug!("{} of {} pods in {} are pending", pending.len(), total, namespace);
    Ok(pending)
}

/// Messages of every event involving pod `pod_name` in `namespace`, in listing order.
pub async fn get_pod_events<C: ClusterReader>(
    cluster: &C,
    namespace: &str,
    pod_name: &str,
) -> anyhow::Result<Vec<String>> {
    let events = cluster.list_events(namespace).await?;
    Ok(pod_event_messages(&events, namespace, pod_name))
}

pub fn is_pending(pod: &Pod) -> bool {
    pod.status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .is_some_and(|phase| phase == POD_PENDING)
}

pub fn pending_pods(pods: Vec<Pod>) -> Vec<Pod> {
    pods.into_iter().filter(is_pending).collect()
}

pub fn pod_event_messages(events: &[Event], namespace: &str, pod_name: &str) -> Vec<String> {
    events
        .iter()
        .filter(|e| {
            let obj = &e.involved_object;
            obj.kind.as_deref() == Some("Pod")
                && obj.name.as_deref() == Some(pod_name)
                && obj.namespace.as_deref() == Some(namespace)
        })
        .map(|e| e.message.clone().unwrap_or_default())
        .collect()
}
