use clap::ValueEnum;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use serde::Deserialize;
use tracing::info;

use super::runner::CommandRunner;

/// Workload kinds whose pod-template image can be rolled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum WorkloadKind {
    Deployment,
    Statefulset,
}

impl WorkloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "deployment",
            WorkloadKind::Statefulset => "statefulset",
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkloadList {
    #[serde(default)]
    items: Vec<Workload>,
}

#[derive(Debug, Deserialize)]
struct Workload {
    metadata: Metadata,
    spec: WorkloadSpec,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WorkloadSpec {
    template: PodTemplate,
}

#[derive(Debug, Deserialize)]
struct PodTemplate {
    spec: PodSpec,
}

#[derive(Debug, Deserialize)]
struct PodSpec {
    containers: Vec<Container>,
}

#[derive(Debug, Deserialize)]
struct Container {
    name: String,
}

/// Point every workload of `kind` in `namespace` at `new_image`, one
/// `set image` call per workload, targeting its first container.
///
/// The batch stops at the first failed update: already-updated workloads
/// stay updated, the failure names the workload it stopped on, and the
/// operator re-runs after fixing the cause. Returns how many workloads were
/// updated.
pub fn update_images(
    runner: &mut dyn CommandRunner,
    kubectl: &str,
    kind: WorkloadKind,
    namespace: &str,
    new_image: &str,
) -> Result<usize> {
    info!(kind = kind.as_str(), namespace, "listing workloads");
    let listing = runner
        .capture(kubectl, &["get", kind.as_str(), "-n", namespace, "-o", "json"])
        .wrap_err("running workload listing")?;
    if !listing.success {
        return Err(eyre!(
            "listing {} in namespace {namespace} failed: {}",
            kind.as_str(),
            listing.stderr.trim()
        ));
    }

    let workloads: WorkloadList =
        serde_json::from_str(&listing.stdout).wrap_err("parsing workload listing JSON")?;

    for workload in &workloads.items {
        let name = &workload.metadata.name;
        let container = workload
            .spec
            .template
            .spec
            .containers
            .first()
            .ok_or_else(|| eyre!("{}/{name} has no containers", kind.as_str()))?;

        info!(workload = %name, container = %container.name, image = new_image, "updating image");
        let target = format!("{}/{name}", kind.as_str());
        let assignment = format!("{}={new_image}", container.name);
        let ok = runner
            .run(kubectl, &["set", "image", &target, &assignment, "-n", namespace])
            .wrap_err("running image update")?;
        if !ok {
            return Err(eyre!(
                "updating {target} failed; remaining workloads were not attempted"
            ));
        }
    }

    info!(count = workloads.items.len(), "image updates finished");
    Ok(workloads.items.len())
}
