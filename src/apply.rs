// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic create/update helpers for derived Kubernetes resources.
//!
//! The reconcilers converge on desired state through three strategies:
//!
//! - **Apply**: server-side apply (SSA) for idempotent updates of config
//!   artifacts (`ConfigMap`s, the headless `Service`)
//! - **Replace**: full replacement, used for the `StatefulSet` when the
//!   pod template must actually change
//! - **Create if absent**: create and tolerate `AlreadyExists`, for
//!   resources whose live state must never be overwritten (the
//!   `LoadBalancer` `Service`, which carries allocated external IPs)

use crate::errors::{Error, Result};
use kube::api::{Patch, PatchParams, PostParams};
use kube::core::NamespaceResourceScope;
use kube::{Api, Client, Resource, ResourceExt};
use tracing::{debug, info};

/// Field manager name used for server-side apply patches.
pub const FIELD_MANAGER: &str = "bindkeeper-controller";

fn resource_name<T>(resource: &T) -> Result<&str>
where
    T: Resource<DynamicType = ()>,
{
    resource
        .meta()
        .name
        .as_deref()
        .ok_or_else(|| Error::Other(anyhow::anyhow!("{} has no name in metadata", T::kind(&()))))
}

/// Create a resource, or update it in place with server-side apply.
///
/// # Errors
///
/// Returns an error if the resource has no name or the API call fails.
pub async fn create_or_apply<T>(client: &Client, namespace: &str, resource: &T) -> Result<()>
where
    T: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
{
    let name = resource_name(resource)?;
    let api: Api<T> = Api::namespaced(client.clone(), namespace);

    debug!(
        namespace = %namespace,
        name = %name,
        kind = %T::kind(&()),
        "Creating or updating resource with Apply strategy"
    );

    if api.get(name).await.is_ok() {
        api.patch(
            name,
            &PatchParams::apply(FIELD_MANAGER).force(),
            &Patch::Apply(resource),
        )
        .await?;
        info!("Updated {} {}/{}", T::kind(&()), namespace, name);
    } else {
        api.create(&PostParams::default(), resource).await?;
        info!("Created {} {}/{}", T::kind(&()), namespace, name);
    }

    Ok(())
}

/// Create a resource, or replace it wholesale if it already exists.
///
/// The replace carries over the live object's `resourceVersion`, which the
/// API server requires for PUT semantics.
///
/// # Errors
///
/// Returns an error if the resource has no name or the API call fails.
pub async fn create_or_replace<T>(client: &Client, namespace: &str, resource: &T) -> Result<()>
where
    T: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
{
    let name = resource_name(resource)?;
    let api: Api<T> = Api::namespaced(client.clone(), namespace);

    debug!(
        namespace = %namespace,
        name = %name,
        kind = %T::kind(&()),
        "Creating or replacing resource"
    );

    match api.get(name).await {
        Ok(existing) => {
            let mut desired = resource.clone();
            desired.meta_mut().resource_version = existing.resource_version();
            api.replace(name, &PostParams::default(), &desired).await?;
            info!("Replaced {} {}/{}", T::kind(&()), namespace, name);
        }
        Err(_) => {
            api.create(&PostParams::default(), resource).await?;
            info!("Created {} {}/{}", T::kind(&()), namespace, name);
        }
    }

    Ok(())
}

/// Create a resource only if it does not exist yet; `AlreadyExists` is not
/// an error.
///
/// # Errors
///
/// Returns an error if the resource has no name or creation fails for any
/// reason other than the resource already existing.
pub async fn create_if_absent<T>(client: &Client, namespace: &str, resource: &T) -> Result<()>
where
    T: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + ResourceExt
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>,
{
    let name = resource_name(resource)?;
    let api: Api<T> = Api::namespaced(client.clone(), namespace);

    match api.create(&PostParams::default(), resource).await {
        Ok(_) => {
            info!("Created {} {}/{}", T::kind(&()), namespace, name);
            Ok(())
        }
        Err(kube::Error::Api(api_err)) if api_err.code == 409 => {
            debug!(
                "{} {}/{} already exists, leaving as-is",
                T::kind(&()),
                namespace,
                name
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
