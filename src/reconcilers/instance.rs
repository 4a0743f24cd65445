// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciler for `Bind9Instance` resources.
//!
//! An instance converges five artifacts, all carrying owner references
//! back to it:
//!
//! 1. the config `ConfigMap` with the synthesized `named.conf`
//! 2. the zones `ConfigMap` aggregating every served zone's stanza and
//!    rendered file
//! 3. the `StatefulSet` running BIND9
//! 4. the client-facing DNS `Service` (left alone once created, so a
//!    provisioned LoadBalancer address survives reconciliation)
//! 5. the headless `Service` backing the `StatefulSet`
//!
//! It also keeps the instance's health daemon registered, probing the DNS
//! `Service` endpoint in the background.
//!
//! The `StatefulSet` is normally patched in place; replica-count and
//! image changes go through a full replace so the rollout restarts pods.
//! Deleting an instance stops the daemon and lets garbage collection
//! cascade through the owner references.

use super::{error_policy, flatten_finalizer_error, status, success_action};
use crate::bind9_config::zone_stanza;
use crate::constants::{KIND_BIND9_INSTANCE, ZONES_CONF_KEY, ZONE_DB_KEY_PREFIX};
use crate::context::Context;
use crate::crd::Bind9Instance;
use crate::errors::{Error, Result};
use crate::labels::{FINALIZER_BIND9_INSTANCE, INSTANCE_LABEL};
use crate::resources::{
    build_dns_service, build_headless_service, build_instance_configmap, build_stateful_set,
    build_zones_configmap, config_map_name, dns_service_name, headless_service_name,
    workload_name, zones_config_map_name,
};
use crate::{apply, metrics};
use futures::StreamExt;
use k8s_openapi::api::apps::v1::StatefulSet;
use k8s_openapi::api::core::v1::{ConfigMap, Service};
use kube::api::{Api, ListParams};
use kube::runtime::controller::Action;
use kube::runtime::finalizer;
use kube::runtime::watcher::Config as WatcherConfig;
use kube::runtime::Controller;
use kube::{Client, ResourceExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Runs the `Bind9Instance` controller until the watch stream ends.
///
/// Owned `ConfigMap`s, `StatefulSet`s, and `Service`s are watched too, so
/// drift in a derived artifact re-triggers its instance.
///
/// # Errors
///
/// Returns an error if the controller cannot be started.
pub async fn run_instance_controller(ctx: Arc<Context>) -> Result<()> {
    info!("Starting Bind9Instance controller");

    let api = Api::<Bind9Instance>::all(ctx.client.clone());

    Controller::new(api, WatcherConfig::default())
        .owns(
            Api::<ConfigMap>::all(ctx.client.clone()),
            WatcherConfig::default(),
        )
        .owns(
            Api::<StatefulSet>::all(ctx.client.clone()),
            WatcherConfig::default(),
        )
        .owns(
            Api::<Service>::all(ctx.client.clone()),
            WatcherConfig::default(),
        )
        .run(reconcile_bind9instance, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Reconciles one `Bind9Instance`.
///
/// # Errors
///
/// Returns an error when any derived artifact cannot be applied; all
/// instance failures are retryable.
pub async fn reconcile_bind9instance(
    instance: Arc<Bind9Instance>,
    ctx: Arc<Context>,
) -> Result<Action> {
    let start = Instant::now();
    let namespace = instance.namespace().ok_or_else(|| Error::MissingNamespace {
        kind: KIND_BIND9_INSTANCE,
        name: instance.name_any(),
    })?;
    let api: Api<Bind9Instance> = Api::namespaced(ctx.client.clone(), &namespace);

    let result = finalizer(
        &api,
        FINALIZER_BIND9_INSTANCE,
        Arc::clone(&instance),
        |event| async {
            match event {
                finalizer::Event::Apply(instance) => {
                    apply_instance(&instance, &namespace, &ctx).await
                }
                finalizer::Event::Cleanup(instance) => {
                    cleanup_instance(&instance, &namespace, &ctx).await
                }
            }
        },
    )
    .await;

    match flatten_finalizer_error(KIND_BIND9_INSTANCE, result) {
        Ok(action) => {
            metrics::record_reconciliation_success(KIND_BIND9_INSTANCE, start.elapsed());
            Ok(action)
        }
        Err(err) => {
            metrics::record_reconciliation_error(KIND_BIND9_INSTANCE, err.status_reason());
            publish_failure(&ctx, &instance, &err).await;
            Err(err)
        }
    }
}

/// Applies every artifact the instance derives, in dependency order.
async fn apply_instance(
    instance: &Bind9Instance,
    namespace: &str,
    ctx: &Context,
) -> Result<Action> {
    let name = instance.name_any();

    let config_map = build_instance_configmap(&config_map_name(&name), namespace, instance);
    apply::create_or_apply(&ctx.client, namespace, &config_map).await?;

    let zone_configmaps = list_zone_configmaps(&ctx.client, namespace, &name).await?;
    let zones_data = aggregate_zone_data(&zone_configmaps);
    let zones_map =
        build_zones_configmap(&zones_config_map_name(&name), namespace, instance, zones_data);
    apply::create_or_apply(&ctx.client, namespace, &zones_map).await?;

    let workload = build_stateful_set(&workload_name(&name), namespace, instance);
    apply_workload(&ctx.client, namespace, &workload).await?;

    let dns_service = build_dns_service(&dns_service_name(&name), namespace, instance);
    apply::create_if_absent(&ctx.client, namespace, &dns_service).await?;

    let headless = build_headless_service(&headless_service_name(&name), namespace, instance);
    apply::create_or_apply(&ctx.client, namespace, &headless).await?;

    ctx.daemons.ensure_running(&name, namespace).await;

    info!(
        instance = %name,
        zones = zone_configmaps.len(),
        "Applied Bind9Instance resources"
    );

    status::patch_instance_status(&ctx.client, instance, status::instance_ready_status(instance))
        .await?;

    Ok(success_action())
}

/// Stops the health daemon; derived artifacts are garbage-collected
/// through their owner references.
async fn cleanup_instance(
    instance: &Bind9Instance,
    namespace: &str,
    ctx: &Context,
) -> Result<Action> {
    let name = instance.name_any();
    ctx.daemons.stop(&name, namespace).await;
    info!(instance = %name, "Stopped health daemon for deleted instance");
    Ok(Action::await_change())
}

/// Best-effort `Failed` status patch on the instance.
async fn publish_failure(ctx: &Context, instance: &Bind9Instance, err: &Error) {
    let desired = status::instance_failed_status(instance, err);
    if let Err(patch_err) = status::patch_instance_status(&ctx.client, instance, desired).await {
        warn!(
            instance = %instance.name_any(),
            error = %patch_err,
            "Failed to record failure status for Bind9Instance"
        );
    }
}

/// Per-zone `ConfigMap`s labeled as served by this instance.
async fn list_zone_configmaps(
    client: &Client,
    namespace: &str,
    instance_name: &str,
) -> Result<Vec<ConfigMap>> {
    let api: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    let selector = format!("{INSTANCE_LABEL}={instance_name}");
    let list = api.list(&ListParams::default().labels(&selector)).await?;
    Ok(list.items)
}

/// Assembles the zones `ConfigMap` payload from the per-zone
/// `ConfigMap`s: each rendered `db.<zone>` file, plus a `zones.conf`
/// with one `zone` stanza per served zone in name order.
///
/// An instance serving no zones still gets an (empty) `zones.conf`,
/// because the synthesized `named.conf` includes it unconditionally.
#[must_use]
pub fn aggregate_zone_data(zone_configmaps: &[ConfigMap]) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    for cm in zone_configmaps {
        let Some(cm_data) = cm.data.as_ref() else {
            continue;
        };
        for (key, value) in cm_data {
            if key.starts_with(ZONE_DB_KEY_PREFIX) {
                data.insert(key.clone(), value.clone());
            }
        }
    }

    let zones_conf = data
        .keys()
        .map(|key| zone_stanza(&key[ZONE_DB_KEY_PREFIX.len()..]))
        .collect::<Vec<_>>()
        .join("\n");
    data.insert(ZONES_CONF_KEY.to_string(), zones_conf);
    data
}

/// Applies the instance's `StatefulSet`.
///
/// Replica-count and image changes replace the object so pods restart
/// with the new shape; anything else is patched in place.
async fn apply_workload(client: &Client, namespace: &str, desired: &StatefulSet) -> Result<()> {
    let api: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
    match api.get(&desired.name_any()).await {
        Ok(existing) if workload_needs_replace(&existing, desired) => {
            info!(
                workload = %desired.name_any(),
                "Replacing StatefulSet for replica or image change"
            );
            apply::create_or_replace(client, namespace, desired).await
        }
        Ok(_) => apply::create_or_apply(client, namespace, desired).await,
        Err(kube::Error::Api(ae)) if ae.code == 404 => {
            apply::create_or_apply(client, namespace, desired).await
        }
        Err(e) => Err(Error::KubeApi(e)),
    }
}

/// Whether the live `StatefulSet` differs from the desired one in replica
/// count or container image.
#[must_use]
pub fn workload_needs_replace(existing: &StatefulSet, desired: &StatefulSet) -> bool {
    let existing_replicas = existing.spec.as_ref().and_then(|s| s.replicas);
    let desired_replicas = desired.spec.as_ref().and_then(|s| s.replicas);
    if existing_replicas != desired_replicas {
        return true;
    }
    container_image(existing) != container_image(desired)
}

fn container_image(sts: &StatefulSet) -> Option<&str> {
    sts.spec
        .as_ref()?
        .template
        .spec
        .as_ref()?
        .containers
        .first()?
        .image
        .as_deref()
}
