// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciler for `DNSZone` resources.
//!
//! A zone owns one `ConfigMap` (named `<zone>-zone`) with two kinds of
//! keys:
//!
//! - `db.<zoneName>` - the fully rendered zone file
//! - `record.<resource>` - one rendered line per record resource,
//!   written by the record reconcilers
//!
//! The `record.*` entries are the source of truth for record content.
//! Every pass re-renders `db.<zoneName>` from the zone's SOA header plus
//! the entry set in key order, so the rendering is deterministic and the
//! zone and record reconcilers can interleave freely without losing each
//! other's writes.
//!
//! Whenever the rendered `ConfigMap` actually changes, the reconciler
//! stamps the serving `Bind9Instance` with a reload annotation; the
//! instance controller reacts to that metadata change, re-aggregates its
//! zones `ConfigMap`, and the updated mount reaches BIND9. Zone deletion
//! only signals a reload: the zone `ConfigMap` carries an owner reference
//! and is garbage-collected with the zone.

use super::{error_policy, flatten_finalizer_error, status, success_action};
use crate::bind9_config::{compose_zone_db, synthesize_zone_file, SerialPolicy};
use crate::constants::{KIND_BIND9_INSTANCE, KIND_DNS_ZONE, RECORD_ENTRY_KEY_PREFIX};
use crate::context::Context;
use crate::crd::{Bind9Instance, DNSZone, DNSZoneSpec};
use crate::errors::{Error, Result};
use crate::labels::{FINALIZER_DNS_ZONE, RELOAD_REQUESTED_ANNOTATION};
use crate::resources::{build_zone_configmap, zone_config_map_name, zone_db_key};
use crate::{apply, metrics};
use chrono::Utc;
use futures::StreamExt;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::api::{Api, Patch, PatchParams};
use kube::runtime::controller::Action;
use kube::runtime::finalizer;
use kube::runtime::watcher::Config as WatcherConfig;
use kube::runtime::Controller;
use kube::{Client, ResourceExt};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the `DNSZone` controller until the watch stream ends.
///
/// The controller also watches the `ConfigMap`s owned by zones, so a
/// record reconciler landing an entry re-triggers the owning zone.
///
/// # Errors
///
/// Returns an error if the controller cannot be started.
pub async fn run_zone_controller(ctx: Arc<Context>) -> Result<()> {
    info!("Starting DNSZone controller");

    let api = Api::<DNSZone>::all(ctx.client.clone());
    let configmaps = Api::<ConfigMap>::all(ctx.client.clone());

    Controller::new(api, WatcherConfig::default())
        .owns(configmaps, WatcherConfig::default())
        .run(reconcile_dnszone, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Reconciles one `DNSZone`.
///
/// # Errors
///
/// Returns an error when the zone `ConfigMap` cannot be applied or the
/// referenced instance cannot be signaled; both are retryable.
pub async fn reconcile_dnszone(zone: Arc<DNSZone>, ctx: Arc<Context>) -> Result<Action> {
    let start = Instant::now();
    let namespace = zone.namespace().ok_or_else(|| Error::MissingNamespace {
        kind: KIND_DNS_ZONE,
        name: zone.name_any(),
    })?;
    let api: Api<DNSZone> = Api::namespaced(ctx.client.clone(), &namespace);

    let result = finalizer(&api, FINALIZER_DNS_ZONE, Arc::clone(&zone), |event| async {
        match event {
            finalizer::Event::Apply(zone) => apply_zone(&zone, &namespace, &ctx).await,
            finalizer::Event::Cleanup(zone) => cleanup_zone(&zone, &namespace, &ctx).await,
        }
    })
    .await;

    match flatten_finalizer_error(KIND_DNS_ZONE, result) {
        Ok(action) => {
            metrics::record_reconciliation_success(KIND_DNS_ZONE, start.elapsed());
            Ok(action)
        }
        Err(err) => {
            metrics::record_reconciliation_error(KIND_DNS_ZONE, err.status_reason());
            publish_failure(&ctx, &zone, &err).await;
            Err(err)
        }
    }
}

/// Renders and applies the zone `ConfigMap`, then signals the serving
/// instance when the rendering changed.
async fn apply_zone(zone: &DNSZone, namespace: &str, ctx: &Context) -> Result<Action> {
    let name = zone.name_any();
    let serial = resolve_serial(&zone.spec, &ctx.serial_policy);

    let cm_name = zone_config_map_name(&name);
    let live = live_zone_data(&ctx.client, namespace, &cm_name).await?;
    let entries = live.as_ref().map(record_entries).unwrap_or_default();
    let data = render_zone_data(&zone.spec, serial, entries);

    if live.as_ref() == Some(&data) {
        debug!(zone = %name, zone_name = %zone.spec.zone_name, "Zone ConfigMap up to date");
    } else {
        let desired = build_zone_configmap(&cm_name, namespace, zone, data);
        apply::create_or_apply(&ctx.client, namespace, &desired).await?;
        signal_reload(ctx, namespace, zone.spec.instance_ref()).await?;
        info!(
            zone = %name,
            zone_name = %zone.spec.zone_name,
            serial,
            instance = %zone.spec.instance_ref(),
            "Applied zone ConfigMap and requested reload"
        );
    }

    status::patch_zone_status(&ctx.client, zone, status::zone_active_status(zone, serial)).await?;

    Ok(success_action())
}

/// Signals the serving instance once the zone is gone.
///
/// The zone `ConfigMap` is owned by the zone, so garbage collection
/// removes it; the instance only needs to drop the zone from its
/// aggregate. A missing instance has nothing to reload and must not
/// block deletion.
async fn cleanup_zone(zone: &DNSZone, namespace: &str, ctx: &Context) -> Result<Action> {
    match signal_reload(ctx, namespace, zone.spec.instance_ref()).await {
        Ok(()) => {
            info!(
                zone = %zone.name_any(),
                instance = %zone.spec.instance_ref(),
                "Requested reload for deleted zone"
            );
        }
        Err(Error::ReferenceNotFound { .. }) => {
            debug!(
                zone = %zone.name_any(),
                instance = %zone.spec.instance_ref(),
                "Serving instance already gone, skipping reload"
            );
        }
        Err(err) => return Err(err),
    }

    Ok(Action::await_change())
}

/// Best-effort `Failed` status patch on the zone.
async fn publish_failure(ctx: &Context, zone: &DNSZone, err: &Error) {
    let desired = status::zone_failed_status(zone, err);
    if let Err(patch_err) = status::patch_zone_status(&ctx.client, zone, desired).await {
        warn!(
            zone = %zone.name_any(),
            error = %patch_err,
            "Failed to record failure status for DNSZone"
        );
    }
}

/// Serial for the next rendering: the spec's explicit value when set,
/// otherwise one generated by the operator's serial policy.
#[must_use]
pub fn resolve_serial(spec: &DNSZoneSpec, policy: &SerialPolicy) -> i64 {
    spec.soa_record.serial.unwrap_or_else(|| policy.generate())
}

/// Full data payload for a zone `ConfigMap`: the given `record.*` entries
/// plus `db.<zoneName>` composed from the zone header and those entries
/// in key order.
#[must_use]
pub fn render_zone_data(
    spec: &DNSZoneSpec,
    serial: i64,
    entries: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let header = synthesize_zone_file(spec, serial);
    let mut data = entries;
    let db = {
        let lines: Vec<&str> = data.values().map(String::as_str).collect();
        compose_zone_db(&header, lines)
    };
    data.insert(zone_db_key(&spec.zone_name), db);
    data
}

/// The `record.*` entries carried by a zone `ConfigMap`'s data.
#[must_use]
pub fn record_entries(data: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    data.iter()
        .filter(|(key, _)| key.starts_with(RECORD_ENTRY_KEY_PREFIX))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Data of the live zone `ConfigMap`, or `None` when it does not exist
/// yet.
pub(crate) async fn live_zone_data(
    client: &Client,
    namespace: &str,
    cm_name: &str,
) -> Result<Option<BTreeMap<String, String>>> {
    let api: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    match api.get(cm_name).await {
        Ok(cm) => Ok(Some(cm.data.unwrap_or_default())),
        Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(None),
        Err(e) => Err(Error::KubeApi(e)),
    }
}

/// Requests a configuration reload by stamping the instance with the
/// current time under the reload annotation. The instance controller
/// picks the change up through its own watch and re-aggregates its zones
/// `ConfigMap`.
pub(crate) async fn signal_reload(
    ctx: &Context,
    namespace: &str,
    instance_ref: &str,
) -> Result<()> {
    let api: Api<Bind9Instance> = Api::namespaced(ctx.client.clone(), namespace);
    let patch = json!({
        "metadata": {
            "annotations": {
                RELOAD_REQUESTED_ANNOTATION: Utc::now().to_rfc3339(),
            }
        }
    });

    match api
        .patch(instance_ref, &PatchParams::default(), &Patch::Merge(&patch))
        .await
    {
        Ok(_) => {
            metrics::record_reload_request(instance_ref);
            debug!(instance = %instance_ref, "Requested BIND9 reload");
            Ok(())
        }
        Err(kube::Error::Api(ae)) if ae.code == 404 => Err(Error::ReferenceNotFound {
            kind: KIND_BIND9_INSTANCE,
            name: instance_ref.to_string(),
            namespace: namespace.to_string(),
        }),
        Err(e) => Err(Error::KubeApi(e)),
    }
}
