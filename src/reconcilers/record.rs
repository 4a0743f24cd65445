// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic reconciler for DNS record resources.
//!
//! All record kinds (A, AAAA, CNAME, MX, TXT, NS, SRV, PTR, CAA, NAPTR)
//! follow the same lifecycle: validate the spec, render one zone-file
//! line, and place it in the `ConfigMap` of the referenced `DNSZone`
//! under a `record.<resource>` key. The [`ZoneRecord`] trait captures the
//! per-kind differences (kind name, finalizer, how the spec maps to
//! [`RecordData`]); [`reconcile_record`] and [`run_record_controller`]
//! are written once against the trait.
//!
//! A record never signals the serving instance directly. Its mutation of
//! the zone `ConfigMap` triggers the zone reconciler through the zone's
//! `owns` watch, and the zone reconciler requests the reload.
//!
//! Deletion is finalizer-driven: the record's entry is removed from the
//! zone `ConfigMap` and the zone file re-rendered before the finalizer is
//! released. A zone that is already gone counts as cleaned up, since its
//! `ConfigMap` is garbage-collected with it.

use super::{error_policy, flatten_finalizer_error, status, success_action, zone};
use crate::constants::KIND_DNS_ZONE;
use crate::context::Context;
use crate::crd::{
    AAAARecord, ARecord, CAARecord, CNAMERecord, MXRecord, NAPTRRecord, NSRecord, PTRRecord,
    RecordStatus, SRVRecord, TXTRecord,
};
use crate::errors::{Error, Result};
use crate::labels::{
    FINALIZER_AAAA_RECORD, FINALIZER_A_RECORD, FINALIZER_CAA_RECORD, FINALIZER_CNAME_RECORD,
    FINALIZER_MX_RECORD, FINALIZER_NAPTR_RECORD, FINALIZER_NS_RECORD, FINALIZER_PTR_RECORD,
    FINALIZER_SRV_RECORD, FINALIZER_TXT_RECORD,
};
use crate::validation::{validate, RecordData};
use crate::{apply, bind9_config, metrics, resources};
use futures::StreamExt;
use kube::api::Api;
use kube::core::NamespaceResourceScope;
use kube::runtime::controller::Action;
use kube::runtime::finalizer;
use kube::runtime::watcher::Config as WatcherConfig;
use kube::runtime::Controller;
use kube::{Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A namespaced record resource that contributes one line to a zone file.
///
/// Implemented by every record CRD. The generic reconciler only ever
/// talks to records through this trait.
pub trait ZoneRecord:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + DeserializeOwned
    + Serialize
    + Debug
    + Send
    + Sync
    + 'static
{
    /// Kubernetes kind of this record type.
    const KIND: &'static str;

    /// Finalizer owned by this record type's controller.
    const FINALIZER: &'static str;

    /// Name of the `DNSZone` resource this record belongs to.
    fn zone_ref(&self) -> &str;

    /// Record name within the zone ("@" for the apex).
    fn record_name(&self) -> &str;

    /// Per-record TTL override, if any.
    fn ttl(&self) -> Option<i32>;

    /// The record's data, ready for validation and rendering.
    fn record_data(&self) -> RecordData;

    /// The record's current status subresource, if any.
    fn status(&self) -> Option<&RecordStatus>;
}

impl ZoneRecord for ARecord {
    const KIND: &'static str = crate::constants::KIND_A_RECORD;
    const FINALIZER: &'static str = FINALIZER_A_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::A {
            address: self.spec.ipv4_address.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for AAAARecord {
    const KIND: &'static str = crate::constants::KIND_AAAA_RECORD;
    const FINALIZER: &'static str = FINALIZER_AAAA_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Aaaa {
            address: self.spec.ipv6_address.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for CNAMERecord {
    const KIND: &'static str = crate::constants::KIND_CNAME_RECORD;
    const FINALIZER: &'static str = FINALIZER_CNAME_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Cname {
            target: self.spec.target.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for MXRecord {
    const KIND: &'static str = crate::constants::KIND_MX_RECORD;
    const FINALIZER: &'static str = FINALIZER_MX_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Mx {
            priority: self.spec.priority,
            mail_server: self.spec.mail_server.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for TXTRecord {
    const KIND: &'static str = crate::constants::KIND_TXT_RECORD;
    const FINALIZER: &'static str = FINALIZER_TXT_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Txt {
            text: self.spec.text.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for NSRecord {
    const KIND: &'static str = crate::constants::KIND_NS_RECORD;
    const FINALIZER: &'static str = FINALIZER_NS_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Ns {
            nameserver: self.spec.nameserver.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for SRVRecord {
    const KIND: &'static str = crate::constants::KIND_SRV_RECORD;
    const FINALIZER: &'static str = FINALIZER_SRV_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Srv {
            priority: self.spec.priority,
            weight: self.spec.weight,
            port: self.spec.port,
            target: self.spec.target.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for PTRRecord {
    const KIND: &'static str = crate::constants::KIND_PTR_RECORD;
    const FINALIZER: &'static str = FINALIZER_PTR_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Ptr {
            ptrdname: self.spec.ptrdname.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for CAARecord {
    const KIND: &'static str = crate::constants::KIND_CAA_RECORD;
    const FINALIZER: &'static str = FINALIZER_CAA_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Caa {
            flags: self.spec.flags,
            tag: self.spec.tag.clone(),
            value: self.spec.value.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl ZoneRecord for NAPTRRecord {
    const KIND: &'static str = crate::constants::KIND_NAPTR_RECORD;
    const FINALIZER: &'static str = FINALIZER_NAPTR_RECORD;

    fn zone_ref(&self) -> &str {
        &self.spec.zone
    }

    fn record_name(&self) -> &str {
        &self.spec.name
    }

    fn ttl(&self) -> Option<i32> {
        self.spec.ttl
    }

    fn record_data(&self) -> RecordData {
        RecordData::Naptr {
            order: self.spec.order,
            preference: self.spec.preference,
            flags: self.spec.flags.clone(),
            service: self.spec.service.clone(),
            regexp: self.spec.regexp.clone(),
            replacement: self.spec.replacement.clone(),
        }
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

/// Runs the controller for one record kind until the watch stream ends.
///
/// # Errors
///
/// Returns an error if the controller cannot be started.
pub async fn run_record_controller<T>(ctx: Arc<Context>) -> Result<()>
where
    T: ZoneRecord,
{
    info!("Starting {} controller", T::KIND);

    let api = Api::<T>::all(ctx.client.clone());
    Controller::new(api, WatcherConfig::default())
        .run(reconcile_record::<T>, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Reconciles one record resource.
///
/// Wraps the apply/cleanup flows in the finalizer protocol, records
/// metrics, and publishes a `Failed` status before surfacing an error to
/// the controller's error policy.
///
/// # Errors
///
/// Returns an error when validation fails (permanent), the referenced
/// zone is missing (retryable), or an artifact patch fails (retryable).
pub async fn reconcile_record<T>(record: Arc<T>, ctx: Arc<Context>) -> Result<Action>
where
    T: ZoneRecord,
{
    let start = Instant::now();
    let namespace = record.namespace().ok_or_else(|| Error::MissingNamespace {
        kind: T::KIND,
        name: record.name_any(),
    })?;
    let api: Api<T> = Api::namespaced(ctx.client.clone(), &namespace);

    let result = finalizer(&api, T::FINALIZER, Arc::clone(&record), |event| async {
        match event {
            finalizer::Event::Apply(record) => apply_record(record.as_ref(), &namespace, &ctx).await,
            finalizer::Event::Cleanup(record) => {
                cleanup_record(record.as_ref(), &namespace, &ctx).await
            }
        }
    })
    .await;

    match flatten_finalizer_error(T::KIND, result) {
        Ok(action) => {
            metrics::record_reconciliation_success(T::KIND, start.elapsed());
            Ok(action)
        }
        Err(err) => {
            metrics::record_reconciliation_error(T::KIND, err.status_reason());
            publish_failure(&api, record.as_ref(), &err).await;
            Err(err)
        }
    }
}

/// Validates the record and places its rendered line in the zone
/// `ConfigMap`.
async fn apply_record<T>(record: &T, namespace: &str, ctx: &Context) -> Result<Action>
where
    T: ZoneRecord,
{
    let name = record.name_any();
    let data = record.record_data();

    validate(&data).map_err(|reason| Error::InvalidRecord {
        record_type: data.record_type(),
        name: name.clone(),
        reason,
    })?;

    let zone = fetch_zone(record, namespace, ctx).await?;
    let line = bind9_config::render_record_line(record.record_name(), record.ttl(), &data);
    upsert_zone_entry(ctx, namespace, &zone, &name, Some(line)).await?;

    info!(
        record = %name,
        zone = %zone.spec.zone_name,
        "Applied {} to zone ConfigMap",
        T::KIND
    );

    let desired = status::record_active_status(data.record_type(), record.meta().generation);
    if status::record_status_changed(record.status(), &desired) {
        let api: Api<T> = Api::namespaced(ctx.client.clone(), namespace);
        status::patch_record_status(&api, &name, &desired).await?;
    }

    Ok(success_action())
}

/// Removes the record's entry from the zone `ConfigMap`.
///
/// A missing zone means the per-zone `ConfigMap` is garbage-collected
/// with it, so there is nothing left to clean and deletion must not be
/// blocked.
async fn cleanup_record<T>(record: &T, namespace: &str, ctx: &Context) -> Result<Action>
where
    T: ZoneRecord,
{
    let name = record.name_any();

    match fetch_zone(record, namespace, ctx).await {
        Ok(zone) => {
            upsert_zone_entry(ctx, namespace, &zone, &name, None).await?;
            info!(
                record = %name,
                zone = %zone.spec.zone_name,
                "Removed {} from zone ConfigMap",
                T::KIND
            );
        }
        Err(Error::ReferenceNotFound { .. }) => {
            debug!(
                record = %name,
                zone = %record.zone_ref(),
                "Zone already gone, nothing to clean up"
            );
        }
        Err(err) => return Err(err),
    }

    Ok(Action::await_change())
}

/// Looks up the `DNSZone` a record points at.
async fn fetch_zone<T>(record: &T, namespace: &str, ctx: &Context) -> Result<crate::crd::DNSZone>
where
    T: ZoneRecord,
{
    let zones: Api<crate::crd::DNSZone> = Api::namespaced(ctx.client.clone(), namespace);
    match zones.get(record.zone_ref()).await {
        Ok(zone) => Ok(zone),
        Err(kube::Error::Api(ae)) if ae.code == 404 => Err(Error::ReferenceNotFound {
            kind: KIND_DNS_ZONE,
            name: record.zone_ref().to_string(),
            namespace: namespace.to_string(),
        }),
        Err(e) => Err(Error::KubeApi(e)),
    }
}

/// Inserts or removes one record entry and re-renders the zone file.
///
/// The zone `ConfigMap`'s `record.*` entries are the source of truth:
/// both this function and the zone reconciler rebuild `db.<zone>` from
/// the full entry set, so concurrent writers converge on the same
/// rendering instead of clobbering each other's lines.
async fn upsert_zone_entry(
    ctx: &Context,
    namespace: &str,
    zone: &crate::crd::DNSZone,
    resource_name: &str,
    line: Option<String>,
) -> Result<()> {
    let cm_name = resources::zone_config_map_name(&zone.name_any());
    let live = zone::live_zone_data(&ctx.client, namespace, &cm_name).await?;
    let mut entries = live.as_ref().map(zone::record_entries).unwrap_or_default();

    let entry_key = resources::record_entry_key(resource_name);
    match line {
        Some(line) => {
            entries.insert(entry_key, line);
        }
        None => {
            entries.remove(&entry_key);
        }
    }

    let serial = zone::resolve_serial(&zone.spec, &ctx.serial_policy);
    let data = zone::render_zone_data(&zone.spec, serial, entries);
    if live.as_ref() == Some(&data) {
        debug!(
            zone = %zone.name_any(),
            record = %resource_name,
            "Zone ConfigMap already reflects this record"
        );
        return Ok(());
    }

    let desired = resources::build_zone_configmap(&cm_name, namespace, zone, data);
    apply::create_or_apply(&ctx.client, namespace, &desired).await
}

/// Best-effort `Failed` status patch; the original error is what the
/// caller surfaces, so patch failures are only logged.
async fn publish_failure<T>(api: &Api<T>, record: &T, err: &Error)
where
    T: ZoneRecord,
{
    let desired = status::record_failed_status(
        record.record_data().record_type(),
        err,
        record.meta().generation,
    );
    if !status::record_status_changed(record.status(), &desired) {
        return;
    }
    if let Err(patch_err) = status::patch_record_status(api, &record.name_any(), &desired).await {
        warn!(
            record = %record.name_any(),
            error = %patch_err,
            "Failed to record failure status for {}",
            T::KIND
        );
    }
}
