// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status subresource helpers for bindkeeper resources.
//!
//! Every reconciler reports its outcome through the status subresource:
//! a lifecycle `phase` (`Ready`/`Active` on success, `Failed` otherwise),
//! a human-readable `message`, and the generation the reconciler observed.
//! The patch helpers here are change-gated: when the desired status
//! already matches the live one, no API call is made, so steady-state
//! reconciliation passes generate no write traffic and no follow-up watch
//! events.
//!
//! All patches go through the status subresource with a JSON merge patch,
//! leaving fields this pass does not set (such as artifact names recorded
//! by an earlier successful pass) untouched.

use crate::constants::{KIND_BIND9_INSTANCE, KIND_DNS_ZONE};
use crate::crd::{
    Bind9Instance, Bind9InstanceStatus, DNSZone, DNSZoneStatus, RecordStatus,
};
use crate::errors::{Error, Result};
use crate::resources::{
    config_map_name, dns_service_name, headless_service_name, workload_name,
};
use chrono::Utc;
use kube::api::{Api, Patch, PatchParams};
use kube::{Client, ResourceExt};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt::Debug;
use tracing::debug;

/// Phase reported by a converged `Bind9Instance`.
pub const PHASE_READY: &str = "Ready";

/// Phase reported by a converged `DNSZone` or record.
pub const PHASE_ACTIVE: &str = "Active";

/// Phase reported after a failed reconciliation.
pub const PHASE_FAILED: &str = "Failed";

// ============================================================================
// Bind9Instance
// ============================================================================

/// Status for an instance whose artifacts are all applied.
#[must_use]
pub fn instance_ready_status(instance: &Bind9Instance) -> Bind9InstanceStatus {
    let name = instance.name_any();
    Bind9InstanceStatus {
        phase: Some(PHASE_READY.to_string()),
        message: Some("BIND9 instance resources applied".to_string()),
        config_map: Some(config_map_name(&name)),
        stateful_set: Some(workload_name(&name)),
        services: vec![dns_service_name(&name), headless_service_name(&name)],
        observed_generation: instance.metadata.generation,
    }
}

/// Status for an instance whose last reconciliation failed.
///
/// Artifact names are left unset; the merge patch keeps whatever a
/// previous successful pass recorded.
#[must_use]
pub fn instance_failed_status(instance: &Bind9Instance, err: &Error) -> Bind9InstanceStatus {
    Bind9InstanceStatus {
        phase: Some(PHASE_FAILED.to_string()),
        message: Some(err.to_string()),
        config_map: None,
        stateful_set: None,
        services: Vec::new(),
        observed_generation: instance.metadata.generation,
    }
}

/// Patches the status subresource of a `Bind9Instance`, skipping the call
/// when the live status already matches.
///
/// # Errors
///
/// Returns an error when the resource has no namespace or the API call
/// fails.
pub async fn patch_instance_status(
    client: &Client,
    instance: &Bind9Instance,
    desired: Bind9InstanceStatus,
) -> Result<()> {
    if instance.status.as_ref() == Some(&desired) {
        debug!(instance = %instance.name_any(), "Instance status unchanged, skipping patch");
        return Ok(());
    }

    let namespace = instance.namespace().ok_or_else(|| Error::MissingNamespace {
        kind: KIND_BIND9_INSTANCE,
        name: instance.name_any(),
    })?;
    let api: Api<Bind9Instance> = Api::namespaced(client.clone(), &namespace);
    api.patch_status(
        &instance.name_any(),
        &PatchParams::default(),
        &Patch::Merge(json!({ "status": desired })),
    )
    .await?;

    Ok(())
}

// ============================================================================
// DNSZone
// ============================================================================

/// Status for a zone whose rendered file is applied.
#[must_use]
pub fn zone_active_status(zone: &DNSZone, serial: i64) -> DNSZoneStatus {
    DNSZoneStatus {
        phase: Some(PHASE_ACTIVE.to_string()),
        serial: Some(serial),
        zone_name: Some(zone.spec.zone_name.clone()),
        message: None,
        observed_generation: zone.metadata.generation,
    }
}

/// Status for a zone whose last reconciliation failed.
#[must_use]
pub fn zone_failed_status(zone: &DNSZone, err: &Error) -> DNSZoneStatus {
    DNSZoneStatus {
        phase: Some(PHASE_FAILED.to_string()),
        serial: None,
        zone_name: Some(zone.spec.zone_name.clone()),
        message: Some(err.to_string()),
        observed_generation: zone.metadata.generation,
    }
}

/// Patches the status subresource of a `DNSZone`, skipping the call when
/// the live status already matches.
///
/// # Errors
///
/// Returns an error when the resource has no namespace or the API call
/// fails.
pub async fn patch_zone_status(
    client: &Client,
    zone: &DNSZone,
    desired: DNSZoneStatus,
) -> Result<()> {
    if zone.status.as_ref() == Some(&desired) {
        debug!(zone = %zone.name_any(), "Zone status unchanged, skipping patch");
        return Ok(());
    }

    let namespace = zone.namespace().ok_or_else(|| Error::MissingNamespace {
        kind: KIND_DNS_ZONE,
        name: zone.name_any(),
    })?;
    let api: Api<DNSZone> = Api::namespaced(client.clone(), &namespace);
    api.patch_status(
        &zone.name_any(),
        &PatchParams::default(),
        &Patch::Merge(json!({ "status": desired })),
    )
    .await?;

    Ok(())
}

// ============================================================================
// Records
// ============================================================================

/// Status for a record that is present in its zone's rendered file.
#[must_use]
pub fn record_active_status(record_type: &str, observed_generation: Option<i64>) -> RecordStatus {
    RecordStatus {
        phase: Some(PHASE_ACTIVE.to_string()),
        record_type: Some(record_type.to_string()),
        message: None,
        last_updated: Some(Utc::now().to_rfc3339()),
        observed_generation,
    }
}

/// Status for a record whose last reconciliation failed.
#[must_use]
pub fn record_failed_status(
    record_type: &str,
    err: &Error,
    observed_generation: Option<i64>,
) -> RecordStatus {
    RecordStatus {
        phase: Some(PHASE_FAILED.to_string()),
        record_type: Some(record_type.to_string()),
        message: Some(err.to_string()),
        last_updated: Some(Utc::now().to_rfc3339()),
        observed_generation,
    }
}

/// Whether `desired` differs from `current` in any field other than
/// `last_updated`.
///
/// The timestamp moves on every pass; comparing it would defeat the gate
/// and re-patch (and re-trigger) converged records forever.
#[must_use]
pub fn record_status_changed(current: Option<&RecordStatus>, desired: &RecordStatus) -> bool {
    match current {
        None => true,
        Some(current) => {
            current.phase != desired.phase
                || current.record_type != desired.record_type
                || current.message != desired.message
                || current.observed_generation != desired.observed_generation
        }
    }
}

/// Patches the status subresource of a record resource.
///
/// Callers gate on [`record_status_changed`] first; this helper performs
/// the patch unconditionally.
///
/// # Errors
///
/// Returns an error when the API call fails.
pub async fn patch_record_status<T>(api: &Api<T>, name: &str, desired: &RecordStatus) -> Result<()>
where
    T: Clone + DeserializeOwned + Debug,
{
    api.patch_status(
        name,
        &PatchParams::default(),
        &Patch::Merge(json!({ "status": desired })),
    )
    .await?;

    Ok(())
}
