// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation logic for bindkeeper resources.
//!
//! Each submodule drives the controller for one layer of the DNS
//! hierarchy:
//!
//! - [`instance`] - `Bind9Instance` → config `ConfigMap`, zones
//!   `ConfigMap`, `StatefulSet`, `Service`s, health daemon
//! - [`zone`] - `DNSZone` → per-zone `ConfigMap` and reload signal to the
//!   serving instance
//! - [`record`] - the record types → entries in the zone `ConfigMap`,
//!   driven by one generic reconciler over the [`record::ZoneRecord`]
//!   trait
//! - [`status`] - status subresource builders and change-gated patch
//!   helpers shared by the reconcilers
//!
//! All reconcilers funnel failures through [`enum@crate::errors::Error`].
//! The [`error_policy`] boundary translates the error's failure class into
//! the redelivery decision: retryable failures requeue after a fixed
//! delay, permanent failures wait for the next spec change.

pub mod instance;
pub mod record;
pub mod status;
pub mod zone;

#[cfg(test)]
mod instance_tests;
#[cfg(test)]
mod status_tests;
#[cfg(test)]
mod zone_tests;

pub use instance::{reconcile_bind9instance, run_instance_controller};
pub use record::{reconcile_record, run_record_controller, ZoneRecord};
pub use zone::{reconcile_dnszone, run_zone_controller};

use crate::constants::ERROR_REQUEUE_DURATION_SECS;
use crate::context::Context;
use crate::errors::{Error, FailureClass};
use anyhow::anyhow;
use kube::runtime::controller::Action;
use kube::runtime::finalizer;
use kube::ResourceExt;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Interval between periodic drift checks on converged resources.
const SUCCESS_REQUEUE_DURATION_SECS: u64 = 300;

/// Requeue action after a successful reconciliation.
///
/// Converged resources are revisited on a slow cadence so drift in derived
/// artifacts (a hand-deleted `Service`, an edited `ConfigMap` an `owns`
/// watch missed) is repaired without waiting for a spec change.
#[must_use]
pub fn success_action() -> Action {
    Action::requeue(Duration::from_secs(SUCCESS_REQUEUE_DURATION_SECS))
}

/// Decides how a failed reconciliation is redelivered.
///
/// Retryable failures requeue after a fixed delay so transient conditions
/// (API hiccups, references that have not been created yet) resolve on a
/// later pass. Permanent failures park the resource until its spec
/// changes; requeueing them would spin on input that cannot succeed.
pub fn error_policy<T>(resource: Arc<T>, err: &Error, _ctx: Arc<Context>) -> Action
where
    T: ResourceExt + Debug,
{
    match err.classify() {
        FailureClass::Retryable => {
            warn!(
                resource = %resource.name_any(),
                error = %err,
                "Reconciliation failed, requeueing in {ERROR_REQUEUE_DURATION_SECS}s"
            );
            Action::requeue(Duration::from_secs(ERROR_REQUEUE_DURATION_SECS))
        }
        FailureClass::Permanent => {
            error!(
                resource = %resource.name_any(),
                error = %err,
                "Reconciliation failed permanently, waiting for a spec change"
            );
            Action::await_change()
        }
    }
}

/// Collapses the finalizer wrapper's error type back into [`enum@Error`].
///
/// Apply and cleanup failures pass through untouched so their failure
/// class survives; failures of the finalizer bookkeeping itself are API
/// errors and retryable.
pub(crate) fn flatten_finalizer_error(
    kind: &str,
    result: Result<Action, finalizer::Error<Error>>,
) -> Result<Action, Error> {
    result.map_err(|e| match e {
        finalizer::Error::ApplyFailed(err) | finalizer::Error::CleanupFailed(err) => err,
        finalizer::Error::AddFinalizer(err) | finalizer::Error::RemoveFinalizer(err) => {
            Error::KubeApi(err)
        }
        finalizer::Error::UnnamedObject => Error::Other(anyhow!("{kind} has no name")),
        finalizer::Error::InvalidFinalizer => {
            Error::Other(anyhow!("invalid finalizer name for {kind}"))
        }
    })
}

#[cfg(test)]
mod mod_tests;
