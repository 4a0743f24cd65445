// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation error types for bindkeeper.
//!
//! Every reconciler returns [`Error`] at its boundary. The controller's
//! error policy calls [`Error::classify`] to decide between requeueing
//! after a delay (retryable infrastructure failures) and waiting for the
//! user to change the resource (permanent input errors).

use thiserror::Error;

/// Failure classification for a reconciliation error.
///
/// Drives the redelivery decision at the controller boundary: `Retryable`
/// failures are requeued after a fixed delay, `Permanent` failures are
/// surfaced in the resource's status and not redelivered until the
/// resource changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Transient infrastructure failure; requeue after the standard delay.
    Retryable,
    /// User input error; do not requeue until the resource is edited.
    Permanent,
}

/// Errors that can occur while reconciling bindkeeper resources.
#[derive(Error, Debug)]
pub enum Error {
    /// A record failed structural validation.
    ///
    /// Raised before any zone artifact mutation; the user must fix the
    /// record spec for the event to be redelivered.
    #[error("invalid {record_type} record '{name}': {reason}")]
    InvalidRecord {
        /// DNS record type (e.g., "A", "MX")
        record_type: &'static str,
        /// Name of the record resource
        name: String,
        /// Explanation of what is invalid
        reason: String,
    },

    /// A record or zone references a `DNSZone`/`Bind9Instance` that does
    /// not exist (yet). Referenced resources may be created out of order,
    /// so this is retried.
    #[error("{kind} '{name}' not found in namespace '{namespace}'")]
    ReferenceNotFound {
        /// Kind of the missing resource
        kind: &'static str,
        /// Name of the missing resource
        name: String,
        /// Namespace that was searched
        namespace: String,
    },

    /// A namespaced resource was delivered without a namespace.
    #[error("{kind} '{name}' has no namespace")]
    MissingNamespace {
        /// Kind of the resource
        kind: &'static str,
        /// Name of the resource
        name: String,
    },

    /// The Kubernetes API rejected or failed a call.
    #[error("Kubernetes API error: {0}")]
    KubeApi(#[from] kube::Error),

    /// A derived artifact could not be serialized for a patch.
    #[error("failed to serialize {artifact}: {source}")]
    Serialization {
        /// Name of the artifact being serialized
        artifact: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// Catch-all for contextual errors from helpers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Classify this error into the two-case retry taxonomy.
    ///
    /// Only validation failures are permanent. Everything else, including
    /// unexpected store state, is treated conservatively as retryable so
    /// reconciliation stays idempotent under redelivery.
    #[must_use]
    pub fn classify(&self) -> FailureClass {
        match self {
            Self::InvalidRecord { .. } => FailureClass::Permanent,
            Self::ReferenceNotFound { .. }
            | Self::MissingNamespace { .. }
            | Self::KubeApi(_)
            | Self::Serialization { .. }
            | Self::Other(_) => FailureClass::Retryable,
        }
    }

    /// Returns the status reason code for this error, used when patching
    /// a resource's status after a failed reconciliation.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::InvalidRecord { .. } => "InvalidRecord",
            Self::ReferenceNotFound { .. } => "ReferenceNotFound",
            Self::MissingNamespace { .. } => "MissingNamespace",
            Self::KubeApi(_) => "KubeApiError",
            Self::Serialization { .. } => "SerializationFailed",
            Self::Other(_) => "ReconcileFailed",
        }
    }
}

/// Convenience alias used throughout the reconcilers.
pub type Result<T, E = Error> = std::result::Result<T, E>;
