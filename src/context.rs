// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared context for all controllers.
//!
//! Every controller receives an `Arc<Context>` carrying the Kubernetes
//! client, the serial policy used when a zone does not pin its SOA serial,
//! and the registry of per-instance health daemons.

use crate::bind9_config::SerialPolicy;
use crate::health::DaemonRegistry;
use kube::Client;
use std::sync::Arc;

/// Shared state passed to every reconciler.
pub struct Context {
    /// Kubernetes client for API operations
    pub client: Client,

    /// How SOA serials are generated for zones that leave `serial` unset
    pub serial_policy: SerialPolicy,

    /// Running health daemons, keyed by instance
    pub daemons: DaemonRegistry,
}

impl Context {
    /// Build a context with the default date-encoded serial policy.
    #[must_use]
    pub fn new(client: Client) -> Arc<Self> {
        Self::with_serial_policy(client, SerialPolicy::default())
    }

    /// Build a context with an explicit serial policy. Fixed policies keep
    /// zone-file output reproducible.
    #[must_use]
    pub fn with_serial_policy(client: Client, serial_policy: SerialPolicy) -> Arc<Self> {
        Arc::new(Self {
            client,
            serial_policy,
            daemons: DaemonRegistry::new(),
        })
    }
}
