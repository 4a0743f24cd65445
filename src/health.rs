// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-instance DNS health daemons.
//!
//! Each `Bind9Instance` gets one background task that periodically sends a
//! DNS query to the instance's service endpoint. A probe cycle runs every
//! 60 seconds, widening to 120 seconds after a failed cycle so an unhealthy
//! server is not hammered. Daemons are tracked in a [`DaemonRegistry`] keyed
//! by namespace and instance name; the instance reconciler starts them on
//! apply and stops them on cleanup.
//!
//! Probe outcome is observability only (logs and metrics). It never feeds
//! back into reconciliation.

use crate::constants::{DNS_PORT, HEALTH_PROBE_BACKOFF_SECS, HEALTH_PROBE_INTERVAL_SECS};
use crate::metrics::record_health_probe;
use crate::resources::dns_service_name;
use anyhow::Result;
use hickory_client::client::{Client, SyncClient};
use hickory_client::udp::UdpClientConnection;
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// (namespace, instance name)
type DaemonKey = (String, String);

/// Tracks the running health daemons and their stop channels.
#[derive(Default)]
pub struct DaemonRegistry {
    daemons: Mutex<HashMap<DaemonKey, watch::Sender<bool>>>,
}

impl DaemonRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a health daemon for the instance unless one is already running.
    pub async fn ensure_running(&self, name: &str, namespace: &str) {
        let key = (namespace.to_string(), name.to_string());
        let mut daemons = self.daemons.lock().await;
        if daemons.contains_key(&key) {
            return;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        daemons.insert(key, stop_tx);

        let name = name.to_string();
        let namespace = namespace.to_string();
        info!(
            instance = %name,
            namespace = %namespace,
            "Starting health daemon"
        );
        tokio::spawn(async move {
            probe_loop(&name, &namespace, stop_rx).await;
        });
    }

    /// Stop the health daemon for the instance, if one is running.
    pub async fn stop(&self, name: &str, namespace: &str) {
        let key = (namespace.to_string(), name.to_string());
        if let Some(stop_tx) = self.daemons.lock().await.remove(&key) {
            let _ = stop_tx.send(true);
            info!(
                instance = %name,
                namespace = %namespace,
                "Stopped health daemon"
            );
        }
    }

    /// Stop every running daemon. Called on operator shutdown.
    pub async fn stop_all(&self) {
        let mut daemons = self.daemons.lock().await;
        for ((namespace, name), stop_tx) in daemons.drain() {
            let _ = stop_tx.send(true);
            debug!(
                instance = %name,
                namespace = %namespace,
                "Stopped health daemon"
            );
        }
    }

    /// Whether a daemon is currently registered for the instance.
    pub async fn is_running(&self, name: &str, namespace: &str) -> bool {
        let key = (namespace.to_string(), name.to_string());
        self.daemons.lock().await.contains_key(&key)
    }
}

/// In-cluster DNS endpoint of an instance's client-facing service.
#[must_use]
pub fn dns_endpoint(name: &str, namespace: &str) -> String {
    format!(
        "{}.{namespace}.svc.cluster.local:{DNS_PORT}",
        dns_service_name(name)
    )
}

/// Probe the instance until the stop signal fires.
///
/// Probes immediately on start, then sleeps 60s after a healthy cycle and
/// 120s after an unhealthy one.
async fn probe_loop(name: &str, namespace: &str, mut stop: watch::Receiver<bool>) {
    let endpoint = dns_endpoint(name, namespace);

    loop {
        let healthy = probe_dns(&endpoint).await;
        record_health_probe(name, healthy);

        let delay = if healthy {
            debug!(instance = %name, namespace = %namespace, "Health probe ok");
            HEALTH_PROBE_INTERVAL_SECS
        } else {
            warn!(
                instance = %name,
                namespace = %namespace,
                endpoint = %endpoint,
                "Health probe failed"
            );
            HEALTH_PROBE_BACKOFF_SECS
        };

        tokio::select! {
            _ = stop.changed() => {
                debug!(instance = %name, namespace = %namespace, "Health daemon stopping");
                return;
            }
            () = tokio::time::sleep(Duration::from_secs(delay)) => {}
        }
    }
}

/// Send one DNS query to the endpoint and report whether the server
/// answered.
///
/// Any well-formed DNS response counts as healthy, including `REFUSED`
/// from a non-recursive server asked for something it is not authoritative
/// for. Only transport failures and timeouts count as unhealthy.
pub async fn probe_dns(endpoint: &str) -> bool {
    match try_probe(endpoint).await {
        Ok(()) => true,
        Err(e) => {
            debug!(endpoint = %endpoint, error = %e, "DNS probe error");
            false
        }
    }
}

async fn try_probe(endpoint: &str) -> Result<()> {
    let addr: SocketAddr = tokio::net::lookup_host(endpoint)
        .await?
        .next()
        .ok_or_else(|| anyhow::anyhow!("no address found for {endpoint}"))?;

    tokio::task::spawn_blocking(move || -> Result<()> {
        let conn = UdpClientConnection::new(addr)?;
        let client = SyncClient::new(conn);
        // NS query for the root; the rcode does not matter, a response does.
        client.query(&Name::root(), DNSClass::IN, RecordType::NS)?;
        Ok(())
    })
    .await??;

    Ok(())
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod health_tests;
