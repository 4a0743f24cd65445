// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the bindkeeper operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for all bindkeeper CRDs
pub const API_GROUP: &str = "bindkeeper.io";

/// API version for all bindkeeper CRDs
pub const API_VERSION: &str = "v1alpha1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "bindkeeper.io/v1alpha1";

/// Kind name for `Bind9Instance` resource
pub const KIND_BIND9_INSTANCE: &str = "Bind9Instance";

/// Kind name for `DNSZone` resource
pub const KIND_DNS_ZONE: &str = "DNSZone";

/// Kind name for `ARecord` resource
pub const KIND_A_RECORD: &str = "ARecord";

/// Kind name for `AAAARecord` resource
pub const KIND_AAAA_RECORD: &str = "AAAARecord";

/// Kind name for `CNAMERecord` resource
pub const KIND_CNAME_RECORD: &str = "CNAMERecord";

/// Kind name for `MXRecord` resource
pub const KIND_MX_RECORD: &str = "MXRecord";

/// Kind name for `TXTRecord` resource
pub const KIND_TXT_RECORD: &str = "TXTRecord";

/// Kind name for `NSRecord` resource
pub const KIND_NS_RECORD: &str = "NSRecord";

/// Kind name for `SRVRecord` resource
pub const KIND_SRV_RECORD: &str = "SRVRecord";

/// Kind name for `PTRRecord` resource
pub const KIND_PTR_RECORD: &str = "PTRRecord";

/// Kind name for `CAARecord` resource
pub const KIND_CAA_RECORD: &str = "CAARecord";

/// Kind name for `NAPTRRecord` resource
pub const KIND_NAPTR_RECORD: &str = "NAPTRRecord";

// ============================================================================
// DNS Protocol Constants
// ============================================================================

/// Standard DNS port for queries and zone transfers
pub const DNS_PORT: u16 = 53;

/// Default TTL for zone files (1 hour)
pub const DEFAULT_ZONE_TTL_SECS: i32 = 3600;

/// Default SOA refresh interval (1 hour)
pub const DEFAULT_SOA_REFRESH_SECS: i32 = 3600;

/// Default SOA retry interval (10 minutes)
pub const DEFAULT_SOA_RETRY_SECS: i32 = 600;

/// Default SOA expire time (7 days)
pub const DEFAULT_SOA_EXPIRE_SECS: i32 = 604_800;

/// Default SOA negative TTL (1 day)
pub const DEFAULT_SOA_NEGATIVE_TTL_SECS: i32 = 86400;

// ============================================================================
// Derived Artifact Naming
// ============================================================================

/// Suffix for the instance configuration `ConfigMap` (`<instance>-config`)
pub const CONFIG_SUFFIX: &str = "config";

/// Suffix for the aggregated zones `ConfigMap` mounted by the workload
/// (`<instance>-zones`)
pub const ZONES_SUFFIX: &str = "zones";

/// Suffix for the per-zone zone file `ConfigMap` (`<zone>-zone`)
pub const ZONE_FILE_SUFFIX: &str = "zone";

/// Suffix for the BIND9 `StatefulSet` (`<instance>-bind9`)
pub const WORKLOAD_SUFFIX: &str = "bind9";

/// Suffix for the external DNS `Service` (`<instance>-dns`)
pub const DNS_SERVICE_SUFFIX: &str = "dns";

/// Suffix for the headless `Service` backing the `StatefulSet`
/// (`<instance>-headless`)
pub const HEADLESS_SERVICE_SUFFIX: &str = "headless";

/// Data key holding the rendered `named.conf` in the config `ConfigMap`
pub const NAMED_CONF_KEY: &str = "named.conf";

/// Data key holding the zone stanza aggregate in the zones `ConfigMap`
pub const ZONES_CONF_KEY: &str = "zones.conf";

/// Data key prefix for rendered zone files (`db.<zone-name>`)
pub const ZONE_DB_KEY_PREFIX: &str = "db.";

/// Data key prefix for individual record entries in a zone `ConfigMap`
/// (`record.<resource-name>`)
pub const RECORD_ENTRY_KEY_PREFIX: &str = "record.";

// ============================================================================
// BIND9 Container Constants
// ============================================================================

/// Default BIND9 container image
pub const DEFAULT_BIND9_IMAGE: &str = "internetsystemsconsortium/bind9:9.18";

/// Mount path for the main BIND9 configuration
pub const BIND_CONFIG_MOUNT_PATH: &str = "/etc/bind";

/// Mount path for zone files
pub const BIND_ZONES_MOUNT_PATH: &str = "/etc/bind/zones";

/// BIND9 working directory inside the container
pub const BIND_WORKING_DIR: &str = "/var/lib/bind";

/// Name of the BIND9 container in workload pods
pub const CONTAINER_NAME_BIND9: &str = "bind9";

/// Liveness probe initial delay (allows BIND9 to fully start)
pub const LIVENESS_INITIAL_DELAY_SECS: i32 = 30;

/// Liveness probe check interval
pub const LIVENESS_PERIOD_SECS: i32 = 10;

/// Liveness probe timeout per check
pub const LIVENESS_TIMEOUT_SECS: i32 = 5;

/// Liveness probe failures before restart
pub const LIVENESS_FAILURE_THRESHOLD: i32 = 3;

/// Readiness probe initial delay
pub const READINESS_INITIAL_DELAY_SECS: i32 = 10;

/// Readiness probe check interval
pub const READINESS_PERIOD_SECS: i32 = 5;

/// Readiness probe timeout per check
pub const READINESS_TIMEOUT_SECS: i32 = 3;

/// Readiness probe failures before marking unready
pub const READINESS_FAILURE_THRESHOLD: i32 = 3;

// ============================================================================
// Controller Error Handling Constants
// ============================================================================

/// Requeue duration for retryable reconciliation failures (30 seconds)
pub const ERROR_REQUEUE_DURATION_SECS: u64 = 30;

/// Instance name a `DNSZone` refers to when `bind9InstanceRef` is unset
pub const DEFAULT_INSTANCE_REF: &str = "default";

// ============================================================================
// Health Daemon Constants
// ============================================================================

/// Interval between health probes (60 seconds)
pub const HEALTH_PROBE_INTERVAL_SECS: u64 = 60;

/// Widened probe interval after a failed cycle (120 seconds)
pub const HEALTH_PROBE_BACKOFF_SECS: u64 = 120;

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;

// ============================================================================
// Metrics Server Constants
// ============================================================================

/// Port for Prometheus metrics HTTP server
pub const METRICS_SERVER_PORT: u16 = 8080;

/// Bind address for metrics HTTP server
pub const METRICS_SERVER_BIND_ADDRESS: &str = "0.0.0.0";
