// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common label and annotation constants used across all reconcilers.
//!
//! This module defines standard Kubernetes labels and bindkeeper-specific
//! labels/annotations to ensure consistency across all resources created by
//! the controller.

// ============================================================================
// Kubernetes Standard Labels
// https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
// ============================================================================

/// Standard label for the component name within the architecture (e.g., "dns-server")
pub const K8S_COMPONENT: &str = "app.kubernetes.io/component";

/// Standard label for the tool being used to manage the operation of an application
pub const K8S_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Standard label for the name of the application (e.g., "bind9")
pub const K8S_NAME: &str = "app.kubernetes.io/name";

/// Standard label for a unique name identifying the instance of an application
pub const K8S_INSTANCE: &str = "app.kubernetes.io/instance";

// ============================================================================
// Kubernetes Standard Label Values
// ============================================================================

/// Application name for BIND9 instances
pub const APP_NAME_BIND9: &str = "bind9";

/// Component value for DNS server instances
pub const COMPONENT_DNS_SERVER: &str = "dns-server";

/// Value for `app.kubernetes.io/managed-by` on every derived artifact
pub const MANAGED_BY_BINDKEEPER: &str = "bindkeeper";

// ============================================================================
// bindkeeper-Specific Labels
// ============================================================================

/// Label on a zone `ConfigMap` naming the `Bind9Instance` that serves it,
/// used by the instance reconciler to aggregate zone files
pub const INSTANCE_LABEL: &str = "bindkeeper.io/instance";

/// Label on a zone `ConfigMap` naming the `DNSZone` it was derived from
pub const ZONE_LABEL: &str = "bindkeeper.io/zone";

// ============================================================================
// bindkeeper-Specific Annotations
// ============================================================================

/// Annotation patched onto a `Bind9Instance` to request a configuration
/// reload (value is an RFC 3339 timestamp)
pub const RELOAD_REQUESTED_ANNOTATION: &str = "bindkeeper.io/reload-requested-at";

// ============================================================================
// Finalizers
// ============================================================================

/// Finalizer for `Bind9Instance` resources
pub const FINALIZER_BIND9_INSTANCE: &str = "bindkeeper.io/bind9instance-finalizer";

/// Finalizer for `DNSZone` resources
pub const FINALIZER_DNS_ZONE: &str = "bindkeeper.io/dnszone-finalizer";

/// Finalizer for `ARecord` resources
pub const FINALIZER_A_RECORD: &str = "bindkeeper.io/arecord-finalizer";

/// Finalizer for `AAAARecord` resources
pub const FINALIZER_AAAA_RECORD: &str = "bindkeeper.io/aaaarecord-finalizer";

/// Finalizer for `CNAMERecord` resources
pub const FINALIZER_CNAME_RECORD: &str = "bindkeeper.io/cnamerecord-finalizer";

/// Finalizer for `MXRecord` resources
pub const FINALIZER_MX_RECORD: &str = "bindkeeper.io/mxrecord-finalizer";

/// Finalizer for `TXTRecord` resources
pub const FINALIZER_TXT_RECORD: &str = "bindkeeper.io/txtrecord-finalizer";

/// Finalizer for `NSRecord` resources
pub const FINALIZER_NS_RECORD: &str = "bindkeeper.io/nsrecord-finalizer";

/// Finalizer for `SRVRecord` resources
pub const FINALIZER_SRV_RECORD: &str = "bindkeeper.io/srvrecord-finalizer";

/// Finalizer for `PTRRecord` resources
pub const FINALIZER_PTR_RECORD: &str = "bindkeeper.io/ptrrecord-finalizer";

/// Finalizer for `CAARecord` resources
pub const FINALIZER_CAA_RECORD: &str = "bindkeeper.io/caarecord-finalizer";

/// Finalizer for `NAPTRRecord` resources
pub const FINALIZER_NAPTR_RECORD: &str = "bindkeeper.io/naptrrecord-finalizer";
