// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for DNS management.
//!
//! This module defines all Kubernetes Custom Resource Definitions used by
//! bindkeeper to manage BIND9 DNS infrastructure declaratively.
//!
//! # Resource Types
//!
//! ## Infrastructure
//!
//! - [`Bind9Instance`] - Represents a BIND9 DNS server deployment
//!
//! ## DNS Zones
//!
//! - [`DNSZone`] - Defines DNS zones with SOA records and instance targeting
//!
//! ## DNS Records
//!
//! - [`ARecord`] - IPv4 address records
//! - [`AAAARecord`] - IPv6 address records
//! - [`CNAMERecord`] - Canonical name (alias) records
//! - [`MXRecord`] - Mail exchange records
//! - [`TXTRecord`] - Text records (SPF, DKIM, DMARC, etc.)
//! - [`NSRecord`] - Nameserver delegation records
//! - [`SRVRecord`] - Service location records
//! - [`PTRRecord`] - Reverse-mapping pointer records
//! - [`CAARecord`] - Certificate authority authorization records
//! - [`NAPTRRecord`] - Naming authority pointer records
//!
//! # Example: Creating a DNS Zone
//!
//! ```rust,no_run
//! use bindkeeper::crd::{DNSZoneSpec, SOARecord};
//!
//! let spec = DNSZoneSpec {
//!     zone_name: "example.com".to_string(),
//!     bind9_instance_ref: Some("default".to_string()),
//!     soa_record: SOARecord {
//!         primary_ns: Some("ns1.example.com.".to_string()),
//!         admin_email: Some("admin@example.com".to_string()),
//!         serial: Some(2024010101),
//!         ..SOARecord::default()
//!     },
//!     ttl: Some(3600),
//! };
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// SOA (Start of Authority) Record specification.
///
/// The SOA record defines authoritative information about a DNS zone,
/// including the primary nameserver, responsible party's email, and timing
/// parameters for zone transfers and caching. All fields are optional;
/// missing fields resolve to zone-derived defaults when the zone file is
/// synthesized.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SOARecord {
    /// Primary nameserver for this zone (FQDN ending with a dot).
    ///
    /// Defaults to `ns1.<zoneName>.` when unset.
    #[serde(default, rename = "primaryNS", skip_serializing_if = "Option::is_none")]
    pub primary_ns: Option<String>,

    /// Email address of the zone administrator.
    ///
    /// May be written in mailbox form (`admin@example.com`); the `@` is
    /// rendered as `.` in the zone file. Defaults to `admin.<zoneName>.`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,

    /// Serial number for this zone. Typically in YYYYMMDDNN format;
    /// secondaries use it to decide whether to refresh.
    ///
    /// When unset, the operator's serial policy supplies a date-encoded
    /// value at reconciliation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 4_294_967_295_i64))]
    pub serial: Option<i64>,

    /// Refresh interval in seconds. Defaults to 3600.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 2_147_483_647))]
    pub refresh: Option<i32>,

    /// Retry interval in seconds. Defaults to 600.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 2_147_483_647))]
    pub retry: Option<i32>,

    /// Expire time in seconds. Defaults to 604800 (1 week).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 2_147_483_647))]
    pub expire: Option<i32>,

    /// Negative caching TTL in seconds. Defaults to 86400 (1 day).
    #[serde(default, rename = "negativeTTL", skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub negative_ttl: Option<i32>,
}

/// DNSSEC configuration for an instance.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct DNSSECConfig {
    /// Enable DNSSEC validation (`dnssec-validation auto`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// BIND9 server options for an instance.
///
/// All fields are optional; the config synthesizer substitutes conservative
/// defaults (query open, transfer closed, recursion off, DNSSEC off).
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bind9Config {
    /// ACL entries for `allow-query`. Defaults to `["any"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_query: Option<Vec<String>>,

    /// ACL entries for `allow-transfer`. Defaults to `["none"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_transfer: Option<Vec<String>>,

    /// Enable recursive resolution. Defaults to false (`recursion no`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursion: Option<bool>,

    /// DNSSEC validation settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<DNSSECConfig>,
}

/// `Bind9Instance` represents a BIND9 DNS server deployment in Kubernetes.
///
/// Each instance derives a configuration `ConfigMap`, a zones `ConfigMap`,
/// a `StatefulSet`, and DNS `Service`s, all owned by the instance so that
/// deleting it cascades to everything it created.
///
/// # Example
///
/// ```yaml
/// apiVersion: bindkeeper.io/v1alpha1
/// kind: Bind9Instance
/// metadata:
///   name: default
///   namespace: dns-system
/// spec:
///   replicas: 2
///   config:
///     recursion: false
///     allowQuery: ["any"]
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "Bind9Instance",
    namespaced,
    doc = "Bind9Instance represents a BIND9 DNS server deployment. Each instance derives a ConfigMap, StatefulSet, and DNS Services, and is probed by a per-instance health daemon."
)]
#[kube(status = "Bind9InstanceStatus")]
#[serde(rename_all = "camelCase")]
pub struct Bind9InstanceSpec {
    /// Number of pod replicas. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub replicas: Option<i32>,

    /// Container image for BIND9.
    ///
    /// Defaults to `internetsystemsconsortium/bind9:9.18`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// BIND9 server options rendered into `named.conf`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Bind9Config>,
}

/// `Bind9Instance` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bind9InstanceStatus {
    /// Lifecycle phase: `Ready` once all artifacts are applied, `Failed`
    /// when the last reconciliation could not converge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Human-readable outcome of the last reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Name of the derived configuration `ConfigMap`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_map: Option<String>,

    /// Name of the derived `StatefulSet`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stateful_set: Option<String>,

    /// Names of the derived `Service`s.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

/// `DNSZone` defines a DNS zone served by a `Bind9Instance`.
///
/// A `DNSZone` represents an authoritative zone (e.g., example.com). The
/// zone derives a per-zone `ConfigMap` holding the rendered zone file and
/// the set of record entries contributed by record resources.
///
/// # Example
///
/// ```yaml
/// apiVersion: bindkeeper.io/v1alpha1
/// kind: DNSZone
/// metadata:
///   name: example-com
///   namespace: dns-system
/// spec:
///   zoneName: example.com
///   bind9InstanceRef: default
///   ttl: 3600
///   soaRecord:
///     primaryNS: ns1.example.com.
///     adminEmail: admin@example.com
///     serial: 2024010101
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "DNSZone",
    namespaced,
    doc = "DNSZone represents an authoritative DNS zone served by a Bind9Instance. Each zone derives a ConfigMap with the rendered zone file; reconciling a zone signals the referenced instance to reload."
)]
#[kube(status = "DNSZoneStatus")]
#[serde(rename_all = "camelCase")]
pub struct DNSZoneSpec {
    /// DNS zone name (e.g., "example.com").
    #[schemars(regex(
        pattern = r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)*[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$"
    ))]
    pub zone_name: String,

    /// Name of the `Bind9Instance` that serves this zone.
    ///
    /// Must be in the same namespace. Defaults to `default`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind9_instance_ref: Option<String>,

    /// SOA record parameters. Missing fields resolve to zone-derived
    /// defaults.
    #[serde(default)]
    pub soa_record: SOARecord,

    /// Default TTL for records in this zone, in seconds. Defaults to 3600.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

impl DNSZoneSpec {
    /// Name of the `Bind9Instance` serving this zone, defaulting to
    /// `default` when unset.
    #[must_use]
    pub fn instance_ref(&self) -> &str {
        self.bind9_instance_ref
            .as_deref()
            .unwrap_or(crate::constants::DEFAULT_INSTANCE_REF)
    }
}

/// `DNSZone` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSZoneStatus {
    /// Lifecycle phase: `Active` once the zone file is applied, `Failed`
    /// otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Serial advertised by the most recently rendered zone file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<i64>,

    /// Zone name, mirrored from the spec for kubectl columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

/// Status shared by all record resources.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordStatus {
    /// Lifecycle phase: `Active` once the record is in the zone file,
    /// `Failed` when validation or application failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// DNS record type (e.g., "A", "MX").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// RFC 3339 timestamp of the last successful application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

/// `ARecord` maps a DNS name to an IPv4 address.
///
/// # Example
///
/// ```yaml
/// apiVersion: bindkeeper.io/v1alpha1
/// kind: ARecord
/// metadata:
///   name: www-example-com
/// spec:
///   zone: example-com
///   name: www
///   ipv4Address: 192.0.2.1
///   ttl: 300
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "ARecord",
    namespaced,
    doc = "ARecord maps a DNS hostname to an IPv4 address. Multiple A records for the same name enable round-robin DNS."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct ARecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Record name within the zone. Use "@" for the zone apex.
    pub name: String,

    /// IPv4 address in dotted-decimal notation.
    pub ipv4_address: String,

    /// Time To Live in seconds. Inherits the zone default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `AAAARecord` maps a DNS name to an IPv6 address.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "AAAARecord",
    namespaced,
    doc = "AAAARecord maps a DNS hostname to an IPv6 address. This is the IPv6 equivalent of an A record."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct AAAARecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Record name within the zone.
    pub name: String,

    /// IPv6 address in standard notation (e.g., "2001:db8::1").
    pub ipv6_address: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `CNAMERecord` creates an alias from one name to another.
///
/// The target should be a fully qualified domain name ending with a dot.
/// A CNAME cannot coexist with other record types for the same name.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "CNAMERecord",
    namespaced,
    doc = "CNAMERecord creates a DNS alias from one hostname to another. A CNAME cannot coexist with other record types for the same name."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct CNAMERecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Record name within the zone. Cannot be the zone apex.
    pub name: String,

    /// Target hostname (canonical name), FQDN ending with a dot.
    pub target: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `MXRecord` specifies mail servers for a domain.
///
/// # Example
///
/// ```yaml
/// apiVersion: bindkeeper.io/v1alpha1
/// kind: MXRecord
/// metadata:
///   name: mail-example-com
/// spec:
///   zone: example-com
///   name: "@"
///   priority: 10
///   mailServer: mail.example.com.
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "MXRecord",
    namespaced,
    doc = "MXRecord specifies mail exchange servers for a domain. Lower priority values indicate higher preference for mail delivery."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct MXRecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Record name within the zone. Use "@" for the zone apex.
    pub name: String,

    /// Priority of this mail server. Lower values are preferred.
    #[schemars(range(min = 0, max = 65535))]
    pub priority: i32,

    /// Fully qualified domain name of the mail server, ending with a dot.
    pub mail_server: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `TXTRecord` holds arbitrary text data.
///
/// Commonly used for SPF, DKIM, DMARC, and domain verification.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "TXTRecord",
    namespaced,
    doc = "TXTRecord stores arbitrary text data in DNS. Commonly used for SPF, DKIM, DMARC policies, and domain verification."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct TXTRecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Record name within the zone.
    pub name: String,

    /// Text strings; each is quoted separately in the zone file.
    pub text: Vec<String>,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `NSRecord` delegates a subdomain to other nameservers.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "NSRecord",
    namespaced,
    doc = "NSRecord delegates a subdomain to authoritative nameservers. Used for subdomain delegation to different DNS providers or servers."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct NSRecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Subdomain to delegate. For the zone apex, use "@".
    pub name: String,

    /// Fully qualified domain name of the nameserver, ending with a dot.
    pub nameserver: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `SRVRecord` specifies the location of services.
///
/// The record name follows the format `_service._proto` (e.g., `_ldap._tcp`).
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "SRVRecord",
    namespaced,
    doc = "SRVRecord specifies the hostname and port of servers for specific services. The record name follows the format _service._proto (e.g., _ldap._tcp)."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct SRVRecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Service and protocol in the format `_service._proto`.
    pub name: String,

    /// Priority of the target host. Lower values are preferred.
    #[schemars(range(min = 0, max = 65535))]
    pub priority: i32,

    /// Relative weight for records with the same priority.
    #[schemars(range(min = 0, max = 65535))]
    pub weight: i32,

    /// TCP or UDP port where the service is available.
    #[schemars(range(min = 0, max = 65535))]
    pub port: i32,

    /// Fully qualified domain name of the target host, ending with a dot.
    pub target: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `PTRRecord` maps an address back to a hostname.
///
/// Used in reverse zones (e.g., `2.0.192.in-addr.arpa`) to resolve IP
/// addresses to names.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "PTRRecord",
    namespaced,
    doc = "PTRRecord maps an address back to a hostname in a reverse zone. The record name is the host part of the reversed address."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct PTRRecordSpec {
    /// Name of the `DNSZone` resource this record belongs to
    /// (typically a reverse zone).
    pub zone: String,

    /// Host part of the reversed address (e.g., "1" in
    /// `1.2.0.192.in-addr.arpa`).
    pub name: String,

    /// Fully qualified domain name this address points to, ending with a
    /// dot.
    pub ptrdname: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `CAARecord` specifies Certificate Authority Authorization.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "CAARecord",
    namespaced,
    doc = "CAARecord specifies which certificate authorities are authorized to issue certificates for a domain."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct CAARecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Record name within the zone. Use "@" for the zone apex.
    pub name: String,

    /// Flags byte. Use 0 for non-critical, 128 for critical.
    #[schemars(range(min = 0, max = 255))]
    pub flags: i32,

    /// Property tag: "issue", "issuewild", or "iodef".
    pub tag: String,

    /// Property value; for "issue" the CA domain (e.g., "letsencrypt.org").
    pub value: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}

/// `NAPTRRecord` holds a naming authority pointer (RFC 3403).
///
/// Used for service discovery chains such as ENUM and SIP, rewriting a
/// domain name via an ordered list of regular-expression rules.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "bindkeeper.io",
    version = "v1alpha1",
    kind = "NAPTRRecord",
    namespaced,
    doc = "NAPTRRecord holds a naming authority pointer used for service discovery chains such as ENUM and SIP."
)]
#[kube(status = "RecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct NAPTRRecordSpec {
    /// Name of the `DNSZone` resource this record belongs to.
    pub zone: String,

    /// Record name within the zone.
    pub name: String,

    /// Processing order; lower values are evaluated first.
    #[schemars(range(min = 0, max = 65535))]
    pub order: i32,

    /// Preference among records with the same order.
    #[schemars(range(min = 0, max = 65535))]
    pub preference: i32,

    /// Flags controlling rewrite interpretation (e.g., "S", "A", "U").
    pub flags: String,

    /// Service parameters (e.g., "E2U+sip").
    pub service: String,

    /// Substitution expression applied to the original string.
    pub regexp: String,

    /// Replacement domain name; "." when `regexp` is used instead.
    pub replacement: String,

    /// Time To Live in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl: Option<i32>,
}
