// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Kubernetes resource builders for BIND9 instances and zones.
//!
//! This module provides functions to build Kubernetes resources (`StatefulSet`,
//! `ConfigMap`, `Service`) derived from `Bind9Instance` and `DNSZone`
//! resources. All functions are pure and easily testable; the reconcilers
//! apply what these builders return.

use crate::bind9_config::synthesize_instance_config;
use crate::constants::{
    API_GROUP_VERSION, BIND_CONFIG_MOUNT_PATH, BIND_ZONES_MOUNT_PATH, CONFIG_SUFFIX,
    CONTAINER_NAME_BIND9, DEFAULT_BIND9_IMAGE, DNS_PORT, DNS_SERVICE_SUFFIX,
    HEADLESS_SERVICE_SUFFIX, KIND_BIND9_INSTANCE, KIND_DNS_ZONE, LIVENESS_FAILURE_THRESHOLD,
    LIVENESS_INITIAL_DELAY_SECS, LIVENESS_PERIOD_SECS, LIVENESS_TIMEOUT_SECS, NAMED_CONF_KEY,
    READINESS_FAILURE_THRESHOLD, READINESS_INITIAL_DELAY_SECS, READINESS_PERIOD_SECS,
    READINESS_TIMEOUT_SECS, RECORD_ENTRY_KEY_PREFIX, WORKLOAD_SUFFIX, ZONES_SUFFIX,
    ZONE_DB_KEY_PREFIX, ZONE_FILE_SUFFIX,
};
use crate::crd::{Bind9Instance, DNSZone};
use crate::labels::{
    APP_NAME_BIND9, COMPONENT_DNS_SERVER, INSTANCE_LABEL, K8S_COMPONENT, K8S_INSTANCE,
    K8S_MANAGED_BY, K8S_NAME, MANAGED_BY_BINDKEEPER, ZONE_LABEL,
};
use k8s_openapi::api::{
    apps::v1::{StatefulSet, StatefulSetSpec},
    core::v1::{
        ConfigMap, ConfigMapVolumeSource, Container, ContainerPort, PodSpec, PodTemplateSpec,
        Probe, Service, ServicePort, ServiceSpec, TCPSocketAction, Volume, VolumeMount,
    },
};
use k8s_openapi::apimachinery::pkg::{
    apis::meta::v1::{LabelSelector, ObjectMeta, OwnerReference},
    util::intstr::IntOrString,
};
use kube::ResourceExt;
use std::collections::BTreeMap;
use tracing::debug;

// Volume names inside the workload pod
const VOLUME_CONFIG: &str = "config";
const VOLUME_ZONES: &str = "zones";

// ============================================================================
// Derived artifact names
// ============================================================================

/// Name of the configuration `ConfigMap` for an instance (`<instance>-config`).
#[must_use]
pub fn config_map_name(instance_name: &str) -> String {
    format!("{instance_name}-{CONFIG_SUFFIX}")
}

/// Name of the aggregated zones `ConfigMap` for an instance (`<instance>-zones`).
#[must_use]
pub fn zones_config_map_name(instance_name: &str) -> String {
    format!("{instance_name}-{ZONES_SUFFIX}")
}

/// Name of the per-zone `ConfigMap` holding a zone's file and record
/// entries (`<zone>-zone`, keyed by the `DNSZone` resource name).
#[must_use]
pub fn zone_config_map_name(zone_resource_name: &str) -> String {
    format!("{zone_resource_name}-{ZONE_FILE_SUFFIX}")
}

/// Name of the `StatefulSet` running BIND9 for an instance (`<instance>-bind9`).
#[must_use]
pub fn workload_name(instance_name: &str) -> String {
    format!("{instance_name}-{WORKLOAD_SUFFIX}")
}

/// Name of the client-facing DNS `Service` (`<instance>-dns`).
#[must_use]
pub fn dns_service_name(instance_name: &str) -> String {
    format!("{instance_name}-{DNS_SERVICE_SUFFIX}")
}

/// Name of the headless `Service` governing the `StatefulSet`
/// (`<instance>-headless`).
#[must_use]
pub fn headless_service_name(instance_name: &str) -> String {
    format!("{instance_name}-{HEADLESS_SERVICE_SUFFIX}")
}

/// Data key for a rendered zone file inside a zone `ConfigMap` (`db.<zone>`).
#[must_use]
pub fn zone_db_key(zone_name: &str) -> String {
    format!("{ZONE_DB_KEY_PREFIX}{zone_name}")
}

/// Data key for a single record entry inside a zone `ConfigMap`
/// (`record.<resource-name>`).
#[must_use]
pub fn record_entry_key(resource_name: &str) -> String {
    format!("{RECORD_ENTRY_KEY_PREFIX}{resource_name}")
}

// ============================================================================
// Labels and ownership
// ============================================================================

/// Builds standardized Kubernetes labels for resources derived from a
/// `Bind9Instance`.
///
/// The same map is used as the workload selector, so every entry must be
/// constant for the lifetime of the instance.
#[must_use]
pub fn build_labels(instance_name: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert("app".into(), workload_name(instance_name));
    labels.insert("instance".into(), instance_name.into());
    labels.insert(K8S_NAME.into(), APP_NAME_BIND9.into());
    labels.insert(K8S_INSTANCE.into(), instance_name.into());
    labels.insert(K8S_COMPONENT.into(), COMPONENT_DNS_SERVER.into());
    labels.insert(K8S_MANAGED_BY.into(), MANAGED_BY_BINDKEEPER.into());
    labels
}

/// Builds labels for a per-zone `ConfigMap`.
///
/// The `bindkeeper.io/instance` label is how the instance reconciler finds
/// the zone `ConfigMap`s to aggregate, so it must always carry the resolved
/// instance reference.
#[must_use]
pub fn build_zone_labels(zone: &DNSZone) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(K8S_MANAGED_BY.into(), MANAGED_BY_BINDKEEPER.into());
    labels.insert(INSTANCE_LABEL.into(), zone.spec.instance_ref().into());
    labels.insert(ZONE_LABEL.into(), zone.spec.zone_name.clone());
    labels
}

/// Builds owner references for a resource owned by a `Bind9Instance`.
///
/// Sets up cascade deletion so that when the `Bind9Instance` is deleted,
/// all its derived resources are garbage collected with it.
#[must_use]
pub fn build_instance_owner_references(instance: &Bind9Instance) -> Vec<OwnerReference> {
    vec![OwnerReference {
        api_version: API_GROUP_VERSION.to_string(),
        kind: KIND_BIND9_INSTANCE.to_string(),
        name: instance.name_any(),
        uid: instance.metadata.uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }]
}

/// Builds owner references for a resource owned by a `DNSZone`.
///
/// The per-zone `ConfigMap` is owned by its zone so that deleting the zone
/// removes the zone file, and so that `ConfigMap` changes (record entries
/// landing) trigger the zone reconciler through the `owns` relation.
#[must_use]
pub fn build_zone_owner_references(zone: &DNSZone) -> Vec<OwnerReference> {
    vec![OwnerReference {
        api_version: API_GROUP_VERSION.to_string(),
        kind: KIND_DNS_ZONE.to_string(),
        name: zone.name_any(),
        uid: zone.metadata.uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }]
}

// ============================================================================
// ConfigMaps
// ============================================================================

/// Builds the `ConfigMap` holding the rendered `named.conf` for an instance.
#[must_use]
pub fn build_instance_configmap(
    name: &str,
    namespace: &str,
    instance: &Bind9Instance,
) -> ConfigMap {
    debug!(
        name = %name,
        namespace = %namespace,
        "Building config ConfigMap for Bind9Instance"
    );

    let instance_name = instance.name_any();
    let named_conf = synthesize_instance_config(&instance_name, &instance.spec);

    let mut data = BTreeMap::new();
    data.insert(NAMED_CONF_KEY.to_string(), named_conf);

    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.into()),
            namespace: Some(namespace.into()),
            labels: Some(build_labels(&instance_name)),
            owner_references: Some(build_instance_owner_references(instance)),
            ..Default::default()
        },
        data: Some(data),
        ..Default::default()
    }
}

/// Builds the aggregated zones `ConfigMap` mounted by the workload at
/// `/etc/bind/zones`.
///
/// The caller assembles `data` from the per-zone `ConfigMap`s: a
/// `zones.conf` entry with one stanza per served zone, plus one `db.<zone>`
/// entry per zone.
#[must_use]
pub fn build_zones_configmap(
    name: &str,
    namespace: &str,
    instance: &Bind9Instance,
    data: BTreeMap<String, String>,
) -> ConfigMap {
    debug!(
        name = %name,
        namespace = %namespace,
        entries = data.len(),
        "Building zones ConfigMap for Bind9Instance"
    );

    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.into()),
            namespace: Some(namespace.into()),
            labels: Some(build_labels(&instance.name_any())),
            owner_references: Some(build_instance_owner_references(instance)),
            ..Default::default()
        },
        data: Some(data),
        ..Default::default()
    }
}

/// Builds the per-zone `ConfigMap` holding the rendered zone file and the
/// record entries contributed by record resources.
///
/// `data` carries the `db.<zone>` key and any `record.<name>` keys the
/// caller preserved from the live object.
#[must_use]
pub fn build_zone_configmap(
    name: &str,
    namespace: &str,
    zone: &DNSZone,
    data: BTreeMap<String, String>,
) -> ConfigMap {
    debug!(
        name = %name,
        namespace = %namespace,
        zone_name = %zone.spec.zone_name,
        "Building zone ConfigMap for DNSZone"
    );

    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.into()),
            namespace: Some(namespace.into()),
            labels: Some(build_zone_labels(zone)),
            owner_references: Some(build_zone_owner_references(zone)),
            ..Default::default()
        },
        data: Some(data),
        ..Default::default()
    }
}

// ============================================================================
// Workload
// ============================================================================

/// Builds the `StatefulSet` running BIND9 for an instance.
///
/// The pod mounts the config `ConfigMap` at `/etc/bind` and the zones
/// `ConfigMap` at `/etc/bind/zones`, both read-only, and exposes port 53
/// over TCP and UDP. TCP probes on the DNS port gate liveness and
/// readiness.
#[must_use]
pub fn build_stateful_set(name: &str, namespace: &str, instance: &Bind9Instance) -> StatefulSet {
    let instance_name = instance.name_any();
    let labels = build_labels(&instance_name);
    let replicas = instance.spec.replicas.unwrap_or(1);
    let image = instance
        .spec
        .version
        .clone()
        .unwrap_or_else(|| DEFAULT_BIND9_IMAGE.to_string());

    debug!(
        name = %name,
        namespace = %namespace,
        replicas,
        image = %image,
        "Building StatefulSet for Bind9Instance"
    );

    let bind9_container = Container {
        name: CONTAINER_NAME_BIND9.into(),
        image: Some(image),
        image_pull_policy: Some("IfNotPresent".into()),
        command: Some(vec!["named".into()]),
        args: Some(vec![
            "-c".into(),
            format!("{BIND_CONFIG_MOUNT_PATH}/{NAMED_CONF_KEY}"),
            "-g".into(), // Run in foreground (required for containers)
            "-u".into(),
            "bind".into(),
        ]),
        ports: Some(vec![
            ContainerPort {
                name: Some("dns-udp".into()),
                container_port: i32::from(DNS_PORT),
                protocol: Some("UDP".into()),
                ..Default::default()
            },
            ContainerPort {
                name: Some("dns-tcp".into()),
                container_port: i32::from(DNS_PORT),
                protocol: Some("TCP".into()),
                ..Default::default()
            },
        ]),
        volume_mounts: Some(vec![
            VolumeMount {
                name: VOLUME_CONFIG.into(),
                mount_path: BIND_CONFIG_MOUNT_PATH.into(),
                read_only: Some(true),
                ..Default::default()
            },
            VolumeMount {
                name: VOLUME_ZONES.into(),
                mount_path: BIND_ZONES_MOUNT_PATH.into(),
                read_only: Some(true),
                ..Default::default()
            },
        ]),
        liveness_probe: Some(Probe {
            tcp_socket: Some(TCPSocketAction {
                port: IntOrString::Int(i32::from(DNS_PORT)),
                ..Default::default()
            }),
            initial_delay_seconds: Some(LIVENESS_INITIAL_DELAY_SECS),
            period_seconds: Some(LIVENESS_PERIOD_SECS),
            timeout_seconds: Some(LIVENESS_TIMEOUT_SECS),
            failure_threshold: Some(LIVENESS_FAILURE_THRESHOLD),
            ..Default::default()
        }),
        readiness_probe: Some(Probe {
            tcp_socket: Some(TCPSocketAction {
                port: IntOrString::Int(i32::from(DNS_PORT)),
                ..Default::default()
            }),
            initial_delay_seconds: Some(READINESS_INITIAL_DELAY_SECS),
            period_seconds: Some(READINESS_PERIOD_SECS),
            timeout_seconds: Some(READINESS_TIMEOUT_SECS),
            failure_threshold: Some(READINESS_FAILURE_THRESHOLD),
            ..Default::default()
        }),
        ..Default::default()
    };

    StatefulSet {
        metadata: ObjectMeta {
            name: Some(name.into()),
            namespace: Some(namespace.into()),
            labels: Some(labels.clone()),
            owner_references: Some(build_instance_owner_references(instance)),
            ..Default::default()
        },
        spec: Some(StatefulSetSpec {
            service_name: Some(headless_service_name(&instance_name)),
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![bind9_container],
                    volumes: Some(vec![
                        Volume {
                            name: VOLUME_CONFIG.into(),
                            config_map: Some(ConfigMapVolumeSource {
                                name: config_map_name(&instance_name),
                                ..Default::default()
                            }),
                            ..Default::default()
                        },
                        Volume {
                            name: VOLUME_ZONES.into(),
                            config_map: Some(ConfigMapVolumeSource {
                                name: zones_config_map_name(&instance_name),
                                ..Default::default()
                            }),
                            ..Default::default()
                        },
                    ]),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

// ============================================================================
// Services
// ============================================================================

fn dns_service_ports() -> Vec<ServicePort> {
    vec![
        ServicePort {
            name: Some("dns-udp".into()),
            port: i32::from(DNS_PORT),
            target_port: Some(IntOrString::Int(i32::from(DNS_PORT))),
            protocol: Some("UDP".into()),
            ..Default::default()
        },
        ServicePort {
            name: Some("dns-tcp".into()),
            port: i32::from(DNS_PORT),
            target_port: Some(IntOrString::Int(i32::from(DNS_PORT))),
            protocol: Some("TCP".into()),
            ..Default::default()
        },
    ]
}

/// Builds the client-facing DNS `Service` (type `LoadBalancer`) for an
/// instance.
#[must_use]
pub fn build_dns_service(name: &str, namespace: &str, instance: &Bind9Instance) -> Service {
    let labels = build_labels(&instance.name_any());

    Service {
        metadata: ObjectMeta {
            name: Some(name.into()),
            namespace: Some(namespace.into()),
            labels: Some(labels.clone()),
            owner_references: Some(build_instance_owner_references(instance)),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(labels),
            ports: Some(dns_service_ports()),
            type_: Some("LoadBalancer".into()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Builds the headless `Service` governing the `StatefulSet`, giving each
/// replica a stable DNS identity.
#[must_use]
pub fn build_headless_service(name: &str, namespace: &str, instance: &Bind9Instance) -> Service {
    let labels = build_labels(&instance.name_any());

    Service {
        metadata: ObjectMeta {
            name: Some(name.into()),
            namespace: Some(namespace.into()),
            labels: Some(labels.clone()),
            owner_references: Some(build_instance_owner_references(instance)),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(labels),
            ports: Some(dns_service_ports()),
            cluster_ip: Some("None".into()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
