// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `resources`

#[cfg(test)]
mod tests {
    use crate::resources::{
        build_dns_service, build_headless_service, build_instance_configmap,
        build_instance_owner_references, build_labels, build_stateful_set, build_zone_configmap,
        build_zone_labels, build_zones_configmap, config_map_name, dns_service_name,
        headless_service_name, record_entry_key, workload_name, zone_config_map_name, zone_db_key,
        zones_config_map_name,
    };
    use crate::crd::{
        Bind9Config, Bind9Instance, Bind9InstanceSpec, DNSZone, DNSZoneSpec, SOARecord,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn create_test_instance(name: &str) -> Bind9Instance {
        Bind9Instance {
            metadata: ObjectMeta {
                name: Some(name.into()),
                namespace: Some("test-ns".into()),
                uid: Some("instance-uid-1234".into()),
                ..Default::default()
            },
            spec: Bind9InstanceSpec {
                replicas: Some(2),
                version: None,
                config: Some(Bind9Config {
                    allow_query: Some(vec!["any".into()]),
                    allow_transfer: Some(vec!["none".into()]),
                    recursion: Some(false),
                    dnssec: None,
                }),
            },
            status: None,
        }
    }

    fn create_test_zone(name: &str, zone_name: &str) -> DNSZone {
        DNSZone {
            metadata: ObjectMeta {
                name: Some(name.into()),
                namespace: Some("test-ns".into()),
                uid: Some("zone-uid-5678".into()),
                ..Default::default()
            },
            spec: DNSZoneSpec {
                zone_name: zone_name.into(),
                bind9_instance_ref: Some("default".into()),
                soa_record: SOARecord::default(),
                ttl: None,
            },
            status: None,
        }
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(config_map_name("test-instance"), "test-instance-config");
        assert_eq!(zones_config_map_name("test-instance"), "test-instance-zones");
        assert_eq!(zone_config_map_name("example-com"), "example-com-zone");
        assert_eq!(workload_name("test-instance"), "test-instance-bind9");
        assert_eq!(dns_service_name("test-instance"), "test-instance-dns");
        assert_eq!(
            headless_service_name("test-instance"),
            "test-instance-headless"
        );
        assert_eq!(zone_db_key("example.com"), "db.example.com");
        assert_eq!(record_entry_key("www-example-com"), "record.www-example-com");
    }

    #[test]
    fn test_build_labels() {
        let labels = build_labels("test-instance");
        assert_eq!(labels.get("app").unwrap(), "test-instance-bind9");
        assert_eq!(labels.get("instance").unwrap(), "test-instance");
        assert_eq!(labels.get("app.kubernetes.io/name").unwrap(), "bind9");
        assert_eq!(
            labels.get("app.kubernetes.io/managed-by").unwrap(),
            "bindkeeper"
        );
    }

    #[test]
    fn test_build_zone_labels_carries_instance_ref() {
        let zone = create_test_zone("example-com", "example.com");
        let labels = build_zone_labels(&zone);
        assert_eq!(labels.get("bindkeeper.io/instance").unwrap(), "default");
        assert_eq!(labels.get("bindkeeper.io/zone").unwrap(), "example.com");
    }

    #[test]
    fn test_build_zone_labels_defaults_instance_ref() {
        let mut zone = create_test_zone("example-com", "example.com");
        zone.spec.bind9_instance_ref = None;
        let labels = build_zone_labels(&zone);
        assert_eq!(labels.get("bindkeeper.io/instance").unwrap(), "default");
    }

    #[test]
    fn test_build_instance_owner_references() {
        let instance = create_test_instance("test-instance");
        let refs = build_instance_owner_references(&instance);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].api_version, "bindkeeper.io/v1alpha1");
        assert_eq!(refs[0].kind, "Bind9Instance");
        assert_eq!(refs[0].name, "test-instance");
        assert_eq!(refs[0].uid, "instance-uid-1234");
        assert_eq!(refs[0].controller, Some(true));
        assert_eq!(refs[0].block_owner_deletion, Some(true));
    }

    #[test]
    fn test_build_instance_configmap_renders_named_conf() {
        let instance = create_test_instance("test-instance");
        let cm = build_instance_configmap("test-instance-config", "test-ns", &instance);

        assert_eq!(
            cm.metadata.name.as_deref(),
            Some("test-instance-config"),
            "ConfigMap should use the derived name"
        );
        let data = cm.data.unwrap();
        let named_conf = data.get("named.conf").unwrap();
        assert!(named_conf.contains("test-instance"));
        assert!(named_conf.contains("recursion no"));
        assert!(named_conf.contains("allow-query"));
    }

    #[test]
    fn test_build_zones_configmap_carries_data() {
        let instance = create_test_instance("test-instance");
        let mut data = BTreeMap::new();
        data.insert("zones.conf".to_string(), "zone \"example.com\"".to_string());
        data.insert("db.example.com".to_string(), "$ORIGIN".to_string());

        let cm = build_zones_configmap("test-instance-zones", "test-ns", &instance, data);

        let data = cm.data.unwrap();
        assert!(data.contains_key("zones.conf"));
        assert!(data.contains_key("db.example.com"));
        let owner = &cm.metadata.owner_references.unwrap()[0];
        assert_eq!(owner.kind, "Bind9Instance");
    }

    #[test]
    fn test_build_zone_configmap_owned_by_zone() {
        let zone = create_test_zone("example-com", "example.com");
        let mut data = BTreeMap::new();
        data.insert("db.example.com".to_string(), "$ORIGIN".to_string());

        let cm = build_zone_configmap("example-com-zone", "test-ns", &zone, data);

        let owner = &cm.metadata.owner_references.unwrap()[0];
        assert_eq!(owner.kind, "DNSZone");
        assert_eq!(owner.name, "example-com");
        assert_eq!(owner.uid, "zone-uid-5678");
        let labels = cm.metadata.labels.unwrap();
        assert_eq!(labels.get("bindkeeper.io/instance").unwrap(), "default");
    }

    #[test]
    fn test_build_stateful_set_shape() {
        let instance = create_test_instance("test-instance");
        let sts = build_stateful_set("test-instance-bind9", "test-ns", &instance);

        assert_eq!(sts.metadata.name.as_deref(), Some("test-instance-bind9"));
        let spec = sts.spec.unwrap();
        assert_eq!(spec.replicas, Some(2));
        assert_eq!(spec.service_name.as_deref(), Some("test-instance-headless"));

        let pod_spec = spec.template.spec.unwrap();
        let container = &pod_spec.containers[0];
        assert_eq!(container.name, "bind9");
        assert_eq!(
            container.image.as_deref(),
            Some("internetsystemsconsortium/bind9:9.18"),
            "Image should fall back to the default when version is unset"
        );

        let ports = container.ports.as_ref().unwrap();
        assert!(ports
            .iter()
            .any(|p| p.container_port == 53 && p.protocol.as_deref() == Some("UDP")));
        assert!(ports
            .iter()
            .any(|p| p.container_port == 53 && p.protocol.as_deref() == Some("TCP")));

        let mounts = container.volume_mounts.as_ref().unwrap();
        assert!(mounts
            .iter()
            .any(|m| m.mount_path == "/etc/bind" && m.read_only == Some(true)));
        assert!(mounts.iter().any(|m| m.mount_path == "/etc/bind/zones"));

        let volumes = pod_spec.volumes.unwrap();
        let config_volume = volumes.iter().find(|v| v.name == "config").unwrap();
        assert_eq!(
            config_volume.config_map.as_ref().unwrap().name,
            "test-instance-config"
        );
        let zones_volume = volumes.iter().find(|v| v.name == "zones").unwrap();
        assert_eq!(
            zones_volume.config_map.as_ref().unwrap().name,
            "test-instance-zones"
        );
    }

    #[test]
    fn test_build_stateful_set_custom_image() {
        let mut instance = create_test_instance("test-instance");
        instance.spec.version = Some("internetsystemsconsortium/bind9:9.20".into());
        let sts = build_stateful_set("test-instance-bind9", "test-ns", &instance);

        let container = &sts.spec.unwrap().template.spec.unwrap().containers[0];
        assert_eq!(
            container.image.as_deref(),
            Some("internetsystemsconsortium/bind9:9.20")
        );
    }

    #[test]
    fn test_build_stateful_set_selector_matches_pod_labels() {
        let instance = create_test_instance("test-instance");
        let sts = build_stateful_set("test-instance-bind9", "test-ns", &instance);

        let spec = sts.spec.unwrap();
        let selector = spec.selector.match_labels.unwrap();
        let pod_labels = spec.template.metadata.unwrap().labels.unwrap();
        assert_eq!(selector, pod_labels);
    }

    #[test]
    fn test_build_dns_service_is_load_balancer() {
        let instance = create_test_instance("test-instance");
        let svc = build_dns_service("test-instance-dns", "test-ns", &instance);

        let spec = svc.spec.unwrap();
        assert_eq!(spec.type_.as_deref(), Some("LoadBalancer"));
        let ports = spec.ports.unwrap();
        assert_eq!(ports.len(), 2);
        assert!(ports.iter().all(|p| p.port == 53));

        let selector = spec.selector.unwrap();
        assert_eq!(selector.get("instance").unwrap(), "test-instance");
    }

    #[test]
    fn test_build_headless_service_has_no_cluster_ip() {
        let instance = create_test_instance("test-instance");
        let svc = build_headless_service("test-instance-headless", "test-ns", &instance);

        let spec = svc.spec.unwrap();
        assert_eq!(spec.cluster_ip.as_deref(), Some("None"));
    }
}
