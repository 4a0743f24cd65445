// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the pure parts of the `Bind9Instance` reconciler:
//! zone aggregation and the workload replace-vs-patch decision.

#[cfg(test)]
mod tests {
    use crate::crd::{Bind9Instance, Bind9InstanceSpec};
    use crate::reconcilers::instance::{aggregate_zone_data, workload_needs_replace};
    use crate::resources::build_stateful_set;
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn zone_configmap(name: &str, data: &[(&str, &str)]) -> ConfigMap {
        ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("dns-system".to_string()),
                ..Default::default()
            },
            data: Some(
                data.iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn test_instance(replicas: Option<i32>, version: Option<&str>) -> Bind9Instance {
        Bind9Instance::new(
            "primary",
            Bind9InstanceSpec {
                replicas,
                version: version.map(String::from),
                config: None,
            },
        )
    }

    #[test]
    fn test_aggregate_zone_data_merges_db_keys_and_stanzas() {
        let zones = vec![
            zone_configmap(
                "example-org-zone",
                &[
                    ("db.example.org", "org zone file"),
                    ("record.www", "www IN A 192.0.2.2"),
                ],
            ),
            zone_configmap("example-com-zone", &[("db.example.com", "com zone file")]),
        ];

        let data = aggregate_zone_data(&zones);

        assert_eq!(
            data.get("db.example.com").map(String::as_str),
            Some("com zone file")
        );
        assert_eq!(
            data.get("db.example.org").map(String::as_str),
            Some("org zone file")
        );
        assert!(
            !data.contains_key("record.www"),
            "per-record entries stay in the zone ConfigMap"
        );

        let zones_conf = data.get("zones.conf").expect("zones.conf present");
        assert!(zones_conf.contains("zone \"example.com\""));
        assert!(zones_conf.contains("zone \"example.org\""));
        assert!(zones_conf.contains("type master;"));

        let com = zones_conf.find("example.com").expect("com stanza");
        let org = zones_conf.find("example.org").expect("org stanza");
        assert!(com < org, "stanzas follow the sorted db key order");
    }

    #[test]
    fn test_aggregate_zone_data_with_no_zones() {
        let data = aggregate_zone_data(&[]);

        // named.conf includes zones.conf unconditionally, so the key must
        // exist even when the instance serves no zones yet.
        assert_eq!(data.get("zones.conf").map(String::as_str), Some(""));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_aggregate_zone_data_skips_dataless_configmap() {
        let empty = ConfigMap {
            metadata: ObjectMeta {
                name: Some("empty-zone".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let data = aggregate_zone_data(&[empty]);
        assert_eq!(data.len(), 1, "only zones.conf for a dataless ConfigMap");
    }

    #[test]
    fn test_workload_replace_on_replica_change() {
        let existing = build_stateful_set("primary-bind9", "dns-system", &test_instance(Some(1), None));
        let desired = build_stateful_set("primary-bind9", "dns-system", &test_instance(Some(2), None));

        assert!(
            workload_needs_replace(&existing, &desired),
            "replica change must replace the StatefulSet"
        );
    }

    #[test]
    fn test_workload_replace_on_image_change() {
        let existing = build_stateful_set("primary-bind9", "dns-system", &test_instance(None, None));
        let desired = build_stateful_set(
            "primary-bind9",
            "dns-system",
            &test_instance(None, Some("internetsystemsconsortium/bind9:9.20")),
        );

        assert!(
            workload_needs_replace(&existing, &desired),
            "image change must replace the StatefulSet"
        );
    }

    #[test]
    fn test_workload_patch_when_shape_unchanged() {
        let existing = build_stateful_set("primary-bind9", "dns-system", &test_instance(Some(2), None));
        let desired = build_stateful_set("primary-bind9", "dns-system", &test_instance(Some(2), None));

        assert!(
            !workload_needs_replace(&existing, &desired),
            "identical shape is patched in place"
        );
    }
}
