// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for status builders and change gating.

#[cfg(test)]
mod tests {
    use crate::crd::{
        Bind9Instance, Bind9InstanceSpec, DNSZone, DNSZoneSpec, RecordStatus, SOARecord,
    };
    use crate::errors::Error;
    use crate::reconcilers::status::{
        instance_failed_status, instance_ready_status, record_active_status,
        record_failed_status, record_status_changed, zone_active_status, zone_failed_status,
        PHASE_ACTIVE, PHASE_FAILED, PHASE_READY,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn test_instance() -> Bind9Instance {
        Bind9Instance {
            metadata: ObjectMeta {
                name: Some("primary".into()),
                namespace: Some("dns-system".into()),
                generation: Some(3),
                ..Default::default()
            },
            spec: Bind9InstanceSpec {
                replicas: Some(2),
                version: None,
                config: None,
            },
            status: None,
        }
    }

    fn test_zone() -> DNSZone {
        DNSZone {
            metadata: ObjectMeta {
                name: Some("example-com".into()),
                namespace: Some("dns-system".into()),
                generation: Some(1),
                ..Default::default()
            },
            spec: DNSZoneSpec {
                zone_name: "example.com".into(),
                bind9_instance_ref: None,
                soa_record: SOARecord::default(),
                ttl: None,
            },
            status: None,
        }
    }

    #[test]
    fn test_instance_ready_status_records_artifact_names() {
        let status = instance_ready_status(&test_instance());

        assert_eq!(status.phase.as_deref(), Some(PHASE_READY));
        assert_eq!(status.config_map.as_deref(), Some("primary-config"));
        assert_eq!(status.stateful_set.as_deref(), Some("primary-bind9"));
        assert_eq!(
            status.services,
            vec!["primary-dns".to_string(), "primary-headless".to_string()]
        );
        assert_eq!(status.observed_generation, Some(3));
    }

    #[test]
    fn test_instance_failed_status_keeps_artifacts_unset() {
        let err = Error::ReferenceNotFound {
            kind: "DNSZone",
            name: "missing".into(),
            namespace: "dns-system".into(),
        };
        let status = instance_failed_status(&test_instance(), &err);

        assert_eq!(status.phase.as_deref(), Some(PHASE_FAILED));
        assert!(status.message.unwrap().contains("missing"));
        // Unset fields are skipped by the merge patch, preserving the
        // names recorded by the last successful pass.
        assert!(status.config_map.is_none());
        assert!(status.stateful_set.is_none());
        assert!(status.services.is_empty());
    }

    #[test]
    fn test_zone_active_status_mirrors_serial_and_name() {
        let status = zone_active_status(&test_zone(), 2024_01_01_01);

        assert_eq!(status.phase.as_deref(), Some(PHASE_ACTIVE));
        assert_eq!(status.serial, Some(2024_01_01_01));
        assert_eq!(status.zone_name.as_deref(), Some("example.com"));
        assert!(status.message.is_none());
    }

    #[test]
    fn test_zone_failed_status_carries_error_text() {
        let err = Error::MissingNamespace {
            kind: "DNSZone",
            name: "example-com".into(),
        };
        let status = zone_failed_status(&test_zone(), &err);

        assert_eq!(status.phase.as_deref(), Some(PHASE_FAILED));
        assert!(status.serial.is_none());
        assert!(status.message.unwrap().contains("has no namespace"));
    }

    #[test]
    fn test_record_active_status_sets_timestamp() {
        let status = record_active_status("A", Some(2));

        assert_eq!(status.phase.as_deref(), Some(PHASE_ACTIVE));
        assert_eq!(status.record_type.as_deref(), Some("A"));
        assert!(status.last_updated.is_some());
        assert_eq!(status.observed_generation, Some(2));
    }

    #[test]
    fn test_record_failed_status_carries_reason() {
        let err = Error::InvalidRecord {
            record_type: "A",
            name: "www".into(),
            reason: "Invalid IPv4 address: 999.999.999.999".into(),
        };
        let status = record_failed_status("A", &err, None);

        assert_eq!(status.phase.as_deref(), Some(PHASE_FAILED));
        assert!(status.message.unwrap().contains("999.999.999.999"));
    }

    #[test]
    fn test_record_status_changed_ignores_timestamp() {
        let current = RecordStatus {
            phase: Some(PHASE_ACTIVE.into()),
            record_type: Some("A".into()),
            message: None,
            last_updated: Some("2024-01-01T00:00:00+00:00".into()),
            observed_generation: Some(1),
        };
        let desired = record_active_status("A", Some(1));

        // Same content, newer timestamp: no patch, or converged records
        // would be re-patched (and re-reconciled) forever.
        assert!(!record_status_changed(Some(&current), &desired));
    }

    #[test]
    fn test_record_status_changed_detects_phase_flip() {
        let current = RecordStatus {
            phase: Some(PHASE_FAILED.into()),
            record_type: Some("A".into()),
            message: Some("invalid A record 'www': bad address".into()),
            last_updated: None,
            observed_generation: Some(1),
        };
        let desired = record_active_status("A", Some(1));

        assert!(record_status_changed(Some(&current), &desired));
    }

    #[test]
    fn test_record_status_changed_detects_generation_advance() {
        let current = record_active_status("A", Some(1));
        let desired = record_active_status("A", Some(2));

        assert!(record_status_changed(Some(&current), &desired));
    }

    #[test]
    fn test_record_status_changed_when_no_current_status() {
        let desired = record_active_status("TXT", None);
        assert!(record_status_changed(None, &desired));
    }
}
