#[cfg(test)]
mod tests {
    use crate::crd::*;

    #[test]
    fn test_soa_record_defaults() {
        let soa = SOARecord::default();
        assert!(soa.primary_ns.is_none());
        assert!(soa.admin_email.is_none());
        assert!(soa.serial.is_none());
        assert!(soa.refresh.is_none());
    }

    #[test]
    fn test_soa_record_wire_format() {
        let soa = SOARecord {
            primary_ns: Some("ns1.example.com.".into()),
            admin_email: Some("admin@example.com".into()),
            serial: Some(2024010101),
            negative_ttl: Some(86400),
            ..SOARecord::default()
        };

        let json = serde_json::to_value(&soa).unwrap();
        assert_eq!(json["primaryNS"], "ns1.example.com.");
        assert_eq!(json["adminEmail"], "admin@example.com");
        assert_eq!(json["serial"], 2024010101);
        assert_eq!(json["negativeTTL"], 86400);
    }

    #[test]
    fn test_dnszone_spec_deserializes_camel_case() {
        let spec: DNSZoneSpec = serde_json::from_value(serde_json::json!({
            "zoneName": "example.com",
            "bind9InstanceRef": "primary",
            "ttl": 3600,
            "soaRecord": {
                "primaryNS": "ns1.example.com.",
                "serial": 2024010101
            }
        }))
        .unwrap();

        assert_eq!(spec.zone_name, "example.com");
        assert_eq!(spec.bind9_instance_ref.as_deref(), Some("primary"));
        assert_eq!(spec.soa_record.serial, Some(2024010101));
    }

    #[test]
    fn test_dnszone_spec_instance_ref_optional() {
        let spec: DNSZoneSpec = serde_json::from_value(serde_json::json!({
            "zoneName": "example.com"
        }))
        .unwrap();

        assert!(spec.bind9_instance_ref.is_none());
        assert!(spec.ttl.is_none());
        assert!(spec.soa_record.primary_ns.is_none());
    }

    #[test]
    fn test_instance_spec_deserializes_config() {
        let spec: Bind9InstanceSpec = serde_json::from_value(serde_json::json!({
            "replicas": 2,
            "config": {
                "recursion": false,
                "allowQuery": ["any"],
                "allowTransfer": ["none"],
                "dnssec": { "enabled": true }
            }
        }))
        .unwrap();

        let config = spec.config.unwrap();
        assert_eq!(spec.replicas, Some(2));
        assert_eq!(config.recursion, Some(false));
        assert_eq!(config.allow_query.as_deref(), Some(&["any".to_string()][..]));
        assert_eq!(config.dnssec.unwrap().enabled, Some(true));
    }

    #[test]
    fn test_a_record_spec_wire_format() {
        let spec: ARecordSpec = serde_json::from_value(serde_json::json!({
            "zone": "example-com",
            "name": "www",
            "ipv4Address": "192.0.2.1",
            "ttl": 300
        }))
        .unwrap();

        assert_eq!(spec.zone, "example-com");
        assert_eq!(spec.ipv4_address, "192.0.2.1");
        assert_eq!(spec.ttl, Some(300));
    }

    #[test]
    fn test_mx_record_spec_wire_format() {
        let spec: MXRecordSpec = serde_json::from_value(serde_json::json!({
            "zone": "example-com",
            "name": "@",
            "priority": 10,
            "mailServer": "mail.example.com."
        }))
        .unwrap();

        assert_eq!(spec.priority, 10);
        assert_eq!(spec.mail_server, "mail.example.com.");
        assert!(spec.ttl.is_none());
    }

    #[test]
    fn test_naptr_record_spec_fields() {
        let spec: NAPTRRecordSpec = serde_json::from_value(serde_json::json!({
            "zone": "e164-arpa",
            "name": "@",
            "order": 100,
            "preference": 10,
            "flags": "S",
            "service": "E2U+sip",
            "regexp": "!^.*$!sip:info@example.com!",
            "replacement": "."
        }))
        .unwrap();

        assert_eq!(spec.order, 100);
        assert_eq!(spec.flags, "S");
        assert_eq!(spec.replacement, ".");
    }

    #[test]
    fn test_record_status_default_is_empty() {
        let status = RecordStatus::default();
        assert!(status.phase.is_none());
        assert!(status.record_type.is_none());
        assert!(status.last_updated.is_none());
    }

    #[test]
    fn test_instance_status_skips_empty_services() {
        let status = Bind9InstanceStatus {
            phase: Some("Ready".into()),
            ..Bind9InstanceStatus::default()
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["phase"], "Ready");
        assert!(json.get("services").is_none());
    }
}
