// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the pure parts of the `DNSZone` reconciler: serial
//! resolution and zone `ConfigMap` data rendering.

#[cfg(test)]
mod tests {
    use crate::bind9_config::SerialPolicy;
    use crate::crd::{DNSZoneSpec, SOARecord};
    use crate::reconcilers::zone::{record_entries, render_zone_data, resolve_serial};
    use std::collections::BTreeMap;

    fn test_spec(serial: Option<i64>) -> DNSZoneSpec {
        DNSZoneSpec {
            zone_name: "example.com".into(),
            bind9_instance_ref: Some("primary".into()),
            soa_record: SOARecord {
                serial,
                ..SOARecord::default()
            },
            ttl: None,
        }
    }

    #[test]
    fn test_resolve_serial_prefers_spec_value() {
        let spec = test_spec(Some(2_024_010_199));
        let serial = resolve_serial(&spec, &SerialPolicy::Fixed(1));
        assert_eq!(serial, 2_024_010_199, "explicit spec serial must win");
    }

    #[test]
    fn test_resolve_serial_falls_back_to_policy() {
        let spec = test_spec(None);
        let serial = resolve_serial(&spec, &SerialPolicy::Fixed(42));
        assert_eq!(serial, 42);
    }

    #[test]
    fn test_date_encoded_serial_shape() {
        let serial = SerialPolicy::DateEncoded.generate().to_string();
        assert_eq!(serial.len(), 10, "YYYYMMDD01 is ten digits");
        assert!(serial.ends_with("01"), "date-encoded serials end in 01");
    }

    #[test]
    fn test_render_zone_data_inserts_db_key_and_keeps_entries() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "record.www".to_string(),
            "www 300 IN A 192.0.2.1".to_string(),
        );
        entries.insert(
            "record.mail".to_string(),
            "@ IN MX 10 mail.example.com.".to_string(),
        );

        let data = render_zone_data(&test_spec(Some(1)), 1, entries);

        assert!(data.contains_key("db.example.com"));
        assert_eq!(
            data.get("record.www").map(String::as_str),
            Some("www 300 IN A 192.0.2.1"),
            "record entries must survive rendering untouched"
        );
        assert_eq!(data.len(), 3, "db key plus the two record entries");
    }

    #[test]
    fn test_render_zone_data_composes_header_and_sorted_lines() {
        let mut entries = BTreeMap::new();
        entries.insert("record.beta".to_string(), "beta IN A 192.0.2.2".to_string());
        entries.insert(
            "record.alpha".to_string(),
            "alpha IN A 192.0.2.1".to_string(),
        );

        let data = render_zone_data(&test_spec(Some(2_024_060_101)), 2_024_060_101, entries);
        let db = data.get("db.example.com").expect("db key present");

        assert!(db.starts_with("$ORIGIN example.com.\n"));
        assert!(db.contains("2024060101"), "serial appears in the SOA block");

        let alpha = db.find("alpha IN A").expect("alpha line present");
        let beta = db.find("beta IN A").expect("beta line present");
        assert!(
            alpha < beta,
            "record lines are appended in entry key order"
        );
    }

    #[test]
    fn test_render_zone_data_without_entries() {
        let data = render_zone_data(&test_spec(Some(7)), 7, BTreeMap::new());
        let db = data.get("db.example.com").expect("db key present");

        assert!(db.contains("IN SOA"), "header renders even with no records");
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_record_entries_filters_on_prefix() {
        let mut data = BTreeMap::new();
        data.insert("db.example.com".to_string(), "zone file body".to_string());
        data.insert("record.www".to_string(), "www IN A 192.0.2.1".to_string());
        data.insert(
            "record.mail".to_string(),
            "@ IN MX 10 mail.example.com.".to_string(),
        );

        let entries = record_entries(&data);

        assert_eq!(entries.len(), 2);
        assert!(entries.contains_key("record.www"));
        assert!(entries.contains_key("record.mail"));
        assert!(
            !entries.contains_key("db.example.com"),
            "rendered zone file is derived, not an entry"
        );
    }
}
