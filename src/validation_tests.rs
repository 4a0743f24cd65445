// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for record data validation.

#[cfg(test)]
mod tests {
    use crate::validation::{validate, RecordData};

    #[test]
    fn test_valid_a_record() {
        let data = RecordData::A {
            address: "192.0.2.1".to_string(),
        };
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_a_record_out_of_range_octets() {
        let data = RecordData::A {
            address: "999.999.999.999".to_string(),
        };
        let err = validate(&data).unwrap_err();
        assert!(err.contains("Invalid IPv4 address"));
    }

    #[test]
    fn test_a_record_malformed() {
        for bad in ["", "not-an-ip", "192.0.2", "192.0.2.1.5", "2001:db8::1"] {
            let data = RecordData::A {
                address: bad.to_string(),
            };
            assert!(validate(&data).is_err(), "expected '{bad}' to be invalid");
        }
    }

    #[test]
    fn test_valid_aaaa_record() {
        let data = RecordData::Aaaa {
            address: "2001:db8::1".to_string(),
        };
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_aaaa_record_requires_address() {
        let data = RecordData::Aaaa {
            address: String::new(),
        };
        assert_eq!(validate(&data).unwrap_err(), "IPv6 address required");
    }

    #[test]
    fn test_aaaa_record_no_syntax_check() {
        // Only presence is checked; malformed addresses are accepted.
        let data = RecordData::Aaaa {
            address: "not-an-ipv6".to_string(),
        };
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_cname_record_requires_target() {
        let data = RecordData::Cname {
            target: String::new(),
        };
        assert_eq!(validate(&data).unwrap_err(), "Target required for CNAME");

        let data = RecordData::Cname {
            target: "www.example.com.".to_string(),
        };
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_valid_mx_record() {
        let data = RecordData::Mx {
            priority: 10,
            mail_server: "mail.example.com".to_string(),
        };
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_mx_record_requires_mail_server() {
        let data = RecordData::Mx {
            priority: 10,
            mail_server: String::new(),
        };
        assert_eq!(
            validate(&data).unwrap_err(),
            "Priority and mailServer required for MX record"
        );
    }

    #[test]
    fn test_unchecked_types_pass_trivially() {
        let records = vec![
            RecordData::Txt { text: vec![] },
            RecordData::Ns {
                nameserver: String::new(),
            },
            RecordData::Srv {
                priority: 0,
                weight: 0,
                port: 0,
                target: String::new(),
            },
            RecordData::Ptr {
                ptrdname: String::new(),
            },
            RecordData::Caa {
                flags: 0,
                tag: String::new(),
                value: String::new(),
            },
            RecordData::Naptr {
                order: 0,
                preference: 0,
                flags: String::new(),
                service: String::new(),
                regexp: String::new(),
                replacement: String::new(),
            },
        ];

        for data in records {
            assert!(
                validate(&data).is_ok(),
                "{} should pass without a registered rule",
                data.record_type()
            );
        }
    }

    #[test]
    fn test_record_type_mnemonics() {
        assert_eq!(
            RecordData::A {
                address: "192.0.2.1".into()
            }
            .record_type(),
            "A"
        );
        assert_eq!(
            RecordData::Aaaa {
                address: "::1".into()
            }
            .record_type(),
            "AAAA"
        );
        assert_eq!(
            RecordData::Naptr {
                order: 0,
                preference: 0,
                flags: "S".into(),
                service: String::new(),
                regexp: String::new(),
                replacement: ".".into(),
            }
            .record_type(),
            "NAPTR"
        );
    }
}
