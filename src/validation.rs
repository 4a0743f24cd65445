// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Structural validation of DNS record data.
//!
//! Every record CRD converts into the [`RecordData`] tagged enum before
//! reconciliation; [`validate`] dispatches on the variant to a per-type
//! structural rule. Types with no registered rule pass trivially, so new
//! record types can be added without touching the validator.
//!
//! Validation failures are user input errors: the reconciler classifies
//! them as permanent and never retries them.

use std::net::Ipv4Addr;

/// Type-specific data of a single DNS record.
///
/// One variant per supported record type, mirroring the record CRD specs
/// minus the zone reference and TTL (which are common to all types).
#[derive(Clone, Debug, PartialEq)]
pub enum RecordData {
    /// IPv4 address record
    A {
        /// Dotted-decimal IPv4 address
        address: String,
    },
    /// IPv6 address record
    Aaaa {
        /// IPv6 address in standard notation
        address: String,
    },
    /// Canonical name record
    Cname {
        /// Target FQDN
        target: String,
    },
    /// Mail exchange record
    Mx {
        /// Preference; lower is preferred
        priority: i32,
        /// Mail server FQDN
        mail_server: String,
    },
    /// Text record
    Txt {
        /// Text strings, quoted separately when rendered
        text: Vec<String>,
    },
    /// Nameserver delegation record
    Ns {
        /// Nameserver FQDN
        nameserver: String,
    },
    /// Service location record
    Srv {
        /// Priority; lower is preferred
        priority: i32,
        /// Weight among equal priorities
        weight: i32,
        /// Service port
        port: i32,
        /// Target host FQDN
        target: String,
    },
    /// Reverse-mapping pointer record
    Ptr {
        /// FQDN the address maps back to
        ptrdname: String,
    },
    /// Certificate authority authorization record
    Caa {
        /// Flags byte (0 or 128)
        flags: i32,
        /// Property tag ("issue", "issuewild", "iodef")
        tag: String,
        /// Property value
        value: String,
    },
    /// Naming authority pointer record
    Naptr {
        /// Processing order
        order: i32,
        /// Preference among equal orders
        preference: i32,
        /// Rewrite flags
        flags: String,
        /// Service parameters
        service: String,
        /// Substitution expression
        regexp: String,
        /// Replacement domain
        replacement: String,
    },
}

impl RecordData {
    /// The DNS record type mnemonic for this variant.
    #[must_use]
    pub fn record_type(&self) -> &'static str {
        match self {
            Self::A { .. } => "A",
            Self::Aaaa { .. } => "AAAA",
            Self::Cname { .. } => "CNAME",
            Self::Mx { .. } => "MX",
            Self::Txt { .. } => "TXT",
            Self::Ns { .. } => "NS",
            Self::Srv { .. } => "SRV",
            Self::Ptr { .. } => "PTR",
            Self::Caa { .. } => "CAA",
            Self::Naptr { .. } => "NAPTR",
        }
    }
}

/// Validate record data against its type-specific structural rule.
///
/// Returns `Err` with a human-readable reason when the data is malformed.
/// Record types without a registered rule (TXT, NS, SRV, PTR, CAA, NAPTR)
/// pass trivially.
///
/// # Errors
///
/// Returns the validation failure reason, suitable for the record's
/// status message.
pub fn validate(data: &RecordData) -> Result<(), String> {
    match data {
        RecordData::A { address } => validate_a(address),
        RecordData::Aaaa { address } => validate_aaaa(address),
        RecordData::Cname { target } => validate_cname(target),
        RecordData::Mx {
            priority: _,
            mail_server,
        } => validate_mx(mail_server),
        RecordData::Txt { .. }
        | RecordData::Ns { .. }
        | RecordData::Srv { .. }
        | RecordData::Ptr { .. }
        | RecordData::Caa { .. }
        | RecordData::Naptr { .. } => Ok(()),
    }
}

/// A records require a parseable IPv4 address; out-of-range octets
/// (e.g. 999.999.999.999) are rejected.
fn validate_a(address: &str) -> Result<(), String> {
    if address.is_empty() || address.parse::<Ipv4Addr>().is_err() {
        return Err(format!("Invalid IPv4 address: {address}"));
    }
    Ok(())
}

/// AAAA records require a non-empty address; no syntax check is performed.
fn validate_aaaa(address: &str) -> Result<(), String> {
    if address.is_empty() {
        return Err("IPv6 address required".to_string());
    }
    Ok(())
}

fn validate_cname(target: &str) -> Result<(), String> {
    if target.is_empty() {
        return Err("Target required for CNAME".to_string());
    }
    Ok(())
}

fn validate_mx(mail_server: &str) -> Result<(), String> {
    if mail_server.is_empty() {
        return Err("Priority and mailServer required for MX record".to_string());
    }
    Ok(())
}
