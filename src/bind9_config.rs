// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Pure synthesis of BIND9 configuration text.
//!
//! Everything in this module is a deterministic function from resource
//! specs to configuration text: `named.conf` for an instance, zone files
//! and zone stanzas for a `DNSZone`, and single resource-record lines.
//! No I/O happens here; the reconcilers apply the rendered text through
//! `ConfigMap`s.
//!
//! The only time-dependent input, the SOA serial fallback, is isolated in
//! [`SerialPolicy`] so callers decide when (and whether) wall-clock time
//! enters the output.

use crate::constants::{
    BIND_WORKING_DIR, BIND_ZONES_MOUNT_PATH, DEFAULT_SOA_EXPIRE_SECS,
    DEFAULT_SOA_NEGATIVE_TTL_SECS, DEFAULT_SOA_REFRESH_SECS, DEFAULT_SOA_RETRY_SECS,
    DEFAULT_ZONE_TTL_SECS, ZONES_CONF_KEY,
};
use crate::crd::{Bind9InstanceSpec, DNSZoneSpec};
use crate::validation::RecordData;
use chrono::Utc;
use std::fmt::Write as _;

/// Policy for generating an SOA serial when the zone spec does not pin one.
///
/// The date-encoded default matches common operational practice
/// (YYYYMMDD01) but makes zone-file output time-dependent; tests and
/// callers that need reproducible output use `Fixed`.
#[derive(Clone, Copy, Debug)]
pub enum SerialPolicy {
    /// `YYYYMMDD01` derived from the current UTC date.
    DateEncoded,
    /// A constant serial, for deterministic output.
    Fixed(i64),
}

impl SerialPolicy {
    /// Produce a serial for a zone whose spec leaves it unset.
    #[must_use]
    pub fn generate(&self) -> i64 {
        match self {
            Self::DateEncoded => Utc::now()
                .format("%Y%m%d01")
                .to_string()
                .parse()
                .unwrap_or(1),
            Self::Fixed(serial) => *serial,
        }
    }
}

impl Default for SerialPolicy {
    fn default() -> Self {
        Self::DateEncoded
    }
}

/// Render the `named.conf` for a `Bind9Instance`.
///
/// Missing options resolve to conservative defaults: queries open to
/// `any`, transfers closed (`none`), recursion off, DNSSEC validation off.
/// The output includes the zone stanza aggregate the workload mounts at
/// `/etc/bind/zones/zones.conf`.
#[must_use]
pub fn synthesize_instance_config(name: &str, spec: &Bind9InstanceSpec) -> String {
    let config = spec.config.clone().unwrap_or_default();

    let allow_query = acl_list(config.allow_query.as_deref(), "any");
    let allow_transfer = acl_list(config.allow_transfer.as_deref(), "none");
    let recursion = if config.recursion.unwrap_or(false) {
        "yes"
    } else {
        "no"
    };
    let dnssec_validation = if config
        .dnssec
        .as_ref()
        .and_then(|d| d.enabled)
        .unwrap_or(false)
    {
        "auto"
    } else {
        "no"
    };

    format!(
        r#"// Generated BIND9 configuration for {name}
options {{
    directory "{BIND_WORKING_DIR}";
    listen-on {{ any; }};
    listen-on-v6 {{ any; }};

    allow-query {{ {allow_query}; }};
    allow-transfer {{ {allow_transfer}; }};
    recursion {recursion};

    dnssec-validation {dnssec_validation};

    version none;
    hostname none;
    server-id none;
}};

logging {{
    channel default_log {{
        file "/var/log/bind/named.log" versions 3 size 5m;
        severity info;
        print-time yes;
        print-severity yes;
        print-category yes;
    }};

    category default {{ default_log; }};
    category queries {{ default_log; }};
}};

include "{BIND_ZONES_MOUNT_PATH}/{ZONES_CONF_KEY}";
"#
    )
}

fn acl_list(entries: Option<&[String]>, default: &str) -> String {
    match entries {
        Some(list) if !list.is_empty() => list.join("; "),
        _ => default.to_string(),
    }
}

/// Render the zone-file header (`$ORIGIN`, `$TTL`, SOA) for a `DNSZone`.
///
/// The serial must already be resolved by the caller (spec value or
/// [`SerialPolicy`] fallback), keeping this function deterministic.
/// The admin contact's `@` is rendered as `.` per zone-file convention.
#[must_use]
pub fn synthesize_zone_file(spec: &DNSZoneSpec, serial: i64) -> String {
    let zone_name = &spec.zone_name;
    let soa = &spec.soa_record;

    let ttl = spec.ttl.unwrap_or(DEFAULT_ZONE_TTL_SECS);
    let primary_ns = soa
        .primary_ns
        .clone()
        .unwrap_or_else(|| format!("ns1.{zone_name}."));
    let admin_email = soa
        .admin_email
        .clone()
        .unwrap_or_else(|| format!("admin.{zone_name}."))
        .replace('@', ".");
    let refresh = soa.refresh.unwrap_or(DEFAULT_SOA_REFRESH_SECS);
    let retry = soa.retry.unwrap_or(DEFAULT_SOA_RETRY_SECS);
    let expire = soa.expire.unwrap_or(DEFAULT_SOA_EXPIRE_SECS);
    let minimum = soa.negative_ttl.unwrap_or(DEFAULT_SOA_NEGATIVE_TTL_SECS);

    format!(
        r"$ORIGIN {zone_name}.
$TTL {ttl}

@ IN SOA {primary_ns} {admin_email} (
    {serial}    ; Serial
    {refresh}   ; Refresh
    {retry}     ; Retry
    {expire}    ; Expire
    {minimum}   ; Negative TTL
)
"
    )
}

/// Compose a full zone database file from a header and record lines.
///
/// Callers pass record lines in a stable order (the zone `ConfigMap`
/// iterates its entries sorted by key) so repeated composition over the
/// same inputs is byte-identical.
#[must_use]
pub fn compose_zone_db<'a, I>(header: &str, record_lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut db = String::from(header);
    db.push('\n');
    for line in record_lines {
        db.push_str(line.trim_end());
        db.push('\n');
    }
    db
}

/// Render the `zone` stanza referencing a zone's database file, used in
/// the aggregated `zones.conf` the instance mounts.
#[must_use]
pub fn zone_stanza(zone_name: &str) -> String {
    format!(
        "zone \"{zone_name}\" {{\n    type master;\n    file \"{BIND_ZONES_MOUNT_PATH}/db.{zone_name}\";\n}};\n"
    )
}

/// Render a single resource-record line for the zone file.
///
/// The name is emitted as authored ("@" for the apex); a missing TTL
/// inherits the zone's `$TTL`.
#[must_use]
pub fn render_record_line(name: &str, ttl: Option<i32>, data: &RecordData) -> String {
    let mut line = String::from(name);
    if let Some(ttl) = ttl {
        let _ = write!(line, " {ttl}");
    }
    let _ = write!(line, " IN {} ", data.record_type());

    match data {
        RecordData::A { address } | RecordData::Aaaa { address } => line.push_str(address),
        RecordData::Cname { target } => line.push_str(target),
        RecordData::Mx {
            priority,
            mail_server,
        } => {
            let _ = write!(line, "{priority} {mail_server}");
        }
        RecordData::Txt { text } => {
            let quoted: Vec<String> = text.iter().map(|t| format!("\"{t}\"")).collect();
            line.push_str(&quoted.join(" "));
        }
        RecordData::Ns { nameserver } => line.push_str(nameserver),
        RecordData::Srv {
            priority,
            weight,
            port,
            target,
        } => {
            let _ = write!(line, "{priority} {weight} {port} {target}");
        }
        RecordData::Ptr { ptrdname } => line.push_str(ptrdname),
        RecordData::Caa { flags, tag, value } => {
            let _ = write!(line, "{flags} {tag} \"{value}\"");
        }
        RecordData::Naptr {
            order,
            preference,
            flags,
            service,
            regexp,
            replacement,
        } => {
            let _ = write!(
                line,
                "{order} {preference} \"{flags}\" \"{service}\" \"{regexp}\" {replacement}"
            );
        }
    }

    line
}
