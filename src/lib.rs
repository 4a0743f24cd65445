// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # Bindkeeper - BIND9 DNS Operator for Kubernetes
//!
//! Bindkeeper is a Kubernetes operator written in Rust that keeps BIND9 DNS
//! infrastructure converged with a set of Custom Resource Definitions (CRDs).
//!
//! ## Overview
//!
//! This library provides the core functionality for the bindkeeper operator,
//! including:
//!
//! - Custom Resource Definitions for BIND9 instances, DNS zones and records
//! - Reconciliation logic converging each layer onto derived Kubernetes
//!   artifacts (`ConfigMap`s, `StatefulSet`s, `Service`s)
//! - Deterministic `named.conf` and zone-file synthesis
//! - Record validation with permanent-vs-retryable failure classification
//! - Per-instance DNS health daemons and Prometheus metrics
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types for DNS resources
//! - [`reconcilers`] - Reconciliation logic for each resource type
//! - [`context`] - Shared context handed to every controller
//! - [`bind9_config`] - BIND9 configuration and zone-file synthesis
//! - [`resources`] - Builders for the derived Kubernetes artifacts
//! - [`apply`] - Idempotent create/apply/replace helpers
//! - [`validation`] - Record data validation rules
//! - [`errors`] - Error taxonomy and failure classification
//! - [`health`] - Per-instance DNS health daemons
//!
//! ## Example
//!
//! ```rust
//! use bindkeeper::crd::{DNSZoneSpec, SOARecord};
//!
//! // Create a DNS zone specification
//! let zone_spec = DNSZoneSpec {
//!     zone_name: "example.com".to_string(),
//!     bind9_instance_ref: Some("primary".to_string()),
//!     soa_record: SOARecord {
//!         serial: Some(2024010101),
//!         ..SOARecord::default()
//!     },
//!     ttl: Some(3600),
//! };
//! ```
//!
//! ## Features
//!
//! - **Layered CRDs** - `Bind9Instance` serves `DNSZone`s, zones carry records
//! - **Deterministic Synthesis** - same inputs render byte-identical configs
//! - **Failure Classification** - invalid specs park, transient errors retry
//! - **Status Tracking** - full status subresources on every resource
//!
//! For more information, see the [documentation](https://firestoned.github.io/bindkeeper/).

pub mod apply;
pub mod bind9_config;
pub mod constants;
pub mod context;
pub mod crd;
pub mod errors;
pub mod health;
pub mod labels;
pub mod metrics;
pub mod reconcilers;
pub mod resources;
pub mod validation;

#[cfg(test)]
mod crd_tests;
#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod resources_tests;
#[cfg(test)]
mod validation_tests;
