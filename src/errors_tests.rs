// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for reconciliation error classification.

#[cfg(test)]
mod tests {
    use crate::errors::{Error, FailureClass};

    #[test]
    fn test_invalid_record_error_message() {
        let error = Error::InvalidRecord {
            record_type: "A",
            name: "www".to_string(),
            reason: "Invalid IPv4 address: 999.999.999.999".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "invalid A record 'www': Invalid IPv4 address: 999.999.999.999"
        );
    }

    #[test]
    fn test_reference_not_found_error_message() {
        let error = Error::ReferenceNotFound {
            kind: "DNSZone",
            name: "example-com".to_string(),
            namespace: "default".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "DNSZone 'example-com' not found in namespace 'default'"
        );
    }

    #[test]
    fn test_validation_failure_is_permanent() {
        let error = Error::InvalidRecord {
            record_type: "MX",
            name: "mail".to_string(),
            reason: "Priority and mailServer required for MX record".to_string(),
        };

        assert_eq!(error.classify(), FailureClass::Permanent);
        assert_eq!(error.status_reason(), "InvalidRecord");
    }

    #[test]
    fn test_missing_reference_is_retryable() {
        let error = Error::ReferenceNotFound {
            kind: "Bind9Instance",
            name: "default".to_string(),
            namespace: "dns".to_string(),
        };

        assert_eq!(error.classify(), FailureClass::Retryable);
    }

    #[test]
    fn test_api_error_is_retryable() {
        let error = Error::KubeApi(kube::Error::Api(Box::new(kube::error::ErrorResponse {
            status: Some(kube::core::response::StatusSummary::Failure),
            message: "the server is currently unable to handle the request".to_string(),
            reason: "ServiceUnavailable".to_string(),
            code: 503,
            ..Default::default()
        })));

        assert_eq!(error.classify(), FailureClass::Retryable);
        assert_eq!(error.status_reason(), "KubeApiError");
    }

    #[test]
    fn test_contextual_error_is_retryable() {
        let error = Error::Other(anyhow::anyhow!("zone ConfigMap patch raced"));

        assert_eq!(error.classify(), FailureClass::Retryable);
        assert_eq!(error.status_reason(), "ReconcileFailed");
    }

    #[test]
    fn test_missing_namespace_message() {
        let error = Error::MissingNamespace {
            kind: "ARecord",
            name: "www".to_string(),
        };

        assert_eq!(error.to_string(), "ARecord 'www' has no namespace");
        assert_eq!(error.classify(), FailureClass::Retryable);
    }
}
