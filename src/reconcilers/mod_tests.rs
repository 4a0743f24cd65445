// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the shared reconciler boundary: requeue decisions and
//! finalizer error flattening.

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::crd::{ARecord, ARecordSpec};
    use crate::errors::Error;
    use crate::reconcilers::{error_policy, flatten_finalizer_error, success_action};
    use kube::runtime::controller::Action;
    use kube::runtime::finalizer;
    use std::sync::Arc;

    fn test_record() -> Arc<ARecord> {
        Arc::new(ARecord::new(
            "www-example-com",
            ARecordSpec {
                zone: "example-com".to_string(),
                name: "www".to_string(),
                ipv4_address: "192.0.2.1".to_string(),
                ttl: None,
            },
        ))
    }

    fn retryable_error() -> Error {
        Error::ReferenceNotFound {
            kind: "DNSZone",
            name: "example-com".to_string(),
            namespace: "default".to_string(),
        }
    }

    fn permanent_error() -> Error {
        Error::InvalidRecord {
            record_type: "A",
            name: "www-example-com".to_string(),
            reason: "Invalid IPv4 address: not-an-ip".to_string(),
        }
    }

    /// In-cluster config is unavailable in unit tests; build a client
    /// against a placeholder endpoint. The policy functions never touch
    /// it.
    fn test_context() -> Arc<Context> {
        let config = kube::Config::new("http://127.0.0.1:8080".parse().unwrap());
        let client = kube::Client::try_from(config).expect("client from static config");
        Context::new(client)
    }

    #[test]
    fn test_success_action_requeues_in_five_minutes() {
        let action = success_action();

        // Action doesn't provide accessors, so we verify via Debug format
        let debug_str = format!("{action:?}");
        assert!(
            debug_str.contains("300s"),
            "Expected 300s requeue duration, got: {debug_str}"
        );
    }

    #[tokio::test]
    async fn test_error_policy_requeues_retryable_failures() {
        let action = error_policy(test_record(), &retryable_error(), test_context());

        let debug_str = format!("{action:?}");
        assert!(
            debug_str.contains("30s"),
            "Expected 30s requeue for a retryable failure, got: {debug_str}"
        );
    }

    #[tokio::test]
    async fn test_error_policy_parks_permanent_failures() {
        let action = error_policy(test_record(), &permanent_error(), test_context());

        assert_eq!(
            format!("{action:?}"),
            format!("{:?}", Action::await_change()),
            "Permanent failures should wait for a spec change"
        );
    }

    #[test]
    fn test_flatten_passes_apply_failures_through() {
        let result: Result<Action, finalizer::Error<Error>> =
            Err(finalizer::Error::ApplyFailed(permanent_error()));

        let err = flatten_finalizer_error("ARecord", result).unwrap_err();
        assert!(
            matches!(err, Error::InvalidRecord { .. }),
            "Apply failure should keep its error variant, got: {err:?}"
        );
    }

    #[test]
    fn test_flatten_passes_cleanup_failures_through() {
        let result: Result<Action, finalizer::Error<Error>> =
            Err(finalizer::Error::CleanupFailed(retryable_error()));

        let err = flatten_finalizer_error("ARecord", result).unwrap_err();
        assert!(matches!(err, Error::ReferenceNotFound { .. }));
    }

    #[test]
    fn test_flatten_maps_unnamed_object() {
        let result: Result<Action, finalizer::Error<Error>> = Err(finalizer::Error::UnnamedObject);

        let err = flatten_finalizer_error("DNSZone", result).unwrap_err();
        assert!(err.to_string().contains("DNSZone has no name"));
    }

    #[test]
    fn test_flatten_keeps_successful_actions() {
        let result: Result<Action, finalizer::Error<Error>> = Ok(Action::await_change());
        assert!(flatten_finalizer_error("ARecord", result).is_ok());
    }
}
