/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use bucket_export::error::{Error, ErrorKind};
use bucket_export::operation::check_region::RegionCheck;

use crate::export::Failure;

/// The message printed after the red `error` tag.
pub(crate) fn failure_message(failure: &Failure) -> String {
    match failure {
        Failure::Error(err) => error_message(err),
        Failure::RegionMismatch { region, .. } => {
            format!("The selected bucket is not in the region `{region}`.")
        }
        Failure::Prompt(err) => format!("Unable to read the bucket selection: {err}"),
    }
}

/// Additional context printed below the error line, if any.
pub(crate) fn failure_detail(failure: &Failure) -> Option<String> {
    match failure {
        Failure::RegionMismatch {
            check: RegionCheck::Undetermined(err),
            ..
        } => Some(format!(
            "The bucket location could not be determined: {}",
            provider_summary(err)
        )),
        Failure::RegionMismatch {
            check: RegionCheck::Unconstrained,
            ..
        } => Some("The bucket did not report a location constraint.".to_owned()),
        _ => None,
    }
}

pub(crate) fn error_message(err: &Error) -> String {
    match err.kind() {
        ErrorKind::InvalidAccessKeyId => {
            "The provided Cloud Object Storage `access_key_id` is invalid.".to_owned()
        }
        ErrorKind::MissingCredentials => {
            "No Cloud Object Storage credentials were provided.".to_owned()
        }
        ErrorKind::SignatureDoesNotMatch => {
            "The provided Cloud Object Storage `secret_access_key` is invalid.".to_owned()
        }
        ErrorKind::UnknownEndpoint => {
            "The provided Cloud Object Storage `region` is invalid.".to_owned()
        }
        ErrorKind::ConfigInvalid => format!(
            "Unable to load configuration: {}",
            source_summary(err)
        ),
        _ => provider_summary(err),
    }
}

// "<code> - <message>"
fn provider_summary(err: &Error) -> String {
    let code = err.code().map(str::to_owned).unwrap_or_else(|| err.to_string());
    let message = err
        .message()
        .map(str::to_owned)
        .unwrap_or_else(|| source_summary(err));
    format!("{code} - {message}")
}

// Display of every error in the source chain joined with `: `
fn source_summary(err: &Error) -> String {
    let mut causes = Vec::new();
    let mut next = std::error::Error::source(err);
    while let Some(cause) = next {
        causes.push(cause.to_string());
        next = cause.source();
    }
    if causes.is_empty() {
        err.to_string()
    } else {
        causes.join(": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_have_specific_messages() {
        let cases = [
            (
                ErrorKind::InvalidAccessKeyId,
                "The provided Cloud Object Storage `access_key_id` is invalid.",
            ),
            (
                ErrorKind::MissingCredentials,
                "No Cloud Object Storage credentials were provided.",
            ),
            (
                ErrorKind::SignatureDoesNotMatch,
                "The provided Cloud Object Storage `secret_access_key` is invalid.",
            ),
            (
                ErrorKind::UnknownEndpoint,
                "The provided Cloud Object Storage `region` is invalid.",
            ),
        ];

        for (kind, expected) in cases {
            let err = Error::new(kind, "irrelevant");
            assert_eq!(expected, error_message(&err));
        }
    }

    #[test]
    fn test_default_message_without_service_metadata() {
        let err = Error::new(ErrorKind::IOError, "disk full");
        assert_eq!("I/O error - disk full", error_message(&err));
    }

    #[test]
    fn test_config_message_includes_cause() {
        let err = Error::new(ErrorKind::ConfigInvalid, "missing field `region`");
        assert_eq!(
            "Unable to load configuration: missing field `region`",
            error_message(&err)
        );
    }

    #[test]
    fn test_region_mismatch_message() {
        let failure = Failure::RegionMismatch {
            region: "us-geo".to_owned(),
            check: RegionCheck::Unconstrained,
        };
        assert_eq!(
            "The selected bucket is not in the region `us-geo`.",
            failure_message(&failure)
        );
        assert!(failure_detail(&failure).is_some());
    }

    #[test]
    fn test_undetermined_region_detail() {
        let failure = Failure::RegionMismatch {
            region: "us-geo".to_owned(),
            check: RegionCheck::Undetermined(Error::new(ErrorKind::IOError, "connection reset")),
        };
        let detail = failure_detail(&failure).unwrap();
        assert!(detail.contains("connection reset"), "{detail}");
    }
}
