/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    code: Option<String>,
    message: Option<String>,
    source: BoxError,
}

/// General categories of export errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The access key ID does not exist in the provider's records
    InvalidAccessKeyId,

    /// No access key ID and/or secret access key were configured
    MissingCredentials,

    /// The request signature did not match, usually a wrong secret access key
    SignatureDoesNotMatch,

    /// The endpoint derived from the configured region could not be reached
    UnknownEndpoint,

    /// The configuration file could not be loaded or is malformed
    ConfigInvalid,

    /// Operation input validation issues
    InputInvalid,

    /// I/O errors
    IOError,

    /// Some kind of internal runtime issue (e.g. task failure, poisoned mutex, etc)
    RuntimeError,

    /// Resource not found (e.g. bucket or key not found)
    NotFound,

    /// Any other error reported by the object storage service
    ProviderError,

    /// The operation is being canceled because the user explicitly called `.abort` on the handle,
    /// or one of the object downloads failed.
    OperationCancelled,
}

impl Error {
    /// Creates a new [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            code: None,
            message: None,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The error code reported by the service, if this error originated from a service response.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The error message reported by the service, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InvalidAccessKeyId => write!(f, "invalid access key id"),
            ErrorKind::MissingCredentials => write!(f, "missing credentials"),
            ErrorKind::SignatureDoesNotMatch => write!(f, "request signature does not match"),
            ErrorKind::UnknownEndpoint => write!(f, "unknown endpoint"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::IOError => write!(f, "I/O error"),
            ErrorKind::RuntimeError => write!(f, "runtime error"),
            ErrorKind::NotFound => write!(f, "resource not found"),
            ErrorKind::ProviderError => write!(f, "service error"),
            ErrorKind::OperationCancelled => write!(f, "operation cancelled"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

impl From<::config::ConfigError> for Error {
    fn from(value: ::config::ConfigError) -> Self {
        Self::new(ErrorKind::ConfigInvalid, value)
    }
}

impl<E, R> From<SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: SdkError<E, R>) -> Self {
        let code = value.code().map(str::to_owned);
        let message = value.message().map(str::to_owned);

        let kind = match &value {
            SdkError::DispatchFailure(failure) if failure.is_io() || failure.is_timeout() => {
                ErrorKind::UnknownEndpoint
            }
            _ => match code.as_deref() {
                Some("InvalidAccessKeyId") => ErrorKind::InvalidAccessKeyId,
                Some("SignatureDoesNotMatch") => ErrorKind::SignatureDoesNotMatch,
                Some("NotFound" | "NoSuchKey" | "NoSuchBucket") => ErrorKind::NotFound,
                _ => ErrorKind::ProviderError,
            },
        };

        Error {
            kind,
            code,
            message,
            source: value.into(),
        }
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn missing_credentials<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::MissingCredentials, err)
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

static CANCELLATION_ERROR: &str =
    "an object failed to export or the export was aborted, cancelling all ongoing requests";

pub(crate) fn operation_cancelled() -> Error {
    Error::new(ErrorKind::OperationCancelled, CANCELLATION_ERROR)
}
