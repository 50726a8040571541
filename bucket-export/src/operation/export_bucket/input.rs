/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

use std::path::{Path, PathBuf};

/// Input type for exporting a bucket
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ExportBucketInput {
    /// The bucket to export
    pub bucket: String,

    /// The directory the bucket's directory is created in
    pub destination: PathBuf,
}

impl ExportBucketInput {
    /// Creates a new builder-style object to manufacture [`ExportBucketInput`](crate::operation::export_bucket::ExportBucketInput).
    pub fn builder() -> ExportBucketInputBuilder {
        ExportBucketInputBuilder::default()
    }

    /// The bucket to export
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The directory the bucket's directory is created in
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// A builder for [`ExportBucketInput`](crate::operation::export_bucket::ExportBucketInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct ExportBucketInputBuilder {
    pub(crate) bucket: Option<String>,
    pub(crate) destination: Option<PathBuf>,
}

impl ExportBucketInputBuilder {
    /// Set the bucket to export.
    ///
    /// NOTE: A bucket name is required.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// Set the bucket to export.
    ///
    /// NOTE: A bucket name is required.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.bucket = input;
        self
    }

    /// The bucket to export.
    pub fn get_bucket(&self) -> &Option<String> {
        &self.bucket
    }

    /// Set the directory the bucket's directory is created in.
    ///
    /// Defaults to [`DEFAULT_DESTINATION`](crate::DEFAULT_DESTINATION).
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.destination = Some(input.into());
        self
    }

    /// Set the directory the bucket's directory is created in.
    ///
    /// Defaults to [`DEFAULT_DESTINATION`](crate::DEFAULT_DESTINATION).
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.destination = input;
        self
    }

    /// The directory the bucket's directory is created in.
    pub fn get_destination(&self) -> &Option<PathBuf> {
        &self.destination
    }

    /// Consumes the builder and constructs a [`ExportBucketInput`](crate::operation::export_bucket::ExportBucketInput).
    pub fn build(self) -> Result<ExportBucketInput, BuildError> {
        let bucket = self
            .bucket
            .ok_or_else(|| BuildError::missing_field("bucket", "a bucket name is required"))?;

        Ok(ExportBucketInput {
            bucket,
            destination: self
                .destination
                .unwrap_or_else(|| PathBuf::from(crate::DEFAULT_DESTINATION)),
        })
    }
}
