/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::Error;
use std::{path::PathBuf, sync::Arc};

use super::{ExportBucketHandle, ExportBucketInputBuilder};

/// Fluent builder for constructing a bucket export
#[derive(Debug)]
pub struct ExportBucketFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: ExportBucketInputBuilder,
}

impl ExportBucketFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Start exporting the bucket.
    ///
    /// Returns as soon as the export has been started, use
    /// [`ExportBucketHandle::join`] to wait for it to complete.
    pub async fn send(self) -> Result<ExportBucketHandle, Error> {
        let input = self.inner.build()?;
        crate::operation::export_bucket::ExportBucket::orchestrate(self.handle, input)
    }

    /// Set the bucket to export.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.bucket(input);
        self
    }

    /// Set the bucket to export.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_bucket(input);
        self
    }

    /// The bucket to export.
    pub fn get_bucket(&self) -> &Option<String> {
        self.inner.get_bucket()
    }

    /// Set the directory the bucket's directory is created in
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.inner = self.inner.destination(input);
        self
    }

    /// Set the directory the bucket's directory is created in
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.inner = self.inner.set_destination(input);
        self
    }

    /// The directory the bucket's directory is created in
    pub fn get_destination(&self) -> &Option<PathBuf> {
        self.inner.get_destination()
    }
}

impl crate::operation::export_bucket::input::ExportBucketInputBuilder {
    /// Start exporting a bucket with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<ExportBucketHandle, Error> {
        let mut fluent_builder = client.export_bucket();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
