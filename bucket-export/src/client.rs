/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{self, Error};
use crate::operation::check_region::RegionCheck;
use crate::types::ConcurrencySetting;
use crate::{Config, DEFAULT_CONCURRENCY};
use std::sync::Arc;

/// Bucket export client for Cloud Object Storage and other S3-compatible services.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, e.g. config, env details, etc
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// Get the concrete number of download workers to use based on the concurrency setting.
    ///
    /// `None` means no limit.
    pub(crate) fn num_workers(&self) -> Result<Option<usize>, Error> {
        match self.config.concurrency() {
            ConcurrencySetting::Explicit(0) => Err(error::invalid_input(
                "concurrency must be greater than zero",
            )),
            ConcurrencySetting::Explicit(concurrency) => Ok(Some(*concurrency)),
            ConcurrencySetting::Auto => Ok(Some(DEFAULT_CONCURRENCY)),
            ConcurrencySetting::Unbounded => Ok(None),
        }
    }
}

impl Client {
    /// Creates a new client from a config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// List the names of all buckets owned by the account, in the order the service returns them.
    pub async fn list_buckets(&self) -> Result<Vec<String>, Error> {
        crate::operation::list_buckets::list_buckets(&self.handle).await
    }

    /// Check whether `bucket` reports a location constraint.
    ///
    /// This never fails. Errors from the service are captured in
    /// [`RegionCheck::Undetermined`].
    pub async fn check_region(&self, bucket: impl Into<String>) -> RegionCheck {
        crate::operation::check_region::check_region(&self.handle, bucket.into()).await
    }

    /// Export every object of a bucket to a local directory.
    ///
    /// Only the first page of `ListObjectsV2` results is exported. Keys ending in `/` are
    /// skipped. Each object is written to `<destination>/<bucket>/<key>`.
    ///
    /// Constructs a fluent builder for the
    /// [`ExportBucket`](crate::operation::export_bucket::builders::ExportBucketFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn export(client: &bucket_export::Client) -> Result<(), bucket_export::error::Error> {
    ///     let handle = client
    ///         .export_bucket()
    ///         .bucket("my-bucket")
    ///         .destination("exported_buckets")
    ///         .send()
    ///         .await?;
    ///
    ///     // send() returns once the export has been started.
    ///     // Call the `join()` method on the returned handle to drive it to completion.
    ///     let output = handle.join().await?;
    ///     println!("exported {} objects", output.objects_exported());
    ///     Ok(())
    /// }
    /// ```
    pub fn export_bucket(&self) -> crate::operation::export_bucket::builders::ExportBucketFluentBuilder {
        crate::operation::export_bucket::builders::ExportBucketFluentBuilder::new(
            self.handle.clone(),
        )
    }
}
