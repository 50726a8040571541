/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use super::ExportBucketState;

/// Output type for exporting a bucket
#[non_exhaustive]
#[derive(Debug)]
pub struct ExportBucketOutput {
    /// The number of objects written to disk
    pub objects_exported: u64,

    /// Total number of bytes written to disk
    pub total_bytes_transferred: u64,

    /// The number of `/` terminated keys that were not exported
    pub directories_skipped: u64,

    /// Whether the service reported more objects than were returned in the first page
    pub listing_truncated: bool,

    /// The directory objects were written beneath, `<destination>/<bucket>`
    pub destination: PathBuf,
}

impl ExportBucketOutput {
    /// Creates a new builder-style object to manufacture [`ExportBucketOutput`](crate::operation::export_bucket::ExportBucketOutput).
    pub fn builder() -> ExportBucketOutputBuilder {
        ExportBucketOutputBuilder::default()
    }

    /// The number of objects written to disk
    pub fn objects_exported(&self) -> u64 {
        self.objects_exported
    }

    /// Total number of bytes written to disk
    pub fn total_bytes_transferred(&self) -> u64 {
        self.total_bytes_transferred
    }

    /// The number of `/` terminated keys that were not exported
    pub fn directories_skipped(&self) -> u64 {
        self.directories_skipped
    }

    /// Whether objects beyond the first listing page were left out of the export
    pub fn listing_truncated(&self) -> bool {
        self.listing_truncated
    }

    /// The directory objects were written beneath
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl From<&ExportBucketState> for ExportBucketOutput {
    fn from(state: &ExportBucketState) -> Self {
        ExportBucketOutput::builder()
            .objects_exported(state.objects_exported.load(Ordering::SeqCst))
            .total_bytes_transferred(state.total_bytes_transferred.load(Ordering::SeqCst))
            .directories_skipped(state.directories_skipped.load(Ordering::SeqCst))
            .listing_truncated(state.listing_truncated.load(Ordering::SeqCst))
            .destination(state.destination())
            .build()
    }
}

/// A builder for [`ExportBucketOutput`](crate::operation::export_bucket::ExportBucketOutput).
#[non_exhaustive]
#[derive(Debug, Default)]
pub struct ExportBucketOutputBuilder {
    pub(crate) objects_exported: u64,
    pub(crate) total_bytes_transferred: u64,
    pub(crate) directories_skipped: u64,
    pub(crate) listing_truncated: bool,
    pub(crate) destination: PathBuf,
}

impl ExportBucketOutputBuilder {
    /// The number of objects written to disk
    pub fn objects_exported(mut self, input: u64) -> Self {
        self.objects_exported = input;
        self
    }

    /// The number of bytes written to disk
    pub fn total_bytes_transferred(mut self, input: u64) -> Self {
        self.total_bytes_transferred = input;
        self
    }

    /// The number of `/` terminated keys that were not exported
    pub fn directories_skipped(mut self, input: u64) -> Self {
        self.directories_skipped = input;
        self
    }

    /// Whether objects beyond the first listing page were left out of the export
    pub fn listing_truncated(mut self, input: bool) -> Self {
        self.listing_truncated = input;
        self
    }

    /// The directory objects were written beneath
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.destination = input.into();
        self
    }

    /// Consume the builder and return the output
    pub fn build(self) -> ExportBucketOutput {
        ExportBucketOutput {
            objects_exported: self.objects_exported,
            total_bytes_transferred: self.total_bytes_transferred,
            directories_skipped: self.directories_skipped,
            listing_truncated: self.listing_truncated,
            destination: self.destination,
        }
    }
}
