/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

/// Listing the buckets of an account
pub mod list_buckets;

/// Checking the location constraint of a bucket
pub mod check_region;

/// Types for exporting every object of a bucket to disk
pub mod export_bucket;

/// Container for maintaining context required to carry out a single operation.
///
/// `State` is whatever additional operation specific state is required for the operation.
#[derive(Debug)]
pub(crate) struct TransferContext<State> {
    handle: Arc<crate::client::Handle>,
    state: Arc<State>,
}

impl<State> TransferContext<State> {
    /// The S3 client to use for SDK operations
    pub(crate) fn client(&self) -> &aws_sdk_s3::Client {
        self.handle.config.client()
    }
}

impl<State> Clone for TransferContext<State> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            state: self.state.clone(),
        }
    }
}
