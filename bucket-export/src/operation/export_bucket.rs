/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Input type for exporting a bucket
pub use input::{ExportBucketInput, ExportBucketInputBuilder};
mod output;
/// Output type for exporting a bucket
pub use output::{ExportBucketOutput, ExportBucketOutputBuilder};

mod handle;
pub use handle::ExportBucketHandle;

mod list_objects;
mod worker;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

use path_clean::PathClean;
use tokio::{sync::watch, task};

use crate::error;

use super::TransferContext;

/// Operation struct for exporting every object of a bucket
#[derive(Clone, Default, Debug)]
pub(crate) struct ExportBucket;

impl ExportBucket {
    /// Execute a single `ExportBucket` operation
    pub(crate) fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: ExportBucketInput,
    ) -> Result<ExportBucketHandle, error::Error> {
        let num_workers = handle.num_workers()?;
        validate_bucket_name(input.bucket())?;
        let ctx = ExportBucketContext::new(handle, input);
        tracing::debug!(
            "exporting bucket {:?} to {}",
            ctx.state.input.bucket(),
            ctx.state.destination.display()
        );

        let mut tasks = task::JoinSet::new();
        match num_workers {
            Some(num_workers) => {
                let (work_tx, work_rx) = async_channel::bounded(num_workers);
                tasks.spawn(worker::discover_objects(ctx.clone(), work_tx));
                for _ in 0..num_workers {
                    tasks.spawn(worker::export_objects(ctx.clone(), work_rx.clone()));
                }
            }
            None => {
                tasks.spawn(worker::export_all_objects(ctx.clone()));
            }
        }

        Ok(ExportBucketHandle { tasks, ctx })
    }
}

// the bucket name becomes a directory name under the destination
fn validate_bucket_name(bucket: &str) -> Result<(), error::Error> {
    let invalid = bucket.is_empty()
        || bucket == "."
        || bucket == ".."
        || bucket.contains(['/', '\\']);
    if invalid {
        return Err(error::invalid_input(format!(
            "bucket name {bucket:?} cannot be used as a directory name"
        )));
    }
    Ok(())
}

/// ExportBucket operation specific state
#[derive(Debug)]
pub(crate) struct ExportBucketState {
    input: ExportBucketInput,
    destination: PathBuf,
    cancel_tx: watch::Sender<bool>,
    cancel_rx: watch::Receiver<bool>,
    objects_exported: AtomicU64,
    total_bytes_transferred: AtomicU64,
    directories_skipped: AtomicU64,
    listing_truncated: AtomicBool,
}

impl ExportBucketState {
    fn new(input: ExportBucketInput) -> Self {
        let destination = input.destination().join(input.bucket()).clean();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            input,
            destination,
            cancel_tx,
            cancel_rx,
            objects_exported: AtomicU64::default(),
            total_bytes_transferred: AtomicU64::default(),
            directories_skipped: AtomicU64::default(),
            listing_truncated: AtomicBool::default(),
        }
    }

    /// The directory objects are written beneath, `<destination>/<bucket>`
    pub(crate) fn destination(&self) -> &Path {
        &self.destination
    }
}

pub(crate) type ExportBucketContext = TransferContext<ExportBucketState>;

impl ExportBucketContext {
    fn new(handle: Arc<crate::client::Handle>, input: ExportBucketInput) -> Self {
        let state = Arc::new(ExportBucketState::new(input));
        TransferContext { handle, state }
    }

    /// Signal all workers to stop picking up new objects.
    pub(crate) fn cancel(&self) {
        if self.state.cancel_tx.send(true).is_err() {
            tracing::warn!("all receiver ends have been dropped, unable to send a cancellation signal");
        }
    }
}
