/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use tokio::task;

use crate::error::{Error, ErrorKind};

use super::{ExportBucketContext, ExportBucketOutput};

/// Handle for `ExportBucket` operation
///
/// # Cancellation
///
/// Dropping the handle cancels all in-progress downloads at their next await point.
/// [`Self::abort`] additionally signals the workers to stop and waits for them to exit.
/// Files already written are left in place either way.
#[derive(Debug)]
#[non_exhaustive]
pub struct ExportBucketHandle {
    /// All child tasks spawned for this export
    pub(crate) tasks: task::JoinSet<Result<(), Error>>,
    /// The context used to drive the export to completion
    pub(crate) ctx: ExportBucketContext,
}

impl ExportBucketHandle {
    /// Consume the handle and wait for the export to complete
    ///
    /// Returns the first error encountered by any object download. Downloads still in flight
    /// at that point are cancelled and the files they would have written may be missing or
    /// incomplete.
    #[tracing::instrument(skip_all, level = "debug", name = "export-bucket-join")]
    pub async fn join(mut self) -> Result<ExportBucketOutput, Error> {
        let mut first_error = None;
        while let Some(join_result) = self.tasks.join_next().await {
            let result = join_result.map_err(Error::from).and_then(|r| r);
            match result {
                Ok(()) => {}
                Err(err) if err.kind() == &ErrorKind::OperationCancelled => {
                    tracing::debug!("worker exited after cancellation");
                }
                Err(err) => {
                    if first_error.is_none() {
                        // a panicked worker never raised the signal itself
                        self.ctx.cancel();
                        first_error = Some(err);
                    } else {
                        tracing::debug!("dismissing additional export failure: {err}");
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(ExportBucketOutput::from(self.ctx.state.as_ref())),
        }
    }

    /// Abort the export, waiting for all workers to stop.
    pub async fn abort(mut self) {
        self.ctx.cancel();
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
    }
}
