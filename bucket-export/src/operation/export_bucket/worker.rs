/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use async_channel::{Receiver, Sender};
use futures_util::future;
use path_clean::PathClean;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{self, ErrorKind};

use super::list_objects;
use super::ExportBucketContext;

#[derive(Debug)]
pub(super) struct ExportObjectJob {
    key: String,
}

impl ExportObjectJob {
    fn from_object(object: aws_sdk_s3::types::Object) -> Option<Self> {
        object.key.map(|key| ExportObjectJob { key })
    }
}

// worker to enumerate the objects of a bucket
pub(super) async fn discover_objects(
    ctx: ExportBucketContext,
    work_tx: Sender<ExportObjectJob>,
) -> Result<(), error::Error> {
    let objects = list_objects::list_first_page(&ctx).await?;
    tracing::debug!("discovered {} objects to export", objects.len());

    let mut cancel_rx = ctx.state.cancel_rx.clone();

    for job in objects.into_iter().filter_map(ExportObjectJob::from_object) {
        tokio::select! {
            _ = cancel_rx.changed() => {
                tracing::debug!("received cancellation signal, not queueing new objects");
                return Err(error::operation_cancelled());
            }
            sent = work_tx.send(job) => {
                if sent.is_err() {
                    tracing::error!("all receiver ends have been dropped, unable to send a job!");
                    break;
                }
            }
        }
    }

    Ok(())
}

// worker to export objects received from `discover_objects`
pub(super) async fn export_objects(
    ctx: ExportBucketContext,
    work_rx: Receiver<ExportObjectJob>,
) -> Result<(), error::Error> {
    let mut cancel_rx = ctx.state.cancel_rx.clone();
    loop {
        tokio::select! {
            _ = cancel_rx.changed() => {
                tracing::debug!("received cancellation signal, exiting and not exporting a new object");
                return Err(error::operation_cancelled());
            }
            job = work_rx.recv() => {
                match job {
                    Err(_) => break,
                    Ok(job) => {
                        tracing::debug!("worker recv'd request for key {:?}", job.key);
                        tokio::select! {
                            _ = cancel_rx.changed() => {
                                tracing::debug!("received cancellation signal while exporting key {:?}", job.key);
                                return Err(error::operation_cancelled());
                            }
                            result = export_and_record(&ctx, &job) => result?,
                        }
                    }
                }
            }
        }
    }

    tracing::trace!("req channel closed, worker finished");
    Ok(())
}

// list and export every object at once, one request per object
pub(super) async fn export_all_objects(ctx: ExportBucketContext) -> Result<(), error::Error> {
    let jobs: Vec<ExportObjectJob> = list_objects::list_first_page(&ctx)
        .await?
        .into_iter()
        .filter_map(ExportObjectJob::from_object)
        .collect();
    tracing::debug!("exporting {} objects without a concurrency limit", jobs.len());

    future::try_join_all(jobs.iter().map(|job| export_and_record(&ctx, job))).await?;
    Ok(())
}

async fn export_and_record(
    ctx: &ExportBucketContext,
    job: &ExportObjectJob,
) -> Result<(), error::Error> {
    match export_single_obj(ctx, job).await {
        Ok(bytes_written) => {
            ctx.state.objects_exported.fetch_add(1, Ordering::SeqCst);
            ctx.state
                .total_bytes_transferred
                .fetch_add(bytes_written, Ordering::SeqCst);
            tracing::debug!("finished exporting key {:?} ({bytes_written} bytes)", job.key);
            Ok(())
        }
        Err(err) => {
            tracing::debug!("failed to export key {:?}: {}", job.key, err);
            // abort the whole export on the first failure
            ctx.cancel();
            Err(err)
        }
    }
}

async fn export_single_obj(
    ctx: &ExportBucketContext,
    job: &ExportObjectJob,
) -> Result<u64, error::Error> {
    let key_path = local_key_path(ctx.state.destination(), &job.key)?;

    let output = ctx
        .client()
        .get_object()
        .bucket(ctx.state.input.bucket())
        .key(&job.key)
        .send()
        .await?;

    if let Some(parent_dir) = key_path.parent() {
        fs::create_dir_all(parent_dir).await?;
    }
    let mut dest = fs::File::create(&key_path).await?;

    let mut body = output.body;
    let mut bytes_written = 0u64;
    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(error::from_kind(ErrorKind::IOError))?
    {
        dest.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    dest.flush().await?;

    Ok(bytes_written)
}

/// Derive the local path for a given key, `<root_dir>/<key>`
fn local_key_path(root_dir: &Path, key: &str) -> Result<PathBuf, error::Error> {
    let root_dir = root_dir.clean();
    let local_path = root_dir.join(key).clean();
    validate_path(&root_dir, &local_path, key)?;

    Ok(local_path)
}

fn validate_path(root_dir: &Path, local_path: &Path, key: &str) -> Result<(), error::Error> {
    // validate the resolved key path doesn't resolve outside the destination directory
    if !local_path.starts_with(root_dir) || local_path == root_dir {
        let err = error::invalid_input(format!(
            "Unable to export key: '{key}', its relative path resolves outside the target destination directory"
        ));
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_s3::error::DisplayErrorContext;

    struct ObjectKeyPathTest {
        key: &'static str,
        expected: Result<&'static str, &'static str>,
    }

    fn success_path_test(key: &'static str, expected: &'static str) -> ObjectKeyPathTest {
        ObjectKeyPathTest {
            key,
            expected: Ok(expected),
        }
    }

    // we only use this on linux so windows only test complains
    #[allow(dead_code)]
    fn error_path_test(key: &'static str, expected_err: &'static str) -> ObjectKeyPathTest {
        ObjectKeyPathTest {
            key,
            expected: Err(expected_err),
        }
    }

    #[cfg(target_family = "unix")]
    #[test]
    fn test_local_key_path_linux() {
        let tests = &[
            success_path_test("x.txt", "exported_buckets/photos/x.txt"),
            success_path_test("2023/Jan/1.png", "exported_buckets/photos/2023/Jan/1.png"),
            success_path_test(
                "many////delims-in-a-row",
                "exported_buckets/photos/many/delims-in-a-row",
            ),
            success_path_test("a/./b.txt", "exported_buckets/photos/a/b.txt"),
            success_path_test("a/../b.txt", "exported_buckets/photos/b.txt"),
            // resolves outside the bucket folder
            error_path_test("../2023/Jan/1.png", "Unable to export key: '../2023/Jan/1.png'"),
            error_path_test("/2023/Jan/1.png", "Unable to export key: '/2023/Jan/1.png'"),
            error_path_test(
                "foo/../2023/../../Jan/1.png",
                "Unable to export key: 'foo/../2023/../../Jan/1.png'",
            ),
            error_path_test("../other-bucket/object.dat", "Unable to export key"),
            // resolves to the bucket folder itself
            error_path_test("a/..", "Unable to export key: 'a/..'"),
        ];

        for test in tests {
            let root_dir = PathBuf::from("./exported_buckets/photos");
            let actual = local_key_path(&root_dir, test.key);
            match test.expected {
                Ok(expected) => {
                    let actual = actual.expect("expected success");
                    let actual_str = actual.to_str().expect("valid utf-8 path");
                    assert_eq!(expected, actual_str);
                }
                Err(expected_err_substr) => {
                    let err = actual
                        .expect_err("path resolves outside of parent folder, expected error");
                    let actual_err = format!("{}", DisplayErrorContext(err));
                    assert!(
                        actual_err.contains(expected_err_substr),
                        "'{actual_err}' does not contain '{expected_err_substr}'"
                    );
                }
            }
        }
    }

    #[cfg(target_family = "windows")]
    #[test]
    fn test_local_key_path_windows() {
        let test = success_path_test("2023/Jan/1.png", "test\\2023\\Jan\\1.png");
        let root_dir = PathBuf::from("test");
        let actual = local_key_path(&root_dir, test.key).unwrap();
        let actual_str = actual.to_str().expect("valid utf-8 path");
        assert_eq!(*test.expected.as_ref().unwrap(), actual_str);
    }
}
