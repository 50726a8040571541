/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::atomic::Ordering;

use aws_sdk_s3::types::Object;

use crate::error;

use super::ExportBucketContext;

const DIRECTORY_SUFFIX: char = '/';

/// Keys ending in `/` are folder placeholders created by consoles and tools, not content.
pub(super) fn is_directory_marker(key: &str) -> bool {
    key.ends_with(DIRECTORY_SUFFIX)
}

/// List the first (and only) page of objects in the bucket being exported.
///
/// No continuation token is ever sent, so at most one page (typically 1000 keys) of objects
/// is returned. Directory markers and entries without a key are dropped.
pub(super) async fn list_first_page(ctx: &ExportBucketContext) -> Result<Vec<Object>, error::Error> {
    let output = ctx
        .client()
        .list_objects_v2()
        .bucket(ctx.state.input.bucket())
        .send()
        .await?;

    if output.is_truncated().unwrap_or(false) {
        ctx.state.listing_truncated.store(true, Ordering::SeqCst);
        tracing::warn!(
            "bucket {:?} has more objects than a single listing returns, only the first {} keys are exported",
            ctx.state.input.bucket(),
            output.key_count().unwrap_or_default()
        );
    }

    let mut objects = Vec::new();
    for object in output.contents.unwrap_or_default() {
        match object.key() {
            None => tracing::debug!("skipping object without a key: {:?}", object),
            Some(key) if is_directory_marker(key) => {
                tracing::debug!("skipping directory marker {key:?}");
                ctx.state.directories_skipped.fetch_add(1, Ordering::SeqCst);
            }
            Some(_) => objects.push(object),
        }
    }

    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::export_bucket::{ExportBucketContext, ExportBucketInput};

    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
    use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};

    fn test_context(list_output: ListObjectsV2Output) -> ExportBucketContext {
        let list_objects_rule = mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(|r| r.bucket() == Some("test-bucket") && r.continuation_token().is_none())
            .then_output(move || list_output.clone());
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&list_objects_rule]);
        let config = crate::Config::builder().client(s3_client).build().unwrap();
        let client = crate::Client::new(config);
        let input = ExportBucketInput::builder()
            .bucket("test-bucket")
            .destination("/tmp/test")
            .build()
            .unwrap();

        ExportBucketContext::new(client.handle.clone(), input)
    }

    fn object(key: &str, size: i64) -> Object {
        Object::builder().key(key).size(size).build()
    }

    #[test]
    fn test_is_directory_marker() {
        assert!(is_directory_marker("a/"));
        assert!(is_directory_marker("/"));
        assert!(!is_directory_marker("a/b.txt"));
        assert!(!is_directory_marker("a"));
        assert!(!is_directory_marker(""));
    }

    #[tokio::test]
    async fn test_skip_directory_markers() {
        let ctx = test_context(
            ListObjectsV2Output::builder()
                .contents(object("a/", 0))
                .contents(object("a/b.txt", 10))
                .contents(object("key2", 0))
                .contents(object("folder/nested/", 0))
                .build(),
        );

        let objects = list_first_page(&ctx).await.unwrap();
        let keys: Vec<&str> = objects.iter().filter_map(|o| o.key()).collect();

        assert_eq!(keys, vec!["a/b.txt", "key2"]);
        assert_eq!(2, ctx.state.directories_skipped.load(Ordering::SeqCst));
        assert!(!ctx.state.listing_truncated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_truncated_listing_is_recorded() {
        let ctx = test_context(
            ListObjectsV2Output::builder()
                .contents(object("k1", 1))
                .is_truncated(true)
                .next_continuation_token("token1")
                .key_count(1)
                .build(),
        );

        let objects = list_first_page(&ctx).await.unwrap();
        assert_eq!(1, objects.len());
        assert!(ctx.state.listing_truncated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_bucket() {
        let ctx = test_context(ListObjectsV2Output::builder().build());
        let objects = list_first_page(&ctx).await.unwrap();
        assert!(objects.is_empty());
    }
}
