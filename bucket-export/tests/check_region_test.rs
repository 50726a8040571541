/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::error::ErrorMetadata;
use aws_sdk_s3::operation::get_bucket_location::{GetBucketLocationError, GetBucketLocationOutput};
use aws_sdk_s3::types::BucketLocationConstraint;
use aws_smithy_mocks_experimental::{mock, mock_client, Rule, RuleMode};
use bucket_export::error::ErrorKind;
use bucket_export::operation::check_region::RegionCheck;

fn test_client(rule: &Rule) -> bucket_export::Client {
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[rule]);
    let config = bucket_export::Config::builder()
        .client(client)
        .build()
        .unwrap();
    bucket_export::Client::new(config)
}

fn location_rule(constraint: Option<&'static str>) -> Rule {
    mock!(aws_sdk_s3::Client::get_bucket_location)
        .match_requests(|r| r.bucket() == Some("test-bucket"))
        .then_output(move || {
            GetBucketLocationOutput::builder()
                .set_location_constraint(constraint.map(BucketLocationConstraint::from))
                .build()
        })
}

#[tokio::test]
async fn test_bucket_with_location_matches() {
    let rule = location_rule(Some("us-standard"));
    let client = test_client(&rule);

    let check = client.check_region("test-bucket").await;
    assert!(check.is_match());
    assert_eq!(Some("us-standard"), check.location());
    assert!(check.error().is_none());
}

#[tokio::test]
async fn test_empty_location_does_not_match() {
    for constraint in [Some(""), None] {
        let rule = location_rule(constraint);
        let client = test_client(&rule);

        let check = client.check_region("test-bucket").await;
        assert!(!check.is_match(), "{constraint:?}");
        assert!(matches!(check, RegionCheck::Unconstrained), "{check:?}");
    }
}

#[tokio::test]
async fn test_failed_location_request_does_not_match() {
    let rule = mock!(aws_sdk_s3::Client::get_bucket_location).then_error(|| {
        GetBucketLocationError::generic(
            ErrorMetadata::builder()
                .code("NoSuchBucket")
                .message("The specified bucket does not exist.")
                .build(),
        )
    });
    let client = test_client(&rule);

    let check = client.check_region("test-bucket").await;
    assert!(!check.is_match());
    assert!(check.location().is_none());
    let err = check.error().expect("undetermined check keeps the error");
    assert_eq!(&ErrorKind::NotFound, err.kind());
}
