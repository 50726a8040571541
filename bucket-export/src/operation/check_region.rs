/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::display::DisplayErrorContext;

use crate::client::Handle;
use crate::error::Error;

/// Outcome of checking a bucket's location constraint.
#[derive(Debug)]
#[non_exhaustive]
pub enum RegionCheck {
    /// The bucket reported this (non-empty) location constraint.
    Located(String),

    /// The request succeeded but the location constraint was absent or empty.
    ///
    /// Buckets in a provider's default region can report an empty constraint. This is
    /// nevertheless treated as a failed check.
    Unconstrained,

    /// The location could not be determined, e.g. the bucket lives behind a different regional
    /// endpoint, does not exist, or the request was denied.
    Undetermined(Error),
}

impl RegionCheck {
    /// Whether the bucket may be exported from the configured region.
    pub fn is_match(&self) -> bool {
        matches!(self, RegionCheck::Located(_))
    }

    /// The reported location constraint, if any
    pub fn location(&self) -> Option<&str> {
        match self {
            RegionCheck::Located(location) => Some(location),
            _ => None,
        }
    }

    /// The error that prevented the location from being determined, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            RegionCheck::Undetermined(err) => Some(err),
            _ => None,
        }
    }
}

pub(crate) async fn check_region(handle: &Handle, bucket: String) -> RegionCheck {
    let result = handle
        .config
        .client()
        .get_bucket_location()
        .bucket(&bucket)
        .send()
        .await;

    match result {
        Ok(output) => match output.location_constraint().map(|c| c.as_str()) {
            Some(location) if !location.is_empty() => {
                tracing::debug!("bucket {bucket:?} is located in {location:?}");
                RegionCheck::Located(location.to_owned())
            }
            _ => {
                tracing::debug!("bucket {bucket:?} reported no location constraint");
                RegionCheck::Unconstrained
            }
        },
        Err(err) => {
            tracing::debug!(
                "unable to determine location of bucket {bucket:?}: {}",
                DisplayErrorContext(&err)
            );
            RegionCheck::Undetermined(err.into())
        }
    }
}
