/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::client::Handle;
use crate::error::Error;

pub(crate) async fn list_buckets(handle: &Handle) -> Result<Vec<String>, Error> {
    let output = handle.config.client().list_buckets().send().await?;

    let names: Vec<String> = output
        .buckets
        .unwrap_or_default()
        .into_iter()
        .filter_map(|bucket| bucket.name)
        .collect();

    tracing::debug!("listed {} buckets", names.len());
    Ok(names)
}
