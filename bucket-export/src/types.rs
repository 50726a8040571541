/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use serde::Deserialize;

/// The concurrency settings to use when exporting the objects of a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConcurrencySetting {
    /// Automatically configure a bounded number of download workers.
    #[default]
    Auto,

    /// Explicitly configured number of download workers. Must be greater than zero.
    Explicit(usize),

    /// Issue every `GetObject` request at once and await them jointly.
    ///
    /// NOTE: There is no limit on in-flight requests in this mode. Large buckets may exhaust
    /// sockets or file descriptors.
    Unbounded,
}

/// Credentials and location of a Cloud Object Storage account.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    /// Region the account's buckets are expected to live in, e.g. `us-geo`
    pub region: String,

    /// HMAC access key ID
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// HMAC secret access key
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Explicit endpoint URL. When unset the endpoint is derived from `region`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Credentials {
    /// Create credentials for the given region and key pair.
    pub fn new(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            access_key_id: Some(access_key_id.into()),
            secret_access_key: Some(secret_access_key.into()),
            endpoint: None,
        }
    }

    /// Override the endpoint derived from the region.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// The region the account's buckets are expected to live in
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => endpoint_for_region(&self.region),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("Credentials");
        formatter.field("region", &self.region);
        formatter.field("access_key_id", &self.access_key_id);
        formatter.field(
            "secret_access_key",
            &self
                .secret_access_key
                .as_ref()
                .map(|_| "*** Sensitive Data Redacted ***"),
        );
        formatter.field("endpoint", &self.endpoint);
        formatter.finish()
    }
}

/// Public Cloud Object Storage endpoint for a region
pub fn endpoint_for_region(region: &str) -> String {
    format!("https://s3.{region}.cloud-object-storage.appdomain.cloud")
}
