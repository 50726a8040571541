/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::BehaviorVersion;
use aws_types::region::Region;

use crate::config::Builder;
use crate::error::{self, Error};
use crate::types::{ConcurrencySetting, Credentials};
use crate::Config;

const CREDENTIALS_PROVIDER_NAME: &str = "cacli";

/// Load a [`Config`] whose S3 client is authenticated with static [`Credentials`].
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
    credentials: Option<Credentials>,
}

impl ConfigLoader {
    /// Set the concurrency level used for exporting objects.
    ///
    /// Default is [ConcurrencySetting::Auto].
    pub fn concurrency(mut self, concurrency: ConcurrencySetting) -> Self {
        self.builder = self.builder.concurrency(concurrency);
        self
    }

    /// Set the account credentials and region.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the account credentials and region.
    pub fn set_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Build the S3 client against the region specific endpoint and return the configuration.
    ///
    /// Fails with [`ErrorKind::MissingCredentials`](crate::error::ErrorKind::MissingCredentials)
    /// if no credentials were given or either half of the key pair is missing or empty.
    pub async fn load(self) -> Result<Config, Error> {
        let credentials = self
            .credentials
            .ok_or_else(|| error::missing_credentials("no credentials were provided"))?;

        let (access_key_id, secret_access_key) = match (
            non_empty(credentials.access_key_id.as_deref()),
            non_empty(credentials.secret_access_key.as_deref()),
        ) {
            (Some(key), Some(secret)) => (key, secret),
            _ => {
                return Err(error::missing_credentials(
                    "both `access_key_id` and `secret_access_key` are required",
                ))
            }
        };

        let endpoint = credentials.endpoint();
        tracing::debug!(region = credentials.region(), endpoint = %endpoint, "building S3 client");

        let static_credentials = aws_sdk_s3::config::Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .endpoint_url(endpoint)
            .credentials_provider(static_credentials)
            .load()
            .await;

        // S3-compatible services behind an explicit endpoint rarely support virtual hosted buckets
        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(credentials.endpoint.is_some())
            .build();

        let config = self
            .builder
            .client(aws_sdk_s3::Client::from_conf(s3_config))
            .build()?;
        Ok(config)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
