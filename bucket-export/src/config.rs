/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

use crate::types::ConcurrencySetting;

/// Client configuration loader
pub mod loader;

/// Settings file holding account credentials
pub mod settings;

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    concurrency: ConcurrencySetting,
    client: aws_sdk_s3::client::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the concurrency setting to use when exporting a bucket.
    pub fn concurrency(&self) -> &ConcurrencySetting {
        &self.concurrency
    }

    /// The Amazon S3 client instance that will be used to send requests.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    concurrency: ConcurrencySetting,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Set the concurrency level used for exporting objects.
    ///
    /// This sets the maximum number of concurrent in-flight `GetObject` requests.
    /// Default is [ConcurrencySetting::Auto].
    pub fn concurrency(mut self, concurrency: ConcurrencySetting) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set an explicit S3 client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Result<Config, BuildError> {
        let client = self
            .client
            .ok_or_else(|| BuildError::missing_field("client", "an S3 client is required"))?;
        Ok(Config {
            concurrency: self.concurrency,
            client,
        })
    }
}
