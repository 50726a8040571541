/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */

//! Bucket export
//!
//! Lists the buckets of a Cloud Object Storage (or any S3-compatible) account, checks
//! where a bucket is located, and exports every object of a bucket to local disk.
//!
//! # Examples
//!
//! ```no_run
//! use bucket_export::config::loader::ConfigLoader;
//! use bucket_export::types::Credentials;
//!
//! async fn export(credentials: Credentials) -> Result<(), bucket_export::error::Error> {
//!     let config = ConfigLoader::default().credentials(credentials).load().await?;
//!     let client = bucket_export::Client::new(config);
//!
//!     let buckets = client.list_buckets().await?;
//!     let Some(bucket) = buckets.first() else {
//!         return Ok(());
//!     };
//!
//!     if client.check_region(bucket).await.is_match() {
//!         let output = client
//!             .export_bucket()
//!             .bucket(bucket)
//!             .destination("exported_buckets")
//!             .send()
//!             .await?
//!             .join()
//!             .await?;
//!         println!("exported {} objects", output.objects_exported());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

pub(crate) const DEFAULT_CONCURRENCY: usize = 8;

/// Directory (relative to the working directory) that exported buckets are written beneath
/// unless another destination is given.
pub const DEFAULT_DESTINATION: &str = "exported_buckets";

/// Error types emitted by `bucket-export`
pub mod error;

/// Common types used by `bucket-export`
pub mod types;

/// Bucket export client
pub mod client;

/// Operations supported by the client
pub mod operation;

/// Client configuration
pub mod config;

pub use self::client::Client;
pub use self::config::Config;
