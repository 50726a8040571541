/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::error::ErrorMetadata;
use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
use aws_sdk_s3::operation::list_buckets::ListBucketsOutput;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_mocks_experimental::{mock, Rule};
use bytes::Bytes;
use std::{io, iter, path::Path, sync::Arc};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct MockObject {
    object: aws_sdk_s3::types::Object,
    contents: Bytes,
    error_on_get: bool,
}

impl MockObject {
    /// Create a new mock object with the given key and contents
    pub fn new(key: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let contents: Bytes = data.into();
        let object = aws_sdk_s3::types::Object::builder()
            .key(key.into())
            .size(contents.len() as i64)
            .build();
        Self {
            object,
            contents,
            error_on_get: false,
        }
    }

    /// Create a new mock object with the given key and content size using random data
    pub fn new_random(key: impl Into<String>, size: usize) -> Self {
        let data: String = iter::repeat_with(fastrand::alphanumeric)
            .take(size)
            .collect();
        Self::new(key, data)
    }

    /// Create a new mock object that fails when `get_object` is invoked on it
    pub fn new_with_error(key: impl Into<String>) -> Self {
        let mut obj = Self::new_random(key, 10);
        obj.error_on_get = true;
        obj
    }

    pub fn key(&self) -> &str {
        self.object.key().expect("key set")
    }

    pub fn contents(&self) -> &Bytes {
        &self.contents
    }

    /// Get the output for the `get_object` invocation
    fn get_object_output(&self) -> GetObjectOutput {
        assert!(!self.error_on_get, "mock object expects error");
        GetObjectOutput::builder()
            .body(ByteStream::from(self.contents.clone()))
            .content_length(self.contents.len() as i64)
            .build()
    }
}

/// Get the mock rule for this object when `get_object` is API is invoked for the corresponding key
fn get_object_rule(mobj: &MockObject) -> Rule {
    let share1 = Arc::new(mobj.clone());
    let share2 = share1.clone();

    if mobj.error_on_get {
        mock!(aws_sdk_s3::Client::get_object)
            .match_requests(move |r| r.key() == share1.object.key())
            .then_error(|| {
                GetObjectError::generic(
                    ErrorMetadata::builder()
                        .code("AccessDenied")
                        .message("Access Denied")
                        .build(),
                )
            })
    } else {
        mock!(aws_sdk_s3::Client::get_object)
            .match_requests(move |r| r.key() == share1.object.key())
            .then_output(move || share2.get_object_output())
    }
}

/// Mock bucket with the set of objects for testing bucket exports.
///
/// NOTE: This is limited to a single `ListObjectsV2` response.
#[derive(Debug)]
pub struct MockBucket {
    name: String,
    objects: Vec<MockObject>,
    truncated: bool,
}

impl MockBucket {
    pub fn builder(name: impl Into<String>) -> MockBucketBuilder {
        MockBucketBuilder {
            name: name.into(),
            objects: Vec::new(),
            truncated: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn objects(&self) -> &[MockObject] {
        &self.objects
    }

    /// Return the mock rules representing this bucket. This includes
    /// the `ListObjectsV2` call as well as all of the `GetObject` calls.
    pub fn rules(&self) -> Vec<Rule> {
        let contents = self.objects.iter().map(|m| m.object.clone()).collect();

        let mut list_output = ListObjectsV2Output::builder()
            .name(self.name.clone())
            .set_contents(Some(contents))
            .key_count(self.objects.len() as i32);
        if self.truncated {
            list_output = list_output
                .is_truncated(true)
                .next_continuation_token("next-page");
        }
        let list_output = list_output.build();

        let bucket = self.name.clone();
        let list_rule = mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(move |r| r.bucket() == Some(bucket.as_str()))
            .then_output(move || list_output.clone());

        let mut rules: Vec<Rule> = self
            .objects
            .iter()
            .filter(|m| !m.key().ends_with('/'))
            .map(get_object_rule)
            .collect();

        rules.push(list_rule);
        rules
    }
}

#[derive(Debug)]
pub struct MockBucketBuilder {
    name: String,
    objects: Vec<MockObject>,
    truncated: bool,
}

impl MockBucketBuilder {
    /// Add a key with the given contents
    pub fn key_with_contents(mut self, key: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.objects.push(MockObject::new(key, data));
        self
    }

    /// Create a new key with the given content size using random data
    pub fn key_with_size(mut self, key: impl Into<String>, size: usize) -> Self {
        self.objects.push(MockObject::new_random(key, size));
        self
    }

    /// Create a new key that returns an error when `get_object` API operation is invoked
    pub fn key_with_error(mut self, key: impl Into<String>) -> Self {
        self.objects.push(MockObject::new_with_error(key));
        self
    }

    /// Report the listing as truncated, as if more objects existed past the first page
    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    /// Consume the builder and build a `MockBucket`
    pub fn build(self) -> MockBucket {
        MockBucket {
            name: self.name,
            objects: self.objects,
            truncated: self.truncated,
        }
    }
}

/// Mock rule answering `ListBuckets` with the given bucket names
pub fn list_buckets_rule(names: &[&str]) -> Rule {
    let buckets: Vec<aws_sdk_s3::types::Bucket> = names
        .iter()
        .map(|name| aws_sdk_s3::types::Bucket::builder().name(*name).build())
        .collect();
    mock!(aws_sdk_s3::Client::list_buckets).then_output(move || {
        ListBucketsOutput::builder()
            .set_buckets(Some(buckets.clone()))
            .build()
    })
}

/// Walk the directory rooted at `dir` and gather all of the relative path filenames (sans
/// directory names)
pub fn relative_path_names(dir: &Path) -> Result<Vec<String>, io::Error> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<String> = WalkDir::new(dir)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| !e.file_type().is_dir())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .expect("prefix present")
                .to_str()
                .expect("valid utf8 path")
                .replace(std::path::MAIN_SEPARATOR, "/")
        })
        .collect();

    paths.sort();
    Ok(paths)
}
