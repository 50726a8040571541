/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::io;
use std::path::Path;
use std::process::ExitCode;

use bucket_export::config::loader::ConfigLoader;
use bucket_export::config::settings::Settings;
use bucket_export::error::Error;
use bucket_export::operation::check_region::RegionCheck;
use bucket_export::operation::export_bucket::ExportBucketOutput;
use bucket_export::{Client, DEFAULT_DESTINATION};

use crate::args::ExportArgs;
use crate::picker::{self, BucketPicker};
use crate::report;
use crate::style::Style;

pub(crate) const USAGE: &str = "cacli export";

const PICK_PROMPT: &str = "Choose a bucket to export:";

#[derive(Debug)]
pub(crate) enum Outcome {
    /// The account owns no buckets
    NoBuckets,
    Exported(ExportBucketOutput),
}

#[derive(Debug)]
pub(crate) enum Failure {
    Error(Error),
    /// The chosen bucket did not pass the region check
    RegionMismatch { region: String, check: RegionCheck },
    Prompt(io::Error),
}

impl From<Error> for Failure {
    fn from(value: Error) -> Self {
        Failure::Error(value)
    }
}

/// Run `cacli export` and map the result to the process exit status.
pub(crate) async fn execute(args: ExportArgs) -> ExitCode {
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let mut picker = picker::for_terminal();
    let result = run(&args, picker.as_mut()).await;
    finish(result)
}

async fn run(args: &ExportArgs, picker: &mut dyn BucketPicker) -> Result<Outcome, Failure> {
    let settings = Settings::load(&args.config)?;
    let credentials = settings.cos_credentials().cloned();
    let region = credentials
        .as_ref()
        .map(|c| c.region().to_owned())
        .unwrap_or_default();

    let config = ConfigLoader::default()
        .set_credentials(credentials)
        .load()
        .await?;
    let client = Client::new(config);

    export_with_client(&client, &region, picker, Path::new(DEFAULT_DESTINATION)).await
}

/// List, pick, check and export using an already configured client.
pub(crate) async fn export_with_client(
    client: &Client,
    region: &str,
    picker: &mut dyn BucketPicker,
    destination: &Path,
) -> Result<Outcome, Failure> {
    status("Authenticating...");
    let buckets = client.list_buckets().await?;
    if buckets.is_empty() {
        return Ok(Outcome::NoBuckets);
    }

    let bucket = picker
        .pick(PICK_PROMPT, &buckets)
        .map_err(Failure::Prompt)?;

    status("Checking bucket...");
    let check = client.check_region(bucket.as_str()).await;
    if !check.is_match() {
        return Err(Failure::RegionMismatch {
            region: region.to_owned(),
            check,
        });
    }

    status(&format!("Exporting {bucket}..."));
    let output = client
        .export_bucket()
        .bucket(bucket)
        .destination(destination)
        .send()
        .await?
        .join()
        .await?;

    Ok(Outcome::Exported(output))
}

fn status(text: &str) {
    eprintln!("{}", Style::stderr().dim(text));
}

fn finish(result: Result<Outcome, Failure>) -> ExitCode {
    match result {
        Ok(Outcome::NoBuckets) => {
            eprintln!("No buckets found.");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Exported(output)) => {
            tracing::info!(
                objects = output.objects_exported(),
                bytes = output.total_bytes_transferred(),
                destination = %output.destination().display(),
                "export finished"
            );
            println!("{} Export complete.", Style::stdout().green("success"));
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let style = Style::stderr();
            eprintln!("{} {}", style.red("error"), report::failure_message(&failure));
            if let Some(detail) = report::failure_detail(&failure) {
                eprintln!("{}", style.dim(&detail));
            }
            ExitCode::FAILURE
        }
    }
}
