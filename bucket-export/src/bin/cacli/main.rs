/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! `cacli` command line interface

use std::process::ExitCode;

use clap::Parser;

mod args;
mod export;
mod picker;
mod report;
mod style;

use args::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return args::report_parse_error(&err),
    };
    match cli.command {
        Command::Export(args) => export::execute(args).await,
    }
}
