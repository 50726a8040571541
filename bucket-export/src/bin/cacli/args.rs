/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;
use std::process::ExitCode;

/// Default settings file, relative to the working directory
pub(crate) const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, clap::Parser)]
#[command(name = "cacli")]
#[command(about = "Cloud Object Storage command line tools.")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    /// Export every object of a bucket to ./exported_buckets/<bucket>
    #[command(disable_help_flag = true)]
    Export(ExportArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExportArgs {
    /// Settings file supplying the Cloud Object Storage credentials
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub(crate) config: PathBuf,

    /// Print usage
    #[arg(short = 'h', long = "help", default_value_t = false, action = clap::ArgAction::SetTrue)]
    pub(crate) help: bool,
}

/// Print a clap error (or clap's own help output) and pick the exit status.
///
/// Usage errors exit with 1 like every other failure of the tool.
pub(crate) fn report_parse_error(err: &clap::Error) -> ExitCode {
    if err.print().is_err() {
        return ExitCode::FAILURE;
    }
    if is_usage_error(err) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// help and version output are rendered as "errors" that go to stdout
fn is_usage_error(err: &clap::Error) -> bool {
    err.use_stderr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_export(args: &[&str]) -> ExportArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Export(args) => args,
        }
    }

    #[test]
    fn test_default_config_path() {
        let args = parse_export(&["cacli", "export"]);
        assert_eq!(PathBuf::from("config.yaml"), args.config);
        assert!(!args.help);
    }

    #[test]
    fn test_config_flags() {
        let args = parse_export(&["cacli", "export", "--config", "creds.json"]);
        assert_eq!(PathBuf::from("creds.json"), args.config);

        let args = parse_export(&["cacli", "export", "-c", "other.toml"]);
        assert_eq!(PathBuf::from("other.toml"), args.config);
    }

    #[test]
    fn test_help_flags() {
        assert!(parse_export(&["cacli", "export", "--help"]).help);
        assert!(parse_export(&["cacli", "export", "-h"]).help);
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        let err = Cli::try_parse_from(["cacli", "export", "--bucket", "b"]).unwrap_err();
        assert!(is_usage_error(&err));
    }

    #[test]
    fn test_top_level_help_is_not_a_usage_error() {
        let err = Cli::try_parse_from(["cacli", "--help"]).unwrap_err();
        assert!(!is_usage_error(&err));
    }
}
