/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::types::Credentials;

/// Prefix of environment variables that override values from the settings file,
/// e.g. `CACLI_CREDENTIALS__COS__REGION`.
pub const ENV_PREFIX: &str = "CACLI";

const ENV_PREFIX_SEPARATOR: &str = "_";
const ENV_SEPARATOR: &str = "__";

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_PREFIX_SEPARATOR)
        .separator(ENV_SEPARATOR)
}

/// Contents of a settings file.
///
/// ```yaml
/// credentials:
///   cos:
///     region: us-geo
///     access_key_id: "..."
///     secret_access_key: "..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct Settings {
    /// Credentials per service
    #[serde(default)]
    pub credentials: CredentialSettings,
}

/// The `credentials` section of a settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct CredentialSettings {
    /// Cloud Object Storage credentials
    #[serde(default)]
    pub cos: Option<Credentials>,
}

impl Settings {
    /// Load settings from `path`, with environment overrides applied on top.
    ///
    /// The file format (YAML, TOML, JSON, ...) is inferred from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Settings, Error> {
        Self::load_with_environment(path.as_ref(), environment())
    }

    fn load_with_environment(
        path: &Path,
        environment: ::config::Environment,
    ) -> Result<Settings, Error> {
        tracing::debug!("loading settings from {}", path.display());

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Cloud Object Storage credentials, if present
    pub fn cos_credentials(&self) -> Option<&Credentials> {
        self.credentials.cos.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn settings_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_settings() {
        let file = settings_file(
            ".yaml",
            r#"
credentials:
  cos:
    region: us-geo
    access_key_id: abc
    secret_access_key: def
"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        let creds = settings.cos_credentials().expect("cos credentials");
        assert_eq!("us-geo", creds.region());
        assert_eq!(Some("abc"), creds.access_key_id.as_deref());
        assert_eq!(Some("def"), creds.secret_access_key.as_deref());
        assert!(creds.endpoint.is_none());
    }

    #[test]
    fn test_load_json_settings_without_keys() {
        let file = settings_file(
            ".json",
            r#"{"credentials": {"cos": {"region": "eu-de", "endpoint": "http://localhost:9000"}}}"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        let creds = settings.cos_credentials().expect("cos credentials");
        assert!(creds.access_key_id.is_none());
        assert_eq!("http://localhost:9000", creds.endpoint());
    }

    #[test]
    fn test_load_settings_without_credentials_section() {
        let file = settings_file(".toml", "");
        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.cos_credentials().is_none());
    }

    fn with_variables(vars: &[(&str, &str)]) -> ::config::Environment {
        let vars: ::config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = settings_file(
            ".yaml",
            "credentials:\n  cos:\n    region: us-geo\n    access_key_id: abc\n",
        );
        let env = with_variables(&[
            ("CACLI_CREDENTIALS__COS__REGION", "eu-de"),
            ("CACLI_CREDENTIALS__COS__SECRET_ACCESS_KEY", "from-env"),
            ("OTHER_CREDENTIALS__COS__REGION", "ignored"),
        ]);

        let settings = Settings::load_with_environment(file.path(), env).unwrap();
        let creds = settings.cos_credentials().expect("cos credentials");
        assert_eq!("eu-de", creds.region());
        assert_eq!(Some("abc"), creds.access_key_id.as_deref());
        assert_eq!(Some("from-env"), creds.secret_access_key.as_deref());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("missing.yaml")).unwrap_err();
        assert_eq!(&ErrorKind::ConfigInvalid, err.kind());
    }

    #[test]
    fn test_load_missing_region() {
        let file = settings_file(".yaml", "credentials:\n  cos:\n    access_key_id: abc\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert_eq!(&ErrorKind::ConfigInvalid, err.kind());
    }
}
