use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".localiserc.json";

/// File holding the translation backend credentials.
pub const CREDENTIALS_FILE_NAME: &str = "localise.config.json";

/// Module the rewritten sources import `t`, `useT` and `initLocalisation` from.
pub const DEFAULT_SDK_MODULE: &str = "localise-ai-sdk";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/translate";

/// How rewritten files obtain the lookup function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LookupStyle {
    /// `import { t } from "<sdk>"`
    #[default]
    Global,
    /// `import { useT } from "<sdk>"` plus `const t = useT();` in the component body.
    Hook,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default = "default_sdk_module")]
    pub sdk_module: String,
    #[serde(default)]
    pub lookup_style: LookupStyle,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_excluded_attributes")]
    pub excluded_attributes: Vec<String>,
    #[serde(default = "default_entry_candidates")]
    pub entry_candidates: Vec<String>,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_translations_dir() -> String {
    "translations".to_string()
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_sdk_module() -> String {
    DEFAULT_SDK_MODULE.to_string()
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**"].map(String::from).to_vec()
}

/// Attributes that carry structure rather than display text.
fn default_excluded_attributes() -> Vec<String> {
    [
        "style",
        "className",
        "class",
        "type",
        "name",
        "id",
        "key",
        "href",
        "to",
        "path",
        "src",
        "source",
        "width",
        "height",
        "size",
        "variant",
        "role",
        "testID",
        "data-testid",
        "keyboardType",
        "autoComplete",
        "autoCapitalize",
        "resizeMode",
        "target",
        "rel",
        "lang",
        "htmlFor",
        "value",
    ]
    .map(String::from)
    .to_vec()
}

fn default_entry_candidates() -> Vec<String> {
    [
        "app/_layout.tsx",
        "app/_layout.jsx",
        "app/index.tsx",
        "app/index.jsx",
        "App.tsx",
        "App.jsx",
    ]
    .map(String::from)
    .to_vec()
}

fn default_request_delay_ms() -> u64 {
    1500
}

fn default_batch_size() -> usize {
    25
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            translations_dir: default_translations_dir(),
            source_locale: default_source_locale(),
            sdk_module: default_sdk_module(),
            lookup_style: LookupStyle::default(),
            includes: Vec::new(),
            ignores: default_ignores(),
            excluded_attributes: default_excluded_attributes(),
            entry_candidates: default_entry_candidates(),
            request_delay_ms: default_request_delay_ms(),
            batch_size: default_batch_size(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a
    /// numeric setting is out of range.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.batch_size == 0 {
            bail!("'batchSize' must be greater than zero");
        }
        if self.source_locale.trim().is_empty() {
            bail!("'sourceLocale' must not be empty");
        }

        Ok(())
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when defaults are used.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

// ============================================================
// Credentials
// ============================================================

/// Backend credentials needed by `translate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub project_id: String,
    pub endpoint: String,
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("no credentials found: create {} with \"apiKey\" and \"projectId\" or set LOCALISE_API_KEY and LOCALISE_PROJECT_ID", .path.display())]
    NotFound { path: PathBuf },
    #[error("credentials are missing \"{field}\" (checked {} and the environment)", .path.display())]
    MissingField { field: &'static str, path: PathBuf },
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid credentials record", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsFile {
    api_key: Option<String>,
    project_id: Option<String>,
    endpoint: Option<String>,
}

/// Load credentials from `<project_root>/localise.config.json`, letting the
/// `LOCALISE_API_KEY`, `LOCALISE_PROJECT_ID` and `LOCALISE_ENDPOINT`
/// environment variables override individual fields.
pub fn load_credentials(project_root: &Path) -> Result<Credentials, CredentialsError> {
    load_credentials_with(project_root, |name| env::var(name).ok())
}

pub fn load_credentials_with(
    project_root: &Path,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, CredentialsError> {
    let path = project_root.join(CREDENTIALS_FILE_NAME);

    let file = if path.exists() {
        let content = fs::read_to_string(&path).map_err(|source| CredentialsError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str::<CredentialsFile>(&content).map_err(|source| {
            CredentialsError::Invalid {
                path: path.clone(),
                source,
            }
        })?
    } else {
        CredentialsFile::default()
    };

    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let api_key = non_empty(lookup_env("LOCALISE_API_KEY")).or(non_empty(file.api_key));
    let project_id = non_empty(lookup_env("LOCALISE_PROJECT_ID")).or(non_empty(file.project_id));
    let endpoint = non_empty(lookup_env("LOCALISE_ENDPOINT")).or(non_empty(file.endpoint));

    if api_key.is_none() && project_id.is_none() && !path.exists() {
        return Err(CredentialsError::NotFound { path });
    }

    let api_key = api_key.ok_or_else(|| CredentialsError::MissingField {
        field: "apiKey",
        path: path.clone(),
    })?;
    let project_id = project_id.ok_or_else(|| CredentialsError::MissingField {
        field: "projectId",
        path: path.clone(),
    })?;

    Ok(Credentials {
        api_key,
        project_id,
        endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source_root, "src");
        assert_eq!(config.translations_dir, "translations");
        assert_eq!(config.source_locale, "en");
        assert_eq!(config.lookup_style, LookupStyle::Global);
        assert!(config.excluded_attributes.contains(&"style".to_string()));
        assert!(config.excluded_attributes.contains(&"path".to_string()));
        assert!(config.excluded_attributes.contains(&"value".to_string()));
        assert_eq!(config.entry_candidates[0], "app/_layout.tsx");
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{
              "sourceRoot": "app",
              "lookupStyle": "hook",
              "requestDelayMs": 0
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.source_root, "app");
        assert_eq!(config.lookup_style, LookupStyle::Hook);
        assert_eq!(config.request_delay_ms, 0);
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.ignores, default_ignores());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        assert_eq!(find_config_file(&sub_dir), Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.path.is_none());
        assert_eq!(result.config.translations_dir, "translations");
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_zero_batch_size() {
        let config = Config {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CREDENTIALS_FILE_NAME),
            r#"{ "apiKey": "k-123", "projectId": "p-1" }"#,
        )
        .unwrap();

        let credentials = load_credentials_with(dir.path(), no_env).unwrap();
        assert_eq!(credentials.api_key, "k-123");
        assert_eq!(credentials.project_id, "p-1");
        assert_eq!(credentials.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_credentials_not_found() {
        let dir = tempdir().unwrap();
        let err = load_credentials_with(dir.path(), no_env).unwrap_err();
        assert!(matches!(err, CredentialsError::NotFound { .. }));
    }

    #[test]
    fn test_credentials_missing_field() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CREDENTIALS_FILE_NAME),
            r#"{ "apiKey": "k-123" }"#,
        )
        .unwrap();

        let err = load_credentials_with(dir.path(), no_env).unwrap_err();
        assert!(matches!(
            err,
            CredentialsError::MissingField {
                field: "projectId",
                ..
            }
        ));
    }

    #[test]
    fn test_credentials_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CREDENTIALS_FILE_NAME), "{ not json").unwrap();

        let err = load_credentials_with(dir.path(), no_env).unwrap_err();
        assert!(matches!(err, CredentialsError::Invalid { .. }));
    }

    #[test]
    fn test_credentials_env_overrides_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CREDENTIALS_FILE_NAME),
            r#"{ "apiKey": "file-key", "projectId": "p-1" }"#,
        )
        .unwrap();

        let credentials = load_credentials_with(dir.path(), |name| match name {
            "LOCALISE_API_KEY" => Some("env-key".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(credentials.api_key, "env-key");
        assert_eq!(credentials.project_id, "p-1");
    }
}
