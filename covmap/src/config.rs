use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::CovmapError;

pub const DEFAULT_WORKSPACE_DIR: &str = "test_coverage_projects";
pub const DEFAULT_EXEC_DATA_DIR: &str = "exec-data";
pub const DEFAULT_REPORT_PATH: &str = "test_coverage.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CovmapConfig {
    pub workspace_dir: Option<String>,
    pub exec_data_dir: Option<String>,
    pub report_path: Option<String>,
    pub baseline_ref: Option<String>,
    pub classes_dirs: Option<Vec<String>>,
    pub run_tests: Option<bool>,
    pub test_command: Option<String>,
    pub verbose: Option<bool>,
}

pub fn discover_config_path(dir: &Path) -> Option<PathBuf> {
    let names = [
        "covmap.toml",
        "covmap.config.json",
        "covmap.config.json5",
        "covmap.config.yaml",
        "covmap.config.yml",
        ".covmaprc",
        ".covmaprc.json",
        ".covmaprc.yaml",
        ".covmaprc.yml",
    ];
    names
        .into_iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

pub fn load_config(dir: &Path) -> Result<CovmapConfig, CovmapError> {
    match discover_config_path(dir) {
        Some(path) => load_config_from_path(&path),
        None => Ok(CovmapConfig::default()),
    }
}

pub fn load_config_from_path(path: &Path) -> Result<CovmapConfig, CovmapError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CovmapError::io(path, e))?;
    let ext = path
        .extension()
        .and_then(|x| x.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "toml" => parse_toml_config(path, &raw),
        "yaml" | "yml" => {
            serde_yaml::from_str::<CovmapConfig>(&raw).map_err(|err| parse_error(path, err))
        }
        // `.covmaprc` carries no extension and is read as JSON.
        _ => json5::from_str::<CovmapConfig>(&raw)
            .or_else(|_| serde_json::from_str::<CovmapConfig>(&raw))
            .map_err(|err| parse_error(path, err)),
    }
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> CovmapError {
    CovmapError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn parse_toml_config(path: &Path, raw: &str) -> Result<CovmapConfig, CovmapError> {
    let toml_value = toml::from_str::<toml::Value>(raw).map_err(|err| parse_error(path, err))?;
    let json_value = serde_json::to_value(toml_value).map_err(|err| parse_error(path, err))?;
    serde_json::from_value::<CovmapConfig>(normalize_toml_keys_to_camel_case(&json_value))
        .map_err(|err| parse_error(path, err))
}

fn normalize_toml_keys_to_camel_case(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(object) => JsonValue::Object(
            object
                .iter()
                .map(|(key, value)| {
                    (
                        normalize_toml_key(key),
                        normalize_toml_keys_to_camel_case(value),
                    )
                })
                .collect(),
        ),
        JsonValue::Array(array) => JsonValue::Array(
            array
                .iter()
                .map(normalize_toml_keys_to_camel_case)
                .collect(),
        ),
        other => other.clone(),
    }
}

fn normalize_toml_key(key: &str) -> String {
    let mut segments = key.split('_').filter(|segment| !segment.is_empty());
    let Some(first_segment) = segments.next() else {
        return key.to_string();
    };
    segments.fold(first_segment.to_string(), |mut out, segment| {
        let mut chars = segment.chars();
        if let Some(first_char) = chars.next() {
            out.push(first_char.to_ascii_uppercase());
            out.extend(chars);
        }
        out
    })
}
