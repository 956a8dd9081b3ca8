/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use super::BundleConfig;
use crate::error::{BundleError, BundleResult};

pub const CONFIG_FILE: &str = "bundle.toml";

/// Load the config for a run rooted at `working_dir`.
/// An explicit path must exist; the implicit `bundle.toml` is optional.
pub fn load_bundle_config(
  working_dir: &Path,
  explicit: Option<&Path>,
) -> BundleResult<BundleConfig> {
  let (path, required) = match explicit {
    Some(p) => (working_dir.join(p), true),
    None => (working_dir.join(CONFIG_FILE), false),
  };
  if !path.is_file() {
    if required {
      return Err(BundleError::Config { path, message: "file not found".to_string() });
    }
    return Ok(BundleConfig::default());
  }
  let content = std::fs::read_to_string(&path).map_err(|e| BundleError::io(&path, e))?;
  parse_bundle_config(&content, &path)
}

pub fn parse_bundle_config(content: &str, path: &Path) -> BundleResult<BundleConfig> {
  let config: BundleConfig = toml::from_str(content)
    .map_err(|e| BundleError::Config { path: path.to_path_buf(), message: e.to_string() })?;
  config
    .validate()
    .map_err(|message| BundleError::Config { path: path.to_path_buf(), message })?;
  Ok(config)
}

/// Base name of the compiled `.wasm` file: `build.crate_name` if set, otherwise
/// `[package].name` from `<working_dir>/Cargo.toml`, with `-` mapped to `_`.
pub fn resolve_artifact_name(config: &BundleConfig, working_dir: &Path) -> BundleResult<String> {
  if let Some(name) = &config.build.crate_name {
    return Ok(name.replace('-', "_"));
  }
  let manifest: PathBuf = working_dir.join("Cargo.toml");
  let content = std::fs::read_to_string(&manifest).map_err(|e| BundleError::Config {
    path: manifest.clone(),
    message: format!("cannot read package manifest ({e}); set build.crate_name in {CONFIG_FILE}"),
  })?;
  let table: toml::Table = toml::from_str(&content)
    .map_err(|e| BundleError::Config { path: manifest.clone(), message: e.to_string() })?;
  let name = table
    .get("package")
    .and_then(|p| p.get("name"))
    .and_then(|n| n.as_str())
    .ok_or_else(|| BundleError::Config {
      path: manifest.clone(),
      message: "missing [package].name".to_string(),
    })?;
  Ok(name.replace('-', "_"))
}
