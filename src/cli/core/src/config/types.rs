/* src/cli/core/src/config/types.rs */

use serde::Deserialize;

/// Full configuration surface. Every field has a compiled-in default, so a
/// missing `bundle.toml` (or a missing section in it) means "use the default".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleConfig {
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub bindgen: BindgenSection,
  #[serde(default)]
  pub bundle: BundleSection,
  #[serde(default)]
  pub tools: ToolsSection,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildProfile {
  #[default]
  Debug,
  Release,
}

impl BuildProfile {
  /// Directory name the toolchain uses under `<target_dir>/<target>/`.
  pub fn dir_name(self) -> &'static str {
    match self {
      Self::Debug => "debug",
      Self::Release => "release",
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingMode {
  /// No module system; the interop object is assigned to one global symbol.
  #[default]
  GlobalSymbol,
  /// ES module output loaded with `import`.
  Web,
}

impl BindingMode {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::GlobalSymbol => "global-symbol",
      Self::Web => "web",
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
  #[serde(default = "default_target")]
  pub target: String,
  #[serde(default)]
  pub profile: BuildProfile,
  #[serde(default = "default_target_dir")]
  pub target_dir: String,
  /// Overrides the package name read from the frontend's Cargo.toml.
  pub crate_name: Option<String>,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self {
      target: default_target(),
      profile: BuildProfile::default(),
      target_dir: default_target_dir(),
      crate_name: None,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BindgenSection {
  #[serde(default)]
  pub mode: BindingMode,
  #[serde(default = "default_global_name")]
  pub global_name: String,
  #[serde(default)]
  pub typescript: bool,
}

impl Default for BindgenSection {
  fn default() -> Self {
    Self { mode: BindingMode::default(), global_name: default_global_name(), typescript: false }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleSection {
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  #[serde(default = "default_asset_dir")]
  pub asset_dir: String,
  #[serde(default = "default_entry_page")]
  pub entry_page: String,
}

impl Default for BundleSection {
  fn default() -> Self {
    Self {
      out_dir: default_out_dir(),
      asset_dir: default_asset_dir(),
      entry_page: default_entry_page(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolsSection {
  #[serde(default = "default_cargo")]
  pub cargo: String,
  #[serde(default = "default_wasm_bindgen")]
  pub wasm_bindgen: String,
}

impl Default for ToolsSection {
  fn default() -> Self {
    Self { cargo: default_cargo(), wasm_bindgen: default_wasm_bindgen() }
  }
}

fn default_target() -> String {
  "wasm32-unknown-unknown".to_string()
}

fn default_target_dir() -> String {
  "../target".to_string()
}

fn default_global_name() -> String {
  "wasm_bindgen".to_string()
}

fn default_out_dir() -> String {
  "../target/web".to_string()
}

fn default_asset_dir() -> String {
  "static".to_string()
}

fn default_entry_page() -> String {
  "index.html".to_string()
}

fn default_cargo() -> String {
  "cargo".to_string()
}

fn default_wasm_bindgen() -> String {
  "wasm-bindgen".to_string()
}

impl BundleConfig {
  pub fn validate(&self) -> Result<(), String> {
    if self.build.target.trim().is_empty() {
      return Err("build.target must not be empty".to_string());
    }
    if self.bundle.entry_page.trim().is_empty() {
      return Err("bundle.entry_page must not be empty".to_string());
    }
    if self.bundle.out_dir.trim().is_empty() {
      return Err("bundle.out_dir must not be empty".to_string());
    }
    let global_symbol = self.bindgen.mode == BindingMode::GlobalSymbol;
    if global_symbol && !is_js_identifier(&self.bindgen.global_name) {
      return Err(format!(
        "bindgen.global_name \"{}\" is not a valid JavaScript identifier",
        self.bindgen.global_name
      ));
    }
    if let Some(name) = &self.build.crate_name
      && name.trim().is_empty()
    {
      return Err("build.crate_name must not be empty when set".to_string());
    }
    Ok(())
  }
}

/// ASCII-only check; the generated glue assigns to `self[<name>]`-style globals.
fn is_js_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
