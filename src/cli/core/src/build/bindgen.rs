/* src/cli/core/src/build/bindgen.rs */

use std::ffi::OsString;
use std::path::Path;

use super::types::ArtifactPath;
use crate::config::BindingMode;
use crate::error::{BundleError, BundleResult};
use crate::shell::run_tool;

/// Turns a compiled artifact into a host-loadable module plus interop glue.
pub trait BindingGenerator {
  fn generate(
    &self,
    artifact: &ArtifactPath,
    bundle_dir: &Path,
    mode: BindingMode,
    global_name: &str,
  ) -> BundleResult<()>;
}

/// The `wasm-bindgen` CLI.
#[derive(Debug, Clone)]
pub struct WasmBindgen {
  pub program: String,
  pub typescript: bool,
}

impl WasmBindgen {
  fn args(
    &self,
    artifact: &ArtifactPath,
    bundle_dir: &Path,
    mode: BindingMode,
    global_name: &str,
  ) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
      artifact.path().into(),
      "--out-dir".into(),
      bundle_dir.into(),
      "--target".into(),
    ];
    match mode {
      BindingMode::GlobalSymbol => {
        args.push("no-modules".into());
        args.push("--no-modules-global".into());
        args.push(global_name.into());
      }
      BindingMode::Web => args.push("web".into()),
    }
    if !self.typescript {
      args.push("--no-typescript".into());
    }
    args
  }
}

impl BindingGenerator for WasmBindgen {
  fn generate(
    &self,
    artifact: &ArtifactPath,
    bundle_dir: &Path,
    mode: BindingMode,
    global_name: &str,
  ) -> BundleResult<()> {
    let args = self.args(artifact, bundle_dir, mode, global_name);
    run_tool(bundle_dir, &self.program, args.as_slice(), "wasm-bindgen")
      .map_err(|f| BundleError::Binding { exit_code: f.exit_code, output: f.output })?;
    let expected = generated_files(&artifact.base_name(), self.typescript);
    verify_generated(bundle_dir, &expected)?;
    Ok(())
  }
}

/// Files the generator writes for an artifact, relative to the bundle directory.
pub fn generated_files(base_name: &str, typescript: bool) -> Vec<String> {
  let mut files = vec![format!("{base_name}.js"), format!("{base_name}_bg.wasm")];
  if typescript {
    files.push(format!("{base_name}.d.ts"));
    files.push(format!("{base_name}_bg.wasm.d.ts"));
  }
  files
}

/// Size of each expected output. A file the generator did not write is a
/// binding failure even when the tool exited zero.
pub fn verify_generated(bundle_dir: &Path, files: &[String]) -> BundleResult<Vec<(String, u64)>> {
  files
    .iter()
    .map(|file| {
      let path = bundle_dir.join(file);
      match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok((file.clone(), meta.len())),
        _ => Err(BundleError::Binding {
          exit_code: Some(0),
          output: format!("expected {} was not produced", path.display()),
        }),
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::build::types::BuildTarget;
  use crate::config::BuildProfile;

  fn artifact() -> ArtifactPath {
    let target =
      BuildTarget { triple: "wasm32-unknown-unknown".to_string(), profile: BuildProfile::Debug };
    ArtifactPath::compute(Path::new("/t"), &target, "app")
  }

  fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
  }

  #[test]
  fn global_symbol_args() {
    let bindgen = WasmBindgen { program: "wasm-bindgen".to_string(), typescript: false };
    let out = PathBuf::from("/out");
    let args = bindgen.args(&artifact(), &out, BindingMode::GlobalSymbol, "vault");
    assert_eq!(
      strings(&args),
      [
        "/t/wasm32-unknown-unknown/debug/app.wasm",
        "--out-dir",
        "/out",
        "--target",
        "no-modules",
        "--no-modules-global",
        "vault",
        "--no-typescript",
      ]
    );
  }

  #[test]
  fn web_mode_omits_global_name() {
    let bindgen = WasmBindgen { program: "wasm-bindgen".to_string(), typescript: true };
    let args = bindgen.args(&artifact(), &PathBuf::from("/out"), BindingMode::Web, "ignored");
    let args = strings(&args);
    assert!(args.ends_with(&["--target".to_string(), "web".to_string()]));
    assert!(!args.iter().any(|a| a == "ignored"));
  }

  #[test]
  fn generated_names_follow_artifact() {
    assert_eq!(generated_files("app", false), ["app.js", "app_bg.wasm"]);
    assert_eq!(generated_files("app", true).len(), 4);
  }

  #[test]
  fn missing_output_is_binding_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.js"), "let wasm_bindgen;").unwrap();
    let files = generated_files("app", false);
    let err = verify_generated(dir.path(), &files).unwrap_err();
    match err {
      BundleError::Binding { exit_code, output } => {
        assert_eq!(exit_code, Some(0));
        assert!(output.contains("app_bg.wasm was not produced"), "{output}");
      }
      other => panic!("expected binding error, got {other}"),
    }

    std::fs::write(dir.path().join("app_bg.wasm"), b"\0asm").unwrap();
    let sizes = verify_generated(dir.path(), &files).unwrap();
    assert_eq!(sizes, [("app.js".to_string(), 17), ("app_bg.wasm".to_string(), 4)]);
  }
}
