/* src/cli/core/src/build/compile.rs */

use std::ffi::OsString;
use std::path::PathBuf;

use super::types::{ArtifactPath, BuildTarget, WorkingDirectory};
use crate::config::BuildProfile;
use crate::error::{BundleError, BundleResult};
use crate::shell::run_tool;

/// Produces the binary artifact for a target.
pub trait Compiler {
  fn compile(&self, working_dir: &WorkingDirectory, target: &BuildTarget)
  -> BundleResult<ArtifactPath>;
}

/// `cargo build` for the crate in the working directory.
#[derive(Debug, Clone)]
pub struct CargoCompiler {
  pub program: String,
  /// Absolute; passed as `--target-dir` so `CARGO_TARGET_DIR` cannot move the artifact.
  pub target_dir: PathBuf,
  pub artifact_name: String,
}

impl CargoCompiler {
  fn args(&self, target: &BuildTarget) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
      "build".into(),
      "--target".into(),
      target.triple.clone().into(),
      "--target-dir".into(),
      self.target_dir.clone().into(),
    ];
    if target.profile == BuildProfile::Release {
      args.push("--release".into());
    }
    args
  }
}

impl Compiler for CargoCompiler {
  fn compile(
    &self,
    working_dir: &WorkingDirectory,
    target: &BuildTarget,
  ) -> BundleResult<ArtifactPath> {
    let args = self.args(target);
    run_tool(working_dir.path(), &self.program, args.as_slice(), "cargo build")
      .map_err(|f| BundleError::Compile { exit_code: f.exit_code, output: f.output })?;

    let artifact = ArtifactPath::compute(&self.target_dir, target, &self.artifact_name);
    if !artifact.path().is_file() {
      return Err(BundleError::Compile {
        exit_code: Some(0),
        output: format!(
          "expected artifact {artifact} was not produced (is crate-type = [\"cdylib\"] set?)"
        ),
      });
    }
    Ok(artifact)
  }
}
