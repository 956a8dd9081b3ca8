/* src/cli/core/src/build/types.rs */

// Values threaded between pipeline stages.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::config::BuildProfile;

/// Canonical absolute directory every relative path of a run resolves against.
/// Only the resolver constructs one, so holding it means resolution succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory(PathBuf);

impl WorkingDirectory {
  pub(super) fn new(canonical: PathBuf) -> Self {
    Self(canonical)
  }

  pub fn path(&self) -> &Path {
    &self.0
  }

  /// Join a configured path and fold `.`/`..` lexically; absolute inputs are kept as-is.
  pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
    fold_dots(&self.0.join(rel))
  }
}

/// `..` pops the previous component; at the filesystem root it is dropped.
fn fold_dots(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

impl fmt::Display for WorkingDirectory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
  /// Target triple handed to the toolchain, e.g. `wasm32-unknown-unknown`.
  pub triple: String,
  pub profile: BuildProfile,
}

/// Location of the compiled `.wasm` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath(PathBuf);

impl ArtifactPath {
  /// `<target_dir>/<triple>/<profile>/<name>.wasm`
  pub fn compute(target_dir: &Path, target: &BuildTarget, artifact_name: &str) -> Self {
    Self(
      target_dir
        .join(&target.triple)
        .join(target.profile.dir_name())
        .join(format!("{artifact_name}.wasm")),
    )
  }

  pub fn path(&self) -> &Path {
    &self.0
  }

  /// File stem; the binding generator names its outputs after it.
  pub fn base_name(&self) -> String {
    self.0.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
  }
}

impl fmt::Display for ArtifactPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn wasm_debug() -> BuildTarget {
    BuildTarget { triple: "wasm32-unknown-unknown".to_string(), profile: BuildProfile::Debug }
  }

  #[test]
  fn artifact_path_layout() {
    let artifact =
      ArtifactPath::compute(Path::new("/work/target"), &wasm_debug(), "mediavault_frontend");
    assert_eq!(
      artifact.path(),
      Path::new("/work/target/wasm32-unknown-unknown/debug/mediavault_frontend.wasm")
    );
    assert_eq!(artifact.base_name(), "mediavault_frontend");
  }

  #[test]
  fn artifact_path_is_deterministic() {
    let a = ArtifactPath::compute(Path::new("/work/target"), &wasm_debug(), "app");
    let b = ArtifactPath::compute(Path::new("/work/target"), &wasm_debug(), "app");
    assert_eq!(a, b);
  }

  #[test]
  fn release_profile_changes_directory() {
    let target =
      BuildTarget { triple: "wasm32-unknown-unknown".to_string(), profile: BuildProfile::Release };
    let artifact = ArtifactPath::compute(Path::new("t"), &target, "app");
    assert_eq!(artifact.path(), Path::new("t/wasm32-unknown-unknown/release/app.wasm"));
  }

  #[test]
  fn join_keeps_absolute_paths() {
    let wd = WorkingDirectory::new(PathBuf::from("/srv/frontend"));
    assert_eq!(wd.join("static"), PathBuf::from("/srv/frontend/static"));
    assert_eq!(wd.join("/tmp/out"), PathBuf::from("/tmp/out"));
  }

  #[test]
  fn join_folds_parent_components() {
    let wd = WorkingDirectory::new(PathBuf::from("/srv/mediavault/frontend"));
    assert_eq!(wd.join("../target/web"), PathBuf::from("/srv/mediavault/target/web"));
    assert_eq!(wd.join("./static/../static"), PathBuf::from("/srv/mediavault/frontend/static"));
    assert_eq!(wd.join("/../../out"), PathBuf::from("/out"));
  }
}
