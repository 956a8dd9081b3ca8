/* src/cli/core/src/build/resolve.rs */

use std::path::{Path, PathBuf};

use super::types::WorkingDirectory;
use crate::error::{BundleError, BundleResult};

/// Where the run is anchored.
#[derive(Debug, Clone)]
pub enum Invocation {
  /// The running executable, as reported by the OS.
  CurrentExe,
  /// Path of the program; the directory of the file it resolves to becomes the root.
  Executable(PathBuf),
  /// A directory named explicitly on the command line.
  Root(PathBuf),
}

/// Resolve the invocation to a canonical directory. Symlinks are followed all the
/// way, including a symlink to the executable itself, so a linked `mv-bundle`
/// anchors the run next to the real binary. Use `--root` to anchor elsewhere.
pub fn resolve(invocation: &Invocation) -> BundleResult<WorkingDirectory> {
  match invocation {
    Invocation::CurrentExe => {
      let exe = std::env::current_exe().map_err(|e| {
        resolution_error(Path::new(""), &format!("executable location unavailable: {e}"))
      })?;
      resolve(&Invocation::Executable(exe))
    }
    Invocation::Executable(path) => {
      if path.as_os_str().is_empty() {
        return Err(resolution_error(path, "empty invocation path"));
      }
      let exe = path
        .canonicalize()
        .map_err(|e| resolution_error(path, &format!("canonicalize failed: {e}")))?;
      let parent = exe
        .parent()
        .ok_or_else(|| resolution_error(path, "invocation path has no parent directory"))?;
      canonical_dir(path, parent)
    }
    Invocation::Root(dir) => {
      if dir.as_os_str().is_empty() {
        return Err(resolution_error(dir, "empty root path"));
      }
      canonical_dir(dir, dir)
    }
  }
}

fn canonical_dir(reported: &Path, dir: &Path) -> BundleResult<WorkingDirectory> {
  let canonical = dir
    .canonicalize()
    .map_err(|e| resolution_error(reported, &format!("canonicalize failed: {e}")))?;
  if !canonical.is_dir() {
    return Err(resolution_error(reported, "not a directory"));
  }
  Ok(WorkingDirectory::new(canonical))
}

fn resolution_error(path: &Path, reason: &str) -> BundleError {
  BundleError::Resolution { path: path.to_path_buf(), reason: reason.to_string() }
}
