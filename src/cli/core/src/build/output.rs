/* src/cli/core/src/build/output.rs */

use std::path::Path;

use crate::error::{BundleError, BundleResult};

/// Create the bundle directory and its missing ancestors. Existing contents are
/// left alone: staging overwrites per file and never cleans.
pub fn ensure(bundle_dir: &Path) -> BundleResult<()> {
  if bundle_dir.is_dir() {
    return Ok(());
  }
  std::fs::create_dir_all(bundle_dir).map_err(|e| BundleError::io(bundle_dir, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn creates_missing_ancestors() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("target/web");
    ensure(&dir).unwrap();
    assert!(dir.is_dir());
  }

  #[test]
  fn existing_contents_survive() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("keep.txt"), "keep").unwrap();
    ensure(tmp.path()).unwrap();
    ensure(tmp.path()).unwrap();
    assert_eq!(std::fs::read_to_string(tmp.path().join("keep.txt")).unwrap(), "keep");
  }

  #[test]
  fn file_in_the_way_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("web");
    std::fs::write(&blocker, "").unwrap();
    let err = ensure(&blocker).unwrap_err();
    assert_eq!(err.kind(), "io");
  }
}
