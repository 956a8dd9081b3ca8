/* src/cli/core/src/build/assets.rs */

// Verbatim copy of static files and the entry page into the bundle directory.

use std::path::{Path, PathBuf};

use crate::error::{BundleError, BundleResult};
use crate::ui::{self, DIM, RESET};

/// Static files to ship: everything under `source_dir` plus one entry page.
#[derive(Debug, Clone)]
pub struct AssetSet {
  pub source_dir: PathBuf,
  pub entry_page: PathBuf,
}

/// One copy operation: absolute source, destination relative to the bundle dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
  pub src: PathBuf,
  pub rel: PathBuf,
}

impl AssetSet {
  /// List the files to copy, sorted by destination path, entry page last.
  pub fn entries(&self) -> BundleResult<Vec<AssetEntry>> {
    let mut entries = Vec::new();
    collect_files(&self.source_dir, Path::new(""), &mut entries)?;
    entries.sort_by(|a, b| a.rel.cmp(&b.rel));

    let name = self.entry_page.file_name().ok_or_else(|| {
      BundleError::io(
        &self.entry_page,
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "entry page has no file name"),
      )
    })?;
    entries.push(AssetEntry { src: self.entry_page.clone(), rel: PathBuf::from(name) });
    Ok(entries)
  }
}

/// Walk `dir` recursively, following symlinks, recording regular files only.
fn collect_files(dir: &Path, rel: &Path, out: &mut Vec<AssetEntry>) -> BundleResult<()> {
  let read = std::fs::read_dir(dir).map_err(|e| BundleError::io(dir, e))?;
  for entry in read {
    let entry = entry.map_err(|e| BundleError::io(dir, e))?;
    let path = entry.path();
    let meta = std::fs::metadata(&path).map_err(|e| BundleError::io(&path, e))?;
    let child_rel = rel.join(entry.file_name());
    if meta.is_dir() {
      collect_files(&path, &child_rel, out)?;
    } else if meta.is_file() {
      out.push(AssetEntry { src: path, rel: child_rel });
    }
  }
  Ok(())
}

/// Copy every entry of `assets` into `bundle_dir`, overwriting same-named files.
/// Returns the number of files copied. Stops at the first failure without
/// undoing earlier copies.
pub fn stage(assets: &AssetSet, bundle_dir: &Path) -> BundleResult<usize> {
  let entries = assets.entries()?;
  for entry in &entries {
    let dst = bundle_dir.join(&entry.rel);
    let size = copy_file(&entry.src, &dst)?;
    ui::detail_ok(&format!("{}  {DIM}({}){RESET}", entry.rel.display(), ui::format_size(size)));
  }
  Ok(entries.len())
}

/// Single-file copy; errors name the side that failed.
fn copy_file(src: &Path, dst: &Path) -> BundleResult<u64> {
  // Open first so an unreadable source is reported against the source path.
  drop(std::fs::File::open(src).map_err(|e| BundleError::io(src, e))?);
  if let Some(parent) = dst.parent() {
    std::fs::create_dir_all(parent).map_err(|e| BundleError::io(parent, e))?;
  }
  std::fs::copy(src, dst).map_err(|e| BundleError::io(dst, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fixture() -> (tempfile::TempDir, AssetSet) {
    let tmp = tempfile::tempdir().unwrap();
    let source_dir = tmp.path().join("static");
    std::fs::create_dir_all(source_dir.join("fonts")).unwrap();
    std::fs::write(source_dir.join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    std::fs::write(source_dir.join("style.css"), "body{}").unwrap();
    std::fs::write(source_dir.join("fonts/inter.woff2"), "font").unwrap();
    let entry_page = tmp.path().join("index.html");
    std::fs::write(&entry_page, "<main></main>").unwrap();
    (tmp, AssetSet { source_dir, entry_page })
  }

  #[test]
  fn entries_sorted_with_entry_page_last() {
    let (_tmp, assets) = fixture();
    let rels: Vec<PathBuf> = assets.entries().unwrap().into_iter().map(|e| e.rel).collect();
    assert_eq!(
      rels,
      [
        PathBuf::from("fonts/inter.woff2"),
        PathBuf::from("logo.png"),
        PathBuf::from("style.css"),
        PathBuf::from("index.html"),
      ]
    );
  }

  #[test]
  fn stage_copies_every_file_verbatim() {
    let (tmp, assets) = fixture();
    let out = tmp.path().join("web");
    std::fs::create_dir(&out).unwrap();
    let count = stage(&assets, &out).unwrap();
    assert_eq!(count, 4);
    assert_eq!(std::fs::read(out.join("logo.png")).unwrap(), [0x89, b'P', b'N', b'G']);
    assert_eq!(std::fs::read_to_string(out.join("fonts/inter.woff2")).unwrap(), "font");
    assert_eq!(std::fs::read_to_string(out.join("index.html")).unwrap(), "<main></main>");
    // Sources untouched
    assert!(assets.source_dir.join("style.css").exists());
  }

  #[test]
  fn stage_overwrites_and_keeps_unrelated() {
    let (tmp, assets) = fixture();
    let out = tmp.path().join("web");
    std::fs::create_dir(&out).unwrap();
    std::fs::write(out.join("style.css"), "stale").unwrap();
    std::fs::write(out.join("notes.txt"), "mine").unwrap();
    stage(&assets, &out).unwrap();
    assert_eq!(std::fs::read_to_string(out.join("style.css")).unwrap(), "body{}");
    assert_eq!(std::fs::read_to_string(out.join("notes.txt")).unwrap(), "mine");
  }

  #[test]
  fn missing_source_dir_is_io_error() {
    let (tmp, mut assets) = fixture();
    assets.source_dir = tmp.path().join("nope");
    let err = stage(&assets, tmp.path()).unwrap_err();
    assert_eq!(err.kind(), "io");
    assert!(err.to_string().contains("nope"), "{err}");
  }

  #[test]
  fn missing_entry_page_fails_after_assets_copied() {
    let (tmp, mut assets) = fixture();
    assets.entry_page = tmp.path().join("missing.html");
    let out = tmp.path().join("web");
    std::fs::create_dir(&out).unwrap();
    let err = stage(&assets, &out).unwrap_err();
    assert!(err.to_string().contains("missing.html"), "{err}");
    // No rollback of earlier copies
    assert!(out.join("logo.png").exists());
  }

  #[test]
  fn empty_asset_dir_stages_entry_page_only() {
    let tmp = tempfile::tempdir().unwrap();
    let source_dir = tmp.path().join("static");
    std::fs::create_dir(&source_dir).unwrap();
    let entry_page = tmp.path().join("index.html");
    std::fs::write(&entry_page, "").unwrap();
    let out = tmp.path().join("web");
    std::fs::create_dir(&out).unwrap();
    let count = stage(&AssetSet { source_dir, entry_page }, &out).unwrap();
    assert_eq!(count, 1);
  }
}
