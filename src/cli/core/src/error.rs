/* src/cli/core/src/error.rs */

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type BundleResult<T> = Result<T, BundleError>;

/// Every way a bundle run can stop. Each variant is fatal to the run.
#[derive(Debug, Error)]
pub enum BundleError {
  /// The working directory could not be derived from the invocation path
  #[error("cannot resolve working directory from '{}': {reason}", .path.display())]
  Resolution { path: PathBuf, reason: String },

  /// `bundle.toml` or the frontend's `Cargo.toml` is unusable
  #[error("invalid configuration in {}: {message}", .path.display())]
  Config { path: PathBuf, message: String },

  /// The toolchain could not be started or exited non-zero
  #[error("compile failed ({}){}", describe_exit(.exit_code), format_output(.output))]
  Compile { exit_code: Option<i32>, output: String },

  /// Directory creation or file copy failed
  #[error("I/O error at {}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The binding generator could not be started or exited non-zero
  #[error(
    "binding generation failed ({}){}",
    describe_exit(.exit_code),
    format_output(.output)
  )]
  Binding { exit_code: Option<i32>, output: String },

  /// A pipeline phase was called from the wrong state
  #[error("pipeline out of order: {reason}")]
  OutOfOrder { reason: String },
}

impl BundleError {
  pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
    Self::Io { path: path.as_ref().to_path_buf(), source }
  }

  /// Short name of the failure kind, used in the failure summary line.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Resolution { .. } => "resolution",
      Self::Config { .. } => "config",
      Self::Compile { .. } => "compile",
      Self::Io { .. } => "io",
      Self::Binding { .. } => "binding",
      Self::OutOfOrder { .. } => "sequence",
    }
  }
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {code}"),
    None => "no exit code".to_string(),
  }
}

fn format_output(output: &str) -> String {
  let trimmed = output.trim_end();
  if trimmed.is_empty() { String::new() } else { format!("\n{trimmed}") }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn compile_error_carries_captured_output() {
    let err = BundleError::Compile {
      exit_code: Some(101),
      output: "error[E0425]: cannot find value `x`\n".to_string(),
    };
    assert_eq!(
      err.to_string(),
      "compile failed (exit code 101)\nerror[E0425]: cannot find value `x`"
    );
    assert_eq!(err.kind(), "compile");
  }

  #[test]
  fn binding_error_without_exit_code() {
    let err = BundleError::Binding { exit_code: None, output: String::new() };
    assert_eq!(err.to_string(), "binding generation failed (no exit code)");
  }

  #[test]
  fn io_error_names_path() {
    let err = BundleError::io(
      "static/logo.png",
      std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    );
    assert!(err.to_string().starts_with("I/O error at static/logo.png"));
    assert_eq!(err.kind(), "io");
  }

  #[test]
  fn out_of_order_is_its_own_kind() {
    let err = BundleError::OutOfOrder { reason: "pipeline already Done".to_string() };
    assert_eq!(err.kind(), "sequence");
    assert_eq!(err.to_string(), "pipeline out of order: pipeline already Done");
  }
}
