/* src/cli/core/src/shell.rs */

// Blocking subprocess helper shared by the compile and bindgen stages.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::ui::{self, DIM, RESET};

/// Why an external tool did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
  /// `None` when the process could not be launched or was killed by a signal.
  pub exit_code: Option<i32>,
  /// stderr followed by stdout, or the launch error message.
  pub output: String,
}

/// Run `program args..` in `cwd` and wait for it to exit.
/// Output is captured; on failure it is returned so the caller can surface it.
pub(crate) fn run_tool<S: AsRef<OsStr>>(
  cwd: &Path,
  program: &str,
  args: &[S],
  label: &str,
) -> Result<(), ToolFailure> {
  let shown: Vec<String> =
    args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()).collect();
  ui::detail(&format!("{DIM}{program} {}{RESET}", shown.join(" ")));

  let output = Command::new(program).args(args).current_dir(cwd).output().map_err(|e| {
    ToolFailure { exit_code: None, output: format!("failed to run {label} ({program}): {e}") }
  })?;
  if output.status.success() {
    return Ok(());
  }

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  let mut msg = format!("{label} exited with status {}", output.status);
  if !stderr.is_empty() {
    msg.push('\n');
    msg.push_str(&stderr);
  }
  if !stdout.is_empty() {
    msg.push('\n');
    msg.push_str(&stdout);
  }
  Err(ToolFailure { exit_code: output.status.code(), output: msg })
}
