/* src/cli/core/src/main.rs */

mod build;
mod config;
mod error;
mod shell;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use build::pipeline::{Pipeline, Stage};
use build::resolve::Invocation;

/// Compile the frontend to WebAssembly, generate bindings, and stage the web bundle.
/// Paths resolve against the directory holding this executable (symlinks followed),
/// not the caller's cwd.
#[derive(Parser)]
#[command(
  name = "mv-bundle",
  version,
  about,
  after_help = "A bundle.toml in the working directory, when present, overrides the built-in \
                build settings (target, profile, output and asset paths, binding mode, tools)."
)]
struct Cli {
  /// Use this directory as the working directory instead of the executable's
  #[arg(long)]
  root: Option<PathBuf>,
  /// Config file relative to the working directory (default: bundle.toml if present)
  #[arg(short, long)]
  config: Option<PathBuf>,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  let invocation = match cli.root {
    Some(dir) => Invocation::Root(dir),
    None => Invocation::CurrentExe,
  };

  ui::banner("build");
  let mut pipeline = Pipeline::new();
  let result = pipeline
    .resolve(&invocation, cli.config.as_deref())
    .and_then(|plan| pipeline.build(&plan, &plan.cargo(), &plan.wasm_bindgen()));

  match result {
    Ok(report) => {
      debug_assert_eq!(pipeline.state(), Stage::Done);
      ui::ok(&format!("bundle complete in {:.1}s", report.elapsed.as_secs_f64()));
      ui::detail(&format!(
        "{} \u{2192} {} \u{00b7} {} staged",
        report.artifact.base_name(),
        report.generated_files.join(" \u{00b7} "),
        report.staged_files,
      ));
      ui::detail(&report.bundle_dir.display().to_string());
      Ok(())
    }
    Err(err) => {
      let stage = pipeline.failed_during().unwrap_or(Stage::Idle);
      ui::fail(&format!("{} error during {stage}", err.kind()));
      let completed: Vec<&str> = pipeline
        .history()
        .iter()
        .filter(|s| !matches!(s, Stage::Idle | Stage::Failed))
        .map(|s| s.action())
        .collect();
      if !completed.is_empty() {
        ui::fail_detail(&format!("completed: {}", completed.join(", ")));
      }
      Err(anyhow::Error::new(err).context(format!("could not {stage}")))
    }
  }
}
