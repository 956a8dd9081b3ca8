/* src/cli/core/src/build/pipeline/mod.rs */

// Bundle pipeline: resolve -> compile -> prepare dir -> stage assets -> bindgen.
// Each stage runs only if the previous one succeeded; the first failure is final.


use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::assets::{self, AssetSet};
use super::bindgen::{BindingGenerator, WasmBindgen, generated_files, verify_generated};
use super::compile::{CargoCompiler, Compiler};
use super::output;
use super::resolve::{self, Invocation};
use super::types::{ArtifactPath, BuildTarget, WorkingDirectory};
use crate::config::{BundleConfig, load_bundle_config, resolve_artifact_name};
use crate::error::{BundleError, BundleResult};
use crate::ui::{self, DIM, RESET};

const TOTAL_STEPS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Idle,
  Resolved,
  Compiled,
  DirectoryReady,
  AssetsStaged,
  BindingsGenerated,
  Done,
  Failed,
}

impl Stage {
  /// The work that moves the pipeline into this state.
  pub fn action(self) -> &'static str {
    match self {
      Self::Idle => "start",
      Self::Resolved => "resolve working directory",
      Self::Compiled => "compile",
      Self::DirectoryReady => "prepare bundle directory",
      Self::AssetsStaged => "stage assets",
      Self::BindingsGenerated => "generate bindings",
      Self::Done => "finish",
      Self::Failed => "fail",
    }
  }

  fn is_terminal(self) -> bool {
    matches!(self, Self::Done | Self::Failed)
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.action())
  }
}

/// Everything the build stages need, fixed once resolution succeeds.
#[derive(Debug, Clone)]
pub struct BuildPlan {
  pub working_dir: WorkingDirectory,
  pub config: BundleConfig,
  pub target: BuildTarget,
  pub target_dir: PathBuf,
  pub artifact_name: String,
  pub bundle_dir: PathBuf,
  pub assets: AssetSet,
}

impl BuildPlan {
  pub fn from_config(working_dir: WorkingDirectory, config: BundleConfig) -> BundleResult<Self> {
    let artifact_name = resolve_artifact_name(&config, working_dir.path())?;
    let target =
      BuildTarget { triple: config.build.target.clone(), profile: config.build.profile };
    let target_dir = working_dir.join(&config.build.target_dir);
    let bundle_dir = working_dir.join(&config.bundle.out_dir);
    let assets = AssetSet {
      source_dir: working_dir.join(&config.bundle.asset_dir),
      entry_page: working_dir.join(&config.bundle.entry_page),
    };
    Ok(Self { working_dir, config, target, target_dir, artifact_name, bundle_dir, assets })
  }

  /// Where a successful compile leaves the artifact.
  pub fn artifact_path(&self) -> ArtifactPath {
    ArtifactPath::compute(&self.target_dir, &self.target, &self.artifact_name)
  }

  pub fn cargo(&self) -> CargoCompiler {
    CargoCompiler {
      program: self.config.tools.cargo.clone(),
      target_dir: self.target_dir.clone(),
      artifact_name: self.artifact_name.clone(),
    }
  }

  pub fn wasm_bindgen(&self) -> WasmBindgen {
    WasmBindgen {
      program: self.config.tools.wasm_bindgen.clone(),
      typescript: self.config.bindgen.typescript,
    }
  }
}

#[derive(Debug, Clone)]
pub struct BundleReport {
  pub artifact: ArtifactPath,
  pub bundle_dir: PathBuf,
  pub staged_files: usize,
  pub generated_files: Vec<String>,
  pub elapsed: Duration,
}

/// Explicit state machine over the bundle stages. `history` records every
/// state entered, starting with `Idle`.
#[derive(Debug)]
pub struct Pipeline {
  state: Stage,
  history: Vec<Stage>,
  failed_during: Option<Stage>,
  started: Instant,
}

impl Default for Pipeline {
  fn default() -> Self {
    Self::new()
  }
}

impl Pipeline {
  pub fn new() -> Self {
    Self {
      state: Stage::Idle,
      history: vec![Stage::Idle],
      failed_during: None,
      started: Instant::now(),
    }
  }

  pub fn state(&self) -> Stage {
    self.state
  }

  pub fn history(&self) -> &[Stage] {
    &self.history
  }

  /// The stage that was being attempted when the pipeline failed.
  pub fn failed_during(&self) -> Option<Stage> {
    self.failed_during
  }

  /// Idle -> Resolved. Anchors the run and loads configuration from the
  /// resolved directory.
  pub fn resolve(
    &mut self,
    invocation: &Invocation,
    config_path: Option<&Path>,
  ) -> BundleResult<BuildPlan> {
    self.guard(Stage::Idle, Stage::Resolved)?;
    ui::step(1, TOTAL_STEPS, "Resolving working directory");
    let plan = resolve::resolve(invocation).and_then(|working_dir| {
      let config = load_bundle_config(working_dir.path(), config_path)?;
      BuildPlan::from_config(working_dir, config)
    });
    let plan = self.check(Stage::Resolved, plan)?;
    ui::detail_ok(&plan.working_dir.to_string());
    ui::detail(&format!("{DIM}artifact {}{RESET}", plan.artifact_path()));
    ui::blank();
    Ok(plan)
  }

  /// Resolved -> ... -> Done. Runs the remaining stages in order, halting at the
  /// first failure.
  pub fn build(
    &mut self,
    plan: &BuildPlan,
    compiler: &dyn Compiler,
    binder: &dyn BindingGenerator,
  ) -> BundleResult<BundleReport> {
    self.guard(Stage::Resolved, Stage::Compiled)?;

    ui::step(2, TOTAL_STEPS, "Compiling frontend");
    let compiled = compiler.compile(&plan.working_dir, &plan.target);
    let artifact = self.check(Stage::Compiled, compiled)?;
    ui::detail_ok(&artifact.to_string());
    ui::blank();

    ui::step(3, TOTAL_STEPS, "Preparing bundle directory");
    self.check(Stage::DirectoryReady, output::ensure(&plan.bundle_dir))?;
    ui::detail_ok(&plan.bundle_dir.display().to_string());
    ui::blank();

    ui::step(4, TOTAL_STEPS, "Staging assets");
    let staged = assets::stage(&plan.assets, &plan.bundle_dir);
    let staged_files = self.check(Stage::AssetsStaged, staged)?;
    ui::blank();

    ui::step(5, TOTAL_STEPS, "Generating bindings");
    ui::detail(&format!("{DIM}mode {}{RESET}", plan.config.bindgen.mode.as_str()));
    let generated = generated_files(&artifact.base_name(), plan.config.bindgen.typescript);
    let bindings = binder
      .generate(
        &artifact,
        &plan.bundle_dir,
        plan.config.bindgen.mode,
        &plan.config.bindgen.global_name,
      )
      .and_then(|()| verify_generated(&plan.bundle_dir, &generated));
    let outputs = self.check(Stage::BindingsGenerated, bindings)?;
    for (file, size) in &outputs {
      ui::detail_ok(&format!("{file}  {DIM}({}){RESET}", ui::format_size(*size)));
    }
    ui::blank();

    self.enter(Stage::Done);
    Ok(BundleReport {
      artifact,
      bundle_dir: plan.bundle_dir.clone(),
      staged_files,
      generated_files: generated,
      elapsed: self.started.elapsed(),
    })
  }

  /// Refuse to run a stage out of order; a failed or finished pipeline stays put.
  fn guard(&self, expected: Stage, next: Stage) -> BundleResult<()> {
    if self.state == expected {
      return Ok(());
    }
    let reason = if self.state.is_terminal() {
      format!("pipeline already {:?}; start a new run", self.state)
    } else {
      format!("cannot {next} while {:?}", self.state)
    };
    Err(BundleError::OutOfOrder { reason })
  }

  /// Advance to `next` on success, or absorb into `Failed`.
  fn check<T>(&mut self, next: Stage, result: BundleResult<T>) -> BundleResult<T> {
    match result {
      Ok(value) => {
        self.enter(next);
        Ok(value)
      }
      Err(err) => {
        self.failed_during = Some(next);
        self.enter(Stage::Failed);
        Err(err)
      }
    }
  }

  fn enter(&mut self, stage: Stage) {
    self.state = stage;
    self.history.push(stage);
  }
}
