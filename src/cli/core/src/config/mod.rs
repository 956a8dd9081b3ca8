/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{load_bundle_config, resolve_artifact_name};
pub use types::{BindingMode, BuildProfile, BundleConfig};
