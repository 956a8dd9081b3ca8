/* src/cli/core/src/build/mod.rs */

pub mod assets;
pub mod bindgen;
pub mod compile;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod types;
