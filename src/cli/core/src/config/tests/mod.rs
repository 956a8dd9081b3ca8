/* src/cli/core/src/config/tests/mod.rs */

use std::path::Path;

use super::loader::{CONFIG_FILE, parse_bundle_config};
use super::*;
