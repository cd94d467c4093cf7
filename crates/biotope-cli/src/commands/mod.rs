pub mod check;
pub mod init;
pub mod run;

use std::fs;
use std::path::Path;

use biotope_core::SimConfig;

/// Read and validate a configuration file.
fn load_config(path: &Path) -> Result<SimConfig, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    SimConfig::from_toml_str(&source).map_err(|e| format!("{}: {e}", path.display()))
}
