use std::fs;
use std::path::Path;

use biotope_core::SimConfig;

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }

    let body = SimConfig::default()
        .to_toml_string()
        .map_err(|e| format!("cannot render default config: {e}"))?;
    let content = format!(
        "# Biotope simulation parameters.\n\
         # Remove any line to fall back to its default.\n\n{body}"
    );
    fs::write(path, content).map_err(|e| format!("cannot write '{}': {e}", path.display()))?;

    println!("Created config '{}'", path.display());
    println!();
    println!("Get started:");
    println!("  biotope check {}", path.display());
    println!("  biotope run --config {}", path.display());

    Ok(())
}
