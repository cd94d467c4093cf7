use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path) -> Result<(), String> {
    let config = super::load_config(path)?;

    println!("  {} {}", "OK".green().bold(), path.display());
    println!(
        "  {}x{} grid ({}), {} agents, seed {}",
        config.width,
        config.height,
        if config.toroidal { "toroidal" } else { "bounded" },
        config.initial_agents,
        config.seed
    );
    println!(
        "  one tick = one {}, {} backend",
        config.time_unit, config.compute_backend
    );
    Ok(())
}
