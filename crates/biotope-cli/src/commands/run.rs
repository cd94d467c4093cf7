use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use biotope_core::{GridBackendKind, SimConfig, TimeUnit};
use biotope_simulation::{DeathCause, Sample, Simulation};

/// Flags of the `run` subcommand.
pub struct RunOptions {
    pub ticks: u64,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub time_unit: Option<TimeUnit>,
    pub agents: Option<usize>,
    pub parallel: bool,
    pub every: u64,
    pub json: bool,
}

pub fn run(opts: &RunOptions) -> Result<(), String> {
    let config = build_config(opts)?;
    let every = opts.every.max(1);

    let mut sim = Simulation::new(config).map_err(|e| format!("simulation init failed: {e}"))?;
    if !opts.json {
        print_header(&sim, opts.ticks);
    }

    let mut rows = Vec::new();
    let mut extinct_at = None;
    for _ in 0..opts.ticks {
        sim.tick().map_err(|e| format!("simulation error: {e}"))?;
        let tick = sim.current_tick();
        let extinct = sim.population().is_empty();

        let report = tick % every == 0 || tick == opts.ticks || extinct;
        if let Some(sample) = sim.history().latest().filter(|_| report) {
            if opts.json {
                let line = serde_json::to_string(sample)
                    .map_err(|e| format!("cannot encode sample: {e}"))?;
                println!("{line}");
            } else {
                rows.push(sample.clone());
            }
        }
        if extinct {
            extinct_at = Some(tick);
            break;
        }
    }

    if opts.json {
        return Ok(());
    }

    print_table(&rows, sim.clock().years_per_tick());
    print_totals(&sim);
    if let Some(tick) = extinct_at {
        println!(
            "  {} population extinct at tick {tick}",
            "EXTINCT".red().bold()
        );
        println!();
    }
    Ok(())
}

fn build_config(opts: &RunOptions) -> Result<SimConfig, String> {
    let mut config = match &opts.config {
        Some(path) => super::load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    if let Some(unit) = opts.time_unit {
        config = config.with_time_unit(unit);
    }
    if let Some(agents) = opts.agents {
        config = config.with_initial_agents(agents);
    }
    if opts.parallel {
        config = config.with_backend(GridBackendKind::Parallel);
    }
    config.validated().map_err(|e| format!("invalid configuration: {e}"))
}

fn print_header(sim: &Simulation, ticks: u64) {
    let config = sim.config();
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({ticks} ticks of one {}, seed={}, {}x{}, backend={})",
            config.time_unit,
            config.seed,
            config.width,
            config.height,
            sim.backend_name()
        )
        .dimmed()
    );
    println!(
        "  {} agents at start, {} infected",
        sim.population().len(),
        sim.population().infected_count()
    );
    println!();
}

fn print_table(rows: &[Sample], years_per_tick: f64) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Tick",
        "Year",
        "Population",
        "M / F",
        "Infected",
        "Births",
        "Deaths",
        "Conflicts",
        "Energy",
        "Food",
    ]);

    for sample in rows {
        table.add_row(vec![
            sample.tick.to_string(),
            format!("{:.1}", sample.tick as f64 * years_per_tick),
            sample.population.to_string(),
            format!("{} / {}", sample.males, sample.females),
            sample.infected.to_string(),
            sample.births.to_string(),
            sample.deaths.total().to_string(),
            sample.conflicts.to_string(),
            format!("{:.2}", sample.mean_energy),
            format!("{:.4}", sample.mean_food),
        ]);
    }

    println!("{table}");
    println!();
}

fn print_totals(sim: &Simulation) {
    let totals = sim.history().totals();
    println!("  {}", "Totals".bold().underline());
    println!("  births     {}", totals.births.to_string().green());
    for cause in DeathCause::ALL {
        let count = totals.deaths.get(cause);
        let label = format!("{:<10}", cause.as_str());
        let count = if count == 0 {
            count.to_string().dimmed()
        } else {
            count.to_string().red()
        };
        println!("  {label} {count}");
    }
    println!("  conflicts  {}", totals.conflicts);
    println!(
        "  population {} after {} ticks",
        sim.population().len().to_string().bold(),
        sim.current_tick()
    );
    println!();
}
