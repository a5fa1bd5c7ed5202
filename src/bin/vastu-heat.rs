//! Compute a temperature field for a floor-plan layout.
//!
//! ```bash
//! # Compute fields, write the cache and print a summary
//! vastu-heat --layout layout.json
//!
//! # Reuse cached fields and write the snapshot for a renderer
//! vastu-heat --layout layout.json --read --output field.json
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use vastu_heat::{FloorHeatmap, HeatConfig, LayoutFile};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Layout JSON file with rooms, doors, sensors and objects of interest
    #[arg(short, long)]
    layout: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "configs/heatmap.yaml")]
    config: PathBuf,

    /// Load distance fields from the cache instead of computing them
    #[arg(long)]
    read: bool,

    /// Compute sensors one after another
    #[arg(long)]
    serial: bool,

    /// Write the field snapshot as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(args: &Args) -> HeatConfig {
    let mut config = if args.config.exists() {
        match HeatConfig::load(&args.config) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                HeatConfig::default()
            }
        }
    } else {
        info!("Config {} not found, using defaults", args.config.display());
        HeatConfig::default()
    };

    if args.read {
        config.cache.read_from_cache = true;
    }
    if args.serial {
        config.search.use_parallel = false;
    }
    config
}

fn run(args: &Args) -> vastu_heat::Result<()> {
    let config = load_config(args);
    let layout = LayoutFile::load(&args.layout)?;
    let heatmap = FloorHeatmap::from_layout(&layout, &config)?;

    let field = heatmap.heat_field();
    match field.stats() {
        Some((min, max, mean)) => info!(
            "Field: {} of {} cells covered, min {:.2}, max {:.2}, mean {:.2}",
            field.covered(),
            field.rows() * field.cols(),
            min,
            max,
            mean
        ),
        None => warn!("Field: no cell has a qualifying sensor"),
    }

    if let Some(path) = &args.output {
        let snapshot = heatmap.snapshot();
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer(&mut file, &snapshot)?;
        file.flush()?;
        info!("Snapshot written to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
