//! Print the solids a given config + seed would spawn, as RON, without opening a window.
use std::{fs, path::PathBuf};
use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use prism_backdrop::core::config::BackdropConfig;
use prism_backdrop::rendering::geometry::catalog::color_for_index;
use prism_backdrop::rendering::scene::builder::roll_layout;
use prism_backdrop::ShapeKind;

#[derive(Parser, Debug)]
#[command(about = "Dump a seeded backdrop layout as RON", version)]
struct Args {
    /// Config layer; repeat to layer several. Defaults to built-in values.
    #[arg(long = "config")] config: Vec<PathBuf>,
    #[arg(long)] seed: Option<u64>,
    #[arg(long)] count: Option<usize>,
    /// Edge length of the cube solids are scattered in.
    #[arg(long)] spread: Option<f32>,
    /// Write here instead of stdout.
    #[arg(long)] out: Option<PathBuf>,
}

#[derive(Serialize)]
struct Row { index: usize, shape: ShapeKind, color: String, opacity: f32, position: [f32; 3], rotation: [f32; 3] }

#[derive(Serialize)]
struct Dump { seed: u64, count: usize, solids: Vec<Row> }

fn main() -> Result<()> {
    let args = Args::parse();
    let (mut cfg, _used, errors) = BackdropConfig::load_layered(args.config.iter());
    if !errors.is_empty() && !args.config.is_empty() {
        bail!("config layers failed: {}", errors.join("; "));
    }
    if let Some(c) = args.count { cfg.particles.count = c; }
    if let Some(s) = args.spread {
        if s <= 0.0 { bail!("spread must be > 0 (got {s})"); }
        cfg.particles.spread = s;
    }
    let seed = args.seed.or(cfg.particles.seed).unwrap_or(0);

    let mut rng = StdRng::seed_from_u64(seed);
    let solids = roll_layout(cfg.particles.count, &cfg.particles, &mut rng)
        .into_iter()
        .map(|s| Row {
            index: s.solid.index,
            shape: s.solid.shape,
            color: color_for_index(s.solid.color_index).to_srgba().to_hex(),
            opacity: s.solid.opacity,
            position: s.position.to_array(),
            rotation: s.rotation.to_array(),
        })
        .collect();
    let dump = Dump { seed, count: cfg.particles.count, solids };
    let txt = ron::ser::to_string_pretty(&dump, ron::ser::PrettyConfig::default())
        .context("serialize layout")?;
    match args.out {
        Some(path) => fs::write(&path, txt).with_context(|| format!("write {}", path.display()))?,
        None => println!("{txt}"),
    }
    Ok(())
}
