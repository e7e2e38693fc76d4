use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use prism_backdrop::core::config::ConfigOverrides;
use prism_backdrop::{BackdropConfig, BackdropPlugin, ConfigDiagnostics};
#[cfg(not(target_arch = "wasm32"))]
use prism_backdrop::core::config::DEFAULT_CONFIG_PATHS;

#[derive(Parser, Debug)]
#[command(name = "prism_backdrop", about = "Floating translucent solids with pointer parallax")]
struct Args {
    /// Config layer (RON). Repeat to layer several; later files win.
    #[arg(long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    /// Override `particles.count`.
    #[arg(long)]
    count: Option<usize>,
    /// Override `particles.seed` for a reproducible layout.
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(target_arch = "wasm32")]
fn load_config(_paths: &[PathBuf]) -> (BackdropConfig, ConfigDiagnostics) {
    // No filesystem on the web; embed the base layer.
    const RAW: &str = include_str!("../assets/config/backdrop.ron");
    match ron::from_str(RAW) {
        Ok(cfg) => (
            cfg,
            ConfigDiagnostics {
                used: vec!["<embedded>".into()],
                ..default()
            },
        ),
        Err(e) => (
            BackdropConfig::default(),
            ConfigDiagnostics {
                errors: vec![format!("embedded config parse failure: {e}")],
                ..default()
            },
        ),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(paths: &[PathBuf]) -> (BackdropConfig, ConfigDiagnostics) {
    let paths: Vec<PathBuf> = if paths.is_empty() {
        DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect()
    } else {
        paths.to_vec()
    };
    let (cfg, used, errors) = BackdropConfig::load_layered(paths.iter());
    (
        cfg,
        ConfigDiagnostics {
            used,
            errors,
            ..default()
        },
    )
}

fn primary_window(cfg: &BackdropConfig) -> Window {
    Window {
        title: cfg.window.title.clone(),
        resolution: (cfg.window.width, cfg.window.height).into(),
        resizable: true,
        transparent: cfg.window.transparent,
        #[cfg(target_arch = "wasm32")]
        canvas: Some("#backdrop".into()),
        #[cfg(target_arch = "wasm32")]
        fit_canvas_to_parent: true,
        // Page content above the canvas keeps its own pointer handling.
        #[cfg(target_arch = "wasm32")]
        prevent_default_event_handling: false,
        ..default()
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        // Better panic messages on wasm
        console_error_panic_hook::set_once();
    }

    let args = Args::parse();
    let (mut cfg, mut diagnostics) = load_config(&args.config);
    let overrides = ConfigOverrides {
        count: args.count,
        seed: args.seed,
    };
    overrides.apply(&mut cfg);
    diagnostics.warnings = cfg.validate();

    let mut app = App::new();
    #[cfg(not(target_arch = "wasm32"))]
    if !args.config.is_empty() {
        use prism_backdrop::interaction::session::config_hot_reload::ConfigReloadSettings;
        app.insert_resource(ConfigReloadSettings {
            paths: args.config.clone(),
            ..default()
        });
    }
    app.insert_resource(overrides);
    run(app, cfg, diagnostics);
}

fn run(mut app: App, cfg: BackdropConfig, diagnostics: ConfigDiagnostics) {
    app.insert_resource(ClearColor(Color::NONE))
        .insert_resource(diagnostics)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(primary_window(&cfg)),
            ..default()
        }))
        .insert_resource(cfg)
        .add_plugins(BackdropPlugin)
        .run();
}
