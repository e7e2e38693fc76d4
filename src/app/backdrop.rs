// This file is part of Prism Backdrop.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::animation::AnimationLoopPlugin;
use crate::core::config::BackdropConfig;
use crate::debug::DebugPlugin;
use crate::interaction::pointer::PointerTrackerPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::rendering::field::ParticleFieldPlugin;
use crate::rendering::scene::SceneLifecyclePlugin;

/// Config layers that produced the running `BackdropConfig`, logged once at startup.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigDiagnostics {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub struct BackdropPlugin;

impl Plugin for BackdropPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<BackdropConfig>() {
            app.insert_resource(BackdropConfig::default());
        }
        app.init_resource::<ConfigDiagnostics>()
            .add_plugins((
                PointerTrackerPlugin,
                AnimationLoopPlugin,
                SceneLifecyclePlugin,
                ParticleFieldPlugin,
                DebugPlugin,
                ConfigHotReloadPlugin,
                AutoClosePlugin,
            ))
            .add_systems(Startup, log_config_diagnostics);
    }
}

fn log_config_diagnostics(diag: Res<ConfigDiagnostics>, cfg: Res<BackdropConfig>) {
    for e in &diag.errors {
        warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
    }
    for w in &diag.warnings {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
    if diag.used.is_empty() {
        info!(target: "config", "No config layers found; using defaults");
    } else {
        info!(target: "config", used = ?diag.used, "Config layers loaded");
    }
    info!(
        target: "config",
        solids = cfg.particles.count,
        seed = ?cfg.particles.seed,
        field = cfg.field.enabled,
        auto_close = cfg.window.auto_close,
        "Runtime summary"
    );
}
