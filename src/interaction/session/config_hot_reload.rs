use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::{BackdropConfig, ConfigOverrides, DEFAULT_CONFIG_PATHS};

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect(),
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
    /// Set once the startup mtimes are recorded; files loaded at launch are not "changed".
    primed: bool,
}
impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
            primed: false,
        }
    }
}

/// Polls the layered config files and swaps `BackdropConfig` when they change.
/// Count/seed changes are picked up by the lifecycle's remount system.
pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if !app.world().contains_resource::<ConfigReloadSettings>() {
                app.init_resource::<ConfigReloadSettings>();
            }
            app.init_resource::<ConfigReloadState>()
                .init_resource::<ConfigOverrides>()
                .add_systems(Update, poll_and_reload_config);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

/// True when any watched file has a newer mtime than last seen.
fn any_file_changed(paths: &[PathBuf], last_mod: &mut HashMap<PathBuf, SystemTime>) -> bool {
    use std::time::UNIX_EPOCH;
    let mut dirty = false;
    for path in paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let entry = last_mod.entry(path.clone()).or_insert(UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    dirty
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    overrides: Res<ConfigOverrides>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<BackdropConfig>,
    mut windows: Query<&mut Window>,
) {
    if !state.primed {
        let ConfigReloadState { last_mod, primed, .. } = &mut *state;
        any_file_changed(&settings.paths, last_mod);
        *primed = true;
        return;
    }
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state.timer.set_duration(std::time::Duration::from_secs_f32(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    if !any_file_changed(&settings.paths, &mut state.last_mod) {
        return;
    }
    let (mut new_cfg, _used, errors) = BackdropConfig::load_layered(settings.paths.iter());
    for e in errors {
        warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}");
    }
    overrides.apply(&mut new_cfg);
    if *cfg_res == new_cfg {
        return;
    }
    for w in new_cfg.validate() {
        warn!(target: "config", "{w}");
    }
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height {
            window
                .resolution
                .set(new_cfg.window.width, new_cfg.window.height);
        }
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    info!(target: "config", "Config hot-reload applied");
    *cfg_res = new_cfg;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn change_detection_tracks_mtime() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("backdrop.ron");
        std::fs::write(&path, "(particles: (count: 5))").expect("write");
        let paths = vec![path, dir.path().join("missing.ron")];
        let mut seen = HashMap::new();
        assert!(any_file_changed(&paths, &mut seen));
        assert!(!any_file_changed(&paths, &mut seen));
        assert_eq!(seen.len(), 1);
    }

    fn reload_app(path: PathBuf, overrides: ConfigOverrides) -> App {
        let mut cfg = BackdropConfig::default();
        overrides.apply(&mut cfg);
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
            .insert_resource(cfg)
            .insert_resource(overrides)
            .insert_resource(ConfigReloadSettings {
                paths: vec![path],
                interval_secs: 0.5,
            })
            .add_plugins(ConfigHotReloadPlugin);
        app
    }

    #[test]
    fn untouched_files_keep_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("backdrop.ron");
        std::fs::write(&path, "(particles: (count: 60))").expect("write");
        let mut app = reload_app(
            path,
            ConfigOverrides {
                count: Some(7),
                seed: Some(3),
            },
        );
        for _ in 0..10 {
            app.update();
        }
        let cfg = app.world().resource::<BackdropConfig>();
        assert_eq!(cfg.particles.count, 7);
        assert_eq!(cfg.particles.seed, Some(3));
    }

    #[test]
    fn edited_file_reloads_but_overrides_still_win() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("backdrop.ron");
        std::fs::write(&path, "(particles: (count: 60))").expect("write");
        let mut app = reload_app(
            path.clone(),
            ConfigOverrides {
                count: None,
                seed: Some(3),
            },
        );
        for _ in 0..3 {
            app.update();
        }
        std::fs::write(&path, "(particles: (count: 12, seed: Some(99)))").expect("rewrite");
        std::fs::File::options()
            .write(true)
            .open(&path)
            .and_then(|f| f.set_modified(SystemTime::now() + Duration::from_secs(5)))
            .expect("bump mtime");
        for _ in 0..5 {
            app.update();
        }
        let cfg = app.world().resource::<BackdropConfig>();
        assert_eq!(cfg.particles.count, 12);
        assert_eq!(cfg.particles.seed, Some(3));
    }
}
