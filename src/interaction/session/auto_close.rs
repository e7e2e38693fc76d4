// Exits after `window.autoClose` seconds when > 0 (smoke runs, screenshots).
// The exit event also drives the backdrop unmount in `Last`.

use bevy::prelude::*;

use crate::core::config::BackdropConfig;

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct AutoCloseTimer(pub Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_auto_close)
            .add_systems(Update, tick_auto_close.run_if(resource_exists::<AutoCloseTimer>));
    }
}

pub fn arm_auto_close(mut commands: Commands, cfg: Res<BackdropConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(target: "session", seconds = secs, "AutoClose armed");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

pub fn tick_auto_close(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<AutoCloseTimer>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if timer.tick(time.delta()).just_finished() {
        info!(target: "session", "AutoClose elapsed; requesting exit");
        ev_exit.write(AppExit::Success);
        commands.remove_resource::<AutoCloseTimer>();
    }
}
