use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResolution};
use prism_backdrop::core::components::{DecorativeSolid, ParallaxCamera, SolidSpin};
use prism_backdrop::{
    mount_backdrop, unmount_backdrop, AnimationLoop, AnimationLoopPlugin, BackdropConfig,
    LoopState, PointerSample, PointerTrackerPlugin,
};

fn headless_app(count: usize) -> (App, Entity) {
    let mut cfg = BackdropConfig::default();
    cfg.particles.count = count;
    cfg.particles.seed = Some(11);
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .insert_resource(cfg)
        .add_plugins((PointerTrackerPlugin, AnimationLoopPlugin));
    let window = app
        .world_mut()
        .spawn((
            Window {
                resolution: WindowResolution::new(800.0, 600.0),
                ..default()
            },
            PrimaryWindow,
        ))
        .id();
    (app, window)
}

fn camera_translation(app: &mut App) -> Vec3 {
    let world = app.world_mut();
    world
        .query_filtered::<&Transform, With<ParallaxCamera>>()
        .single(world)
        .expect("one camera")
        .translation
}

fn spins(app: &mut App) -> Vec<(usize, Vec3)> {
    let world = app.world_mut();
    let mut out: Vec<(usize, Vec3)> = world
        .query::<(&DecorativeSolid, &SolidSpin)>()
        .iter(world)
        .map(|(s, spin)| (s.index, spin.0))
        .collect();
    out.sort_by_key(|(i, _)| *i);
    out
}

#[test]
fn ten_frames_spin_every_solid_and_keep_camera_centred() {
    let (mut app, _) = headless_app(3);
    mount_backdrop(app.world_mut()).expect("mount");
    let before = spins(&mut app);
    assert_eq!(before.len(), 3);

    for _ in 0..10 {
        app.update();
    }

    assert_eq!(app.world().resource::<AnimationLoop>().frames(), 10);
    let cam = camera_translation(&mut app);
    assert!(cam.distance(Vec3::new(0.0, 0.0, 30.0)) < 1e-5, "camera drifted to {cam}");
    for ((_, a), (_, b)) in before.iter().zip(spins(&mut app)) {
        assert!((b.x - a.x - 0.02).abs() < 1e-4, "x spin {} -> {}", a.x, b.x);
        assert!((b.y - a.y - 0.03).abs() < 1e-4, "y spin {} -> {}", a.y, b.y);
    }
}

#[test]
fn empty_scene_still_animates_the_camera() {
    let (mut app, _) = headless_app(0);
    mount_backdrop(app.world_mut()).expect("mount");
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(app.world().resource::<AnimationLoop>().frames(), 3);
    assert!(spins(&mut app).is_empty());
}

#[test]
fn stop_takes_effect_on_the_next_frame() {
    let (mut app, _) = headless_app(2);
    mount_backdrop(app.world_mut()).expect("mount");
    app.update();
    let frozen = spins(&mut app);

    assert!(app.world_mut().resource_mut::<AnimationLoop>().stop());
    app.update();
    app.update();

    assert_eq!(spins(&mut app), frozen);
    assert_eq!(app.world().resource::<AnimationLoop>().state(), LoopState::Idle);
    assert_eq!(app.world().resource::<AnimationLoop>().frames(), 1);
}

#[test]
fn stop_when_idle_is_harmless() {
    let (mut app, _) = headless_app(2);
    let mut anim = app.world_mut().resource_mut::<AnimationLoop>();
    assert!(!anim.stop());
    assert!(!anim.stop());
    assert!(!anim.is_running());
}

#[test]
fn unmount_stops_the_loop() {
    let (mut app, _) = headless_app(2);
    mount_backdrop(app.world_mut()).expect("mount");
    assert!(app.world().resource::<AnimationLoop>().is_running());
    unmount_backdrop(app.world_mut());
    assert!(!app.world().resource::<AnimationLoop>().is_running());
    app.update();
    assert_eq!(app.world().resource::<AnimationLoop>().frames(), 0);
}

#[test]
fn pointer_moves_pull_the_camera_toward_the_target() {
    let (mut app, window) = headless_app(1);
    mount_backdrop(app.world_mut()).expect("mount");
    // top-right corner: normalized (1, 1), parallax target (2, 2)
    app.world_mut().send_event(CursorMoved {
        window,
        position: Vec2::new(800.0, 0.0),
        delta: None,
    });
    app.update();

    assert_eq!(**app.world().resource::<PointerSample>(), Vec2::new(1.0, 1.0));
    let cam = camera_translation(&mut app);
    assert!((cam.x - 0.1).abs() < 1e-5, "x {}", cam.x);
    assert!((cam.y - 0.1).abs() < 1e-5, "y {}", cam.y);
    assert_eq!(cam.z, 30.0);

    for _ in 0..200 {
        app.update();
    }
    let cam = camera_translation(&mut app);
    assert!(cam.x > 1.99 && cam.x <= 2.0, "x {}", cam.x);
}
