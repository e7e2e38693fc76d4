//! Optional flat particle overlay drawn above the 3D backdrop with gizmos.
//! Disabled unless `field.enabled` is set.

use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::RenderLayers;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};
use rand::{rngs::StdRng, SeedableRng};

pub mod simulation;

pub use simulation::{repel, FieldLink, FieldParticle, ParticleField};

use crate::core::config::BackdropConfig;
use crate::core::system::system_order::AnimateSet;
use crate::rendering::geometry::catalog::palette;

const FIELD_LAYER: usize = 1;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct FieldGizmos;

#[derive(Component)]
pub struct FieldOverlayCamera;

pub struct ParticleFieldPlugin;

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<FieldGizmos>()
            .add_event::<WindowResized>()
            .add_event::<CursorMoved>()
            .add_systems(Startup, (configure_field_gizmos, seed_field))
            .add_systems(
                Update,
                (
                    reseed_field_on_resize,
                    track_field_pointer,
                    step_field,
                    draw_field,
                )
                    .chain()
                    .in_set(AnimateSet)
                    .run_if(resource_exists::<ParticleField>),
            );
    }
}

fn configure_field_gizmos(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<FieldGizmos>();
    config.render_layers = RenderLayers::layer(FIELD_LAYER);
    config.line.width = 1.0;
}

fn field_rng(cfg: &BackdropConfig) -> StdRng {
    match cfg.particles.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    }
}

pub fn seed_field(
    mut commands: Commands,
    cfg: Res<BackdropConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if !cfg.field.enabled {
        return;
    }
    let Ok(window) = windows.single() else {
        warn!(target: "field", "No primary window; particle field skipped");
        return;
    };
    let bounds = Vec2::new(window.width(), window.height());
    let field = ParticleField::seed(cfg.field.count, bounds, &mut field_rng(&cfg));
    commands.spawn((
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        RenderLayers::layer(FIELD_LAYER),
        FieldOverlayCamera,
        Name::new("FieldOverlayCamera"),
    ));
    info!(target: "field", particles = cfg.field.count, "Particle field seeded");
    commands.insert_resource(field);
}

pub fn reseed_field_on_resize(
    mut events: EventReader<WindowResized>,
    cfg: Res<BackdropConfig>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut field: ResMut<ParticleField>,
) {
    let Ok(primary) = primary.single() else {
        return;
    };
    let Some(ev) = events.read().filter(|e| e.window == primary).last() else {
        return;
    };
    let bounds = Vec2::new(ev.width, ev.height);
    if bounds == field.bounds {
        return;
    }
    let pointer = field.pointer;
    *field = ParticleField::seed(cfg.field.count, bounds, &mut field_rng(&cfg));
    field.pointer = pointer;
    debug!(target: "field", width = ev.width, height = ev.height, "Particle field reseeded");
}

pub fn track_field_pointer(mut moves: EventReader<CursorMoved>, mut field: ResMut<ParticleField>) {
    if let Some(ev) = moves.read().last() {
        field.pointer = Some(ev.position);
    }
}

pub fn step_field(cfg: Res<BackdropConfig>, mut field: ResMut<ParticleField>) {
    field.step(cfg.field.repel_radius);
}

/// Pixel space (top-left origin) to the overlay camera's world space.
fn to_overlay(position: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(position.x - bounds.x * 0.5, bounds.y * 0.5 - position.y)
}

pub fn draw_field(
    cfg: Res<BackdropConfig>,
    field: Res<ParticleField>,
    mut gizmos: Gizmos<FieldGizmos>,
) {
    let colors = palette();
    for link in field.links(cfg.field.link_distance) {
        let a = to_overlay(field.particles[link.a].position, field.bounds);
        let b = to_overlay(field.particles[link.b].position, field.bounds);
        gizmos.line_2d(a, b, Color::WHITE.with_alpha(link.alpha));
    }
    for p in &field.particles {
        let color = colors[p.color_index % colors.len()].with_alpha(p.opacity);
        gizmos.circle_2d(to_overlay(p.position, field.bounds), p.size, color);
    }
}
