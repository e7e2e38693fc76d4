use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::core::components::{BackdropLight, BackdropRoot, DecorativeSolid, SolidSpin};
use crate::core::config::ParticleConfig;
use crate::rendering::geometry::catalog::{
    palette, primary_hue, secondary_hue, templates, ShapeKind,
};

pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const DIRECTIONAL_ILLUMINANCE: f32 = 2_500.0;
pub const ACCENT_LIGHT_INTENSITY: f32 = 600_000.0;
pub const ACCENT_LIGHT_RANGE: f32 = 50.0;

const DIRECTIONAL_POSITION: Vec3 = Vec3::new(0.0, 10.0, 10.0);
const PRIMARY_ACCENT_POSITION: Vec3 = Vec3::new(10.0, 5.0, 10.0);
const SECONDARY_ACCENT_POSITION: Vec3 = Vec3::new(-10.0, -5.0, 10.0);

/// Randomized parameters of one solid before it is spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidSpec {
    pub solid: DecorativeSolid,
    pub position: Vec3,
    pub rotation: Vec3,
}

fn sample(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

pub fn roll_solid(index: usize, params: &ParticleConfig, rng: &mut impl Rng) -> SolidSpec {
    let shape = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
    let color_index = rng.gen_range(0..palette().len());
    let opacity = sample(rng, params.opacity.min, params.opacity.max);
    let half = params.spread * 0.5;
    let position = Vec3::new(
        sample(rng, -half, half),
        sample(rng, -half, half),
        sample(rng, -half, half),
    );
    let rotation = Vec3::new(
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
    );
    SolidSpec {
        solid: DecorativeSolid {
            shape,
            color_index,
            opacity,
            index,
        },
        position,
        rotation,
    }
}

/// Roll `count` solids; `index` equals the position in the returned list.
pub fn roll_layout(count: usize, params: &ParticleConfig, rng: &mut impl Rng) -> Vec<SolidSpec> {
    (0..count).map(|i| roll_solid(i, params, rng)).collect()
}

/// Semi-transparent reflective material so overlapping solids blend.
pub fn glass_material(solid: &DecorativeSolid) -> StandardMaterial {
    StandardMaterial {
        base_color: solid.color(),
        alpha_mode: AlphaMode::Blend,
        metallic: 0.2,
        perceptual_roughness: 0.5,
        specular_transmission: 0.6,
        reflectance: 0.5,
        ..default()
    }
}

/// Everything one build put into the world.
#[derive(Debug)]
pub struct BuiltScene {
    pub root: Entity,
    pub lights: Vec<Entity>,
    /// Ordered by `DecorativeSolid::index`.
    pub solids: Vec<Entity>,
    pub meshes: Vec<Handle<Mesh>>,
    pub materials: Vec<Handle<StandardMaterial>>,
}

fn spawn_lights(world: &mut World, root: Entity) -> Vec<Entity> {
    world.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    let directional = world
        .spawn((
            DirectionalLight {
                illuminance: DIRECTIONAL_ILLUMINANCE,
                ..default()
            },
            Transform::from_translation(DIRECTIONAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            BackdropLight,
            Name::new("BackdropKeyLight"),
            ChildOf(root),
        ))
        .id();
    let accents = [
        (primary_hue(), PRIMARY_ACCENT_POSITION, "BackdropPrimaryAccent"),
        (secondary_hue(), SECONDARY_ACCENT_POSITION, "BackdropSecondaryAccent"),
    ];
    let mut lights = vec![directional];
    for (color, position, name) in accents {
        lights.push(
            world
                .spawn((
                    PointLight {
                        color,
                        intensity: ACCENT_LIGHT_INTENSITY,
                        range: ACCENT_LIGHT_RANGE,
                        ..default()
                    },
                    Transform::from_translation(position),
                    BackdropLight,
                    Name::new(name),
                    ChildOf(root),
                ))
                .id(),
        );
    }
    lights
}

/// Spawn a lit scene container holding `count` randomized solids.
pub fn build_scene(
    world: &mut World,
    count: usize,
    params: &ParticleConfig,
    rng: &mut impl Rng,
) -> BuiltScene {
    let root = world
        .spawn((
            BackdropRoot,
            Transform::default(),
            Visibility::default(),
            Name::new("BackdropRoot"),
        ))
        .id();
    let lights = spawn_lights(world, root);

    // One mesh per template, shared by every solid of that shape.
    let meshes: Vec<Handle<Mesh>> = {
        let mut assets = world.resource_mut::<Assets<Mesh>>();
        templates().iter().map(|(_, t)| assets.add(t.mesh())).collect()
    };

    let layout = roll_layout(count, params, rng);
    let materials: Vec<Handle<StandardMaterial>> = {
        let mut assets = world.resource_mut::<Assets<StandardMaterial>>();
        layout
            .iter()
            .map(|spec| assets.add(glass_material(&spec.solid)))
            .collect()
    };

    let mut solids = Vec::with_capacity(layout.len());
    for (spec, material) in layout.iter().zip(&materials) {
        let spin = SolidSpin(spec.rotation);
        let entity = world
            .spawn((
                Mesh3d(meshes[spec.solid.shape.catalog_index()].clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(spec.position).with_rotation(spin.quat()),
                spec.solid,
                spin,
                Name::new(format!("Solid{}", spec.solid.index)),
                ChildOf(root),
            ))
            .id();
        solids.push(entity);
    }

    BuiltScene {
        root,
        lights,
        solids,
        meshes,
        materials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn app_with_assets() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>();
        app
    }

    #[test]
    fn rolled_solids_respect_ranges() {
        let params = ParticleConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let layout = roll_layout(500, &params, &mut rng);
        assert_eq!(layout.len(), 500);
        for (i, spec) in layout.iter().enumerate() {
            assert_eq!(spec.solid.index, i);
            assert!((0.1..0.4).contains(&spec.solid.opacity), "opacity {}", spec.solid.opacity);
            assert!(spec.solid.color_index < palette().len());
            for axis in spec.position.to_array() {
                assert!((-20.0..20.0).contains(&axis), "position axis {axis}");
            }
            for axis in spec.rotation.to_array() {
                assert!((0.0..PI).contains(&axis), "rotation axis {axis}");
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let params = ParticleConfig::default();
        let a = roll_layout(20, &params, &mut StdRng::seed_from_u64(99));
        let b = roll_layout(20, &params, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn build_spawns_lights_and_solids_under_root() {
        let mut app = app_with_assets();
        let world = app.world_mut();
        let mut rng = StdRng::seed_from_u64(1);
        let built = build_scene(world, 12, &ParticleConfig::default(), &mut rng);

        assert_eq!(built.lights.len(), 3);
        assert_eq!(built.solids.len(), 12);
        assert_eq!(built.meshes.len(), templates().len());
        assert_eq!(built.materials.len(), 12);
        for (i, e) in built.solids.iter().enumerate() {
            let solid = world.get::<DecorativeSolid>(*e).expect("solid component");
            assert_eq!(solid.index, i);
            assert_eq!(world.get::<ChildOf>(*e).map(|c| c.parent()), Some(built.root));
        }
        let ambient = world.resource::<AmbientLight>();
        assert_eq!(ambient.brightness, AMBIENT_BRIGHTNESS);
        let accents: Vec<Color> = built.lights[1..]
            .iter()
            .map(|e| world.get::<PointLight>(*e).expect("point light").color)
            .collect();
        assert_eq!(accents, vec![primary_hue(), secondary_hue()]);
    }

    #[test]
    fn zero_count_is_a_valid_empty_scene() {
        let mut app = app_with_assets();
        let world = app.world_mut();
        let mut rng = StdRng::seed_from_u64(3);
        let built = build_scene(world, 0, &ParticleConfig::default(), &mut rng);
        assert!(built.solids.is_empty());
        assert!(built.materials.is_empty());
        assert!(world.get_entity(built.root).is_ok());
    }
}
