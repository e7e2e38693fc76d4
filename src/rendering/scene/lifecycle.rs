//! Owned bundle of everything a mounted backdrop holds, plus the single
//! mount/unmount path that keeps at most one bundle alive.

use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::window::WindowResized;
use rand::{rngs::StdRng, SeedableRng};

use super::builder::build_scene;
use super::surface::{aspect_for, RenderSurface};
use crate::animation::animation_loop::AnimationLoop;
use crate::core::components::ParallaxCamera;
use crate::core::config::{BackdropConfig, CameraConfig};
use crate::core::error::BackdropError;

/// Scene container, camera, render surface and the assets they reference.
#[derive(Debug)]
pub struct SceneResources {
    pub root: Entity,
    pub camera: Entity,
    pub surface: RenderSurface,
    pub lights: Vec<Entity>,
    /// Ordered by `DecorativeSolid::index`.
    pub solids: Vec<Entity>,
    meshes: Vec<Handle<Mesh>>,
    materials: Vec<Handle<StandardMaterial>>,
    count: usize,
    seed: Option<u64>,
    released: bool,
}

fn perspective(cfg: &CameraConfig, aspect_ratio: f32) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: cfg.fov_degrees.to_radians(),
        aspect_ratio,
        near: cfg.near,
        far: cfg.far,
    })
}

impl SceneResources {
    /// Acquire the surface first so a missing window leaves nothing behind.
    pub fn initialize(world: &mut World, cfg: &BackdropConfig) -> Result<Self, BackdropError> {
        let surface = RenderSurface::acquire(world, cfg.window.max_pixel_ratio)?;

        let mut rng = match cfg.particles.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let count = cfg.particles.count;
        let built = build_scene(world, count, &cfg.particles, &mut rng);

        let camera = world
            .spawn((
                Camera3d::default(),
                Camera {
                    clear_color: ClearColorConfig::Custom(Color::NONE),
                    ..default()
                },
                perspective(&cfg.camera, surface.aspect_ratio()),
                Transform::from_xyz(0.0, 0.0, cfg.camera.distance).looking_at(Vec3::ZERO, Vec3::Y),
                ParallaxCamera,
                Name::new("BackdropCamera"),
            ))
            .id();

        info!(
            target: "backdrop",
            solids = count,
            width = surface.size.x,
            height = surface.size.y,
            pixel_ratio = surface.pixel_ratio,
            "Backdrop mounted"
        );

        Ok(Self {
            root: built.root,
            camera,
            surface,
            lights: built.lights,
            solids: built.solids,
            meshes: built.meshes,
            materials: built.materials,
            count,
            seed: cfg.particles.seed,
            released: false,
        })
    }

    /// Match camera aspect and surface size to the viewport. Writing identical
    /// values is skipped.
    pub fn resize(&mut self, projection: &mut Projection, width: f32, height: f32) {
        if self.released {
            return;
        }
        let size = Vec2::new(width, height);
        if self.surface.size != size {
            self.surface.size = size;
        }
        if let Projection::Perspective(p) = projection {
            let aspect = aspect_for(width, height);
            if p.aspect_ratio != aspect {
                p.aspect_ratio = aspect;
            }
        }
    }

    /// Release assets, despawn the scene container (lights and solids go with it)
    /// and the camera. Repeated calls are no-ops.
    pub fn finalize(&mut self, world: &mut World) {
        if self.released {
            return;
        }
        let released_meshes = self.meshes.len();
        let released_materials = self.materials.len();
        if let Some(mut meshes) = world.get_resource_mut::<Assets<Mesh>>() {
            for handle in self.meshes.drain(..) {
                meshes.remove(handle.id());
            }
        }
        if let Some(mut materials) = world.get_resource_mut::<Assets<StandardMaterial>>() {
            for handle in self.materials.drain(..) {
                materials.remove(handle.id());
            }
        }
        self.meshes.clear();
        self.materials.clear();

        for entity in [self.root, self.camera] {
            if let Ok(e) = world.get_entity_mut(entity) {
                e.despawn();
            }
        }
        self.surface.release(world);
        world.insert_resource(AmbientLight::default());
        self.released = true;

        info!(
            target: "backdrop",
            meshes = released_meshes,
            materials = released_materials,
            "Backdrop finalized"
        );
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
    pub fn mesh_handles(&self) -> &[Handle<Mesh>] {
        &self.meshes
    }
    pub fn material_handles(&self) -> &[Handle<StandardMaterial>] {
        &self.materials
    }
}

/// Owner of the live resource bundle. Mounting always finalizes the previous one.
#[derive(Resource, Debug, Default)]
pub struct SceneLifecycle {
    current: Option<SceneResources>,
    mounts: u64,
}

impl SceneLifecycle {
    pub fn mount(
        &mut self,
        world: &mut World,
        cfg: &BackdropConfig,
    ) -> Result<&SceneResources, BackdropError> {
        self.unmount(world);
        let resources = SceneResources::initialize(world, cfg)?;
        self.mounts += 1;
        Ok(self.current.insert(resources))
    }

    /// Returns whether a bundle was finalized.
    pub fn unmount(&mut self, world: &mut World) -> bool {
        match self.current.take() {
            Some(mut resources) => {
                resources.finalize(world);
                true
            }
            None => false,
        }
    }

    pub fn resources(&self) -> Option<&SceneResources> {
        self.current.as_ref()
    }
    pub fn resources_mut(&mut self) -> Option<&mut SceneResources> {
        self.current.as_mut()
    }
    pub fn is_mounted(&self) -> bool {
        self.current.is_some()
    }
    pub fn mount_count(&self) -> u64 {
        self.mounts
    }
}

/// Stop any running loop, rebuild the scene from the current config and start the
/// loop on the fresh resources.
pub fn mount_backdrop(world: &mut World) -> Result<(), BackdropError> {
    let cfg = world
        .get_resource::<BackdropConfig>()
        .cloned()
        .unwrap_or_default();
    if let Some(mut anim) = world.get_resource_mut::<AnimationLoop>() {
        anim.stop();
    }
    world.init_resource::<SceneLifecycle>();
    world.resource_scope(|world, mut lifecycle: Mut<SceneLifecycle>| {
        let resources = lifecycle.mount(world, &cfg)?;
        if let Some(mut anim) = world.get_resource_mut::<AnimationLoop>() {
            anim.start(resources);
        }
        Ok(())
    })
}

/// Stop the loop and finalize the mounted bundle, if any.
pub fn unmount_backdrop(world: &mut World) -> bool {
    if let Some(mut anim) = world.get_resource_mut::<AnimationLoop>() {
        anim.stop();
    }
    if !world.contains_resource::<SceneLifecycle>() {
        return false;
    }
    world.resource_scope(|world, mut lifecycle: Mut<SceneLifecycle>| lifecycle.unmount(world))
}

pub fn mount_on_startup(world: &mut World) {
    if let Err(e) = mount_backdrop(world) {
        warn!(target: "backdrop", "Backdrop disabled: {e}");
    }
}

/// Rebuild when the configured count or seed no longer matches the mounted scene.
pub fn remount_on_config_change(world: &mut World) {
    let Some(cfg) = world.get_resource::<BackdropConfig>() else {
        return;
    };
    let wanted = (cfg.particles.count, cfg.particles.seed);
    let mounted = world
        .get_resource::<SceneLifecycle>()
        .and_then(|l| l.resources())
        .map(|r| (r.count(), r.seed()));
    match mounted {
        Some(current) if current != wanted => {
            info!(
                target: "backdrop",
                "Particle config changed {:?} -> {:?}; remounting", current, wanted
            );
            if let Err(e) = mount_backdrop(world) {
                warn!(target: "backdrop", "Backdrop remount failed: {e}");
            }
        }
        _ => {}
    }
}

pub fn resize_on_window_event(
    mut events: EventReader<WindowResized>,
    mut lifecycle: ResMut<SceneLifecycle>,
    mut projections: Query<&mut Projection, With<ParallaxCamera>>,
) {
    for ev in events.read() {
        let Some(resources) = lifecycle.resources_mut() else {
            continue;
        };
        if ev.window != resources.surface.window {
            continue;
        }
        if let Ok(mut projection) = projections.get_mut(resources.camera) {
            resources.resize(&mut projection, ev.width, ev.height);
        }
    }
}

pub fn unmount_on_exit(world: &mut World) {
    let exiting = world
        .get_resource::<Events<AppExit>>()
        .is_some_and(|ev| !ev.is_empty());
    if exiting && unmount_backdrop(world) {
        info!(target: "backdrop", "Backdrop unmounted on exit");
    }
}
