//! Background scene state: one of three procedural visuals, owned and
//! replaced whole on switch requests, mutated in place once per frame.
//!
//! The geometry data here is plain vertex arrays; uploading them to the GPU
//! is the renderer's job, abstracted behind [`GeometryBackend`] so switch
//! semantics (exactly one live geometry handle) are testable on the host.

pub mod color;
mod orbs;
mod particles;
mod wave_grid;

pub use orbs::{icosahedron_wireframe, Orb, OrbCluster};
pub use particles::ParticleField;
pub use wave_grid::WaveGrid;

use crate::config::{POINTER_SCALE, REFERENCE_FRAME_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneVariant {
    ParticleField,
    WaveGrid,
    OrbCluster,
}

impl SceneVariant {
    /// Identifier carried by the scene-switch buttons (`data-scene`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "particles" => Some(Self::ParticleField),
            "grid" => Some(Self::WaveGrid),
            "orbs" => Some(Self::OrbCluster),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ParticleField => "particles",
            Self::WaveGrid => "grid",
            Self::OrbCluster => "orbs",
        }
    }
}

/// Rotation target derived from the pointer position, in radians per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTarget {
    pub x: f32,
    pub y: f32,
}

impl PointerTarget {
    /// Map a pointer position to a parallax target around the window centre.
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        Self {
            x: (client_x - width / 2.0) * POINTER_SCALE,
            y: (client_y - height / 2.0) * POINTER_SCALE,
        }
    }
}

/// Exactly one variant's geometry is live at a time.
pub enum Scene {
    ParticleField(ParticleField),
    WaveGrid(WaveGrid),
    OrbCluster(OrbCluster),
}

impl Scene {
    fn build(variant: SceneVariant, rng: &mut dyn FnMut() -> f32) -> Self {
        match variant {
            SceneVariant::ParticleField => Scene::ParticleField(ParticleField::new(rng)),
            SceneVariant::WaveGrid => Scene::WaveGrid(WaveGrid::new()),
            SceneVariant::OrbCluster => Scene::OrbCluster(OrbCluster::new(rng)),
        }
    }

    pub fn variant(&self) -> SceneVariant {
        match self {
            Scene::ParticleField(_) => SceneVariant::ParticleField,
            Scene::WaveGrid(_) => SceneVariant::WaveGrid,
            Scene::OrbCluster(_) => SceneVariant::OrbCluster,
        }
    }
}

pub struct SceneState {
    pub scene: Scene,
    elapsed: f32,
}

impl SceneState {
    pub fn new(variant: SceneVariant, rng: &mut dyn FnMut() -> f32) -> Self {
        Self {
            scene: Scene::build(variant, rng),
            elapsed: 0.0,
        }
    }

    pub fn variant(&self) -> SceneVariant {
        self.scene.variant()
    }

    /// Wall-clock seconds since the state was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Drop the current scene and build the requested one in its place.
    /// The renderer-side handle swap goes through [`SceneStore::install`].
    pub fn switch_to(&mut self, variant: SceneVariant, rng: &mut dyn FnMut() -> f32) {
        self.scene = Scene::build(variant, rng);
    }

    /// Advance the active scene by `dt` seconds. Deterministic; no error paths.
    pub fn tick(&mut self, dt: f32, pointer: PointerTarget) {
        self.elapsed += dt;
        // Rates are calibrated per reference frame, not per second.
        let frames = dt * REFERENCE_FRAME_RATE;
        match &mut self.scene {
            Scene::ParticleField(field) => field.tick(frames, pointer),
            Scene::WaveGrid(grid) => grid.tick(frames, self.elapsed),
            Scene::OrbCluster(cluster) => cluster.tick(frames, self.elapsed),
        }
    }
}

/// Creates and releases the graphics resources backing a scene. The GL
/// implementation lives in the browser layer; tests use a counting backend.
pub trait GeometryBackend {
    type Handle;
    type Error;

    fn build(&mut self, scene: &Scene) -> Result<Self::Handle, Self::Error>;
    fn release(&mut self, handle: Self::Handle);
}

/// Owns at most one backend handle and guarantees the previous one is
/// released before its replacement is installed.
pub struct SceneStore<B: GeometryBackend> {
    handle: Option<B::Handle>,
}

impl<B: GeometryBackend> Default for SceneStore<B> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<B: GeometryBackend> SceneStore<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, backend: &mut B, scene: &Scene) -> Result<(), B::Error> {
        if let Some(old) = self.handle.take() {
            backend.release(old);
        }
        self.handle = Some(backend.build(scene)?);
        Ok(())
    }

    pub fn handle(&self) -> Option<&B::Handle> {
        self.handle.as_ref()
    }
}
