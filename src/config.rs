//! Tuning constants for the background scenes and the page chrome.
//!
//! Per-frame rates are expressed relative to a 60 Hz reference frame; the
//! scene tick scales them by the measured delta so the animation speed does
//! not depend on the display refresh rate.

/// Frames per second the per-frame rates below are calibrated against.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

// Particle field ------------------------------------------------------------

pub const PARTICLE_COUNT: usize = 1500;
/// Extents of the box particles spawn in, centred on the origin.
pub const PARTICLE_SPREAD: [f32; 3] = [150.0, 150.0, 100.0];
/// Drift clock advance per reference frame.
pub const PARTICLE_CLOCK_RATE: f32 = 0.0015;
pub const PARTICLE_DRIFT_X: f32 = 0.001;
pub const PARTICLE_DRIFT_Y: f32 = 0.002;
/// Hue cycles as `(base + clock + index * step) mod 1`.
pub const PARTICLE_HUE_BASE: f32 = 0.6;
pub const PARTICLE_HUE_STEP: f32 = 0.000_05;
/// Spawn hues sit in the blue-violet band above the base.
pub const PARTICLE_SPAWN_HUE_BASE: f32 = 0.65;
pub const PARTICLE_SPAWN_HUE_SPAN: f32 = 0.1;
pub const PARTICLE_SATURATION: f32 = 0.7;
pub const PARTICLE_LIGHTNESS: f32 = 0.6;
pub const PARTICLE_POINT_SIZE: f32 = 0.4;
pub const PARTICLE_ALPHA: f32 = 0.8;
/// Constant yaw drift per reference frame, on top of the pointer parallax.
pub const PARTICLE_AUTO_DRIFT: f32 = 0.001;

/// First-order filter gain pulling cluster rotation toward the pointer target.
pub const POINTER_GAIN: f32 = 0.05;
/// Pointer offset (pixels from window centre) to rotation target scale.
pub const POINTER_SCALE: f32 = 0.001;

// Wave grid -----------------------------------------------------------------

pub const GRID_SIZE: f32 = 200.0;
pub const GRID_SEGMENTS: usize = 40;
pub const GRID_WAVE_AMPLITUDE: f32 = 2.0;
/// Spatial frequency of the travelling wave along the plane's local X.
pub const GRID_WAVE_FREQUENCY: f32 = 0.1;
/// Spin about the plane normal per reference frame.
pub const GRID_SPIN_RATE: f32 = 0.001;
/// Vertical drop of the plane below the camera axis.
pub const GRID_DROP: f32 = -20.0;
pub const GRID_COLOR: [f32; 3] = [0.388, 0.4, 0.945];
pub const GRID_ALPHA: f32 = 0.3;

// Orb cluster ---------------------------------------------------------------

pub const ORB_COUNT: usize = 30;
pub const ORB_RADIUS: f32 = 2.0;
/// Extents of the box orbs spawn in, centred on the origin.
pub const ORB_SPREAD: [f32; 3] = [100.0, 60.0, 50.0];
pub const ORB_SCALE_BASE: f32 = 0.5;
pub const ORB_SCALE_SPAN: f32 = 2.0;
/// Per-member spin per reference frame, applied on both local axes.
pub const ORB_SPIN_RATE: f32 = 0.01;
/// Whole-cluster yaw per reference frame.
pub const ORB_GROUP_YAW_RATE: f32 = 0.002;
/// Vertical bob amplitude per reference frame.
pub const ORB_BOB_RATE: f32 = 0.05;
pub const ORB_COLOR: [f32; 3] = [0.22, 0.741, 0.973];
pub const ORB_ALPHA: f32 = 1.0;

// Camera --------------------------------------------------------------------

pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 50.0;

// Page chrome ---------------------------------------------------------------

/// Hero carousel auto-rotation period.
pub const SLIDE_INTERVAL_MS: i32 = 6000;
/// Featured fallback when no record is flagged: the first N records.
pub const FEATURED_FALLBACK_COUNT: usize = 5;
/// The one static resource the page loads.
pub const PROJECTS_URL: &str = "data/projects.json";
