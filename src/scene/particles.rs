//! Drifting colored particle field: N point samples whose positions wander
//! on slow sinusoids and whose hues rotate continuously, with the whole
//! cluster eased toward a pointer-derived rotation target.

use crate::config::{
    PARTICLE_AUTO_DRIFT, PARTICLE_CLOCK_RATE, PARTICLE_COUNT, PARTICLE_DRIFT_X, PARTICLE_DRIFT_Y,
    PARTICLE_HUE_BASE, PARTICLE_HUE_STEP, PARTICLE_LIGHTNESS, PARTICLE_SATURATION,
    PARTICLE_SPAWN_HUE_BASE, PARTICLE_SPAWN_HUE_SPAN, PARTICLE_SPREAD, POINTER_GAIN,
};

use super::color::hsl_to_rgb;
use super::PointerTarget;

pub struct ParticleField {
    positions: Vec<f32>,
    colors: Vec<f32>,
    rotation_x: f32,
    rotation_y: f32,
    clock: f32,
}

impl ParticleField {
    pub fn new(rng: &mut dyn FnMut() -> f32) -> Self {
        let mut positions = Vec::with_capacity(PARTICLE_COUNT * 3);
        let mut colors = Vec::with_capacity(PARTICLE_COUNT * 3);
        for _ in 0..PARTICLE_COUNT {
            positions.push((rng() - 0.5) * PARTICLE_SPREAD[0]);
            positions.push((rng() - 0.5) * PARTICLE_SPREAD[1]);
            positions.push((rng() - 0.5) * PARTICLE_SPREAD[2]);

            let hue = PARTICLE_SPAWN_HUE_BASE + rng() * PARTICLE_SPAWN_HUE_SPAN;
            colors.extend(hsl_to_rgb(hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS));
        }
        Self {
            positions,
            colors,
            rotation_x: 0.0,
            rotation_y: 0.0,
            clock: 0.0,
        }
    }

    pub fn tick(&mut self, frames: f32, pointer: PointerTarget) {
        self.clock += PARTICLE_CLOCK_RATE * frames;

        for i in (0..self.positions.len()).step_by(3) {
            let phase = self.clock + i as f32;
            self.positions[i] += phase.cos() * PARTICLE_DRIFT_X * frames;
            self.positions[i + 1] += phase.sin() * PARTICLE_DRIFT_Y * frames;

            let hue = (PARTICLE_HUE_BASE + self.clock + i as f32 * PARTICLE_HUE_STEP).fract();
            let rgb = hsl_to_rgb(hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS);
            self.colors[i..i + 3].copy_from_slice(&rgb);
        }

        self.rotation_y += PARTICLE_AUTO_DRIFT * frames;
        // Critically damped pull toward the parallax target.
        self.rotation_x += POINTER_GAIN * (pointer.y - self.rotation_x);
        self.rotation_y += POINTER_GAIN * (pointer.x - self.rotation_y);
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn rotation(&self) -> (f32, f32) {
        (self.rotation_x, self.rotation_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_rng() -> impl FnMut() -> f32 {
        let mut state = 0x2545_f491u32;
        move || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / 16_777_216.0
        }
    }

    #[test]
    fn spawns_the_full_population_inside_the_box() {
        let mut rng = fixed_rng();
        let field = ParticleField::new(&mut rng);
        assert_eq!(field.count(), PARTICLE_COUNT);
        for i in (0..field.positions().len()).step_by(3) {
            assert!(field.positions()[i].abs() <= PARTICLE_SPREAD[0] / 2.0);
            assert!(field.positions()[i + 1].abs() <= PARTICLE_SPREAD[1] / 2.0);
            assert!(field.positions()[i + 2].abs() <= PARTICLE_SPREAD[2] / 2.0);
        }
    }

    #[test]
    fn rotation_eases_toward_pointer_target() {
        let mut rng = fixed_rng();
        let mut field = ParticleField::new(&mut rng);
        let target = PointerTarget { x: 0.4, y: -0.2 };
        let mut last_err = f32::INFINITY;
        for _ in 0..50 {
            field.tick(1.0, target);
            let err = (field.rotation().0 - target.y).abs();
            assert!(err < last_err || err < 1e-3);
            last_err = err;
        }
        assert!(last_err < 0.02);
    }

    #[test]
    fn colors_drift_over_time() {
        let mut rng = fixed_rng();
        let mut field = ParticleField::new(&mut rng);
        field.tick(1.0, PointerTarget::default());
        let before = field.colors()[..3].to_vec();
        for _ in 0..200 {
            field.tick(1.0, PointerTarget::default());
        }
        let after = &field.colors()[..3];
        assert!(before
            .iter()
            .zip(after.iter())
            .any(|(a, b)| (a - b).abs() > 1e-3));
    }
}
