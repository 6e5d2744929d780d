//! Cluster of independently placed wireframe icosahedra sharing one edge
//! list. Members spin on two axes and bob vertically with per-member phase;
//! the whole cluster yaws slowly.

use crate::config::{
    ORB_BOB_RATE, ORB_COUNT, ORB_GROUP_YAW_RATE, ORB_SCALE_BASE, ORB_SCALE_SPAN, ORB_SPIN_RATE,
    ORB_SPREAD,
};

#[derive(Debug, Clone, Copy)]
pub struct Orb {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
}

pub struct OrbCluster {
    orbs: Vec<Orb>,
    group_yaw: f32,
}

impl OrbCluster {
    pub fn new(rng: &mut dyn FnMut() -> f32) -> Self {
        let orbs = (0..ORB_COUNT)
            .map(|_| Orb {
                position: [
                    (rng() - 0.5) * ORB_SPREAD[0],
                    (rng() - 0.5) * ORB_SPREAD[1],
                    (rng() - 0.5) * ORB_SPREAD[2],
                ],
                scale: rng() * ORB_SCALE_SPAN + ORB_SCALE_BASE,
                rotation_x: 0.0,
                rotation_y: 0.0,
            })
            .collect();
        Self {
            orbs,
            group_yaw: 0.0,
        }
    }

    pub fn tick(&mut self, frames: f32, wall_clock: f32) {
        self.group_yaw += ORB_GROUP_YAW_RATE * frames;
        for (i, orb) in self.orbs.iter_mut().enumerate() {
            orb.rotation_x += ORB_SPIN_RATE * frames;
            orb.rotation_y += ORB_SPIN_RATE * frames;
            orb.position[1] += (wall_clock + i as f32).sin() * ORB_BOB_RATE * frames;
        }
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn group_yaw(&self) -> f32 {
        self.group_yaw
    }
}

/// Icosahedron edges as a line list: 30 edges, 60 vertices, every vertex on
/// the sphere of the given radius.
pub fn icosahedron_wireframe(radius: f32) -> Vec<f32> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let raw: [[f32; 3]; 12] = [
        [-1.0, phi, 0.0],
        [1.0, phi, 0.0],
        [-1.0, -phi, 0.0],
        [1.0, -phi, 0.0],
        [0.0, -1.0, phi],
        [0.0, 1.0, phi],
        [0.0, -1.0, -phi],
        [0.0, 1.0, -phi],
        [phi, 0.0, -1.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, -1.0],
        [-phi, 0.0, 1.0],
    ];

    let norm = (1.0 + phi * phi).sqrt();
    let verts: Vec<[f32; 3]> = raw
        .iter()
        .map(|v| [v[0] / norm * radius, v[1] / norm * radius, v[2] / norm * radius])
        .collect();

    // Neighbouring vertices sit at squared distance 4 in the raw lattice;
    // pick edges by that signature rather than a hand-written table.
    let edge_sq = 4.0 * (radius / norm) * (radius / norm);
    let mut lines = Vec::with_capacity(30 * 2 * 3);
    for i in 0..verts.len() {
        for j in (i + 1)..verts.len() {
            let d: f32 = (0..3).map(|k| (verts[i][k] - verts[j][k]).powi(2)).sum();
            if (d - edge_sq).abs() < edge_sq * 0.01 {
                lines.extend(verts[i]);
                lines.extend(verts[j]);
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ORB_RADIUS;

    fn fixed_rng() -> impl FnMut() -> f32 {
        let mut state = 0x0bad_5eedu32;
        move || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / 16_777_216.0
        }
    }

    #[test]
    fn wireframe_has_thirty_edges_on_the_sphere() {
        let lines = icosahedron_wireframe(ORB_RADIUS);
        assert_eq!(lines.len(), 30 * 2 * 3);
        for v in lines.chunks(3) {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - ORB_RADIUS).abs() < 1e-4);
        }
    }

    #[test]
    fn members_spin_and_bob_independently() {
        let mut rng = fixed_rng();
        let mut cluster = OrbCluster::new(&mut rng);
        assert_eq!(cluster.orbs().len(), ORB_COUNT);
        let y_before: Vec<f32> = cluster.orbs().iter().map(|o| o.position[1]).collect();

        cluster.tick(1.0, 0.9);
        assert!(cluster.group_yaw() > 0.0);
        for orb in cluster.orbs() {
            assert!((orb.rotation_x - ORB_SPIN_RATE).abs() < 1e-6);
        }
        // Per-member phase means at least two members bob by different amounts.
        let deltas: Vec<f32> = cluster
            .orbs()
            .iter()
            .zip(y_before.iter())
            .map(|(o, y)| o.position[1] - y)
            .collect();
        assert!(deltas.iter().any(|d| (d - deltas[0]).abs() > 1e-6));
    }

    #[test]
    fn scales_stay_in_the_authored_band() {
        let mut rng = fixed_rng();
        let cluster = OrbCluster::new(&mut rng);
        for orb in cluster.orbs() {
            assert!(orb.scale >= ORB_SCALE_BASE);
            assert!(orb.scale <= ORB_SCALE_BASE + ORB_SCALE_SPAN);
        }
    }
}
