//! Benchmark profiles for the Carve boundary tracer.
//!
//! - [`phantom_volume`]: a deterministic synthetic scan with a winding
//!   bright tube and a bright sheet over hashed background noise
//! - [`reference_profile`]: 128x128x32 phantom with landmark sets sized
//!   like interactive use
//! - [`stress_profile`]: 512x512x64 phantom for whole-slice traces

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use carve_core::{DenseVolume, Dims, Point3, Spacing, Voxel};

/// A phantom volume plus the landmarks benchmarks trace between.
pub struct Profile {
    /// The scan.
    pub volume: DenseVolume,
    /// Same-slice landmark pair for slice traces.
    pub slice: (Point3, Point3),
    /// Landmark pair spanning the tube for corridor traces.
    pub corridor: (Point3, Point3),
    /// Two landmark pairs for curve tracking and ribbon stitching.
    pub curves: [(Point3, Point3); 2],
}

/// Centre of the bright tube on slice `z`.
pub fn tube_center(dims: Dims, z: usize) -> (usize, usize) {
    let t = z as f64 / dims.depth.max(1) as f64;
    let x = dims.width as f64 * (0.3 + 0.4 * t);
    let y = dims.height as f64 * (0.5 + 0.2 * (t * std::f64::consts::TAU).sin());
    (x as usize, y as usize)
}

fn hash_noise(v: Voxel, seed: u64) -> f32 {
    let mut h = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add((v.x as u64).wrapping_mul(1442695040888963407))
        .wrapping_add((v.y as u64).wrapping_mul(2862933555777941757))
        .wrapping_add(v.z as u64);
    h ^= h >> 33;
    (h % 200) as f32
}

/// Build a deterministic phantom: background noise in `[0, 200)`, a
/// bright sheet at `y = height / 4`, and a radius-2 tube following
/// [`tube_center`].
pub fn phantom_volume(dims: Dims, seed: u64) -> DenseVolume {
    let sheet = dims.height / 4;
    DenseVolume::from_fn(dims, Spacing::new(0.8, 0.8, 2.5), |v| {
        let (cx, cy) = tube_center(dims, v.z);
        if v.x.abs_diff(cx) <= 2 && v.y.abs_diff(cy) <= 2 {
            900.0
        } else if v.y == sheet {
            700.0
        } else {
            hash_noise(v, seed)
        }
    })
    .expect("phantom dimensions are non-zero")
}

fn physical(spacing: Spacing, x: usize, y: usize, z: usize) -> Point3 {
    // Aim at voxel centres so truncation lands on the intended index.
    Point3::new(
        (x as f64 + 0.5) * spacing.x,
        (y as f64 + 0.5) * spacing.y,
        (z as f64 + 0.5) * spacing.z,
    )
}

fn profile(dims: Dims, seed: u64) -> Profile {
    let volume = phantom_volume(dims, seed);
    let s = Spacing::new(0.8, 0.8, 2.5);
    let (w, h, d) = (dims.width, dims.height, dims.depth);
    let mid = d / 2;
    let (ax, ay) = tube_center(dims, 0);
    let (bx, by) = tube_center(dims, d - 1);
    Profile {
        volume,
        slice: (physical(s, w / 8, h / 8, mid), physical(s, w - 1 - w / 8, h / 2, mid)),
        corridor: (physical(s, ax, ay, 0), physical(s, bx, by, d - 1)),
        curves: [
            (physical(s, w / 8, h / 8, 0), physical(s, w / 4, h / 4, d - 1)),
            (physical(s, w - 1 - w / 8, h / 8, 0), physical(s, w - 1 - w / 4, h / 4, d - 1)),
        ],
    }
}

/// 128x128x32 phantom.
pub fn reference_profile(seed: u64) -> Profile {
    profile(Dims::new(128, 128, 32), seed)
}

/// 512x512x64 phantom.
pub fn stress_profile(seed: u64) -> Profile {
    profile(Dims::new(512, 512, 64), seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_core::{TraceConfig, Volume};
    use carve_engine::Tracer;

    #[test]
    fn phantom_is_deterministic() {
        let dims = Dims::new(16, 16, 4);
        assert_eq!(phantom_volume(dims, 7), phantom_volume(dims, 7));
    }

    #[test]
    fn reference_landmarks_are_traceable() {
        let p = reference_profile(42);
        let tracer = Tracer::new(TraceConfig::default()).unwrap();
        tracer.plan_slice(&p.volume, p.slice.0, p.slice.1).unwrap();
        tracer.plan_corridor(&p.volume, p.corridor.0, p.corridor.1).unwrap();
        let curves = tracer.plan_curves(&p.volume, p.curves[0], p.curves[1]).unwrap();
        assert_eq!(curves.first.len(), 30);
        tracer.plan_ribbon(&p.volume, &curves).unwrap();
    }

    #[test]
    fn tube_stays_inside_the_volume() {
        let p = stress_profile(1);
        let dims = p.volume.dimensions();
        for z in 0..dims.depth {
            let (x, y) = tube_center(dims, z);
            assert!(x < dims.width && y < dims.height);
        }
    }
}
