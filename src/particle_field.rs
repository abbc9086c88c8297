use std::f32::consts::TAU;

use glam::{Vec3, Vec4};

use crate::pointer::PointerState;

/// GPU-aligned lattice point. Copied straight into the instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Point {
    pub position: [f32; 3],
}

/// Lattice shape and wave constants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub rows: usize,
    pub cols: usize,
    pub separation: f32,
    pub amplitude: f32,
    pub freq_x: f32,
    pub freq_z: f32,
    /// Added to the time accumulator every tick.
    pub time_step: f32,
    /// Constant yaw increment per tick (radians).
    pub yaw_step: f32,
    /// Pointer NDC → target pitch/roll (radians).
    pub tilt: f32,
    /// Exponential smoothing factor, 0 < k < 1.
    pub smoothing: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            separation: 8.0,
            amplitude: 5.0,
            freq_x: 0.5,
            freq_z: 0.3,
            time_step: 0.03,
            yaw_step: 0.001,
            tilt: 0.1,
            smoothing: 0.05,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

/// How the points are drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointMaterial {
    pub color: Vec4,
    pub size: f32,
    pub opacity: f32,
    pub size_attenuation: bool,
    pub blending: Blending,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            color: rgb_hex(0x8A2BE2),
            size: 2.0,
            opacity: 0.7,
            size_attenuation: true,
            blending: Blending::Additive,
        }
    }
}

/// 0xRRGGBB → linear-ish RGBA (alpha 1).
pub fn rgb_hex(hex: u32) -> Vec4 {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    Vec4::new(r, g, b, 1.0)
}

/// Wave height for lattice cell (xi, zi) at time t.
pub fn height(params: &FieldParams, xi: usize, zi: usize, t: f32) -> f32 {
    (xi as f32 * params.freq_x + t).sin() * params.amplitude
        + (zi as f32 * params.freq_z + t).sin() * params.amplitude
}

/// One step of exponential smoothing toward `target`.
pub fn smooth_toward(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

/// Animated wave lattice. x/z are fixed at construction, y is rewritten
/// every tick.
pub struct ParticleField {
    params: FieldParams,
    material: PointMaterial,
    points: Vec<Point>,
    time: f32,
    /// Euler XYZ rotation of the whole field.
    rotation: Vec3,
    dirty: bool,
}

impl ParticleField {
    pub fn new(params: FieldParams, material: PointMaterial) -> Self {
        let half_rows = params.rows as f32 / 2.0;
        let half_cols = params.cols as f32 / 2.0;

        let mut points = Vec::with_capacity(params.rows * params.cols);
        for x in 0..params.rows {
            for z in 0..params.cols {
                points.push(Point {
                    position: [
                        (x as f32 - half_rows) * params.separation,
                        0.0,
                        (z as f32 - half_cols) * params.separation,
                    ],
                });
            }
        }

        log::debug!(
            "particle field: {}x{} lattice ({} points)",
            params.rows,
            params.cols,
            points.len()
        );

        Self {
            params,
            material,
            points,
            time: 0.0,
            rotation: Vec3::ZERO,
            dirty: true,
        }
    }

    /// Advance one frame: recompute heights and ease the rotation toward the
    /// pointer-derived tilt.
    pub fn tick(&mut self, pointer: PointerState) {
        // `height` is 2π-periodic in t; wrapping keeps f32 steps from
        // rounding away on a long-running page.
        self.time = (self.time + self.params.time_step).rem_euclid(TAU);

        let cols = self.params.cols;
        for (i, point) in self.points.iter_mut().enumerate() {
            point.position[1] = height(&self.params, i / cols, i % cols, self.time);
        }
        self.dirty = true;

        let k = self.params.smoothing;
        let tilt = self.params.tilt;
        self.rotation.y = (self.rotation.y + self.params.yaw_step).rem_euclid(TAU);
        self.rotation.x = smooth_toward(self.rotation.x, pointer.y * tilt, k);
        self.rotation.z = smooth_toward(self.rotation.z, pointer.x * tilt, k);
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Returns whether the buffer changed since the last call and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Positions as raw bytes for GPU upload (zero-copy)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(FieldParams::default(), PointMaterial::default())
    }
}
