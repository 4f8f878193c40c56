//! Spherical-to-cube-face projection math.
//!
//! Maps a view direction on the unit sphere to the cube face it pierces
//! and to face-local texture coordinates. This is the numerical core of
//! the panorama conversion.

use glam::Vec3;

use super::face::Face;

/// Converts spherical angles to a view direction.
///
/// `theta` is the longitude in [0, 2pi), `phi` the latitude measured
/// from the equator, positive up. `theta = 0` points toward +Z (the
/// front face center).
#[inline]
pub fn spherical_to_dir(theta: f32, phi: f32) -> Vec3 {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    Vec3::new(cp * st, sp, cp * ct)
}

/// Selects the cube face a direction vector pierces.
///
/// The axis with the largest absolute component picks the face pair and
/// its sign picks the face. Axes are tested in x, y, z order with `>=`
/// comparisons; ties (cube-corner directions) resolve to the first axis
/// tested, which keeps the output deterministic.
#[inline]
pub fn face_for_dir(dir: Vec3) -> Face {
    let a = dir.abs();

    if a.x >= a.y && a.x >= a.z {
        if dir.x > 0.0 {
            Face::Right
        } else {
            Face::Left
        }
    } else if a.y >= a.x && a.y >= a.z {
        if dir.y > 0.0 {
            Face::Up
        } else {
            Face::Down
        }
    } else if dir.z > 0.0 {
        Face::Front
    } else {
        Face::Back
    }
}

const AXIS_X: usize = 0;
const AXIS_Y: usize = 1;
const AXIS_Z: usize = 2;

/// Signed numerator axes for the face-local (u, v) coordinates.
///
/// Both u and v divide a non-dominant component by the absolute value of
/// the dominant one; the signs keep rightward/upward on each face mapped
/// to increasing u/v across the whole cube.
struct UvRule {
    dominant: usize,
    u: (usize, f32),
    v: (usize, f32),
}

/// Indexed by `Face::index()`.
const UV_RULES: [UvRule; 6] = [
    // right
    UvRule { dominant: AXIS_X, u: (AXIS_Z, -1.0), v: (AXIS_Y, -1.0) },
    // left
    UvRule { dominant: AXIS_X, u: (AXIS_Z, 1.0), v: (AXIS_Y, -1.0) },
    // up
    UvRule { dominant: AXIS_Y, u: (AXIS_X, 1.0), v: (AXIS_Z, 1.0) },
    // down
    UvRule { dominant: AXIS_Y, u: (AXIS_X, 1.0), v: (AXIS_Z, -1.0) },
    // front
    UvRule { dominant: AXIS_Z, u: (AXIS_X, 1.0), v: (AXIS_Y, -1.0) },
    // back
    UvRule { dominant: AXIS_Z, u: (AXIS_X, -1.0), v: (AXIS_Y, -1.0) },
];

/// Computes face-local texture coordinates in [-1, 1] for a direction
/// known to pierce `face`.
#[inline]
pub fn face_uv(face: Face, dir: Vec3) -> (f32, f32) {
    let rule = &UV_RULES[face.index()];
    let m = dir[rule.dominant].abs();
    (rule.u.1 * dir[rule.u.0] / m, rule.v.1 * dir[rule.v.0] / m)
}

/// Converts face-local UV in [-1, 1] to integer pixel coordinates.
///
/// Values are floored and clamped to `[0, face_size - 1]`, which guards
/// floating-point edge values landing exactly on 1.0.
#[inline]
pub fn uv_to_pixel(u: f32, v: f32, face_size: u32) -> (u32, u32) {
    let max = (face_size - 1) as f32;
    let fx = ((u + 1.0) * 0.5 * face_size as f32).floor().clamp(0.0, max);
    let fy = ((v + 1.0) * 0.5 * face_size as f32).floor().clamp(0.0, max);
    (fx as u32, fy as u32)
}

/// Maps a view direction straight to a face and in-range pixel
/// coordinates on that face.
#[inline]
pub fn dir_to_face_pixel(dir: Vec3, face_size: u32) -> (Face, u32, u32) {
    let face = face_for_dir(dir);
    let (u, v) = face_uv(face, dir);
    let (x, y) = uv_to_pixel(u, v, face_size);
    (face, x, y)
}
