use serde::{
    Deserialize,
    Serialize,
};

use crate::math::Vector3;


/// Column-major 4x4 f32 matrix.
///
/// Constructed only through [`Matrix4::look_at`] and [`Matrix4::perspective`];
/// there is no elementwise mutation API.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct Matrix4 {
    cols: [f32; 16],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        cols: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let forward = (target - eye).normalized();
        let side = forward.cross(up).normalized();
        let local_up = side.cross(forward);

        Self {
            cols: [
                side.x, local_up.x, -forward.x, 0.0,
                side.y, local_up.y, -forward.y, 0.0,
                side.z, local_up.z, -forward.z, 0.0,
                -side.dot(eye), -local_up.dot(eye), forward.dot(eye), 1.0,
            ],
        }
    }

    /// Right-handed perspective projection with a vertical field of view in
    /// degrees and a [-1, 1] clip-space depth range.
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y_degrees.to_radians() * 0.5).tan();
        let inv_depth = 1.0 / (near - far);

        Self {
            cols: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * inv_depth, -1.0,
                0.0, 0.0, 2.0 * far * near * inv_depth, 0.0,
            ],
        }
    }

    /// The 16 elements in column-major order, as handed to the renderer.
    pub const fn to_cols_array(self) -> [f32; 16] {
        self.cols
    }

    /// Element at `(row, col)`.
    pub const fn get(self, row: usize, col: usize) -> f32 {
        self.cols[col * 4 + row]
    }

    /// Transforms a point (w = 1) and applies the perspective divide.
    pub fn project_point(self, p: Vector3) -> Vector3 {
        let m = &self.cols;
        let x = m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12];
        let y = m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13];
        let z = m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14];
        let w = m[3] * p.x + m[7] * p.y + m[11] * p.z + m[15];

        if w == 0.0 {
            Vector3::new(x, y, z)
        } else {
            Vector3::new(x / w, y / w, z / w)
        }
    }
}
