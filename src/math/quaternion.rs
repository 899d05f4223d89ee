use std::ops::Mul;

use serde::{
    Deserialize,
    Serialize,
};

use crate::math::Vector3;


/// Unit quaternion representing a rotation.
///
/// `a * b` composes rotations right-to-left: `b` is applied first, then `a`
/// (Hamilton product convention).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Rotation of `angle_radians` about `axis`. The axis is normalized
    /// internally; a zero axis yields the identity rotation.
    pub fn from_axis_angle(axis: Vector3, angle_radians: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vector3::ZERO {
            return Self::IDENTITY;
        }

        let half = angle_radians * 0.5;
        let s = half.sin();

        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit quaternion in the same orientation, or the identity when the
    /// magnitude is zero.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::IDENTITY;
        }

        let inv = 1.0 / len;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Rotates `v` by this quaternion via `q * (v, 0) * conj(q)`.
    pub fn transform(self, v: Vector3) -> Vector3 {
        let p = self * Self::new(v.x, v.y, v.z, 0.0) * self.conjugate();
        Vector3::new(p.x, p.y, p.z)
    }

    /// Spherical linear interpolation from `self` to `rhs`.
    ///
    /// Takes the shorter arc; falls back to normalized linear interpolation
    /// when the quaternions are nearly parallel, where the spherical formula
    /// divides by a near-zero sine.
    pub fn slerp(self, rhs: Self, t: f32) -> Self {
        let mut dot = self.dot(rhs);
        let mut end = rhs;

        if dot < 0.0 {
            dot = -dot;
            end = Self::new(-rhs.x, -rhs.y, -rhs.z, -rhs.w);
        }

        if dot > 0.9995 {
            let lerped = Self::new(
                self.x + (end.x - self.x) * t,
                self.y + (end.y - self.y) * t,
                self.z + (end.z - self.z) * t,
                self.w + (end.w - self.w) * t,
            );
            return lerped.normalized();
        }

        let theta_0 = dot.clamp(-1.0, 1.0).acos();
        let theta = theta_0 * t;
        let sin_theta_0 = theta_0.sin();

        let s0 = ((1.0 - t) * theta_0).sin() / sin_theta_0;
        let s1 = theta.sin() / sin_theta_0;

        Self::new(
            self.x * s0 + end.x * s1,
            self.y * s0 + end.y * s1,
            self.z * s0 + end.z * s1,
            self.w * s0 + end.w * s1,
        )
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(a: [f32; 4]) -> Self {
        Self::from_array(a)
    }
}
