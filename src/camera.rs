//! Gesture-driven orbit camera.
//!
//! Not thread-safe: gesture and query methods assume a single input/render
//! loop; callers on multiple threads must serialize access externally.

use serde::{
    Deserialize,
    Serialize,
};

use crate::math::{
    Matrix4,
    Quaternion,
    Vector3,
};


pub const DEFAULT_DISTANCE: f32 = 5.0;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 50.0;

pub const ROTATE_SENSITIVITY: f32 = 0.01;
pub const PAN_SENSITIVITY: f32 = 0.002;

pub const FOV_Y_DEGREES: f32 = 60.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

const WORLD_UP: Vector3 = Vector3::Y;
const WORLD_RIGHT: Vector3 = Vector3::X;
const WORLD_FORWARD: Vector3 = Vector3::Z;


/// Orbit camera around a pan target, driven by unit-less gesture deltas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitCameraController {
    distance: f32,
    rotation: Quaternion,
    target: Vector3,
    aspect_ratio: f32,
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl OrbitCameraController {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            rotation: Quaternion::IDENTITY,
            target: Vector3::ZERO,
            aspect_ratio,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn rotation(&self) -> Quaternion {
        self.rotation
    }

    pub fn target(&self) -> Vector3 {
        self.target
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Viewport resize; not a camera-pose property, so `reset` leaves it
    /// alone.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Orbit by a drag delta: yaw about world up, pitch about the camera-
    /// local right axis. The composition order (`yaw * rotation * pitch`)
    /// defines the gesture feel and must not change.
    pub fn on_rotate(&mut self, dx: f32, dy: f32) {
        let yaw = Quaternion::from_axis_angle(WORLD_UP, -dx * ROTATE_SENSITIVITY);
        let pitch = Quaternion::from_axis_angle(WORLD_RIGHT, -dy * ROTATE_SENSITIVITY);

        self.rotation = (yaw * self.rotation * pitch).normalized();
    }

    /// Pinch zoom; the distance stays clamped to
    /// `[MIN_DISTANCE, MAX_DISTANCE]`.
    pub fn on_zoom(&mut self, scale_factor: f32) {
        self.distance = (self.distance * scale_factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Pans the target along the camera's current right/up axes. Pan speed
    /// scales with the zoom distance.
    pub fn on_pan(&mut self, dx: f32, dy: f32) {
        let right = self.rotation.transform(WORLD_RIGHT);
        let up = self.rotation.transform(WORLD_UP);
        let step = PAN_SENSITIVITY * self.distance;

        self.target = self.target + right * (-dx * step) + up * (dy * step);
    }

    /// Restores the default pose; the aspect ratio is untouched.
    pub fn reset(&mut self) {
        self.distance = DEFAULT_DISTANCE;
        self.rotation = Quaternion::IDENTITY;
        self.target = Vector3::ZERO;
    }

    pub fn eye_position(&self) -> Vector3 {
        self.target + self.rotation.transform(WORLD_FORWARD) * self.distance
    }

    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at(self.eye_position(), self.target, WORLD_UP)
    }

    pub fn projection_matrix(&self) -> Matrix4 {
        Matrix4::perspective(FOV_Y_DEGREES, self.aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }
}
