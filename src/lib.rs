//! Gaussian-splat scene codec and orbit camera engine.
//!
//! Converts PLY (ASCII and binary), SPLAT containers, and basic mesh formats
//! into a validated in-memory [`SplatScene`] of Gaussian primitives,
//! serializes scenes back to bytes, and drives an orbit camera from gesture
//! deltas. Codec functions are pure over byte slices; storage, rendering,
//! and UI live behind collaborator boundaries.

pub use camera::OrbitCameraController;
pub use error::{
    Result,
    SplatError,
};
pub use gaussian::{
    BoundingBox,
    GaussianSplat,
    SplatScene,
    rand::random_gaussians,
};
pub use io::codec::SceneCodec;
pub use math::{
    Matrix4,
    Quaternion,
    Vector3,
};
pub use model::{
    Model3D,
    load_model,
    to_splat_scene,
};

pub mod camera;
pub mod error;
pub mod gaussian;
pub mod io;
pub mod math;
pub mod model;
