pub mod rand;
pub mod scene;
pub mod splat;

pub use scene::{
    BoundingBox,
    CameraIntrinsics,
    CaptureMetadata,
    SplatScene,
};
pub use splat::GaussianSplat;
