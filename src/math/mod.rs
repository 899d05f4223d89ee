pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use vector::Vector3;
