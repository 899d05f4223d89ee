use std::time::{
    SystemTime,
    UNIX_EPOCH,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    Result,
    SplatError,
};
use crate::gaussian::splat::GaussianSplat;
use crate::math::Vector3;


/// Upper bound on primitives a mobile renderer is expected to handle.
pub const MAX_MOBILE_GAUSSIANS: usize = 200_000;

/// Upper bound on scene payload size for the mobile rendering path, in MB.
pub const MAX_MOBILE_SIZE_MB: f64 = 100.0;


/// Axis-aligned bounding box.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct BoundingBox {
    pub min: Vector3,
    pub max: Vector3,
}

impl BoundingBox {
    /// Degenerate zero box for placeholder use.
    pub const fn empty() -> Self {
        Self {
            min: Vector3::ZERO,
            max: Vector3::ZERO,
        }
    }

    /// Tight box around a non-empty point set.
    pub fn from_points(points: &[Vector3]) -> Result<Self> {
        let first = points.first().ok_or(SplatError::EmptyInput)?;

        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }

        Ok(Self { min, max })
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).length()
    }
}


/// Pinhole intrinsics captured alongside a scene.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct CameraIntrinsics {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
    pub width: u32,
    pub height: u32,
    pub distortion: Option<[f32; 3]>,
}


/// Device/capture provenance, opaque to the codec.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct CaptureMetadata {
    pub device_model: Option<String>,
    pub capture_app: Option<String>,
    pub captured_at: Option<u64>,
}


/// An immutable aggregate of Gaussian primitives plus metadata.
///
/// "Mutation" is whole-value replacement; see [`SplatScene::renamed`].
#[derive(
    Clone,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct SplatScene {
    pub id: String,
    pub name: String,
    pub created_at: u64,
    pub modified_at: u64,
    pub gaussians: Vec<GaussianSplat>,
    pub camera_intrinsics: Option<CameraIntrinsics>,
    pub bounding_box: BoundingBox,
    pub thumbnail_path: Option<String>,
    pub file_path: Option<String>,
    pub sh_degree: u8,
    pub capture_metadata: Option<CaptureMetadata>,
}

impl SplatScene {
    /// Builds a scene around a primitive set, deriving the bounding box from
    /// primitive positions and stamping creation time.
    pub fn from_gaussians(name: &str, gaussians: Vec<GaussianSplat>) -> Self {
        let positions: Vec<Vector3> = gaussians
            .iter()
            .map(|g| Vector3::from_array(g.position))
            .collect();
        let bounding_box = BoundingBox::from_points(&positions).unwrap_or(BoundingBox::empty());

        let sh_degree = gaussians.first().map(|g| g.sh_degree()).unwrap_or(0);
        let now = unix_timestamp();

        Self {
            id: generate_id(),
            name: name.to_string(),
            created_at: now,
            modified_at: now,
            gaussians,
            camera_intrinsics: None,
            bounding_box,
            thumbnail_path: None,
            file_path: None,
            sh_degree,
            capture_metadata: None,
        }
    }

    pub fn gaussian_count(&self) -> usize {
        self.gaussians.len()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.gaussians.iter().map(|g| g.size_in_bytes()).sum()
    }

    pub fn size_in_mb(&self) -> f64 {
        self.size_in_bytes() as f64 / (1024.0 * 1024.0)
    }

    pub fn is_within_mobile_limits(&self) -> bool {
        self.gaussian_count() <= MAX_MOBILE_GAUSSIANS && self.size_in_mb() <= MAX_MOBILE_SIZE_MB
    }

    /// New scene value with the given name and a fresh modification stamp.
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            modified_at: unix_timestamp(),
            ..self.clone()
        }
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn generate_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn splat_at(position: [f32; 3]) -> GaussianSplat {
        GaussianSplat::new(
            position,
            [0.01; 3],
            [0.0, 0.0, 0.0, 1.0],
            vec![0.5, 0.5, 0.5],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn bounding_box_from_points_bounds_every_point() {
        let points = [
            Vector3::new(1.0, -5.0, 2.0),
            Vector3::new(-3.0, 4.0, 0.5),
            Vector3::new(0.0, 0.0, 9.0),
        ];
        let bb = BoundingBox::from_points(&points).unwrap();

        for p in points {
            assert!(bb.min.x <= p.x && p.x <= bb.max.x);
            assert!(bb.min.y <= p.y && p.y <= bb.max.y);
            assert!(bb.min.z <= p.z && p.z <= bb.max.z);
        }
    }

    #[test]
    fn bounding_box_from_empty_points_fails() {
        assert!(matches!(
            BoundingBox::from_points(&[]),
            Err(SplatError::EmptyInput),
        ));
    }

    #[test]
    fn scene_derives_bounding_box_from_positions() {
        let scene = SplatScene::from_gaussians(
            "test",
            vec![splat_at([-1.0, 0.0, 0.0]), splat_at([2.0, 3.0, -4.0])],
        );

        assert_eq!(scene.bounding_box.min, Vector3::new(-1.0, 0.0, -4.0));
        assert_eq!(scene.bounding_box.max, Vector3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn scene_size_sums_primitive_records() {
        let scene = SplatScene::from_gaussians("test", vec![splat_at([0.0; 3]); 10]);
        assert_eq!(scene.gaussian_count(), 10);
        assert_eq!(scene.size_in_bytes(), 10 * 56);
        assert!(scene.is_within_mobile_limits());
    }

    #[test]
    fn scene_over_the_primitive_cap_fails_mobile_limits() {
        let scene = SplatScene::from_gaussians(
            "oversized",
            vec![splat_at([0.0; 3]); MAX_MOBILE_GAUSSIANS + 1],
        );

        assert!(!scene.is_within_mobile_limits());
    }

    #[test]
    fn renamed_updates_name_and_modified_stamp_only() {
        let scene = SplatScene::from_gaussians("before", vec![splat_at([0.0; 3])]);
        let renamed = scene.renamed("after");

        assert_eq!(renamed.name, "after");
        assert_eq!(renamed.id, scene.id);
        assert_eq!(renamed.created_at, scene.created_at);
        assert_eq!(renamed.gaussians, scene.gaussians);
    }

    #[test]
    fn scene_metadata_roundtrips_through_json() {
        let mut scene = SplatScene::from_gaussians("json", vec![splat_at([1.0, 2.0, 3.0])]);
        scene.capture_metadata = Some(CaptureMetadata {
            device_model: Some("test-device".to_string()),
            ..CaptureMetadata::default()
        });

        let json = serde_json::to_string(&scene).unwrap();
        let decoded: SplatScene = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, scene);
    }
}
