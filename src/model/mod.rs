pub mod convert;
pub mod loader;
pub mod obj;
pub mod ply;
pub mod stl;

pub use convert::to_splat_scene;
pub use loader::load_model;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    Result,
    SplatError,
};
use crate::math::Vector3;


/// Shared vertex buffers of a loaded model.
///
/// `center`/`min`/`max` are precomputed from the vertex positions at load
/// time; loaders never produce an empty vertex set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelBuffers {
    pub name: String,
    pub vertices: Vec<Vector3>,
    pub normals: Option<Vec<Vector3>>,
    pub colors: Option<Vec<[f32; 3]>>,
    pub center: Vector3,
    pub min: Vector3,
    pub max: Vector3,
}

impl ModelBuffers {
    pub fn new(
        name: &str,
        vertices: Vec<Vector3>,
        normals: Option<Vec<Vector3>>,
        colors: Option<Vec<[f32; 3]>>,
    ) -> Result<Self> {
        let first = *vertices.first().ok_or(SplatError::EmptyInput)?;

        let mut min = first;
        let mut max = first;
        for v in &vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        Ok(Self {
            name: name.to_string(),
            vertices,
            normals,
            colors,
            center: (min + max) * 0.5,
            min,
            max,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}


/// A lower-fidelity ingested model, consumed once by the converter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Model3D {
    PointCloud(ModelBuffers),
    TriangleMesh {
        buffers: ModelBuffers,
        indices: Option<Vec<u32>>,
    },
}

impl Model3D {
    pub fn buffers(&self) -> &ModelBuffers {
        match self {
            Self::PointCloud(buffers) => buffers,
            Self::TriangleMesh { buffers, .. } => buffers,
        }
    }

    pub fn name(&self) -> &str {
        &self.buffers().name
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers().vertex_count()
    }
}
