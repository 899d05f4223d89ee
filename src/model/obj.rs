//! Wavefront OBJ triangle-mesh ingestion.
//!
//! Reads `v` (with the optional vertex-color extension), `vn`, and `f`
//! statements; n-gon faces are fan-triangulated, indices may be 1-based or
//! negative (relative to the end of the vertex list).

use crate::error::{
    Result,
    SplatError,
};
use crate::io::scene_name;
use crate::math::Vector3;
use crate::model::{
    Model3D,
    ModelBuffers,
};


pub fn load_mesh(bytes: &[u8], filename: &str) -> Result<Model3D> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| SplatError::UnsupportedFormat("obj data is not valid utf-8".to_string()))?;

    let mut vertices: Vec<Vector3> = Vec::new();
    let mut colors: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<Vector3> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens[0] {
            "v" => {
                let components: Vec<f32> =
                    tokens[1..].iter().filter_map(|t| t.parse().ok()).collect();
                if components.len() < 3 {
                    log::warn!("skipping malformed obj vertex line");
                    continue;
                }

                let position = Vector3::new(components[0], components[1], components[2]);
                if !position.is_finite() {
                    log::warn!("dropping obj vertex with non-finite coordinate");
                    continue;
                }

                vertices.push(position);
                // "v x y z r g b" vertex color extension
                if components.len() >= 6 {
                    colors.push([components[3], components[4], components[5]]);
                }
            },
            "vn" => {
                let components: Vec<f32> =
                    tokens[1..].iter().filter_map(|t| t.parse().ok()).collect();
                if components.len() == 3 {
                    normals.push(Vector3::new(components[0], components[1], components[2]));
                }
            },
            "f" => {
                let face: Vec<usize> = tokens[1..]
                    .iter()
                    .filter_map(|t| resolve_index(t, vertices.len()))
                    .collect();
                if face.len() >= 3 {
                    faces.push(face);
                } else {
                    log::warn!("skipping degenerate obj face");
                }
            },
            _ => {},
        }
    }

    let mut indices = Vec::new();
    for face in &faces {
        for i in 1..face.len() - 1 {
            indices.push(face[0] as u32);
            indices.push(face[i] as u32);
            indices.push(face[i + 1] as u32);
        }
    }

    let colors = (colors.len() == vertices.len() && !colors.is_empty()).then_some(colors);
    let normals = (normals.len() == vertices.len()).then_some(normals);

    let buffers = ModelBuffers::new(&scene_name(filename), vertices, normals, colors)?;
    Ok(Model3D::TriangleMesh {
        buffers,
        indices: (!indices.is_empty()).then_some(indices),
    })
}

/// Resolves an `f` statement index token (`7`, `7/2/1`, `-1`) to a 0-based
/// vertex index; out-of-range indices are dropped.
fn resolve_index(token: &str, vertex_count: usize) -> Option<usize> {
    let first = token.split('/').next()?;
    let raw: i64 = first.parse().ok()?;

    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        vertex_count as i64 + raw
    } else {
        return None;
    };

    (0..vertex_count as i64)
        .contains(&resolved)
        .then_some(resolved as usize)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_face_is_fan_triangulated() {
        let data = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let model = load_mesh(data, "quad.obj").unwrap();

        match model {
            Model3D::TriangleMesh { indices, .. } => {
                assert_eq!(indices.unwrap(), vec![0, 1, 2, 0, 2, 3]);
            },
            _ => panic!("expected triangle mesh"),
        }
    }

    #[test]
    fn slash_and_negative_indices_resolve() {
        let data = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2/2/2 -1/3/3\n";
        let model = load_mesh(data, "tri.obj").unwrap();

        match model {
            Model3D::TriangleMesh { indices, .. } => {
                assert_eq!(indices.unwrap(), vec![0, 1, 2]);
            },
            _ => panic!("expected triangle mesh"),
        }
    }

    #[test]
    fn vertex_colors_are_kept_when_complete() {
        let data = b"v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n";
        let model = load_mesh(data, "colored.obj").unwrap();

        let colors = model.buffers().colors.as_ref().unwrap();
        assert_eq!(colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(colors[2], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn empty_obj_is_rejected() {
        assert!(matches!(
            load_mesh(b"# nothing here\n", "empty.obj"),
            Err(SplatError::EmptyInput),
        ));
    }
}
