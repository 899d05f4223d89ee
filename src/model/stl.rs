//! STL triangle-mesh ingestion, binary and ASCII.

use byteorder::{
    ByteOrder,
    LittleEndian,
};

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


const BINARY_HEADER_SIZE: usize = 80;
const BINARY_TRIANGLE_SIZE: usize = 50;

pub fn load_mesh(bytes: &[u8], filename: &str) -> Result<Model3D> {
    if is_binary(bytes) {
        load_binary(bytes, filename)
    } else {
        load_ascii(bytes, filename)
    }
}

/// Binary STL carries a triangle count at byte 80 whose implied file size
/// must match exactly; `solid` prefixes alone are not trustworthy, ASCII
/// detection is the fallback.
fn is_binary(bytes: &[u8]) -> bool {
    if bytes.len() < BINARY_HEADER_SIZE + 4 {
        return false;
    }

    let triangle_count = LittleEndian::read_u32(&bytes[80..84]) as usize;
    bytes.len() == BINARY_HEADER_SIZE + 4 + triangle_count * BINARY_TRIANGLE_SIZE
}

fn load_binary(bytes: &[u8], filename: &str) -> Result<Model3D> {
    let triangle_count = LittleEndian::read_u32(&bytes[80..84]) as usize;
    let body = &bytes[BINARY_HEADER_SIZE + 4..];

    let mut vertices = Vec::with_capacity(triangle_count * 3);
    let mut normals = Vec::with_capacity(triangle_count * 3);

    for record in body.chunks_exact(BINARY_TRIANGLE_SIZE) {
        let normal = read_vector(&record[0..12]);
        let corners = [
            read_vector(&record[12..24]),
            read_vector(&record[24..36]),
            read_vector(&record[36..48]),
        ];
        // 2 trailing attribute bytes ignored

        if corners.iter().any(|v| !v.is_finite()) {
            log::warn!("dropping stl triangle with non-finite vertex");
            continue;
        }

        for corner in corners {
            vertices.push(corner);
            normals.push(normal);
        }
    }

    build_mesh(filename, vertices, normals)
}

fn load_ascii(bytes: &[u8], filename: &str) -> Result<Model3D> {
    let text = std::str::from_utf8(bytes).map_err(|_| {
        SplatError::UnsupportedFormat("stl data is neither binary nor ascii".to_string())
    })?;

    if !text.trim_start().starts_with("solid") {
        return Err(SplatError::UnsupportedFormat(
            "missing stl 'solid' marker".to_string(),
        ));
    }

    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut facet_normal = Vector3::ZERO;
    let mut facet_vertices: Vec<Vector3> = Vec::with_capacity(3);

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("facet") => {
                // "facet normal nx ny nz"
                let components: Vec<f32> = tokens
                    .skip(1)
                    .filter_map(|t| t.parse().ok())
                    .collect();
                facet_normal = if components.len() == 3 {
                    Vector3::new(components[0], components[1], components[2])
                } else {
                    Vector3::ZERO
                };
                facet_vertices.clear();
            },
            Some("vertex") => {
                let components: Vec<f32> = tokens.filter_map(|t| t.parse().ok()).collect();
                if components.len() == 3 {
                    facet_vertices.push(Vector3::new(
                        components[0],
                        components[1],
                        components[2],
                    ));
                }
            },
            Some("endfacet") => {
                if facet_vertices.len() == 3 && facet_vertices.iter().all(|v| v.is_finite()) {
                    for v in facet_vertices.drain(..) {
                        vertices.push(v);
                        normals.push(facet_normal);
                    }
                } else {
                    log::warn!("dropping malformed stl facet");
                    facet_vertices.clear();
                }
            },
            _ => {},
        }
    }

    build_mesh(filename, vertices, normals)
}

fn build_mesh(filename: &str, vertices: Vec<Vector3>, normals: Vec<Vector3>) -> Result<Model3D> {
    let indices = (0..vertices.len() as u32).collect();
    let buffers = ModelBuffers::new(&scene_name(filename), vertices, Some(normals), None)?;

    Ok(Model3D::TriangleMesh {
        buffers,
        indices: Some(indices),
    })
}

fn read_vector(bytes: &[u8]) -> Vector3 {
    Vector3::new(
        LittleEndian::read_f32(&bytes[0..4]),
        LittleEndian::read_f32(&bytes[4..8]),
        LittleEndian::read_f32(&bytes[8..12]),
    )
}
