//! Generic point-cloud PLY ingestion.
//!
//! This path does not go through the Gaussian-scene reader: it performs its
//! own property-offset scan (x/y/z plus optional red/green/blue) and per-
//! vertex stride computation, reading only those fields and skipping the
//! rest of each record bit-for-bit.

use crate::error::{
    Result,
    SplatError,
};
use crate::io::ply::{
    PlyFormat,
    PlyHeader,
    parse_header,
};
use crate::io::scene_name;
use crate::math::Vector3;
use crate::model::{
    Model3D,
    ModelBuffers,
};


struct PropertySlot {
    offset: usize,
    token_index: usize,
    ty: crate::io::ply::ScalarType,
}

fn locate(header: &PlyHeader, name: &str) -> Option<PropertySlot> {
    let index = header.property_index(name)?;
    Some(PropertySlot {
        offset: header.property_offset(index),
        token_index: index,
        ty: header.properties[index].ty,
    })
}

pub fn load_point_cloud(bytes: &[u8], filename: &str) -> Result<Model3D> {
    let header = parse_header(bytes)?;

    let x = locate(&header, "x");
    let y = locate(&header, "y");
    let z = locate(&header, "z");
    let (x, y, z) = match (x, y, z) {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => return Err(SplatError::MissingProperty("x/y/z".to_string())),
    };

    let red = locate(&header, "red");
    let green = locate(&header, "green");
    let blue = locate(&header, "blue");
    let has_color = red.is_some() && green.is_some() && blue.is_some();

    // the declared count is untrusted; cap the preallocation by what the
    // payload could possibly hold
    let payload_len = bytes.len() - header.payload_offset;
    let capacity = header.vertex_count.min(payload_len / 2);

    let mut vertices = Vec::with_capacity(capacity);
    let mut colors = if has_color {
        Some(Vec::with_capacity(capacity))
    } else {
        None
    };

    match header.format {
        PlyFormat::Ascii => {
            let text = std::str::from_utf8(&bytes[header.payload_offset..]).map_err(|_| {
                SplatError::UnsupportedFormat("ascii payload is not valid utf-8".to_string())
            })?;

            for line in text.lines() {
                if vertices.len() >= header.vertex_count {
                    break;
                }

                let tokens: Vec<&str> = line.split_whitespace().collect();
                if tokens.len() < header.properties.len() {
                    if !tokens.is_empty() {
                        log::warn!("skipping short vertex line");
                    }
                    continue;
                }

                let parse = |slot: &PropertySlot| -> f32 {
                    tokens[slot.token_index].parse::<f32>().unwrap_or(f32::NAN)
                };

                let position = Vector3::new(parse(&x), parse(&y), parse(&z));
                if !position.is_finite() {
                    log::warn!("dropping vertex with non-finite coordinate");
                    continue;
                }

                vertices.push(position);
                if let (Some(colors), Some(r), Some(g), Some(b)) =
                    (colors.as_mut(), red.as_ref(), green.as_ref(), blue.as_ref())
                {
                    colors.push([
                        parse(r) / 255.0,
                        parse(g) / 255.0,
                        parse(b) / 255.0,
                    ]);
                }
            }
        },
        PlyFormat::BinaryLittleEndian | PlyFormat::BinaryBigEndian => {
            let payload = &bytes[header.payload_offset..];
            let stride = header.stride();
            let expected = stride.checked_mul(header.vertex_count).unwrap_or(usize::MAX);

            if payload.len() < expected {
                return Err(SplatError::TruncatedData {
                    expected,
                    actual: payload.len(),
                });
            }

            for record in payload[..expected].chunks_exact(stride) {
                let read = |slot: &PropertySlot| -> f32 {
                    let width = slot.ty.width();
                    slot.ty.read(&record[slot.offset..slot.offset + width], header.format) as f32
                };

                let position = Vector3::new(read(&x), read(&y), read(&z));
                if !position.is_finite() {
                    log::warn!("dropping vertex with non-finite coordinate");
                    continue;
                }

                vertices.push(position);
                if let (Some(colors), Some(r), Some(g), Some(b)) =
                    (colors.as_mut(), red.as_ref(), green.as_ref(), blue.as_ref())
                {
                    colors.push([
                        read(r) / 255.0,
                        read(g) / 255.0,
                        read(b) / 255.0,
                    ]);
                }
            }
        },
    }

    let buffers = ModelBuffers::new(&scene_name(filename), vertices, None, colors)?;
    Ok(Model3D::PointCloud(buffers))
}
