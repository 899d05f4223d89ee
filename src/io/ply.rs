//! PLY reader/writer for Gaussian scenes.
//!
//! The reader consumes the textual header on the raw byte slice and locates
//! the binary payload by the offset immediately past the `end_header`
//! newline. No buffered text reader ever touches payload bytes; consuming
//! past the header with a line-oriented reader would shift every binary
//! offset after it.

use bytemuck::{
    Pod,
    Zeroable,
};
use byteorder::{
    BigEndian,
    ByteOrder,
    LittleEndian,
};
use static_assertions::assert_eq_size;

use crate::error::{
    Result,
    SplatError,
};
use crate::gaussian::{
    scene::SplatScene,
    splat::GaussianSplat,
};
use crate::io::{
    scene_name,
    writer::ByteWriter,
};


/// Isotropic fallback scale for files that carry no `scale_*` properties.
pub const DEFAULT_POINT_SCALE: f32 = 0.01;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ScalarType {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
}

impl ScalarType {
    /// Scalar type token, accepting both the classic and sized spellings.
    ///
    /// Unrecognized types fail fast: assigning them a zero width would
    /// silently misalign every later field in the record.
    fn parse(token: &str) -> Result<Self> {
        match token {
            "char" | "int8" => Ok(Self::Char),
            "uchar" | "uint8" => Ok(Self::UChar),
            "short" | "int16" => Ok(Self::Short),
            "ushort" | "uint16" => Ok(Self::UShort),
            "int" | "int32" => Ok(Self::Int),
            "uint" | "uint32" => Ok(Self::UInt),
            "float" | "float32" => Ok(Self::Float),
            "double" | "float64" => Ok(Self::Double),
            other => Err(SplatError::UnsupportedFormat(format!(
                "unknown ply property type '{other}'",
            ))),
        }
    }

    pub(crate) fn width(self) -> usize {
        match self {
            Self::Char | Self::UChar => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Double => 8,
        }
    }

    /// Reads one scalar at `bytes[0..width]` in the file's byte order,
    /// widened to f64.
    pub(crate) fn read(self, bytes: &[u8], format: PlyFormat) -> f64 {
        let big = format == PlyFormat::BinaryBigEndian;
        match self {
            Self::Char => bytes[0] as i8 as f64,
            Self::UChar => bytes[0] as f64,
            Self::Short => {
                if big { BigEndian::read_i16(bytes) as f64 } else { LittleEndian::read_i16(bytes) as f64 }
            },
            Self::UShort => {
                if big { BigEndian::read_u16(bytes) as f64 } else { LittleEndian::read_u16(bytes) as f64 }
            },
            Self::Int => {
                if big { BigEndian::read_i32(bytes) as f64 } else { LittleEndian::read_i32(bytes) as f64 }
            },
            Self::UInt => {
                if big { BigEndian::read_u32(bytes) as f64 } else { LittleEndian::read_u32(bytes) as f64 }
            },
            Self::Float => {
                if big { BigEndian::read_f32(bytes) as f64 } else { LittleEndian::read_f32(bytes) as f64 }
            },
            Self::Double => {
                if big { BigEndian::read_f64(bytes) } else { LittleEndian::read_f64(bytes) }
            },
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PlyProperty {
    pub(crate) name: String,
    pub(crate) ty: ScalarType,
}

#[derive(Clone, Debug)]
pub(crate) struct PlyHeader {
    pub(crate) format: PlyFormat,
    pub(crate) vertex_count: usize,
    pub(crate) properties: Vec<PlyProperty>,
    /// Byte offset of the first payload byte in the raw input.
    pub(crate) payload_offset: usize,
}

impl PlyHeader {
    pub(crate) fn stride(&self) -> usize {
        self.properties.iter().map(|p| p.ty.width()).sum()
    }

    pub(crate) fn property_index(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }

    /// Byte offset of a property within one binary vertex record.
    pub(crate) fn property_offset(&self, index: usize) -> usize {
        self.properties[..index].iter().map(|p| p.ty.width()).sum()
    }
}

/// Parses the header on the raw byte slice, tracking the byte offset of the
/// first payload byte.
pub(crate) fn parse_header(bytes: &[u8]) -> Result<PlyHeader> {
    let mut cursor = 0;
    let mut first_line = true;

    let mut format = None;
    let mut vertex_count: Option<usize> = None;
    let mut properties = Vec::new();
    let mut in_vertex_element = false;

    loop {
        if cursor >= bytes.len() {
            return Err(SplatError::UnsupportedFormat(
                "header has no end_header line".to_string(),
            ));
        }

        let line_end = bytes[cursor..].iter().position(|&b| b == b'\n');
        let (raw_line, next_cursor) = match line_end {
            Some(i) => (&bytes[cursor..cursor + i], cursor + i + 1),
            None => (&bytes[cursor..], bytes.len()),
        };
        cursor = next_cursor;

        let line = std::str::from_utf8(raw_line)
            .map_err(|_| SplatError::UnsupportedFormat("header is not valid utf-8".to_string()))?
            .trim_end_matches('\r')
            .trim();

        if first_line {
            if line != "ply" {
                return Err(SplatError::UnsupportedFormat(
                    "missing ply magic line".to_string(),
                ));
            }
            first_line = false;
            continue;
        }

        if line == "end_header" {
            break;
        }

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("comment") | Some("obj_info") | None => {},
            Some("format") => {
                format = Some(match tokens.next() {
                    Some("ascii") => PlyFormat::Ascii,
                    Some("binary_little_endian") => PlyFormat::BinaryLittleEndian,
                    Some("binary_big_endian") => PlyFormat::BinaryBigEndian,
                    other => {
                        return Err(SplatError::UnsupportedFormat(format!(
                            "unknown ply format token '{}'",
                            other.unwrap_or(""),
                        )));
                    },
                });
            },
            Some("element") => {
                let name = tokens.next().unwrap_or("");
                if name == "vertex" {
                    let count = tokens
                        .next()
                        .and_then(|t| t.parse::<usize>().ok())
                        .ok_or_else(|| {
                            SplatError::UnsupportedFormat(
                                "malformed element vertex line".to_string(),
                            )
                        })?;
                    vertex_count = Some(count);
                    in_vertex_element = true;
                } else {
                    in_vertex_element = false;
                }
            },
            Some("property") => {
                if !in_vertex_element {
                    continue;
                }

                match tokens.next() {
                    Some("list") => {
                        return Err(SplatError::UnsupportedFormat(
                            "list properties are not supported on vertex elements".to_string(),
                        ));
                    },
                    Some(ty) => {
                        let name = tokens.next().unwrap_or("").to_string();
                        properties.push(PlyProperty {
                            name,
                            ty: ScalarType::parse(ty)?,
                        });
                    },
                    None => {
                        return Err(SplatError::UnsupportedFormat(
                            "malformed property line".to_string(),
                        ));
                    },
                }
            },
            Some(_) => {},
        }
    }

    let format = format.ok_or_else(|| {
        SplatError::UnsupportedFormat("header has no format declaration".to_string())
    })?;
    let vertex_count = vertex_count.ok_or_else(|| {
        SplatError::UnsupportedFormat("header has no vertex element".to_string())
    })?;

    if vertex_count == 0 {
        return Err(SplatError::EmptyInput);
    }

    Ok(PlyHeader {
        format,
        vertex_count,
        properties,
        payload_offset: cursor,
    })
}


/// Accumulates named property values for one vertex and resolves them into a
/// Gaussian primitive with documented defaults.
#[derive(Debug, Default)]
struct VertexRecord {
    position: [f64; 3],
    f_dc: [f32; 3],
    has_f_dc: bool,
    color: [f32; 3],
    has_color: bool,
    scale: [f32; 3],
    has_scale: bool,
    rotation: [f32; 4],
    has_rotation: bool,
    opacity: f32,
    has_opacity: bool,
}

impl VertexRecord {
    fn consume(&mut self, name: &str, value: f64) {
        let v = value as f32;
        match name {
            "x" => self.position[0] = value,
            "y" => self.position[1] = value,
            "z" => self.position[2] = value,
            // legacy normal slot, not a gaussian attribute
            "nx" | "ny" | "nz" => {},
            "f_dc_0" => { self.f_dc[0] = v; self.has_f_dc = true; },
            "f_dc_1" => { self.f_dc[1] = v; self.has_f_dc = true; },
            "f_dc_2" => { self.f_dc[2] = v; self.has_f_dc = true; },
            "red" => { self.color[0] = v / 255.0; self.has_color = true; },
            "green" => { self.color[1] = v / 255.0; self.has_color = true; },
            "blue" => { self.color[2] = v / 255.0; self.has_color = true; },
            "scale_0" => { self.scale[0] = v; self.has_scale = true; },
            "scale_1" => { self.scale[1] = v; self.has_scale = true; },
            "scale_2" => { self.scale[2] = v; self.has_scale = true; },
            "rot_0" => { self.rotation[0] = v; self.has_rotation = true; },
            "rot_1" => { self.rotation[1] = v; self.has_rotation = true; },
            "rot_2" => { self.rotation[2] = v; self.has_rotation = true; },
            "rot_3" => { self.rotation[3] = v; self.has_rotation = true; },
            "opacity" => { self.opacity = v; self.has_opacity = true; },
            _ => {},
        }
    }

    /// `None` when the position is non-finite; the caller skips the record.
    fn into_gaussian(self) -> Option<GaussianSplat> {
        if !self.position.iter().all(|v| v.is_finite()) {
            return None;
        }

        let sh = if self.has_f_dc {
            self.f_dc
        } else if self.has_color {
            self.color
        } else {
            [0.0, 0.0, 0.0]
        };

        let opacity = if self.has_opacity {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let scale = if self.has_scale {
            self.scale
        } else {
            [DEFAULT_POINT_SCALE; 3]
        };

        let rotation = if self.has_rotation {
            self.rotation
        } else {
            [0.0, 0.0, 0.0, 1.0]
        };

        GaussianSplat::new(
            self.position.map(|v| v as f32),
            scale,
            rotation,
            sh.to_vec(),
            opacity,
        )
        .ok()
    }
}

/// Parses an ASCII or binary PLY byte stream into a scene.
///
/// `filename` contributes only the scene name (extension stripped).
pub fn read_ply(bytes: &[u8], filename: &str) -> Result<SplatScene> {
    let header = parse_header(bytes)?;

    for required in ["x", "y", "z"] {
        if header.property_index(required).is_none() {
            return Err(SplatError::MissingProperty(required.to_string()));
        }
    }

    let gaussians = match header.format {
        PlyFormat::Ascii => read_ascii_vertices(bytes, &header)?,
        PlyFormat::BinaryLittleEndian | PlyFormat::BinaryBigEndian => {
            read_binary_vertices(bytes, &header)?
        },
    };

    if gaussians.is_empty() {
        return Err(SplatError::EmptyInput);
    }

    log::debug!(
        "parsed {} of {} declared ply vertices",
        gaussians.len(),
        header.vertex_count,
    );

    Ok(SplatScene::from_gaussians(&scene_name(filename), gaussians))
}

fn read_ascii_vertices(bytes: &[u8], header: &PlyHeader) -> Result<Vec<GaussianSplat>> {
    let text = std::str::from_utf8(&bytes[header.payload_offset..]).map_err(|_| {
        SplatError::UnsupportedFormat("ascii payload is not valid utf-8".to_string())
    })?;

    // the declared count is untrusted; cap the preallocation by what the
    // payload could possibly hold and let the vector grow
    let mut gaussians = Vec::with_capacity(header.vertex_count.min(text.len() / 2));
    for line in text.lines() {
        if gaussians.len() >= header.vertex_count {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < header.properties.len() {
            log::warn!(
                "skipping short vertex line: {} of {} values",
                tokens.len(),
                header.properties.len(),
            );
            continue;
        }

        let mut record = VertexRecord::default();
        for (property, token) in header.properties.iter().zip(&tokens) {
            let value: f64 = token.parse().unwrap_or(f64::NAN);
            record.consume(&property.name, value);
        }

        match record.into_gaussian() {
            Some(gaussian) => gaussians.push(gaussian),
            None => log::warn!("skipping vertex with non-finite position"),
        }
    }

    Ok(gaussians)
}

fn read_binary_vertices(bytes: &[u8], header: &PlyHeader) -> Result<Vec<GaussianSplat>> {
    let payload = &bytes[header.payload_offset..];
    let stride = header.stride();

    // an absurd declared count must surface as truncation, not as an
    // allocation failure or a multiply overflow
    let expected = stride.checked_mul(header.vertex_count).unwrap_or(usize::MAX);

    if payload.len() < expected {
        return Err(SplatError::TruncatedData {
            expected,
            actual: payload.len(),
        });
    }

    let mut gaussians = Vec::with_capacity(header.vertex_count);
    for vertex in payload[..expected].chunks_exact(stride) {
        let mut record = VertexRecord::default();
        let mut offset = 0;

        for property in &header.properties {
            let width = property.ty.width();
            let value = property.ty.read(&vertex[offset..offset + width], header.format);
            offset += width;
            record.consume(&property.name, value);
        }

        match record.into_gaussian() {
            Some(gaussian) => gaussians.push(gaussian),
            None => log::warn!("skipping vertex with non-finite position"),
        }
    }

    Ok(gaussians)
}


/// One exported binary vertex record. The normal slot is zero padding kept
/// for compatibility with tooling that expects it; it is ignored on import.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
struct PlyVertexRecord {
    position: [f32; 3],
    normal: [f32; 3],
    f_dc: [f32; 3],
    scale: [f32; 3],
    rotation: [f32; 4],
    opacity: f32,
}

assert_eq_size!(PlyVertexRecord, [u8; 68]);

/// Serializes a scene as `binary_little_endian` PLY. Degree-3 scenes export
/// their DC color terms only.
pub fn write_ply(scene: &SplatScene) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(
        128 + scene.gaussian_count() * std::mem::size_of::<PlyVertexRecord>(),
    );

    writer.write_str("ply\n");
    writer.write_str("format binary_little_endian 1.0\n");
    writer.write_str(&format!("element vertex {}\n", scene.gaussian_count()));
    for name in ["x", "y", "z", "nx", "ny", "nz"] {
        writer.write_str(&format!("property float {name}\n"));
    }
    for i in 0..3 {
        writer.write_str(&format!("property float f_dc_{i}\n"));
    }
    for i in 0..3 {
        writer.write_str(&format!("property float scale_{i}\n"));
    }
    for i in 0..4 {
        writer.write_str(&format!("property float rot_{i}\n"));
    }
    writer.write_str("property float opacity\n");
    writer.write_str("end_header\n");

    let records: Vec<PlyVertexRecord> = scene
        .gaussians
        .iter()
        .map(|g| PlyVertexRecord {
            position: g.position,
            normal: [0.0; 3],
            f_dc: [
                g.sh_coefficients[0],
                g.sh_coefficients[1],
                g.sh_coefficients[2],
            ],
            scale: g.scale,
            rotation: g.rotation,
            opacity: g.opacity,
        })
        .collect();

    writer.write_bytes(bytemuck::cast_slice(&records));
    writer.into_bytes()
}
