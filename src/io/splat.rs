//! SPLAT fixed-stride binary container.
//!
//! Layout: 4-byte magic `SPLT`, format version (u8), sh-degree marker (u8),
//! primitive count (u32 LE), then `count` records in the same fixed
//! little-endian layout as [`GaussianSplat::to_bytes`].

use byteorder::{
    ByteOrder,
    LittleEndian,
};

use crate::error::{
    Result,
    SplatError,
};
use crate::gaussian::{
    scene::SplatScene,
    splat::{
        self,
        GaussianSplat,
    },
};
use crate::io::{
    codec::SceneCodec,
    scene_name,
    writer::ByteWriter,
};


pub const SPLAT_MAGIC: [u8; 4] = *b"SPLT";
pub const SPLAT_VERSION: u8 = 1;

const HEADER_SIZE: usize = 10;


/// Serializes a scene into the SPLAT container.
pub fn write_splat(scene: &SplatScene) -> Vec<u8> {
    let record_size = splat::record_size(splat::sh_coeff_count(scene.sh_degree).unwrap_or(3));
    let mut writer = ByteWriter::with_capacity(HEADER_SIZE + scene.gaussian_count() * record_size);

    writer.write_bytes(&SPLAT_MAGIC);
    writer.write_u8(SPLAT_VERSION);
    writer.write_u8(scene.sh_degree);
    writer.write_u32(scene.gaussian_count() as u32);

    for gaussian in &scene.gaussians {
        writer.write_bytes(&gaussian.to_bytes());
    }

    writer.into_bytes()
}

/// Parses a SPLAT container; `filename` contributes only the scene name.
pub fn read_splat(bytes: &[u8], filename: &str) -> Result<SplatScene> {
    if bytes.len() < HEADER_SIZE {
        return Err(SplatError::TruncatedData {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        });
    }

    if bytes[0..4] != SPLAT_MAGIC {
        return Err(SplatError::UnsupportedFormat(
            "missing SPLT magic".to_string(),
        ));
    }

    let version = bytes[4];
    if version != SPLAT_VERSION {
        return Err(SplatError::UnsupportedFormat(format!(
            "unsupported splat container version {version}",
        )));
    }

    let sh_degree = bytes[5];
    let record_size = splat::record_size(splat::sh_coeff_count(sh_degree)?);
    let count = LittleEndian::read_u32(&bytes[6..10]) as usize;

    if count == 0 {
        return Err(SplatError::EmptyInput);
    }

    let body = &bytes[HEADER_SIZE..];
    let expected = count.checked_mul(record_size).unwrap_or(usize::MAX);
    if body.len() < expected {
        return Err(SplatError::TruncatedData {
            expected,
            actual: body.len(),
        });
    }

    let mut gaussians = Vec::with_capacity(count);
    for record in body[..expected].chunks_exact(record_size) {
        gaussians.push(GaussianSplat::from_bytes(record, sh_degree)?);
    }

    Ok(SplatScene::from_gaussians(&scene_name(filename), gaussians))
}

impl SceneCodec for SplatScene {
    fn encode(&self) -> Vec<u8> {
        write_splat(self)
    }

    fn decode(data: &[u8], name: &str) -> Result<Self> {
        read_splat(data, name)
    }
}
