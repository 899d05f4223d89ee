use std::hash::{
    Hash,
    Hasher,
};

use byteorder::{
    ByteOrder,
    LittleEndian,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    Result,
    SplatError,
};
use crate::io::writer::ByteWriter;


/// Coefficient count for degree-0 spherical harmonics (flat RGB).
pub const SH_DEGREE_0_COEFF_COUNT: usize = 3;

/// Coefficient count for degree-3 spherical harmonics.
pub const SH_DEGREE_3_COEFF_COUNT: usize = 48;

const POSITION_BYTES: usize = 12;
const SCALE_BYTES: usize = 12;
const ROTATION_BYTES: usize = 16;
const OPACITY_BYTES: usize = 4;


/// A single 3D Gaussian primitive.
///
/// Construct through [`GaussianSplat::new`], which enforces the value
/// invariants (spherical-harmonics coefficient count, opacity range).
#[derive(
    Clone,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct GaussianSplat {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: [f32; 4],
    pub sh_coefficients: Vec<f32>,
    pub opacity: f32,
}

impl GaussianSplat {
    pub fn new(
        position: [f32; 3],
        scale: [f32; 3],
        rotation: [f32; 4],
        sh_coefficients: Vec<f32>,
        opacity: f32,
    ) -> Result<Self> {
        let sh_len = sh_coefficients.len();
        if sh_len != SH_DEGREE_0_COEFF_COUNT && sh_len != SH_DEGREE_3_COEFF_COUNT {
            return Err(SplatError::Validation(format!(
                "sh coefficient count must be {SH_DEGREE_0_COEFF_COUNT} or {SH_DEGREE_3_COEFF_COUNT}, got {sh_len}",
            )));
        }

        if !(0.0..=1.0).contains(&opacity) {
            return Err(SplatError::Validation(format!(
                "opacity must be in [0, 1], got {opacity}",
            )));
        }

        Ok(Self {
            position,
            scale,
            rotation,
            sh_coefficients,
            opacity,
        })
    }

    /// Spherical-harmonics degree encoded by the coefficient count.
    pub fn sh_degree(&self) -> u8 {
        if self.sh_coefficients.len() == SH_DEGREE_3_COEFF_COUNT {
            3
        } else {
            0
        }
    }

    /// Serialized record width in bytes.
    pub fn size_in_bytes(&self) -> usize {
        record_size(self.sh_coefficients.len())
    }

    /// Fixed little-endian record: position, scale, rotation, sh, opacity.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(self.size_in_bytes());

        for v in self.position {
            writer.write_f32(v);
        }
        for v in self.scale {
            writer.write_f32(v);
        }
        for v in self.rotation {
            writer.write_f32(v);
        }
        for &v in &self.sh_coefficients {
            writer.write_f32(v);
        }
        writer.write_f32(self.opacity);

        writer.into_bytes()
    }

    /// Decodes one record previously produced by [`GaussianSplat::to_bytes`].
    pub fn from_bytes(bytes: &[u8], sh_degree: u8) -> Result<Self> {
        let sh_len = sh_coeff_count(sh_degree)?;
        let expected = record_size(sh_len);

        if bytes.len() < expected {
            return Err(SplatError::TruncatedData {
                expected,
                actual: bytes.len(),
            });
        }

        let mut offset = 0;
        let read_f32 = |offset: &mut usize| {
            let v = LittleEndian::read_f32(&bytes[*offset..*offset + 4]);
            *offset += 4;
            v
        };

        let position = [
            read_f32(&mut offset),
            read_f32(&mut offset),
            read_f32(&mut offset),
        ];
        let scale = [
            read_f32(&mut offset),
            read_f32(&mut offset),
            read_f32(&mut offset),
        ];
        let rotation = [
            read_f32(&mut offset),
            read_f32(&mut offset),
            read_f32(&mut offset),
            read_f32(&mut offset),
        ];

        let mut sh_coefficients = Vec::with_capacity(sh_len);
        for _ in 0..sh_len {
            sh_coefficients.push(read_f32(&mut offset));
        }

        let opacity = read_f32(&mut offset);

        Ok(Self {
            position,
            scale,
            rotation,
            sh_coefficients,
            opacity,
        })
    }
}

impl Hash for GaussianSplat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in self.position {
            v.to_bits().hash(state);
        }
        for v in self.scale {
            v.to_bits().hash(state);
        }
        for v in self.rotation {
            v.to_bits().hash(state);
        }
        for v in &self.sh_coefficients {
            v.to_bits().hash(state);
        }
        self.opacity.to_bits().hash(state);
    }
}

/// Record width for a given SH coefficient count.
pub const fn record_size(sh_len: usize) -> usize {
    POSITION_BYTES + SCALE_BYTES + ROTATION_BYTES + 4 * sh_len + OPACITY_BYTES
}

/// SH coefficient count for a degree marker, 0 and 3 being the only
/// supported degrees.
pub fn sh_coeff_count(sh_degree: u8) -> Result<usize> {
    match sh_degree {
        0 => Ok(SH_DEGREE_0_COEFF_COUNT),
        3 => Ok(SH_DEGREE_3_COEFF_COUNT),
        _ => Err(SplatError::Validation(format!(
            "unsupported sh degree {sh_degree}",
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample_splat() -> GaussianSplat {
        GaussianSplat::new(
            [1.0, -2.0, 3.5],
            [0.1, 0.2, 0.3],
            [0.0, 0.7071, 0.0, 0.7071],
            vec![0.9, 0.5, 0.25],
            0.8,
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_sh_length() {
        let err = GaussianSplat::new([0.0; 3], [1.0; 3], [0.0, 0.0, 0.0, 1.0], vec![0.0; 5], 1.0);
        assert!(matches!(err, Err(SplatError::Validation(_))));
    }

    #[test]
    fn rejects_out_of_range_opacity() {
        let err = GaussianSplat::new([0.0; 3], [1.0; 3], [0.0, 0.0, 0.0, 1.0], vec![0.0; 3], 1.5);
        assert!(matches!(err, Err(SplatError::Validation(_))));
    }

    #[test]
    fn byte_roundtrip_degree_0() {
        let splat = sample_splat();
        let bytes = splat.to_bytes();

        assert_eq!(bytes.len(), record_size(SH_DEGREE_0_COEFF_COUNT));
        assert_eq!(GaussianSplat::from_bytes(&bytes, 0).unwrap(), splat);
    }

    #[test]
    fn byte_roundtrip_degree_3() {
        let sh: Vec<f32> = (0..48).map(|i| i as f32 * 0.01).collect();
        let splat = GaussianSplat::new([0.0; 3], [1.0; 3], [0.0, 0.0, 0.0, 1.0], sh, 0.5).unwrap();

        let bytes = splat.to_bytes();
        assert_eq!(bytes.len(), record_size(SH_DEGREE_3_COEFF_COUNT));
        assert_eq!(GaussianSplat::from_bytes(&bytes, 3).unwrap(), splat);
    }

    #[test]
    fn from_bytes_rejects_short_buffer() {
        let bytes = sample_splat().to_bytes();
        let err = GaussianSplat::from_bytes(&bytes[..bytes.len() - 1], 0);
        assert!(matches!(err, Err(SplatError::TruncatedData { .. })));
    }

    #[test]
    fn size_tracks_sh_degree() {
        assert_eq!(sample_splat().size_in_bytes(), 56);
        assert_eq!(record_size(SH_DEGREE_3_COEFF_COUNT), 236);
    }
}
