//! Model3D to SplatScene conversion.

use crate::error::Result;
use crate::gaussian::{
    scene::{
        MAX_MOBILE_GAUSSIANS,
        SplatScene,
    },
    splat::GaussianSplat,
};
use crate::model::Model3D;


/// Hard cap on converted primitives; sources above it are subsampled at a
/// uniform stride to preserve the spatial distribution.
pub const MAX_CONVERTED_SPLATS: usize = MAX_MOBILE_GAUSSIANS;

/// Isotropic splat radius as a fraction of the model's bounding-box
/// diagonal.
const SCALE_DIVISOR: f32 = 200.0;

const DEFAULT_COLOR: [f32; 3] = [0.7, 0.7, 0.7];

const FALLBACK_SCALE: f32 = 0.01;


/// Maps each retained model vertex to one isotropic, identity-rotated
/// Gaussian primitive.
pub fn to_splat_scene(model: &Model3D) -> Result<SplatScene> {
    let buffers = model.buffers();
    let diagonal = (buffers.max - buffers.min).length();
    let scale = if diagonal > 0.0 {
        diagonal / SCALE_DIVISOR
    } else {
        FALLBACK_SCALE
    };

    let source_count = buffers.vertex_count();
    let output_count = source_count.min(MAX_CONVERTED_SPLATS);
    let stride = source_count as f64 / output_count as f64;

    let mut gaussians = Vec::with_capacity(output_count);
    for i in 0..output_count {
        let index = (i as f64 * stride) as usize;

        let color = buffers
            .colors
            .as_ref()
            .map(|colors| colors[index])
            .unwrap_or(DEFAULT_COLOR);

        gaussians.push(GaussianSplat::new(
            buffers.vertices[index].to_array(),
            [scale; 3],
            [0.0, 0.0, 0.0, 1.0],
            color.to_vec(),
            1.0,
        )?);
    }

    Ok(SplatScene::from_gaussians(&buffers.name, gaussians))
}
