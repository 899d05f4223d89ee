use rand::{
    Rng,
    prelude::Distribution,
};

use crate::gaussian::{
    scene::SplatScene,
    splat::{
        GaussianSplat,
        SH_DEGREE_0_COEFF_COUNT,
    },
};


impl Distribution<GaussianSplat> for rand::distributions::Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GaussianSplat {
        let rotation = [
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0f32),
        ];
        let norm = rotation.iter().map(|v| v * v).sum::<f32>().sqrt().max(1e-6);

        GaussianSplat {
            position: [
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            ],
            scale: [
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
            ],
            rotation: rotation.map(|v| v / norm),
            sh_coefficients: (0..SH_DEGREE_0_COEFF_COUNT)
                .map(|_| rng.gen_range(0.0..1.0))
                .collect(),
            opacity: rng.gen_range(0.0..0.8),
        }
    }
}

/// Scene of `n` uniformly random degree-0 gaussians, for tests and benches.
pub fn random_gaussians(n: usize) -> SplatScene {
    let mut rng = rand::thread_rng();
    let gaussians: Vec<GaussianSplat> = (0..n).map(|_| rng.r#gen()).collect();

    SplatScene::from_gaussians("random", gaussians)
}
