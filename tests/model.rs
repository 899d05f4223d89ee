use splat_scene::{
    Model3D,
    load_model,
    to_splat_scene,
};


#[test]
fn test_obj_to_scene_pipeline() {
    let data = b"v 0 0 0\nv 10 0 0\nv 0 10 0\nv 0 0 10\nf 1 2 3\nf 1 3 4\n";

    let model = load_model(data, "tetra.obj").unwrap();
    assert!(matches!(model, Model3D::TriangleMesh { .. }));

    let scene = to_splat_scene(&model).unwrap();
    assert_eq!(scene.gaussian_count(), 4);
    assert_eq!(scene.name, "tetra");

    // light-gray fallback color, full opacity
    assert_eq!(scene.gaussians[0].sh_coefficients, vec![0.7, 0.7, 0.7]);
    assert_eq!(scene.gaussians[0].opacity, 1.0);
}

#[test]
fn test_point_cloud_ply_to_scene_pipeline() {
    let mut data = Vec::new();
    data.extend_from_slice(
        b"ply\nformat binary_little_endian 1.0\nelement vertex 3\n\
property float x\nproperty float y\nproperty float z\n\
property uchar red\nproperty uchar green\nproperty uchar blue\nend_header\n",
    );
    for (position, color) in [
        ([0.0f32, 0.0, 0.0], [255u8, 0, 0]),
        ([1.0, 1.0, 1.0], [0, 255, 0]),
        ([2.0, 2.0, 2.0], [0, 0, 255]),
    ] {
        for v in position {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.extend_from_slice(&color);
    }

    let model = load_model(&data, "points.ply").unwrap();
    assert!(matches!(model, Model3D::PointCloud(_)));
    assert_eq!(model.vertex_count(), 3);

    let scene = to_splat_scene(&model).unwrap();
    assert_eq!(scene.gaussian_count(), 3);
    assert_eq!(scene.gaussians[0].sh_coefficients, vec![1.0, 0.0, 0.0]);
    assert_eq!(scene.gaussians[2].position, [2.0, 2.0, 2.0]);
}

#[test]
fn test_converted_scene_stays_within_mobile_limits() {
    let mut data = Vec::from(&b"ply\nformat ascii 1.0\nelement vertex 1000\nproperty float x\nproperty float y\nproperty float z\nend_header\n"[..]);
    for i in 0..1000 {
        data.extend_from_slice(format!("{} 0 0\n", i).as_bytes());
    }

    let model = load_model(&data, "big.ply").unwrap();
    let scene = to_splat_scene(&model).unwrap();

    assert!(scene.is_within_mobile_limits());
}
