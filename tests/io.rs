use splat_scene::{
    SceneCodec,
    SplatError,
    SplatScene,
    io::{
        ply::{
            read_ply,
            write_ply,
        },
        splat::{
            read_splat,
            write_splat,
        },
    },
    random_gaussians,
};


#[test]
fn test_splat_codec() {
    let count = 10000;

    let scene = random_gaussians(count);
    let encoded = scene.encode();
    let decoded = SplatScene::decode(encoded.as_slice(), "random.splat").unwrap();

    assert_eq!(decoded.gaussian_count(), count);
    assert_eq!(decoded.gaussians, scene.gaussians);
}

#[test]
fn test_ply_roundtrip() {
    let scene = random_gaussians(257);

    let bytes = write_ply(&scene);
    let reimported = read_ply(&bytes, "roundtrip.ply").unwrap();

    assert_eq!(reimported.gaussian_count(), scene.gaussian_count());
    for (a, b) in reimported.gaussians.iter().zip(&scene.gaussians) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.scale, b.scale);
        assert_eq!(a.rotation, b.rotation);
        assert_eq!(a.sh_coefficients, b.sh_coefficients);
        assert_eq!(a.opacity, b.opacity);
    }
}

#[test]
fn test_splat_container_roundtrip() {
    let scene = random_gaussians(33);

    let bytes = write_splat(&scene);
    let reimported = read_splat(&bytes, "roundtrip.splat").unwrap();

    assert_eq!(reimported.gaussian_count(), 33);
    assert_eq!(reimported.gaussians, scene.gaussians);
}

#[test]
fn test_ascii_ply_with_integer_colors() {
    let data = b"ply\n\
format ascii 1.0\n\
element vertex 3\n\
property float x\n\
property float y\n\
property float z\n\
property uchar red\n\
property uchar green\n\
property uchar blue\n\
property float opacity\n\
end_header\n\
1.0 2.0 3.0 255 128 64 0.8\n\
0.0 0.0 0.0 0 0 0 1.0\n\
-1.0 -2.0 -3.0 10 20 30 0.1\n";

    let scene = read_ply(data, "colored.ply").unwrap();
    assert_eq!(scene.gaussian_count(), 3);

    let first = &scene.gaussians[0];
    assert_eq!(first.position, [1.0, 2.0, 3.0]);
    assert!((first.sh_coefficients[0] - 1.0).abs() < 1e-6);
    assert!((first.sh_coefficients[1] - 128.0 / 255.0).abs() < 1e-6);
    assert!((first.opacity - 0.8).abs() < 1e-6);
}

#[test]
fn test_minimal_ascii_ply_defaults() {
    let data = b"ply\n\
format ascii 1.0\n\
element vertex 2\n\
property float x\n\
property float y\n\
property float z\n\
end_header\n\
0.5 0.5 0.5\n\
1.5 1.5 1.5\n";

    let scene = read_ply(data, "minimal.ply").unwrap();

    for gaussian in &scene.gaussians {
        assert_eq!(gaussian.sh_coefficients, vec![0.0, 0.0, 0.0]);
        assert_eq!(gaussian.opacity, 1.0);
        assert_eq!(gaussian.rotation, [0.0, 0.0, 0.0, 1.0]);
    }
}

#[test]
fn test_scene_name_derived_from_filename() {
    let data = b"ply\n\
format ascii 1.0\n\
element vertex 1\n\
property float x\n\
property float y\n\
property float z\n\
end_header\n\
0 0 0\n";

    let scene = read_ply(data, "my_model.ply").unwrap();
    assert_eq!(scene.name, "my_model");
}

#[test]
fn test_empty_vertex_element_fails() {
    let data = b"ply\n\
format ascii 1.0\n\
element vertex 0\n\
property float x\n\
property float y\n\
property float z\n\
end_header\n";

    assert!(matches!(
        read_ply(data, "empty.ply"),
        Err(SplatError::EmptyInput),
    ));
}

#[test]
fn test_malformed_header_is_a_format_error() {
    assert!(matches!(
        read_ply(b"definitely not a ply file", "junk.ply"),
        Err(SplatError::UnsupportedFormat(_)),
    ));
}

#[test]
fn test_exported_ply_header_declares_gaussian_count() {
    let scene = random_gaussians(5);
    let bytes = write_ply(&scene);

    let header_end = bytes
        .windows(11)
        .position(|w| w == &b"end_header\n"[..])
        .unwrap();
    let header = std::str::from_utf8(&bytes[..header_end]).unwrap();

    assert!(header.contains("format binary_little_endian 1.0"));
    assert!(header.contains("element vertex 5"));
}
