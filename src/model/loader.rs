use std::path::Path;

use crate::error::{
    Result,
    SplatError,
};
use crate::model::{
    Model3D,
    obj,
    ply,
    stl,
};


/// Dispatches to a format-specific loader by file extension
/// (case-insensitive).
pub fn load_model(bytes: &[u8], filename: &str) -> Result<Model3D> {
    let extension = Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ply" => ply::load_point_cloud(bytes, filename),
        "stl" => stl::load_mesh(bytes, filename),
        "obj" => obj::load_mesh(bytes, filename),
        _ => Err(SplatError::UnsupportedFormat(format!(
            "unsupported model extension '{extension}'",
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            load_model(b"", "model.fbx"),
            Err(SplatError::UnsupportedFormat(_)),
        ));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let data = b"ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nproperty float y\nproperty float z\nend_header\n1 2 3\n";
        let model = load_model(data, "Model.PLY").unwrap();
        assert_eq!(model.vertex_count(), 1);
    }
}
