use std::path::Path;

pub mod codec;
pub mod ply;
pub mod splat;
pub mod writer;

pub use codec::SceneCodec;

/// Default scene name for an imported file: the file stem, extension
/// stripped.
pub(crate) fn scene_name(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}
