use crate::error::Result;


/// Byte-level scene (de)serialization over the SPLAT container.
pub trait SceneCodec {
    fn encode(&self) -> Vec<u8>;
    fn decode(data: &[u8], name: &str) -> Result<Self>
    where
        Self: Sized;
}
