/// Append-only writer of fixed-width little-endian fields.
///
/// Both exporters build their payloads through this; no shared state exists
/// across instances.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_append_in_order_little_endian() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xab);
        writer.write_u32(1);
        writer.write_f32(1.0);

        assert_eq!(
            writer.into_bytes(),
            vec![0xab, 1, 0, 0, 0, 0, 0, 0x80, 0x3f],
        );
    }
}
