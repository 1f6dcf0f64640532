//! Builds ILDA byte streams in memory for the integration tests

#![allow(dead_code)]

pub const LAST_POINT: u8 = 1 << 7;
pub const BLANKING: u8 = 1 << 6;

#[derive(Default)]
pub struct Stream {
    bytes: Vec<u8>,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn header(
        mut self,
        format: u8,
        name: &[u8],
        company: &[u8],
        records: u16,
        number: u16,
        total: u16,
        projector: u8,
    ) -> Self {
        self.bytes.extend_from_slice(b"ILDA");
        self.bytes.extend_from_slice(&[0, 0, 0, format]);
        self.bytes.extend_from_slice(&padded(name));
        self.bytes.extend_from_slice(&padded(company));
        self.bytes.extend_from_slice(&records.to_be_bytes());
        self.bytes.extend_from_slice(&number.to_be_bytes());
        self.bytes.extend_from_slice(&total.to_be_bytes());
        self.bytes.extend_from_slice(&[projector, 0]);
        self
    }

    pub fn end(self) -> Self {
        self.header(0, b"", b"", 0, 0, 0, 0)
    }

    pub fn indexed_3d(mut self, x: i16, y: i16, z: i16, status: u8, index: u8) -> Self {
        self.coords(&[x, y, z]);
        self.bytes.extend_from_slice(&[status, index]);
        self
    }

    pub fn indexed_2d(mut self, x: i16, y: i16, status: u8, index: u8) -> Self {
        self.coords(&[x, y]);
        self.bytes.extend_from_slice(&[status, index]);
        self
    }

    pub fn palette_entry(mut self, r: u8, g: u8, b: u8) -> Self {
        self.bytes.extend_from_slice(&[r, g, b]);
        self
    }

    pub fn true_color_3d(mut self, x: i16, y: i16, z: i16, status: u8, rgb: [u8; 3]) -> Self {
        self.coords(&[x, y, z]);
        self.bytes.extend_from_slice(&[status, rgb[2], rgb[1], rgb[0]]);
        self
    }

    pub fn true_color_2d(mut self, x: i16, y: i16, status: u8, rgb: [u8; 3]) -> Self {
        self.coords(&[x, y]);
        self.bytes.extend_from_slice(&[status, rgb[2], rgb[1], rgb[0]]);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    fn coords(&mut self, coords: &[i16]) {
        for c in coords {
            self.bytes.extend_from_slice(&c.to_be_bytes());
        }
    }
}

fn padded(name: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[..name.len()].copy_from_slice(name);
    out
}
