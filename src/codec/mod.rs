//! Translation between the fixed width, big endian ILDA layouts and typed
//! headers and records.
//!
//! Nothing in here validates more than the structure of the bytes: color
//! indices and coordinate ranges are the decoder's problem.

use std::fmt::{self, Display};

use common::Rgb;
use packed_struct::{PackedStruct, PackedStructSlice};

use self::pack::{
    HeaderPack, IndexedColor2DPack, IndexedColor3DPack, PaletteEntryPack, TrueColor2DPack,
    TrueColor3DPack,
};
use crate::error::FormatError;

pub mod pack;

/// Magic identifying an ILDA format header
pub const MAGIC: [u8; 4] = *b"ILDA";

pub const HEADER_SIZE: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FormatCode {
    IndexedColor3D = 0,
    IndexedColor2D = 1,
    Palette = 2,
    TrueColor3D = 4,
    TrueColor2D = 5,
}

impl FormatCode {
    /// Width in bytes of every record following a header with this code
    pub fn record_size(self) -> usize {
        match self {
            FormatCode::IndexedColor3D => 8,
            FormatCode::IndexedColor2D => 6,
            FormatCode::Palette => 3,
            FormatCode::TrueColor3D => 10,
            FormatCode::TrueColor2D => 8,
        }
    }

    pub fn is_palette(self) -> bool {
        self == FormatCode::Palette
    }
}

impl TryFrom<u8> for FormatCode {
    type Error = FormatError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FormatCode::IndexedColor3D),
            1 => Ok(FormatCode::IndexedColor2D),
            2 => Ok(FormatCode::Palette),
            4 => Ok(FormatCode::TrueColor3D),
            5 => Ok(FormatCode::TrueColor2D),
            code => Err(FormatError::UnsupportedFormat(code)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub format: FormatCode,
    pub name: [u8; 8],
    pub company: [u8; 8],
    /// 0 marks the end of the stream
    pub record_count: u16,
    pub frame_number: u16,
    /// 0 if unspecified
    pub total_frames: u16,
    pub projector: u8,
}

impl Header {
    pub fn name(&self) -> String {
        trim_padding(&self.name)
    }

    pub fn company(&self) -> String {
        trim_padding(&self.company)
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.record_count == 0
    }

    /// Bytes taken by the records that follow this header
    pub fn body_size(&self) -> usize {
        self.record_count as usize * self.format.record_size()
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} \"{}\" by \"{}\", {} records, frame {}/{} on projector {}",
            self.format,
            self.name(),
            self.company(),
            self.record_count,
            self.frame_number,
            self.total_frames,
            self.projector,
        )
    }
}

/// Strip the trailing null padding from a fixed width name
fn trim_padding(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// Declared end of the meaningful points of this frame
    pub last_point: bool,
    /// The beam is off while moving to this point
    pub blanking: bool,
}

/// A single record exactly as it sits on the wire, one variant per format
/// code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Record {
    IndexedColor3D {
        x: i16,
        y: i16,
        z: i16,
        status: Status,
        color_index: u8,
    },
    IndexedColor2D {
        x: i16,
        y: i16,
        status: Status,
        color_index: u8,
    },
    PaletteEntry(Rgb),
    TrueColor3D {
        x: i16,
        y: i16,
        z: i16,
        status: Status,
        color: Rgb,
    },
    TrueColor2D {
        x: i16,
        y: i16,
        status: Status,
        color: Rgb,
    },
}

impl Record {
    /// Palette entries carry no status byte
    pub fn status(&self) -> Option<Status> {
        match *self {
            Record::IndexedColor3D { status, .. }
            | Record::IndexedColor2D { status, .. }
            | Record::TrueColor3D { status, .. }
            | Record::TrueColor2D { status, .. } => Some(status),
            Record::PaletteEntry(_) => None,
        }
    }
}

pub fn decode_header(bytes: &[u8; HEADER_SIZE]) -> Result<Header, FormatError> {
    let pack = HeaderPack::unpack(bytes)?;

    if pack.magic != MAGIC {
        return Err(FormatError::MagicMismatch { found: pack.magic });
    }

    Ok(Header {
        format: FormatCode::try_from(pack.format_code)?,
        name: pack.name,
        company: pack.company,
        record_count: pack.record_count,
        frame_number: pack.frame_number,
        total_frames: pack.total_frames,
        projector: pack.projector,
    })
}

/// Decode one record. `bytes` must be exactly `format.record_size()` long.
pub fn decode_record(format: FormatCode, bytes: &[u8]) -> Result<Record, FormatError> {
    let record = match format {
        FormatCode::IndexedColor3D => {
            let pack = IndexedColor3DPack::unpack_from_slice(bytes)?;
            Record::IndexedColor3D {
                x: pack.x,
                y: pack.y,
                z: pack.z,
                status: Status {
                    last_point: pack.last_point,
                    blanking: pack.blanking,
                },
                color_index: pack.color_index,
            }
        }
        FormatCode::IndexedColor2D => {
            let pack = IndexedColor2DPack::unpack_from_slice(bytes)?;
            Record::IndexedColor2D {
                x: pack.x,
                y: pack.y,
                status: Status {
                    last_point: pack.last_point,
                    blanking: pack.blanking,
                },
                color_index: pack.color_index,
            }
        }
        FormatCode::Palette => {
            let pack = PaletteEntryPack::unpack_from_slice(bytes)?;
            Record::PaletteEntry(Rgb::new(pack.r, pack.g, pack.b))
        }
        FormatCode::TrueColor3D => {
            let pack = TrueColor3DPack::unpack_from_slice(bytes)?;
            Record::TrueColor3D {
                x: pack.x,
                y: pack.y,
                z: pack.z,
                status: Status {
                    last_point: pack.last_point,
                    blanking: pack.blanking,
                },
                color: Rgb::new(pack.r, pack.g, pack.b),
            }
        }
        FormatCode::TrueColor2D => {
            let pack = TrueColor2DPack::unpack_from_slice(bytes)?;
            Record::TrueColor2D {
                x: pack.x,
                y: pack.y,
                status: Status {
                    last_point: pack.last_point,
                    blanking: pack.blanking,
                },
                color: Rgb::new(pack.r, pack.g, pack.b),
            }
        }
    };

    Ok(record)
}

/// Same as [`decode_record`] but for a raw format code straight off the wire
pub fn decode_record_code(code: u8, bytes: &[u8]) -> Result<Record, FormatError> {
    decode_record(FormatCode::try_from(code)?, bytes)
}
