use packed_struct::prelude::*;

// Byte #  | Definition
// 0..=3   | Magic, always "ILDA"
// 4..=6   | Reserved
// 7       | Format Code
// 8..=15  | Frame or Color Palette Name, null padded
// 16..=23 | Company Name, null padded
// 24..=25 | Number of Records, 0 ends the stream
// 26..=27 | Frame or Color Palette Number
// 28..=29 | Total Frames in Sequence, 0 if unspecified
// 30      | Projector Number
// 31      | Reserved
#[derive(PackedStruct, Default, Debug, PartialEq, Clone)]
#[packed_struct(endian = "msb", bit_numbering = "msb0", size_bytes = "32")]
pub struct HeaderPack {
    #[packed_field(bytes = "0..=3")]
    pub magic: [u8; 4],
    #[packed_field(bytes = "4..=6")]
    pub _reserved: ReservedZero<packed_bits::Bits<24>>,
    #[packed_field(bytes = "7")]
    pub format_code: u8,
    #[packed_field(bytes = "8..=15")]
    pub name: [u8; 8],
    #[packed_field(bytes = "16..=23")]
    pub company: [u8; 8],
    #[packed_field(bytes = "24..=25")]
    pub record_count: u16,
    #[packed_field(bytes = "26..=27")]
    pub frame_number: u16,
    #[packed_field(bytes = "28..=29")]
    pub total_frames: u16,
    #[packed_field(bytes = "30")]
    pub projector: u8,
    #[packed_field(bytes = "31")]
    pub _reserved_end: ReservedZero<packed_bits::Bits<8>>,
}

// Status Code byte shared by every point format:
// 0x80 = Last Point
// 0x40 = Blanking
// 0x3F = Unused

// Format 0 - 3D Coordinates with Indexed Color
// Byte # | Definition
// 0..=1  | X
// 2..=3  | Y
// 4..=5  | Z
// 6      | Status Code
// 7      | Color Index
#[derive(PackedStruct, Default, Debug, PartialEq, Clone)]
#[packed_struct(endian = "msb", bit_numbering = "msb0", size_bytes = "8")]
pub struct IndexedColor3DPack {
    #[packed_field(bytes = "0..=1")]
    pub x: i16,
    #[packed_field(bytes = "2..=3")]
    pub y: i16,
    #[packed_field(bytes = "4..=5")]
    pub z: i16,
    #[packed_field(bits = "48")]
    pub last_point: bool,
    #[packed_field(bits = "49")]
    pub blanking: bool,
    #[packed_field(bits = "50..=55")]
    pub _unused: ReservedZero<packed_bits::Bits<6>>,
    #[packed_field(bytes = "7")]
    pub color_index: u8,
}

// Format 1 - 2D Coordinates with Indexed Color
// Byte # | Definition
// 0..=1  | X
// 2..=3  | Y
// 4      | Status Code
// 5      | Color Index
#[derive(PackedStruct, Default, Debug, PartialEq, Clone)]
#[packed_struct(endian = "msb", bit_numbering = "msb0", size_bytes = "6")]
pub struct IndexedColor2DPack {
    #[packed_field(bytes = "0..=1")]
    pub x: i16,
    #[packed_field(bytes = "2..=3")]
    pub y: i16,
    #[packed_field(bits = "32")]
    pub last_point: bool,
    #[packed_field(bits = "33")]
    pub blanking: bool,
    #[packed_field(bits = "34..=39")]
    pub _unused: ReservedZero<packed_bits::Bits<6>>,
    #[packed_field(bytes = "5")]
    pub color_index: u8,
}

// Format 2 - Color Palette
// Byte # | Definition
// 0      | Red
// 1      | Green
// 2      | Blue
#[derive(PackedStruct, Default, Debug, PartialEq, Clone)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "3")]
pub struct PaletteEntryPack {
    #[packed_field(bytes = "0")]
    pub r: u8,
    #[packed_field(bytes = "1")]
    pub g: u8,
    #[packed_field(bytes = "2")]
    pub b: u8,
}

// Format 4 - 3D Coordinates with True Color
// Byte # | Definition
// 0..=1  | X
// 2..=3  | Y
// 4..=5  | Z
// 6      | Status Code
// 7      | Blue
// 8      | Green
// 9      | Red
#[derive(PackedStruct, Default, Debug, PartialEq, Clone)]
#[packed_struct(endian = "msb", bit_numbering = "msb0", size_bytes = "10")]
pub struct TrueColor3DPack {
    #[packed_field(bytes = "0..=1")]
    pub x: i16,
    #[packed_field(bytes = "2..=3")]
    pub y: i16,
    #[packed_field(bytes = "4..=5")]
    pub z: i16,
    #[packed_field(bits = "48")]
    pub last_point: bool,
    #[packed_field(bits = "49")]
    pub blanking: bool,
    #[packed_field(bits = "50..=55")]
    pub _unused: ReservedZero<packed_bits::Bits<6>>,
    #[packed_field(bytes = "7")]
    pub b: u8,
    #[packed_field(bytes = "8")]
    pub g: u8,
    #[packed_field(bytes = "9")]
    pub r: u8,
}

// Format 5 - 2D Coordinates with True Color
// Byte # | Definition
// 0..=1  | X
// 2..=3  | Y
// 4      | Status Code
// 5      | Blue
// 6      | Green
// 7      | Red
#[derive(PackedStruct, Default, Debug, PartialEq, Clone)]
#[packed_struct(endian = "msb", bit_numbering = "msb0", size_bytes = "8")]
pub struct TrueColor2DPack {
    #[packed_field(bytes = "0..=1")]
    pub x: i16,
    #[packed_field(bytes = "2..=3")]
    pub y: i16,
    #[packed_field(bits = "32")]
    pub last_point: bool,
    #[packed_field(bits = "33")]
    pub blanking: bool,
    #[packed_field(bits = "34..=39")]
    pub _unused: ReservedZero<packed_bits::Bits<6>>,
    #[packed_field(bytes = "5")]
    pub b: u8,
    #[packed_field(bytes = "6")]
    pub g: u8,
    #[packed_field(bytes = "7")]
    pub r: u8,
}
