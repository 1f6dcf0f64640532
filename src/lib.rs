//! Decoder for the ILDA Image Data Transfer Format and a rasterizer for the
//! decoded laser frames.

pub mod codec;
pub mod config;
pub mod decoder;
pub mod error;
pub mod palette;
pub mod raster;

pub use common::{Frame, Point, PointColor, Rgb};
pub use decoder::Decoder;

pub mod prelude {
    pub use crate::{
        codec::{FormatCode, Header, Record, Status},
        config::*,
        decoder::*,
        error::*,
        palette::*,
        raster::*,
    };
    pub use common::*;
}
