use std::path::Path;

use anyhow::Error;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::raster::Rect;

/// How decoded frames are turned into images, read from a RON file
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// RGBA
    pub background: [u8; 4],
    /// Frame images are written as `<prefix>-0000.png`, `<prefix>-0001.png`, ...
    pub output_prefix: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
            background: [0, 0, 0, 255],
            output_prefix: "frame".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<RenderConfig, Error> {
        let config = std::fs::read_to_string(path)?;
        let config: RenderConfig = ron::from_str(&config)?;

        if config.width == 0 || config.height == 0 {
            anyhow::bail!(
                "Render size must not be empty, got {}x{}",
                config.width,
                config.height
            );
        }

        Ok(config)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn background_image(&self) -> RgbaImage {
        RgbaImage::from_pixel(self.width, self.height, Rgba(self.background))
    }

    pub fn frame_file_name(&self, index: usize) -> String {
        format!("{}-{:04}.png", self.output_prefix, index)
    }
}
