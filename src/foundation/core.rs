use crate::foundation::error::{FlashError, FlashResult};

/// Output canvas size in user units (one unit per pixel when rasterized).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> FlashResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlashError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(self) -> (f64, f64) {
        (self.width_f64() * 0.5, self.height_f64() * 0.5)
    }
}

/// Straight (non-premultiplied) RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form used in SVG attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Per-axis mirroring applied when several channels share one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reflect {
    pub x: i8,
    pub y: i8,
}

impl Default for Reflect {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Reflect {
    pub const IDENTITY: Self = Self { x: 1, y: 1 };

    /// Reflections assigned to channels in multichannel renders, cycled by channel index.
    pub const QUADRANTS: [Self; 4] = [
        Self { x: 1, y: 1 },
        Self { x: -1, y: 1 },
        Self { x: 1, y: -1 },
        Self { x: -1, y: -1 },
    ];

    pub fn for_channel(channel: usize) -> Self {
        Self::QUADRANTS[channel % Self::QUADRANTS.len()]
    }

    pub fn sx(self) -> f64 {
        f64::from(self.x)
    }

    pub fn sy(self) -> f64 {
        f64::from(self.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
