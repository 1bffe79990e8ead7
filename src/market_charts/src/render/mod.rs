//! Pure transformations from a cached series to what the chart renderer draws.
//!
//! Nothing in here performs I/O or touches slot state; the same inputs always
//! produce structurally identical outputs.

pub mod color;
pub mod labels;
pub mod options;
pub mod price;
pub mod projection;

use chrono_tz::Tz;

use crate::render::color::Palette;

/// Presentation settings shared by every slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub palette: Palette,
    /// Wall-clock zone used for axis labels.
    pub timezone: Tz,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            timezone: Tz::UTC,
        }
    }
}
