use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::{WavyError, WavyResult};

/// Default wave fill color (`#6d2dcc`).
pub const DEFAULT_FLOWING_COLOR: Rgba8 = Rgba8::rgb(0x6d, 0x2d, 0xcc);
/// Default circle outline color (`#292929`).
pub const DEFAULT_LINE_COLOR: Rgba8 = Rgba8::rgb(0x29, 0x29, 0x29);
/// Default horizontal scroll speed in units per frame.
pub const DEFAULT_WAVE_SPEED: i32 = 7;

/// Declarative style options for [`WaveRenderer`](crate::WaveRenderer).
///
/// Every field is optional; absent fields fall back to the documented
/// defaults silently. Color fields are kept as raw strings so a malformed
/// value can be recovered from at apply time (warn + retain) instead of
/// failing the whole configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveOptions {
    /// Wave fill color, `#RRGGBB` or `#RRGGBBAA`.
    pub flowing_color: Option<String>,
    /// Circle outline color, `#RRGGBB` or `#RRGGBBAA`.
    pub line_color: Option<String>,
    /// Horizontal scroll speed in units per frame.
    pub wave_speed: Option<i32>,
    /// Initial progress percentage.
    pub progress: Option<f64>,
}

impl WaveOptions {
    pub fn from_json_str(s: &str) -> WavyResult<Self> {
        serde_json::from_str(s).map_err(|e| WavyError::config_parse(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.flowing_color.is_none()
            && self.line_color.is_none()
            && self.wave_speed.is_none()
            && self.progress.is_none()
    }
}
