use core::time::Duration;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::ConfigurationError;
use crate::geometry::RenderGeometry;

// --- Wire Format ---
pub const ELEMENT_COUNT: usize = 32; // Levels carried by one sample buffer
pub const MULTIPLIER: usize = 3; // Bytes reserved per level ("12 " or "7  ")
pub const SAMPLE_BUFFER_LEN: usize = ELEMENT_COUNT * MULTIPLIER;
pub const REQUEST_BYTE: u8 = b'?'; // Content is ignored by the server

// --- Transport ---
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 1488;

// --- Animation ---
pub const FALLING_STEP: u16 = 1; // Pixels a bar drops per tick
pub const FRAME_DELAY: Duration = Duration::from_millis(5);

/// Runtime settings for [`crate::VolumeBars`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerConfig {
    pub element_count: usize,
    pub multiplier: usize,
    /// `None` picks one bar per two grid columns.
    pub num_bars: Option<usize>,
    pub falling_step: u16,
    pub frame_delay: Duration,
    pub peer: SocketAddr,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            element_count: ELEMENT_COUNT,
            multiplier: MULTIPLIER,
            num_bars: None,
            falling_step: FALLING_STEP,
            frame_delay: FRAME_DELAY,
            peer: SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT),
        }
    }
}

impl VisualizerConfig {
    pub fn sample_buffer_len(&self) -> usize {
        self.element_count * self.multiplier
    }

    pub fn resolve_num_bars(&self, grid_width: u32) -> usize {
        self.num_bars.unwrap_or(grid_width as usize / 2)
    }

    /// Checks the settings against a grid and derives the render geometry.
    pub fn validate(
        &self,
        grid_width: u32,
        grid_height: u32,
    ) -> Result<RenderGeometry, ConfigurationError> {
        if self.element_count == 0 || self.multiplier == 0 {
            return Err(ConfigurationError::EmptySampleBuffer);
        }
        if self.falling_step == 0 {
            return Err(ConfigurationError::ZeroFallingStep);
        }
        let num_bars = self.resolve_num_bars(grid_width);
        if num_bars > self.element_count {
            return Err(ConfigurationError::MoreBarsThanLevels {
                num_bars,
                element_count: self.element_count,
            });
        }
        RenderGeometry::new(grid_width, grid_height, num_bars)
    }
}
