use log::trace;

use crate::error::ConfigurationError;

/// Holds per-bar heights and applies the falling-bar rule once per tick.
///
/// A bar jumps straight up to any level at or above its previous height and
/// otherwise falls by a fixed step, never below zero and never above
/// `max_height`. New heights are committed as the next tick's previous
/// heights only after every bar has been computed.
pub struct FallingBarAnimator {
    /// Heights produced by the latest tick, ready for display.
    current_heights: Vec<u16>,
    /// Heights committed at the end of the previous tick.
    previous_heights: Vec<u16>,
    /// Upper clamp, usually the grid height minus one.
    max_height: u16,
    num_bars: usize,
}

impl FallingBarAnimator {
    /// Creates an animator with every bar at height 0.
    pub fn new(num_bars: usize, max_height: u16) -> Result<Self, ConfigurationError> {
        if num_bars == 0 {
            return Err(ConfigurationError::ZeroBars);
        }
        Ok(Self {
            current_heights: vec![0; num_bars],
            previous_heights: vec![0; num_bars],
            max_height,
            num_bars,
        })
    }

    /// Advances the animation by one frame and returns the new heights.
    ///
    /// Only the first `num_bars` entries of `levels` are read; bars with no
    /// entry are treated as level 0.
    pub fn tick(&mut self, levels: &[u16], falling_step: u16) -> &[u16] {
        for (i, current) in self.current_heights.iter_mut().enumerate() {
            let level = levels.get(i).copied().unwrap_or(0);
            let previous = self.previous_heights[i];

            let next = if level >= previous {
                level
            } else {
                previous.saturating_sub(falling_step)
            };
            *current = next.min(self.max_height);
        }

        self.previous_heights.copy_from_slice(&self.current_heights);
        trace!("tick heights: {:?}", self.current_heights);
        &self.current_heights
    }

    pub fn get_current_heights(&self) -> &[u16] {
        &self.current_heights
    }

    pub fn get_previous_heights(&self) -> &[u16] {
        &self.previous_heights
    }

    pub fn get_max_height(&self) -> u16 {
        self.max_height
    }

    pub fn num_bars(&self) -> usize {
        self.num_bars
    }
}
