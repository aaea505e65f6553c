use crate::band_palette::Band;
use crate::error::ConfigurationError;

/// Bar layout and band thresholds, derived once from the grid size.
///
/// Thresholds split the grid height into four bands: rows below `green`,
/// below `yellow`, below `orange`, and everything from `orange` up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderGeometry {
    grid_width: u32,
    grid_height: u32,
    num_bars: usize,
    bar_width: u32,
    green: u32,
    yellow: u32,
    orange: u32,
}

impl RenderGeometry {
    pub fn new(
        grid_width: u32,
        grid_height: u32,
        num_bars: usize,
    ) -> Result<Self, ConfigurationError> {
        if num_bars == 0 {
            return Err(ConfigurationError::ZeroBars);
        }
        if grid_height == 0 {
            return Err(ConfigurationError::ZeroHeight);
        }
        if num_bars > grid_width as usize {
            return Err(ConfigurationError::MoreBarsThanColumns {
                num_bars,
                grid_width,
            });
        }
        if grid_width as usize % num_bars != 0 {
            return Err(ConfigurationError::UnevenBarWidth {
                num_bars,
                grid_width,
            });
        }

        Ok(Self {
            grid_width,
            grid_height,
            num_bars,
            bar_width: grid_width / num_bars as u32,
            green: grid_height * 4 / 12,
            yellow: grid_height * 8 / 12,
            orange: grid_height - 1,
        })
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    pub fn num_bars(&self) -> usize {
        self.num_bars
    }

    pub fn bar_width(&self) -> u32 {
        self.bar_width
    }

    pub fn thresholds(&self) -> (u32, u32, u32) {
        (self.green, self.yellow, self.orange)
    }

    /// Tallest height the animation engine may hold, one row below the grid top.
    pub fn max_bar_height(&self) -> u16 {
        (self.grid_height - 1).min(u16::MAX as u32) as u16
    }

    /// Band of bar row `y`, counted from the bottom of the grid.
    pub fn band_for_row(&self, y: u32) -> Band {
        if y < self.green {
            Band::Green
        } else if y < self.yellow {
            Band::Yellow
        } else if y < self.orange {
            Band::Orange
        } else {
            Band::Red
        }
    }

    /// First grid column of `bar` and one past its last.
    pub fn columns(&self, bar: usize) -> (u32, u32) {
        let start = bar as u32 * self.bar_width;
        (start, start + self.bar_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_for_twelve_rows() {
        let geometry = RenderGeometry::new(8, 12, 4).unwrap();
        assert_eq!(geometry.thresholds(), (4, 8, 11));
        assert_eq!(geometry.bar_width(), 2);
        assert_eq!(geometry.max_bar_height(), 11);
    }

    #[test]
    fn test_band_boundaries() {
        let geometry = RenderGeometry::new(8, 12, 4).unwrap();
        assert_eq!(geometry.band_for_row(3), Band::Green);
        assert_eq!(geometry.band_for_row(4), Band::Yellow);
        assert_eq!(geometry.band_for_row(7), Band::Yellow);
        assert_eq!(geometry.band_for_row(8), Band::Orange);
        assert_eq!(geometry.band_for_row(10), Band::Orange);
        assert_eq!(geometry.band_for_row(11), Band::Red);
    }

    #[test]
    fn test_thresholds_are_ordered_for_every_height() {
        for height in 1..=128 {
            let geometry = RenderGeometry::new(1, height, 1).unwrap();
            let (green, yellow, orange) = geometry.thresholds();
            assert!(
                green <= yellow && yellow <= orange && orange < height,
                "thresholds out of order for height {}: {:?}",
                height,
                geometry.thresholds()
            );
        }
    }

    #[test]
    fn test_columns_tile_the_grid() {
        let geometry = RenderGeometry::new(32, 32, 8).unwrap();
        assert_eq!(geometry.columns(0), (0, 4));
        assert_eq!(geometry.columns(7), (28, 32));
    }

    #[test]
    fn test_rejects_unusable_layouts() {
        assert_eq!(
            RenderGeometry::new(32, 32, 0),
            Err(ConfigurationError::ZeroBars)
        );
        assert_eq!(
            RenderGeometry::new(32, 0, 8),
            Err(ConfigurationError::ZeroHeight)
        );
        assert_eq!(
            RenderGeometry::new(4, 32, 8),
            Err(ConfigurationError::MoreBarsThanColumns {
                num_bars: 8,
                grid_width: 4
            })
        );
        assert_eq!(
            RenderGeometry::new(30, 32, 8),
            Err(ConfigurationError::UnevenBarWidth {
                num_bars: 8,
                grid_width: 30
            })
        );
    }
}
