use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

use crate::band_palette::BLACK;
use crate::geometry::RenderGeometry;

/// An addressable RGB pixel grid with its origin in the top-left corner.
///
/// Every `embedded-graphics` draw target with a fixed size is a pixel grid,
/// so the simulator window and LED matrix framebuffers work unchanged.
pub trait PixelGrid {
    type Error;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) -> Result<(), Self::Error>;
}

impl<D> PixelGrid for D
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    type Error = D::Error;

    fn width(&self) -> u32 {
        self.size().width
    }

    fn height(&self) -> u32 {
        self.size().height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) -> Result<(), D::Error> {
        Pixel(Point::new(x as i32, y as i32), color).draw(self)
    }
}

/// Paints bars as colored columns growing up from the bottom of the grid.
pub struct BandRenderer {
    geometry: RenderGeometry,
}

impl BandRenderer {
    pub fn new(geometry: RenderGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &RenderGeometry {
        &self.geometry
    }

    /// Draws every bar of the geometry.
    pub fn draw<G: PixelGrid>(&self, grid: &mut G, heights: &[u16]) -> Result<(), G::Error> {
        for bar in 0..self.geometry.num_bars() {
            self.draw_bar(grid, bar, heights)?;
        }
        Ok(())
    }

    /// Draws one full column: banded colors up to the bar height, black above.
    ///
    /// Heights taller than the grid are clamped to it. A bar with no entry in
    /// `heights` is drawn empty.
    pub fn draw_bar<G: PixelGrid>(
        &self,
        grid: &mut G,
        bar: usize,
        heights: &[u16],
    ) -> Result<(), G::Error> {
        let grid_height = self.geometry.grid_height();
        let height = heights
            .get(bar)
            .map_or(0, |&h| u32::from(h))
            .min(grid_height);

        for y in 0..grid_height {
            let color = if y < height {
                self.geometry.band_for_row(y).color()
            } else {
                BLACK
            };
            self.draw_bar_row(grid, bar, y, color)?;
        }
        Ok(())
    }

    // Bar row 0 is the bottom grid row.
    fn draw_bar_row<G: PixelGrid>(
        &self,
        grid: &mut G,
        bar: usize,
        y: u32,
        color: Rgb888,
    ) -> Result<(), G::Error> {
        let grid_y = self.geometry.grid_height() - 1 - y;
        let (x_start, x_end) = self.geometry.columns(bar);
        for x in x_start..x_end {
            grid.set_pixel(x, grid_y, color)?;
        }
        Ok(())
    }
}
