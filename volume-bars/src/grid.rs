use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

/// Heap-backed RGB framebuffer, useful for headless rendering and tests.
///
/// Writes outside the grid are dropped and counted.
pub struct MemoryGrid {
    size: Size,
    pixels: Vec<Rgb888>,
    out_of_bounds_writes: usize,
}

impl MemoryGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb888::BLACK; (width * height) as usize],
            out_of_bounds_writes: 0,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.index(x as i32, y as i32).map(|i| self.pixels[i])
    }

    pub fn out_of_bounds_writes(&self) -> usize {
        self.out_of_bounds_writes
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }
}

impl OriginDimensions for MemoryGrid {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for MemoryGrid {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            match self.index(point.x, point.y) {
                Some(i) => self.pixels[i] = color,
                None => self.out_of_bounds_writes += 1,
            }
        }
        Ok(())
    }
}
