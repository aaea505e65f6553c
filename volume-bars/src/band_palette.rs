use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

pub const BLUE: Rgb888 = Rgb888::new(0, 0, 255);
pub const VIOLET: Rgb888 = Rgb888::new(153, 51, 255);
pub const MAGENTA: Rgb888 = Rgb888::new(255, 0, 255);
pub const DARK_RED: Rgb888 = Rgb888::new(200, 0, 0);
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Height band of a lit bar row, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Band {
    pub fn color(self) -> Rgb888 {
        match self {
            Band::Green => BLUE,
            Band::Yellow => VIOLET,
            Band::Orange => MAGENTA,
            Band::Red => DARK_RED,
        }
    }
}
