//! Command-line argument parsing.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use volume_bars::config::{DEFAULT_PORT, FALLING_STEP};
use volume_bars::VisualizerConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "volume-bars-simulator")]
#[command(about = "Falling-bar volume visualizer fed by a TCP level server", long_about = None)]
pub struct Args {
    /// Address of the level server
    #[arg(long, value_name = "IP", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port of the level server
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of bars (default: one per two columns)
    #[arg(long, value_name = "COUNT")]
    pub bars: Option<usize>,

    /// Pixels a bar drops per frame when the level falls
    #[arg(long, value_name = "PIXELS", default_value_t = FALLING_STEP)]
    pub falling_step: u16,

    /// Pause between frames
    #[arg(long, value_name = "MS", default_value = "5")]
    pub delay_ms: u64,

    /// Grid width in pixels
    #[arg(long, default_value = "32")]
    pub width: u32,

    /// Grid height in pixels
    #[arg(long, default_value = "32")]
    pub height: u32,

    /// On-screen size of one grid pixel
    #[arg(long, default_value = "10")]
    pub scale: u32,

    /// Serve synthetic levels from a built-in server on the same port
    #[arg(long)]
    pub demo: bool,
}

impl Args {
    pub fn peer(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn visualizer_config(&self) -> VisualizerConfig {
        VisualizerConfig {
            num_bars: self.bars,
            falling_step: self.falling_step,
            frame_delay: Duration::from_millis(self.delay_ms),
            peer: self.peer(),
            ..VisualizerConfig::default()
        }
    }
}
