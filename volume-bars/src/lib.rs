//! Falling-bar volume visualizer for addressable RGB pixel grids.
//!
//! Levels arrive as space-separated ASCII decimals from a TCP level server,
//! drive one bar each, and are drawn as four-band colored columns.

pub mod band_palette;
pub mod config;
pub mod error;
pub mod falling_bar_animator;
pub mod geometry;
pub mod grid;
pub mod renderer;
pub mod sample_codec;
pub mod transport;
pub mod volume_bars;

pub use config::VisualizerConfig;
pub use error::{ConfigurationError, DecodeError, Error, TransportError};
pub use falling_bar_animator::FallingBarAnimator;
pub use geometry::RenderGeometry;
pub use grid::MemoryGrid;
pub use renderer::{BandRenderer, PixelGrid};
pub use sample_codec::{decode_levels, encode_levels};
pub use transport::{SampleSource, TcpSampleClient};
pub use volume_bars::{CancelToken, FrameOutcome, VolumeBars};
