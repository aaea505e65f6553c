use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, info, trace, warn};

use crate::config::VisualizerConfig;
use crate::error::{ConfigurationError, Error};
use crate::falling_bar_animator::FallingBarAnimator;
use crate::geometry::RenderGeometry;
use crate::renderer::{BandRenderer, PixelGrid};
use crate::sample_codec::decode_levels;
use crate::transport::SampleSource;

const LOG_INTERVAL_FRAMES: u8 = 200;

/// Shared stop flag, checked by [`VolumeBars::run`] once per frame.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What a single frame step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// The source had no new data; heights and pixels were left as they were.
    Skipped,
}

/// Fetch, decode, animate and draw loop for one grid.
pub struct VolumeBars {
    config: VisualizerConfig,
    animator: FallingBarAnimator,
    renderer: BandRenderer,
    /// Latest level per element; entries past a short sample keep their old value.
    levels: Vec<u16>,
    sample_buffer: Vec<u8>,
    frame_counter: u32,
    log_counter: u8,
}

impl VolumeBars {
    pub fn new(
        config: VisualizerConfig,
        grid_width: u32,
        grid_height: u32,
    ) -> Result<Self, ConfigurationError> {
        let geometry = config.validate(grid_width, grid_height)?;
        info!(
            "VolumeBars::new called with grid: {}x{}, bars: {}, bar_width: {}",
            grid_width,
            grid_height,
            geometry.num_bars(),
            geometry.bar_width()
        );

        let animator = FallingBarAnimator::new(geometry.num_bars(), geometry.max_bar_height())?;
        let renderer = BandRenderer::new(geometry);

        Ok(Self {
            levels: vec![0; config.element_count],
            sample_buffer: vec![0; config.sample_buffer_len()],
            config,
            animator,
            renderer,
            frame_counter: 0,
            log_counter: 0,
        })
    }

    /// Builds a visualizer sized for `grid`.
    pub fn for_grid<G: PixelGrid>(
        config: VisualizerConfig,
        grid: &G,
    ) -> Result<Self, ConfigurationError> {
        Self::new(config, grid.width(), grid.height())
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn geometry(&self) -> &RenderGeometry {
        self.renderer.geometry()
    }

    pub fn levels(&self) -> &[u16] {
        &self.levels
    }

    pub fn heights(&self) -> &[u16] {
        self.animator.get_current_heights()
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_counter
    }

    /// Runs one frame without sleeping: fetch, decode, tick, draw.
    ///
    /// A zero-byte fetch skips the frame. Decode failures leave the animation
    /// untouched and are returned to the caller.
    pub fn step<S, G>(
        &mut self,
        source: &mut S,
        grid: &mut G,
    ) -> Result<FrameOutcome, Error<G::Error>>
    where
        S: SampleSource,
        G: PixelGrid,
    {
        let received = source.fetch(&mut self.sample_buffer)?;
        if received == 0 {
            return Ok(FrameOutcome::Skipped);
        }

        let decoded = decode_levels(&self.sample_buffer[..received], self.config.element_count)?;
        self.levels[..decoded.len()].copy_from_slice(&decoded);

        self.render_levels(grid).map_err(Error::Draw)?;
        Ok(FrameOutcome::Rendered)
    }

    /// Advances the animation with the current levels and draws the result.
    pub fn render_levels<G: PixelGrid>(&mut self, grid: &mut G) -> Result<(), G::Error> {
        let heights = self.animator.tick(&self.levels, self.config.falling_step);
        self.renderer.draw(grid, heights)?;

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.log_counter = self.log_counter.wrapping_add(1);
        if self.log_counter >= LOG_INTERVAL_FRAMES {
            debug!(
                "Frame {}: heights {:?}",
                self.frame_counter,
                self.animator.get_current_heights()
            );
            self.log_counter = 0;
        }
        Ok(())
    }

    /// Steps, calls `on_frame`, then sleeps, until `cancel` is set.
    ///
    /// Cancellation is only seen between frames. Malformed samples are logged
    /// and dropped; transport and grid errors end the run.
    pub fn run<S, G, F>(
        &mut self,
        source: &mut S,
        grid: &mut G,
        cancel: &CancelToken,
        mut on_frame: F,
    ) -> Result<(), Error<G::Error>>
    where
        S: SampleSource,
        G: PixelGrid,
        F: FnMut(&mut G),
    {
        while !cancel.is_cancelled() {
            match self.step(source, grid) {
                Ok(FrameOutcome::Rendered) => {}
                Ok(FrameOutcome::Skipped) => trace!("No sample data, frame skipped"),
                Err(Error::Decode(err)) => warn!("Dropping malformed sample: {}", err),
                Err(err) => return Err(err),
            }
            on_frame(grid);
            thread::sleep(self.config.frame_delay);
        }
        info!("Stopped after {} frames", self.frame_counter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band_palette::{BLACK, BLUE, VIOLET};
    use crate::error::TransportError;
    use crate::grid::MemoryGrid;
    use core::time::Duration;
    use std::collections::VecDeque;
    use std::io;

    /// Replays canned fetch results, then reports no data.
    struct ScriptedSource {
        replies: VecDeque<Result<Vec<u8>, io::ErrorKind>>,
        fetches: usize,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<Vec<u8>, io::ErrorKind>>) -> Self {
            Self {
                replies: replies.into(),
                fetches: 0,
            }
        }
    }

    impl SampleSource for ScriptedSource {
        fn fetch(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
            self.fetches += 1;
            match self.replies.pop_front() {
                Some(Ok(bytes)) => {
                    let n = bytes.len().min(buffer.len());
                    buffer[..n].copy_from_slice(&bytes[..n]);
                    Ok(n)
                }
                Some(Err(kind)) => Err(TransportError::Receive(kind.into())),
                None => Ok(0),
            }
        }
    }

    fn four_bar_config() -> VisualizerConfig {
        VisualizerConfig {
            num_bars: Some(4),
            frame_delay: Duration::ZERO,
            ..VisualizerConfig::default()
        }
    }

    #[test]
    fn test_end_to_end_rise_then_hold() {
        let sample = b"5 10 0 3 ".to_vec();
        let mut source = ScriptedSource::new(vec![Ok(sample.clone()), Ok(sample)]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        assert_eq!(bars.step(&mut source, &mut grid).unwrap(), FrameOutcome::Rendered);
        assert_eq!(&bars.levels()[..4], &[5, 10, 0, 3]);
        assert_eq!(bars.heights(), &[5, 10, 0, 3], "First tick: all rises");

        assert_eq!(bars.step(&mut source, &mut grid).unwrap(), FrameOutcome::Rendered);
        assert_eq!(
            bars.heights(),
            &[5, 10, 0, 3],
            "Second tick: equal levels hold, they do not decay"
        );
        assert_eq!(bars.frame_count(), 2);

        // Bar 0 spans columns 0..2 and is 5 rows tall.
        assert_eq!(grid.pixel(0, 11), Some(BLUE));
        assert_eq!(grid.pixel(1, 8), Some(BLUE));
        assert_eq!(grid.pixel(1, 7), Some(VIOLET));
        assert_eq!(grid.pixel(0, 6), Some(BLACK));
    }

    #[test]
    fn test_decay_after_levels_drop() {
        let mut source = ScriptedSource::new(vec![
            Ok(b"5 10 0 3 ".to_vec()),
            Ok(b"0 0 0 0 ".to_vec()),
            Ok(b"0 0 0 0 ".to_vec()),
        ]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        for _ in 0..3 {
            bars.step(&mut source, &mut grid).unwrap();
        }
        assert_eq!(bars.heights(), &[3, 8, 0, 1]);
    }

    #[test]
    fn test_zero_byte_fetch_freezes_frame() {
        let mut source = ScriptedSource::new(vec![Ok(b"4 4 4 4 ".to_vec()), Ok(Vec::new())]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        bars.step(&mut source, &mut grid).unwrap();
        assert_eq!(bars.step(&mut source, &mut grid).unwrap(), FrameOutcome::Skipped);
        assert_eq!(bars.heights(), &[4, 4, 4, 4], "Skipped frame must not decay");
        assert_eq!(bars.frame_count(), 1);
    }

    #[test]
    fn test_short_sample_keeps_older_levels() {
        let mut source =
            ScriptedSource::new(vec![Ok(b"6 6 6 6 ".to_vec()), Ok(b"9 ".to_vec())]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        bars.step(&mut source, &mut grid).unwrap();
        bars.step(&mut source, &mut grid).unwrap();
        assert_eq!(&bars.levels()[..4], &[9, 6, 6, 6]);
        assert_eq!(bars.heights(), &[9, 6, 6, 6]);
    }

    #[test]
    fn test_levels_above_grid_are_capped() {
        let mut source = ScriptedSource::new(vec![Ok(b"40 11 12 2 ".to_vec())]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        bars.step(&mut source, &mut grid).unwrap();
        assert_eq!(bars.heights(), &[11, 11, 11, 2]);
        assert_eq!(grid.out_of_bounds_writes(), 0);
    }

    #[test]
    fn test_decode_error_is_surfaced_without_ticking() {
        let mut source = ScriptedSource::new(vec![
            Ok(b"3 3 3 3 ".to_vec()),
            Ok(b"1 99999 1 1 ".to_vec()),
        ]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        bars.step(&mut source, &mut grid).unwrap();
        match bars.step(&mut source, &mut grid) {
            Err(Error::Decode(_)) => {}
            other => panic!("expected a decode error, got {:?}", other),
        }
        assert_eq!(bars.heights(), &[3, 3, 3, 3]);
        assert_eq!(&bars.levels()[..4], &[3, 3, 3, 3]);
    }

    #[test]
    fn test_run_stops_at_frame_boundary() {
        let mut source = ScriptedSource::new(vec![Ok(b"2 2 2 2 ".to_vec()); 10]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        let cancel = CancelToken::new();
        let stopper = cancel.clone();
        let mut frames = 0;
        bars.run(&mut source, &mut grid, &cancel, |_| {
            frames += 1;
            if frames == 3 {
                stopper.cancel();
            }
        })
        .unwrap();

        assert_eq!(frames, 3);
        assert_eq!(source.fetches, 3, "No fetch after cancellation");
        assert_eq!(bars.frame_count(), 3);
    }

    #[test]
    fn test_run_skips_malformed_samples() {
        let mut source = ScriptedSource::new(vec![
            Ok(b"70000 ".to_vec()),
            Ok(b"4 4 4 4 ".to_vec()),
        ]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        let cancel = CancelToken::new();
        let stopper = cancel.clone();
        let mut frames = 0;
        bars.run(&mut source, &mut grid, &cancel, |_| {
            frames += 1;
            if frames == 2 {
                stopper.cancel();
            }
        })
        .unwrap();

        assert_eq!(bars.heights(), &[4, 4, 4, 4]);
        assert_eq!(bars.frame_count(), 1);
    }

    #[test]
    fn test_run_returns_transport_error() {
        let mut source = ScriptedSource::new(vec![
            Ok(b"1 1 1 1 ".to_vec()),
            Err(io::ErrorKind::ConnectionReset),
        ]);
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        let result = bars.run(&mut source, &mut grid, &CancelToken::new(), |_| {});
        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Receive(_)))
        ));
        assert_eq!(bars.frame_count(), 1);
    }

    #[test]
    fn test_run_returns_immediately_when_already_cancelled() {
        let mut source = ScriptedSource::new(Vec::new());
        let mut grid = MemoryGrid::new(8, 12);
        let mut bars = VolumeBars::for_grid(four_bar_config(), &grid).unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        bars.run(&mut source, &mut grid, &cancel, |_| panic!("no frame expected"))
            .unwrap();
        assert_eq!(source.fetches, 0);
    }

    #[test]
    fn test_configuration_errors_fail_fast() {
        let grid = MemoryGrid::new(30, 12);
        let config = VisualizerConfig {
            num_bars: Some(4),
            ..VisualizerConfig::default()
        };
        assert!(matches!(
            VolumeBars::for_grid(config, &grid),
            Err(ConfigurationError::UnevenBarWidth { .. })
        ));
    }
}
