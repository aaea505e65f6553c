//! Desktop window for the volume-bars visualizer.

mod cli;
mod demo_listener;

use anyhow::{Context, Result};
use clap::Parser;
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{info, warn};
use volume_bars::{CancelToken, TcpSampleClient, VolumeBars};

use cli::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.visualizer_config();

    let mut display: SimulatorDisplay<Rgb888> =
        SimulatorDisplay::new(Size::new(args.width, args.height));
    let mut visualizer =
        VolumeBars::for_grid(config.clone(), &display).context("invalid visualizer settings")?;
    info!(
        "Size: {}x{}, {} bars",
        args.width,
        args.height,
        visualizer.geometry().num_bars()
    );

    let demo_server = if args.demo {
        let max_level = args.height.min(u16::MAX as u32) as u16;
        let server = demo_listener::spawn(
            config.peer,
            config.element_count,
            config.multiplier,
            max_level,
        )
        .context("could not start demo level server")?;
        Some(server)
    } else {
        None
    };

    let mut source = TcpSampleClient::connect(config.peer)?;

    let mut window = Window::new(
        "Volume Bars",
        &OutputSettingsBuilder::new().scale(args.scale).build(),
    );

    let cancel = CancelToken::new();
    let quit = cancel.clone();
    println!("Close the window to exit");

    visualizer.run(&mut source, &mut display, &cancel, |display| {
        window.update(display);
        if window
            .events()
            .any(|event| matches!(event, SimulatorEvent::Quit))
        {
            quit.cancel();
        }
    })?;

    drop(source);
    if let Some(server) = demo_server {
        if server.join().is_err() {
            warn!("Demo level server panicked");
        }
    }

    println!("Exiting.");
    Ok(())
}
