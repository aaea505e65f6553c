//! Built-in level server producing a travelling sine wave.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

use log::{info, warn};
use volume_bars::encode_levels;

const TIME_STEP: f32 = 0.05;
// Keeps every level inside its fixed-width slot on the wire.
const MAX_WIRE_LEVEL: u16 = 99;

/// Wave height in `0.0..=1.0` at position `x` (in wavelengths) and `time`.
pub fn calculate_amplitude(x: f32, time: f32, frequency: f32) -> f32 {
    let phase = time + x * frequency * 2.0 * core::f32::consts::PI;
    phase.sin() * 0.5 + 0.5
}

/// One frame of levels scaled to `0..=max_level`.
pub fn synthetic_levels(element_count: usize, time: f32, max_level: u16) -> Vec<u16> {
    let max_level = max_level.min(MAX_WIRE_LEVEL);
    (0..element_count)
        .map(|i| {
            let x = i as f32 / element_count as f32;
            let amplitude = calculate_amplitude(x, time, 1.0);
            (amplitude * max_level as f32).round().clamp(0.0, max_level as f32) as u16
        })
        .collect()
}

/// Binds `addr` now and answers one client from a background thread.
pub fn spawn(
    addr: SocketAddr,
    element_count: usize,
    multiplier: usize,
    max_level: u16,
) -> io::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr)?;
    info!("Demo level server listening on {}", listener.local_addr()?);

    Ok(thread::spawn(move || {
        if let Err(err) = serve(listener, element_count, multiplier, max_level) {
            warn!("Demo level server stopped: {}", err);
        }
    }))
}

fn serve(
    listener: TcpListener,
    element_count: usize,
    multiplier: usize,
    max_level: u16,
) -> io::Result<()> {
    let (mut conn, peer) = listener.accept()?;
    info!("Demo level server accepted {}", peer);

    let mut request = [0u8; 1];
    let mut time = 0.0f32;
    loop {
        if conn.read(&mut request)? == 0 {
            info!("Client {} disconnected", peer);
            return Ok(());
        }
        let levels = synthetic_levels(element_count, time, max_level);
        conn.write_all(&encode_levels(&levels, element_count, multiplier))?;
        time += TIME_STEP;
    }
}
