use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use log::{debug, info};

use crate::config::REQUEST_BYTE;
use crate::error::TransportError;

/// Something that hands out one sample buffer per request.
pub trait SampleSource {
    /// Requests a sample and reads it into `buffer`.
    ///
    /// Returns the number of bytes received. `Ok(0)` means no new data for
    /// this tick.
    fn fetch(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn fetch(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        (**self).fetch(buffer)
    }
}

/// TCP client for the level server. The connection closes on drop.
pub struct TcpSampleClient {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpSampleClient {
    pub fn connect(peer: SocketAddr) -> Result<Self, TransportError> {
        let connect_err = |source: io::Error| TransportError::Connect { peer, source };
        let stream = TcpStream::connect(peer).map_err(connect_err)?;
        stream.set_nodelay(true).map_err(connect_err)?;
        info!("Connected to level server at {}", peer);
        Ok(Self { stream, peer })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl SampleSource for TcpSampleClient {
    fn fetch(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        self.stream
            .write_all(&[REQUEST_BYTE])
            .map_err(TransportError::Send)?;

        match self.stream.read(buffer) {
            Ok(received) => Ok(received),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(0),
            Err(err) => Err(TransportError::Receive(err)),
        }
    }
}

impl Drop for TcpSampleClient {
    fn drop(&mut self) {
        // The peer may already be gone.
        let _ = self.stream.shutdown(Shutdown::Both);
        debug!("Closed connection to {}", self.peer);
    }
}
