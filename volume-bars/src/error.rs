use core::fmt;
use std::error::Error as StdError;
use std::io;
use std::net::SocketAddr;

/// Failure talking to the level server. Ends the animation session.
#[derive(Debug)]
pub enum TransportError {
    Connect { peer: SocketAddr, source: io::Error },
    Send(io::Error),
    Receive(io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connect { peer, .. } => {
                write!(f, "could not connect to level server at {}", peer)
            }
            TransportError::Send(_) => f.write_str("could not send sample request"),
            TransportError::Receive(_) => f.write_str("could not read sample buffer"),
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::Connect { source, .. } => Some(source),
            TransportError::Send(source) | TransportError::Receive(source) => Some(source),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The digit run for the level at `index` does not fit in a `u16`.
    LevelOverflow { index: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::LevelOverflow { index } => {
                write!(f, "level {} exceeds {}", index, u16::MAX)
            }
        }
    }
}

impl StdError for DecodeError {}

/// Setup values that would leave the visualizer unusable or ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    ZeroBars,
    ZeroHeight,
    MoreBarsThanColumns { num_bars: usize, grid_width: u32 },
    UnevenBarWidth { num_bars: usize, grid_width: u32 },
    MoreBarsThanLevels { num_bars: usize, element_count: usize },
    ZeroFallingStep,
    EmptySampleBuffer,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigurationError::ZeroBars => f.write_str("bar count must be at least 1"),
            ConfigurationError::ZeroHeight => f.write_str("grid height must be at least 1"),
            ConfigurationError::MoreBarsThanColumns {
                num_bars,
                grid_width,
            } => write!(
                f,
                "{} bars do not fit on a grid {} pixels wide",
                num_bars, grid_width
            ),
            ConfigurationError::UnevenBarWidth {
                num_bars,
                grid_width,
            } => write!(
                f,
                "grid width {} is not divisible by {} bars",
                grid_width, num_bars
            ),
            ConfigurationError::MoreBarsThanLevels {
                num_bars,
                element_count,
            } => write!(
                f,
                "{} bars requested but a sample only carries {} levels",
                num_bars, element_count
            ),
            ConfigurationError::ZeroFallingStep => f.write_str("falling step must be positive"),
            ConfigurationError::EmptySampleBuffer => {
                f.write_str("element count and multiplier must both be positive")
            }
        }
    }
}

impl StdError for ConfigurationError {}

/// Everything that can stop a frame. `E` is the pixel grid's own error type.
#[derive(Debug)]
pub enum Error<E> {
    Transport(TransportError),
    Decode(DecodeError),
    Draw(E),
}

impl<E> From<TransportError> for Error<E> {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}

impl<E> From<DecodeError> for Error<E> {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "transport error: {}", err),
            Error::Decode(err) => write!(f, "decode error: {}", err),
            Error::Draw(err) => write!(f, "pixel grid error: {:?}", err),
        }
    }
}

impl<E: fmt::Debug> StdError for Error<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Draw(_) => None,
        }
    }
}
