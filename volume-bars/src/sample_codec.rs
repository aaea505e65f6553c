//! Text wire format of the level server.
//!
//! A sample buffer is a run of ASCII decimal levels, each followed by a
//! space. Levels below 10 get a second space so every entry fills the same
//! number of bytes, and the whole buffer is padded with spaces to
//! `element_count * multiplier` bytes.

use crate::error::DecodeError;

const SEPARATOR: u8 = b' ';

/// Parses up to `max_values` levels from `buffer`.
///
/// Only a space ends a level; repeated spaces produce a single entry and
/// any other non-digit byte is ignored. A level that is not followed by a
/// space before the buffer ends is dropped.
pub fn decode_levels(buffer: &[u8], max_values: usize) -> Result<Vec<u16>, DecodeError> {
    let mut levels = Vec::with_capacity(max_values);
    if max_values == 0 {
        return Ok(levels);
    }

    let mut accumulator: u16 = 0;
    let mut after_space = false;

    for &byte in buffer {
        match byte {
            SEPARATOR => {
                if after_space {
                    continue;
                }
                levels.push(accumulator);
                accumulator = 0;
                after_space = true;
                if levels.len() >= max_values {
                    break;
                }
            }
            b'0'..=b'9' => {
                accumulator = accumulator
                    .checked_mul(10)
                    .and_then(|value| value.checked_add(u16::from(byte - b'0')))
                    .ok_or(DecodeError::LevelOverflow {
                        index: levels.len(),
                    })?;
                after_space = false;
            }
            _ => {}
        }
    }

    Ok(levels)
}

/// Writes `levels` in the fixed-width layout the decoder expects.
///
/// The output is always exactly `element_count * multiplier` bytes: short
/// inputs are padded with spaces, long ones are cut off.
pub fn encode_levels(levels: &[u16], element_count: usize, multiplier: usize) -> Vec<u8> {
    let capacity = element_count * multiplier;
    let mut buffer = Vec::with_capacity(capacity);

    for level in levels.iter().take(element_count) {
        buffer.extend_from_slice(level.to_string().as_bytes());
        buffer.push(SEPARATOR);
        if *level < 10 {
            buffer.push(SEPARATOR);
        }
    }

    buffer.resize(capacity, SEPARATOR);
    buffer
}
