//! Run-length encoder.
//!
//! Identical adjacent bytes are written twice as literals; the following body
//! byte then counts how many more copies were absorbed (at most 255). Any other
//! byte is written as-is.

use crate::config::RleMode;
use crate::error::Result;
use crate::state::ScanState;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{ErrorKind, Read, Write};

/// Largest repeat count a single run token can carry.
pub const MAX_RUN_COUNT: u8 = u8::MAX;

/// Totals reported once the source has been consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub bytes_read: u64,
    pub body_len: u64,
    pub literals: u64,
    pub run_counts: u64,
}

#[derive(Debug)]
pub struct RunLengthEncoder {
    prev: u8,
    state: ScanState,
    run_count: u8,
    mode: RleMode,
    summary: EncodeSummary,
}

impl RunLengthEncoder {
    pub fn new(mode: RleMode) -> Self {
        Self {
            prev: 0,
            state: ScanState::ExpectLiteral,
            run_count: 0,
            mode,
            summary: EncodeSummary::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed one source byte, writing whatever tokens it produces.
    pub fn push<W: Write>(&mut self, curr: u8, writer: &mut W) -> Result<()> {
        self.summary.bytes_read += 1;
        match self.state {
            ScanState::ExpectRunCount => {
                if curr == self.prev && self.run_count < MAX_RUN_COUNT {
                    self.run_count += 1;
                } else {
                    self.emit_run_count(writer)?;
                    self.emit_literal(curr, writer)?;
                    self.run_count = 0;
                    self.state = ScanState::ExpectLiteral;
                }
            }
            ScanState::ExpectLiteral => {
                self.emit_literal(curr, writer)?;
                self.state = ScanState::after_literal(curr == self.prev);
            }
        }
        self.prev = curr;
        Ok(())
    }

    /// Flush the pending run count at end of input.
    ///
    /// A pair with no further repeats is only closed in strict mode; legacy
    /// archives leave it open.
    pub fn finish<W: Write>(mut self, writer: &mut W) -> Result<EncodeSummary> {
        let close_pair = self.state.is_pair_open() && self.mode == RleMode::Strict;
        if self.run_count > 0 || close_pair {
            self.emit_run_count(writer)?;
        } else if self.state.is_pair_open() {
            log::debug!("leaving trailing pair 0x{:02x} open (legacy framing)", self.prev);
        }
        Ok(self.summary)
    }

    fn emit_literal<W: Write>(&mut self, byte: u8, writer: &mut W) -> Result<()> {
        writer.write_u8(byte)?;
        self.summary.literals += 1;
        self.summary.body_len += 1;
        Ok(())
    }

    fn emit_run_count<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.run_count)?;
        self.summary.run_counts += 1;
        self.summary.body_len += 1;
        Ok(())
    }
}

/// Encode every byte of `reader` into a token body on `writer`.
pub fn encode_body<R: Read, W: Write>(reader: &mut R, writer: &mut W, mode: RleMode) -> Result<EncodeSummary> {
    let mut encoder = RunLengthEncoder::new(mode);
    loop {
        match reader.read_u8() {
            Ok(byte) => encoder.push(byte, writer)?,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
    }
    encoder.finish(writer)
}

/// Encode an in-memory slice into a token body.
pub fn encode(data: &[u8], mode: RleMode) -> Result<Vec<u8>> {
    let mut body = Vec::with_capacity(data.len());
    let mut encoder = RunLengthEncoder::new(mode);
    for &byte in data {
        encoder.push(byte, &mut body)?;
    }
    encoder.finish(&mut body)?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty() {
        assert!(encode(&[], RleMode::Strict).unwrap().is_empty());
        assert!(encode(&[], RleMode::Legacy).unwrap().is_empty());
    }

    #[test]
    fn test_no_repeats_is_unchanged() {
        let data = vec![1, 2, 3, 2, 1, 0xFF];
        assert_eq!(encode(&data, RleMode::Strict).unwrap(), data);
    }

    #[test]
    fn test_short_run() {
        // two literals, then two absorbed repeats
        let body = encode(&[7, 7, 7, 7, 9], RleMode::Strict).unwrap();
        assert_eq!(body, vec![7, 7, 2, 9]);
    }

    #[test]
    fn test_pair_followed_by_other_byte() {
        let body = encode(&[7, 7, 9], RleMode::Legacy).unwrap();
        assert_eq!(body, vec![7, 7, 0, 9]);
    }

    #[test]
    fn test_saturated_run() {
        let body = encode(&[0x5A; 300], RleMode::Strict).unwrap();
        assert_eq!(body, vec![0x5A, 0x5A, 255, 0x5A, 0x5A, 41]);
    }

    #[test]
    fn test_exactly_257_fills_one_group() {
        let body = encode(&[3; 257], RleMode::Legacy).unwrap();
        assert_eq!(body, vec![3, 3, 255]);
    }

    #[test]
    fn test_dangling_pair_framing() {
        assert_eq!(encode(&[0x41, 0x41], RleMode::Legacy).unwrap(), vec![0x41, 0x41]);
        assert_eq!(encode(&[0x41, 0x41], RleMode::Strict).unwrap(), vec![0x41, 0x41, 0]);
    }

    #[test]
    fn test_leading_zero_pairs_with_initial_prev() {
        // prev starts at zero, so a leading zero byte opens a pair
        assert_eq!(encode(&[0, 5], RleMode::Strict).unwrap(), vec![0, 0, 5]);
        assert_eq!(encode(&[0], RleMode::Strict).unwrap(), vec![0, 0]);
        assert_eq!(encode(&[0], RleMode::Legacy).unwrap(), vec![0]);
    }

    #[test]
    fn test_state_tracks_pairs() {
        let mut enc = RunLengthEncoder::new(RleMode::Strict);
        let mut out = Vec::new();
        enc.push(4, &mut out).unwrap();
        assert_eq!(enc.state(), ScanState::ExpectLiteral);
        enc.push(4, &mut out).unwrap();
        assert_eq!(enc.state(), ScanState::ExpectRunCount);
        enc.push(4, &mut out).unwrap();
        assert_eq!(enc.state(), ScanState::ExpectRunCount);
        assert_eq!(out, vec![4, 4]);
        enc.push(5, &mut out).unwrap();
        assert_eq!(enc.state(), ScanState::ExpectLiteral);
        assert_eq!(out, vec![4, 4, 1, 5]);
    }

    #[test]
    fn test_stream_summary() {
        let data = vec![1, 1, 1, 1, 2, 3, 3];
        let mut body = Vec::new();
        let summary = encode_body(&mut Cursor::new(&data), &mut body, RleMode::Strict).unwrap();
        assert_eq!(body, vec![1, 1, 2, 2, 3, 3, 0]);
        assert_eq!(summary.bytes_read, 7);
        assert_eq!(summary.body_len, 7);
        assert_eq!(summary.literals, 5);
        assert_eq!(summary.run_counts, 2);
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<u8> = (0..2000u32).map(|i| ((i / 7) % 5) as u8).collect();
        assert_eq!(encode(&data, RleMode::Strict).unwrap(), encode(&data, RleMode::Strict).unwrap());
    }
}
