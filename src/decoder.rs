//! Run-length decoder.
//!
//! Mirrors the encoder's scan state so every body byte is read as the same kind
//! of token it was written as. Decoding stops once the declared size has been
//! produced; bytes after that point are never read.

use crate::config::RleMode;
use crate::encoder::MAX_RUN_COUNT;
use crate::error::{Result, RleError};
use crate::state::ScanState;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{ErrorKind, Read, Write};

#[derive(Debug)]
pub struct RunLengthDecoder {
    prev: u8,
    // Cleared after a run so the next literal cannot pair with the run byte.
    prev_valid: bool,
    state: ScanState,
    decoded: u64,
    consumed: u64,
    original_size: u64,
    mode: RleMode,
}

impl RunLengthDecoder {
    pub fn new(original_size: u64, mode: RleMode) -> Self {
        Self {
            prev: 0,
            prev_valid: true,
            state: ScanState::ExpectLiteral,
            decoded: 0,
            consumed: 0,
            original_size,
            mode,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Output bytes produced so far.
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// Body bytes read so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Whether the body has been fully read.
    ///
    /// In strict mode an open pair still owes its run count, even when the
    /// declared size has already been reached.
    pub fn is_complete(&self) -> bool {
        self.decoded >= self.original_size && (self.mode == RleMode::Legacy || !self.state.is_pair_open())
    }

    /// Interpret one body byte according to the current state.
    pub fn feed<W: Write>(&mut self, byte: u8, writer: &mut W) -> Result<()> {
        if self.is_complete() {
            return Err(RleError::CorruptArchive(format!(
                "body continues past the declared size of {} bytes",
                self.original_size
            )));
        }
        self.consumed += 1;
        match self.state {
            ScanState::ExpectRunCount => {
                let remaining = self.original_size - self.decoded;
                let mut count = u64::from(byte);
                if count > remaining {
                    match self.mode {
                        RleMode::Strict => {
                            return Err(RleError::CorruptArchive(format!(
                                "run of {} repeats at body offset {} overruns the declared size by {} bytes",
                                byte,
                                self.consumed - 1,
                                count - remaining
                            )));
                        }
                        RleMode::Legacy => {
                            log::warn!("clamping run of {} repeats to the {} bytes remaining", byte, remaining);
                            count = remaining;
                        }
                    }
                }
                let run = [self.prev; MAX_RUN_COUNT as usize];
                writer.write_all(&run[..count as usize])?;
                self.decoded += count;
                self.state = ScanState::ExpectLiteral;
                self.prev_valid = false;
            }
            ScanState::ExpectLiteral => {
                writer.write_u8(byte)?;
                self.decoded += 1;
                self.state = ScanState::after_literal(byte == self.prev && self.prev_valid);
                self.prev = byte;
                self.prev_valid = true;
            }
        }
        Ok(())
    }

    /// Settle the scan after the body ran out, returning body bytes consumed.
    pub fn finish_at_eof(self) -> Result<u64> {
        if self.is_complete() {
            return Ok(self.consumed);
        }
        if self.state.is_pair_open() {
            return Err(RleError::CorruptArchive(format!(
                "body ended after {} bytes while a run count was expected",
                self.consumed
            )));
        }
        match self.mode {
            RleMode::Strict => Err(RleError::CorruptArchive(format!(
                "body ended after producing {} of {} bytes",
                self.decoded, self.original_size
            ))),
            RleMode::Legacy => {
                log::warn!("short body: produced {} of {} bytes", self.decoded, self.original_size);
                Ok(self.consumed)
            }
        }
    }
}

/// Decode a token body from `reader` until `original_size` bytes have been
/// produced. Returns the number of body bytes consumed.
pub fn decode_body<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    original_size: u64,
    mode: RleMode,
) -> Result<u64> {
    let mut decoder = RunLengthDecoder::new(original_size, mode);
    while !decoder.is_complete() {
        match reader.read_u8() {
            Ok(byte) => decoder.feed(byte, writer)?,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return decoder.finish_at_eof(),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(decoder.consumed())
}

/// Decode an in-memory token body.
pub fn decode(body: &[u8], original_size: u64, mode: RleMode) -> Result<Vec<u8>> {
    let mut reader = body;
    let mut decoded = Vec::with_capacity(original_size.min(body.len() as u64 * 2) as usize);
    decode_body(&mut reader, &mut decoded, original_size, mode)?;
    Ok(decoded)
}
