use crate::config::RleConfig;
use crate::decoder::decode_body;
use crate::encoder::encode_body;
use crate::error::{Result, RleError};
use crate::header::{ArchiveHeader, HEADER_LEN};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CompressionStats {
	pub original_size: u64,
	pub compressed_size: u64,
	pub ratio: f64,
	pub literals: u64,
	pub run_counts: u64,
	pub processing_time: Duration,
}

#[derive(Debug)]
pub struct DecompressionStats {
	pub original_size: u64,
	pub bytes_consumed: u64,
	pub processing_time: Duration,
}

/// Summary of an archive read without decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveInfo {
	pub original_size: u64,
	pub body_size: u64,
	pub archive_size: u64,
	pub compression_ratio: f64,
}

fn ratio(original_size: u64, compressed_size: u64) -> f64 {
	if compressed_size > 0 { original_size as f64 / compressed_size as f64 } else { 0.0 }
}

/// Write an archive for `reader`, whose length must be known up front.
///
/// Fails with [`RleError::SizeMismatch`] if the reader yields a different
/// number of bytes; whatever was already written stays in `writer`.
pub fn compress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	original_size: u64,
	config: &RleConfig,
) -> Result<CompressionStats> {
	let start = Instant::now();
	ArchiveHeader::new(original_size).write(writer)?;
	let summary = encode_body(reader, writer, config.mode)?;
	writer.flush()?;

	if summary.bytes_read != original_size {
		return Err(RleError::SizeMismatch { declared: original_size, actual: summary.bytes_read });
	}

	let compressed_size = HEADER_LEN + summary.body_len;
	log::debug!(
		"encoded {} bytes into {} body bytes ({} literals, {} run counts, {} mode)",
		original_size, summary.body_len, summary.literals, summary.run_counts, config.mode
	);

	Ok(CompressionStats {
		original_size,
		compressed_size,
		ratio: ratio(original_size, compressed_size),
		literals: summary.literals,
		run_counts: summary.run_counts,
		processing_time: start.elapsed(),
	})
}

/// Restore the original bytes of an archive, returning how many body bytes
/// were read. Anything after the body is left in `reader`.
pub fn decompress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<u64> {
	decompress_with_stats(reader, writer, config).map(|stats| stats.bytes_consumed)
}

pub fn decompress_with_stats<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<DecompressionStats> {
	let start = Instant::now();
	let header = ArchiveHeader::read(reader)?;
	log::debug!("archive declares {} original bytes", header.original_size);

	let bytes_consumed = decode_body(reader, writer, header.original_size, config.mode)?;
	writer.flush()?;

	Ok(DecompressionStats {
		original_size: header.original_size,
		bytes_consumed,
		processing_time: start.elapsed(),
	})
}

/// Compress one file into another, taking the header size from the input's
/// metadata.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
	input: P,
	output: Q,
	config: &RleConfig,
) -> Result<CompressionStats> {
	let in_file = File::open(input.as_ref())?;
	let original_size = in_file.metadata()?.len();
	let mut reader = BufReader::with_capacity(config.buffer_size, in_file);
	let mut writer = BufWriter::with_capacity(config.buffer_size, File::create(output.as_ref())?);

	log::info!("compressing {} ({} bytes)", input.as_ref().display(), original_size);
	compress(&mut reader, &mut writer, original_size, config)
}

pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
	input: P,
	output: Q,
	config: &RleConfig,
) -> Result<DecompressionStats> {
	let mut reader = BufReader::with_capacity(config.buffer_size, File::open(input.as_ref())?);
	let mut writer = BufWriter::with_capacity(config.buffer_size, File::create(output.as_ref())?);

	log::info!("decompressing {}", input.as_ref().display());
	decompress_with_stats(&mut reader, &mut writer, config)
}

/// Read the header and measure the body without decoding it.
pub fn info<R: Read>(reader: &mut R) -> Result<ArchiveInfo> {
	let header = ArchiveHeader::read(reader)?;
	let body_size = io::copy(reader, &mut io::sink())?;
	let archive_size = HEADER_LEN + body_size;

	Ok(ArchiveInfo {
		original_size: header.original_size,
		body_size,
		archive_size,
		compression_ratio: ratio(header.original_size, archive_size),
	})
}

/// Decode into a sink, discarding the output. Returns `Ok(true)` when the
/// archive is structurally sound.
pub fn validate<R: Read>(reader: &mut R, config: &RleConfig) -> Result<bool> {
	let stats = decompress_with_stats(reader, &mut io::sink(), config)?;
	log::debug!("validated {} body bytes", stats.bytes_consumed);
	Ok(true)
}
