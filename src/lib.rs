//! # rlepack
//!
//! A byte-oriented run-length archiver for arbitrary binary data.
//!
//! An archive is an 8-byte little-endian length header followed by a token
//! body. The body has no tags: two identical literals in a row mean the next
//! byte counts further repeats of that value, and every other byte is a
//! literal. Encoder and decoder track the same [`ScanState`] to agree on which
//! is which.
//!
//! Data without repeats is not made smaller, and may grow slightly.
//!
//! ## Quick Start
//!
//! ```rust
//! use rlepack::{compress_data, decompress_data, RleConfig};
//!
//! let original = b"aaaaaaaabbbbbbbbcd";
//! let config = RleConfig::default();
//! let archive = compress_data(original, &config).unwrap();
//! assert!(archive.len() < original.len() + 8);
//!
//! let restored = decompress_data(&archive, &config).unwrap();
//! assert_eq!(original.to_vec(), restored);
//! ```
//!
//! ### Working with Files
//!
//! ```rust,no_run
//! use rlepack::{pipeline, RleConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RleConfig::default();
//! let stats = pipeline::compress_file("input.bin", "input.rle", &config)?;
//! println!("Compression ratio: {:.2}x", stats.ratio);
//! pipeline::decompress_file("input.rle", "restored.bin", &config)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod state;

pub use config::{RleConfig, RleMode};
pub use decoder::{decode_body, RunLengthDecoder};
pub use encoder::{encode_body, EncodeSummary, RunLengthEncoder};
pub use error::{Result, RleError};
pub use header::{read_header, write_header, ArchiveHeader, HEADER_LEN};
pub use pipeline::{compress, decompress, ArchiveInfo, CompressionStats, DecompressionStats};
pub use state::ScanState;

use std::io::Cursor;

/// Build a complete archive (header and body) from an in-memory buffer.
///
/// # Example
///
/// ```rust
/// use rlepack::{compress_data, RleConfig};
///
/// let archive = compress_data(&[7u8; 100], &RleConfig::default()).unwrap();
/// assert_eq!(archive.len(), 8 + 3);
/// ```
pub fn compress_data(data: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(data);
    let mut output = Vec::with_capacity(HEADER_LEN as usize + data.len());

    pipeline::compress(&mut input, &mut output, data.len() as u64, config)?;
    Ok(output)
}

/// Restore the original bytes from an in-memory archive.
pub fn decompress_data(archive: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(archive);
    let mut output = Vec::new();

    pipeline::decompress(&mut input, &mut output, config)?;
    Ok(output)
}

/// Header and size information for an in-memory archive.
///
/// ```rust
/// use rlepack::{compress_data, get_archive_info, RleConfig};
///
/// let archive = compress_data(&vec![0u8; 1000], &RleConfig::default()).unwrap();
/// let info = get_archive_info(&archive).unwrap();
/// assert_eq!(info.original_size, 1000);
/// ```
pub fn get_archive_info(archive: &[u8]) -> Result<ArchiveInfo> {
    let mut input = Cursor::new(archive);
    pipeline::info(&mut input)
}

/// Check that an archive decodes cleanly without keeping the output.
pub fn validate_data(archive: &[u8], config: &RleConfig) -> Result<bool> {
    let mut input = Cursor::new(archive);
    pipeline::validate(&mut input, config)
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress_data() {
        let original = b"Hello, world!! Thiiiis is a test of the rlepack API.";
        let config = RleConfig::default();

        let compressed = compress_data(original, &config).unwrap();
        let decompressed = decompress_data(&compressed, &config).unwrap();
        assert_eq!(original.to_vec(), decompressed);
    }

    #[test]
    fn test_empty_data() {
        let config = RleConfig::default();
        let compressed = compress_data(b"", &config).unwrap();
        assert_eq!(compressed, vec![0u8; 8]);

        let decompressed = decompress_data(&compressed, &config).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn test_large_run() {
        let original = vec![42u8; 10000];
        let config = RleConfig::default();

        let compressed = compress_data(&original, &config).unwrap();
        assert!(compressed.len() < original.len() / 50);
        assert_eq!(decompress_data(&compressed, &config).unwrap(), original);
    }

    #[test]
    fn test_validation() {
        let config = RleConfig::default();
        let compressed = compress_data(b"zzzzzz", &config).unwrap();
        assert!(validate_data(&compressed, &config).unwrap());

        // drop the closing run count
        let truncated = &compressed[..compressed.len() - 1];
        assert!(matches!(validate_data(truncated, &config), Err(RleError::CorruptArchive(_))));
    }

    #[test]
    fn test_archive_info() {
        let compressed = compress_data(&[1u8; 1000], &RleConfig::default()).unwrap();
        let info = get_archive_info(&compressed).unwrap();
        assert_eq!(info.original_size, 1000);
        assert_eq!(info.archive_size, compressed.len() as u64);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
