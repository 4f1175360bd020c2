use crate::error::{Result, RleError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{ErrorKind, Read, Write};

/// Serialized length of the header in bytes.
pub const HEADER_LEN: u64 = 8;

/// Metadata record at the start of every archive. There is no magic number
/// and no version field: the header is just the uncompressed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
	pub original_size: u64,
}

impl ArchiveHeader {
	pub fn new(original_size: u64) -> Self {
		Self { original_size }
	}

	pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
		writer.write_u64::<LittleEndian>(self.original_size)?;
		Ok(())
	}

	pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
		match reader.read_u64::<LittleEndian>() {
			Ok(original_size) => Ok(Self { original_size }),
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
				Err(RleError::Format(format!("Truncated header: expected {} bytes", HEADER_LEN)))
			}
			Err(e) => Err(e.into()),
		}
	}
}

pub fn write_header<W: Write>(writer: &mut W, size: u64) -> Result<()> {
	ArchiveHeader::new(size).write(writer)
}

pub fn read_header<R: Read>(reader: &mut R) -> Result<u64> {
	ArchiveHeader::read(reader).map(|h| h.original_size)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn header_is_eight_little_endian_bytes() {
		let mut out = Vec::new();
		write_header(&mut out, 0x0102_0304_0506_0708).unwrap();
		assert_eq!(out, vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
		assert_eq!(out.len() as u64, HEADER_LEN);
	}

	#[test]
	fn reads_back_written_size() {
		let mut out = Vec::new();
		write_header(&mut out, u64::MAX).unwrap();
		assert_eq!(read_header(&mut Cursor::new(out)).unwrap(), u64::MAX);
	}

	#[test]
	fn truncated_header_is_format_error() {
		for len in 0..HEADER_LEN as usize {
			let mut src = Cursor::new(vec![0xAA; len]);
			assert!(matches!(read_header(&mut src), Err(RleError::Format(_))), "len {}", len);
		}
	}

	#[test]
	fn leaves_body_unread() {
		let mut data = Vec::new();
		write_header(&mut data, 3).unwrap();
		data.extend_from_slice(b"abc");
		let mut src = Cursor::new(data);
		assert_eq!(read_header(&mut src).unwrap(), 3);
		assert_eq!(src.position(), HEADER_LEN);
	}
}
