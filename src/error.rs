use thiserror::Error;

#[derive(Error, Debug)]
pub enum RleError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid archive format: {0}")]
	Format(String),

	#[error("Archive corrupted: {0}")]
	CorruptArchive(String),

	#[error("Source size mismatch: header declares {declared} bytes but {actual} were read")]
	SizeMismatch { declared: u64, actual: u64 },

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RleError>;
