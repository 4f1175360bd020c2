use crate::error::RleError;
use std::fmt;
use std::str::FromStr;

/// How strictly the token stream is framed at its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RleMode {
    /// Every identical pair is closed by a run count, even a zero one, and
    /// the decoder rejects archives that stop short of the declared size.
    #[default]
    Strict,
    /// Byte-for-byte compatible with archives that omit the zero run count
    /// after a trailing pair. The decoder stops as soon as the declared size
    /// is reached and tolerates a short body.
    Legacy,
}

#[derive(Debug, Clone)]
pub struct RleConfig {
    pub mode: RleMode,
    /// Capacity of the buffered reader/writer used by the file helpers.
    pub buffer_size: usize,
}

pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            mode: RleMode::Strict,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl RleConfig {
    pub fn with_mode(mut self, mode: RleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Result<Self, RleError> {
        if buffer_size == 0 {
            return Err(RleError::ConfigError("Buffer size must be non-zero".to_string()));
        }
        self.buffer_size = buffer_size;
        Ok(self)
    }
}

impl FromStr for RleMode {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(RleMode::Strict),
            "legacy" => Ok(RleMode::Legacy),
            _ => Err(RleError::ConfigError(format!("Invalid mode: {}", s))),
        }
    }
}

impl fmt::Display for RleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RleMode::Strict => f.write_str("strict"),
            RleMode::Legacy => f.write_str("legacy"),
        }
    }
}
