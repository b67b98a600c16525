//! Scanner configuration.
//!
//! A [`ScanConfig`] is resolved once into a [`Scanner`](crate::scanner::Scanner);
//! nothing here is consulted on the scanning hot path.

use crate::error::{ConfigError, Result};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment key selecting [`Strategy`].
pub const ENV_STRATEGY: &str = "FASTSTRLEN_STRATEGY";

/// Environment key selecting [`ChunkSize`].
pub const ENV_CHUNK_SIZE: &str = "FASTSTRLEN_CHUNK_SIZE";

/// Environment key selecting [`LaneBackend`].
pub const ENV_LANES: &str = "FASTSTRLEN_LANES";

/// Environment key selecting [`BitScan`].
pub const ENV_BIT_SCAN: &str = "FASTSTRLEN_BIT_SCAN";

/// Which scanning strategy computes the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Strategy {
    /// Machine-word bit tricks with the two-pass composite.
    #[default]
    Word,
    /// 16-byte lane compare.
    Vector,
}

/// Machine word width used by the word strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "usize", into = "usize")
)]
pub enum ChunkSize {
    /// 4-byte words, 8 words per unrolled iteration.
    Four,
    /// 8-byte words, 4 words per unrolled iteration.
    Eight,
}

/// Lane comparator used by the vector strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LaneBackend {
    /// Hardware 128-bit compare; word strategy is used where it is missing.
    #[default]
    Native,
    /// Byte-by-byte comparison producing the same lane mask.
    Portable,
}

/// Lowest-set-bit implementation used to read a lane mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum BitScan {
    /// `trailing_zeros`, usually a single instruction.
    #[default]
    Native,
    /// De Bruijn multiply and table lookup.
    Portable,
}

/// Complete scanner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScanConfig {
    pub strategy: Strategy,
    pub chunk_size: ChunkSize,
    pub lanes: LaneBackend,
    pub bit_scan: BitScan,
}

impl ChunkSize {
    /// Width matching the target's pointer size.
    pub const NATIVE: Self = if usize::BITS == 64 {
        Self::Eight
    } else {
        Self::Four
    };

    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self::NATIVE
    }
}

impl TryFrom<usize> for ChunkSize {
    type Error = ConfigError;

    fn try_from(bytes: usize) -> Result<Self> {
        match bytes {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            other => Err(ConfigError::UnsupportedChunkSize(other)),
        }
    }
}

impl From<ChunkSize> for usize {
    fn from(size: ChunkSize) -> Self {
        size.bytes()
    }
}

impl FromStr for ChunkSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes: usize = s.parse().map_err(|source| ConfigError::InvalidChunkSize {
            value: s.to_string(),
            source,
        })?;
        Self::try_from(bytes)
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "vector" => Ok(Self::Vector),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Word => "word",
            Self::Vector => "vector",
        })
    }
}

macro_rules! impl_native_portable {
    ($ty:ty, $unknown:path) => {
        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    "native" => Ok(Self::Native),
                    "portable" => Ok(Self::Portable),
                    _ => Err($unknown(s.to_string())),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    Self::Native => "native",
                    Self::Portable => "portable",
                })
            }
        }
    };
}

impl_native_portable!(LaneBackend, ConfigError::UnknownLaneBackend);
impl_native_portable!(BitScan, ConfigError::UnknownBitScan);

impl ScanConfig {
    /// Word strategy at the native chunk size.
    pub const fn word() -> Self {
        Self {
            strategy: Strategy::Word,
            chunk_size: ChunkSize::NATIVE,
            lanes: LaneBackend::Native,
            bit_scan: BitScan::Native,
        }
    }

    /// Vector strategy with native lanes and bit scan.
    pub const fn vector() -> Self {
        Self {
            strategy: Strategy::Vector,
            ..Self::word()
        }
    }

    /// Builder-style override of the chunk size.
    pub const fn with_chunk_size(mut self, chunk_size: ChunkSize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Builder-style override of the lane backend.
    pub const fn with_lanes(mut self, lanes: LaneBackend) -> Self {
        self.lanes = lanes;
        self
    }

    /// Builder-style override of the bit scan.
    pub const fn with_bit_scan(mut self, bit_scan: BitScan) -> Self {
        self.bit_scan = bit_scan;
        self
    }

    /// Load configuration from `FASTSTRLEN_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Examples
    /// ```
    /// use faststrlen::config::{ChunkSize, ScanConfig, Strategy};
    /// let config = ScanConfig::from_lookup(|key| match key {
    ///     "FASTSTRLEN_STRATEGY" => Some("vector".to_string()),
    ///     "FASTSTRLEN_CHUNK_SIZE" => Some("4".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.strategy, Strategy::Vector);
    /// assert_eq!(config.chunk_size, ChunkSize::Four);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_STRATEGY) {
            config.strategy = parse_key(ENV_STRATEGY, &value)?;
        }
        if let Some(value) = lookup(ENV_CHUNK_SIZE) {
            config.chunk_size = parse_key(ENV_CHUNK_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_LANES) {
            config.lanes = parse_key(ENV_LANES, &value)?;
        }
        if let Some(value) = lookup(ENV_BIT_SCAN) {
            config.bit_scan = parse_key(ENV_BIT_SCAN, &value)?;
        }
        Ok(config)
    }
}

fn parse_key<T>(key: &'static str, value: &str) -> Result<T>
where
    T: FromStr<Err = ConfigError>,
{
    value.parse().map_err(|e: ConfigError| e.for_key(key))
}
