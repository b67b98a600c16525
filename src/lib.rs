//! faststrlen: word- and vector-at-a-time null terminator search.
//!
//! The word strategy tests 4- or 8-byte words with bit arithmetic; the vector
//! strategy compares 16 lanes at once. Both report the offset of the first
//! zero byte.

pub mod bitscan;
pub mod config;
pub mod error;
pub mod lanes;
pub mod scanner;
pub mod str;
pub mod vector;
pub mod view;
pub mod word;

pub use config::{BitScan, ChunkSize, LaneBackend, ScanConfig, Strategy};
pub use error::{ConfigError, Result};
pub use scanner::Scanner;
pub use crate::str::{length_bounded, length_fast, length_fast_raw, length_fast_with};
