//! Temporal values and codecs
//!
//! - [`ZonedInstant`]: canonical timezone-aware value, always UTC
//! - [`TimestampCodec`]: storage-native and textual encode/decode
//! - [`calendar`]: zone-less date and date-time parsing
//!
//! Everything here is pure and safe to share across threads.

pub mod calendar;
mod codec;
mod errors;
mod instant;

pub use codec::{RawTimestamp, StorageTimestamp, TimestampCodec};
pub use errors::{TimestampError, TimestampResult};
pub use instant::ZonedInstant;
