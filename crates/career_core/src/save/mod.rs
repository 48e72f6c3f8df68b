// Career snapshots: MessagePack + LZ4 with a SHA-256 integrity check.
// Slots, files and migrations belong to the caller.

pub mod error;
pub mod format;

pub use error::SaveError;
pub use format::{decode_snapshot, encode_snapshot, CareerSnapshot};

pub const SNAPSHOT_VERSION: u32 = 1;
