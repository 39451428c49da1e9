/// Bytes the requesting half writes to ask for the peer's matrix snapshot.
pub const REQUEST_TOKEN: [u8; 3] = *b"req";

/// Width of a snapshot on the wire; little-endian.
pub const SNAPSHOT_BYTES: usize = 5;

/// How long the release of the overflow sentinel is held back, in milliseconds.
pub const SENTINEL_SETTLE_MS: u64 = 300;

pub const REPLY_TIMEOUT_MS: u64 = 20;
pub const REQUEST_WINDOW_MS: u64 = 20;
pub const DRAIN_WINDOW_MS: u64 = 1;

/// Consecutive failed exchanges before the peer half is treated as disconnected.
pub const PEER_LOST_AFTER: u16 = 50;

/// Scan cycles between toggles of the status LED.
pub const HEARTBEAT_CYCLES: u32 = 100;
