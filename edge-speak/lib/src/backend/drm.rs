//! `Sec-MS-GEC` token generation for the Edge speech service.

use sha2::{Digest, Sha256};

/// Seconds between 1601-01-01 (Windows epoch) and 1970-01-01.
const WIN_EPOCH_OFFSET_SECS: u64 = 11_644_473_600;

/// Tokens are valid for five minute windows.
const WINDOW_SECS: u64 = 300;

/// Windows file time counts 100 ns ticks.
const TICKS_PER_SEC: u64 = 10_000_000;

/// Computes the `Sec-MS-GEC` token for the given Unix time.
///
/// The Unix time is moved to the Windows epoch, rounded down to the start of
/// its five minute window and expressed in 100 ns ticks. The decimal tick
/// count followed by the trusted client token is hashed with SHA-256 and
/// returned as uppercase hex.
pub fn sec_ms_gec(unix_secs: u64, trusted_client_token: &str) -> String {
    let secs = unix_secs + WIN_EPOCH_OFFSET_SECS;
    let ticks = (secs - secs % WINDOW_SECS) * TICKS_PER_SEC;

    let digest = Sha256::digest(format!("{ticks}{trusted_client_token}").as_bytes());
    format!("{digest:X}")
}
