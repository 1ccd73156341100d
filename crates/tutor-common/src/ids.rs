use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

static MESSAGE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Milliseconds since the Unix epoch, `0` if the clock is before it.
pub fn now_millis() -> u64 {
    since_epoch().as_millis() as u64
}

/// A fresh identifier for a chat message.
///
/// Unique within the process (monotonic counter) and across processes
/// (wall clock + pid), rendered as 32 lowercase hex characters.
pub fn new_message_id() -> String {
    let now = since_epoch();
    let counter = MESSAGE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();

    let mut h = Sha256::new();
    h.update(now.as_nanos().to_le_bytes());
    h.update(pid.to_le_bytes());
    h.update(counter.to_le_bytes());
    let digest = h.finalize();
    hex_lower(&digest[..16])
}

fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
}

fn hex_lower(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn message_ids_are_unique_hex() {
        let ids: HashSet<String> = (0..1_000).map(|_| new_message_id()).collect();
        assert_eq!(ids.len(), 1_000);
        for id in &ids {
            assert_eq!(id.len(), 32);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn hex_lower_encodes_nibbles() {
        assert_eq!(hex_lower(&[0x00, 0xab, 0x0f]), "00ab0f");
    }
}
