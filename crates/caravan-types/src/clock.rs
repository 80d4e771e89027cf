use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock milliseconds since the UNIX epoch.
///
/// Record timestamps are client-authoritative and set once at creation;
/// ledger entries carry the gateway's own clock at anchoring time.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_reasonable_timestamp() {
        // After 2020-01-01 (1577836800000 ms).
        assert!(unix_millis() > 1_577_836_800_000);
    }

    #[test]
    fn is_monotonic_enough() {
        let a = unix_millis();
        let b = unix_millis();
        assert!(b >= a);
    }
}
