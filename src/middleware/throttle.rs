//! Per-user presence sync throttle
//!
//! Bounds the write volume of the presence synchronizer: a user generating
//! many events per second still costs at most one upsert per TTL window.
//! The map is process-local and intentionally not shared across instances;
//! the upsert's conflict key is the authoritative idempotency guarantee,
//! this cache only reduces writes.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct SyncThrottle {
    ttl: Duration,
    last_sync: Mutex<HashMap<i64, Instant>>,
}

impl SyncThrottle {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            last_sync: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a sync is due for this user and, if so, record it.
    ///
    /// Check and record happen under one lock so two near-simultaneous
    /// slow paths cannot both pass; the window is consumed exactly once.
    pub fn try_acquire(&self, telegram_id: i64, now: Instant) -> bool {
        let mut last_sync = self.last_sync.lock().unwrap();
        match last_sync.get(&telegram_id) {
            Some(last) if now.saturating_duration_since(*last) < self.ttl => false,
            _ => {
                last_sync.insert(telegram_id, now);
                true
            }
        }
    }

    /// Number of users currently tracked
    pub fn tracked_users(&self) -> usize {
        self.last_sync.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn test_first_sync_allowed() {
        let throttle = SyncThrottle::new(HOUR);
        assert!(throttle.try_acquire(42, Instant::now()));
    }

    #[test]
    fn test_within_ttl_suppressed() {
        let throttle = SyncThrottle::new(HOUR);
        let base = Instant::now();

        assert!(throttle.try_acquire(42, base));
        assert!(!throttle.try_acquire(42, base + Duration::from_secs(10)));
    }

    #[test]
    fn test_after_ttl_allowed_again() {
        let throttle = SyncThrottle::new(HOUR);
        let base = Instant::now();

        assert!(throttle.try_acquire(42, base));
        assert!(throttle.try_acquire(42, base + Duration::from_secs(2 * 60 * 60)));
    }

    #[test]
    fn test_window_consumed_exactly_once() {
        let throttle = SyncThrottle::new(HOUR);
        let base = Instant::now();

        // simultaneous slow paths: only the first passes
        assert!(throttle.try_acquire(42, base));
        assert!(!throttle.try_acquire(42, base));
    }

    #[test]
    fn test_users_throttled_independently() {
        let throttle = SyncThrottle::new(HOUR);
        let base = Instant::now();

        assert!(throttle.try_acquire(1, base));
        assert!(throttle.try_acquire(2, base));
        assert!(!throttle.try_acquire(1, base + Duration::from_secs(30)));
        assert_eq!(throttle.tracked_users(), 2);
    }
}
